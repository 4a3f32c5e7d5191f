pub mod loader;

use crate::consts::{CHECKPOINT_LEVELS, CURVE_TOLERANCE};
use crate::error::{DfResult, DiscForgeError};
use crate::stats::{Element, Stat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index into [`CHECKPOINT_LEVELS`]. Anything that is not a checkpoint is
/// treated as max level.
#[inline(always)]
pub fn checkpoint_index(level: u8) -> usize {
    CHECKPOINT_LEVELS
        .iter()
        .position(|&l| l == level)
        .unwrap_or(CHECKPOINT_LEVELS.len() - 1)
}

/// Snaps a raw level onto the checkpoint grid (non-checkpoints become 15).
#[inline(always)]
pub fn clamp_level(level: u8) -> u8 {
    CHECKPOINT_LEVELS[checkpoint_index(level)]
}

/// Growth of a main stat: value at level 0 plus one increment per checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainStatCurve {
    pub initial: f64,
    pub increments: [f64; 5],
    pub max: f64,
}

impl MainStatCurve {
    pub fn new(initial: f64, increments: [f64; 5], max: f64) -> Self {
        Self {
            initial,
            increments,
            max,
        }
    }

    /// Value at `level`. Level 15 reads `max` directly so rounding in the
    /// increments never leaks into the end-state value.
    pub fn value_at(&self, level: u8) -> f64 {
        let idx = checkpoint_index(level);
        if idx == CHECKPOINT_LEVELS.len() - 1 {
            return self.max;
        }
        self.initial + self.increments[..idx].iter().sum::<f64>()
    }

    pub fn validate(&self, name: &str) -> DfResult<()> {
        let values = std::iter::once(self.initial)
            .chain(self.increments.iter().copied())
            .chain(std::iter::once(self.max));
        for v in values {
            if !v.is_finite() || v < 0.0 {
                return Err(DiscForgeError::Validation(format!(
                    "Main stat curve '{}' has an invalid value: {}",
                    name, v
                )));
            }
        }

        let summed = self.initial + self.increments.iter().sum::<f64>();
        if (summed - self.max).abs() > CURVE_TOLERANCE {
            return Err(DiscForgeError::Validation(format!(
                "Main stat curve '{}': initial + increments = {} but max = {}",
                name, summed, self.max
            )));
        }
        Ok(())
    }
}

/// Flat per-hit value of a sub stat. `initial` and `per_step` are the same
/// number: a fresh roll is exactly one hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubStatStep {
    pub initial: f64,
    pub per_step: f64,
}

impl SubStatStep {
    pub fn new(per_step: f64) -> Self {
        Self {
            initial: per_step,
            per_step,
        }
    }

    pub fn validate(&self, name: &str) -> DfResult<()> {
        if !self.per_step.is_finite() || self.per_step < 0.0 {
            return Err(DiscForgeError::Validation(format!(
                "Sub stat '{}' has an invalid step: {}",
                name, self.per_step
            )));
        }
        if (self.initial - self.per_step).abs() > CURVE_TOLERANCE {
            return Err(DiscForgeError::Validation(format!(
                "Sub stat '{}': initial {} differs from per-step {}",
                name, self.initial, self.per_step
            )));
        }
        Ok(())
    }
}

/// Static growth data. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct GrowthTables {
    main: BTreeMap<Stat, MainStatCurve>,
    elemental: Option<MainStatCurve>,
    sub: BTreeMap<Stat, SubStatStep>,
    elemental_step_reference: Stat,
}

impl GrowthTables {
    pub fn new(
        main: BTreeMap<Stat, MainStatCurve>,
        elemental: Option<MainStatCurve>,
        sub: BTreeMap<Stat, SubStatStep>,
    ) -> DfResult<Self> {
        for (stat, curve) in &main {
            if stat.is_elemental() {
                return Err(DiscForgeError::Validation(format!(
                    "Elemental stat '{}' must use the shared elemental curve",
                    stat
                )));
            }
            curve.validate(&stat.canonical_name())?;
        }
        if let Some(curve) = &elemental {
            curve.validate("Elemental Damage%")?;
        }
        for (stat, step) in &sub {
            step.validate(&stat.canonical_name())?;
        }

        Ok(Self {
            main,
            elemental,
            sub,
            elemental_step_reference: Stat::HpPercent,
        })
    }

    /// Elemental damage has no sub-stat counterpart; its ER is measured in
    /// hits of this percentage sub stat instead.
    pub fn with_elemental_step_reference(mut self, stat: Stat) -> Self {
        self.elemental_step_reference = stat;
        self
    }

    /// The tables shipped with the game's S-rank discs.
    pub fn standard() -> Self {
        let mut main = BTreeMap::new();
        main.insert(Stat::Hp, MainStatCurve::new(550.0, [330.0; 5], 2200.0));
        main.insert(Stat::HpPercent, MainStatCurve::new(7.5, [4.5; 5], 30.0));
        main.insert(
            Stat::Atk,
            MainStatCurve::new(79.0, [47.0, 47.0, 48.0, 47.0, 48.0], 316.0),
        );
        main.insert(Stat::AtkPercent, MainStatCurve::new(7.5, [4.5; 5], 30.0));
        main.insert(
            Stat::Def,
            MainStatCurve::new(46.0, [27.0, 28.0, 27.0, 28.0, 28.0], 184.0),
        );
        main.insert(Stat::DefPercent, MainStatCurve::new(12.0, [7.2; 5], 48.0));
        main.insert(Stat::CritRate, MainStatCurve::new(6.0, [3.6; 5], 24.0));
        main.insert(Stat::CritDmg, MainStatCurve::new(12.0, [7.2; 5], 48.0));
        main.insert(
            Stat::AnomalyProficiency,
            MainStatCurve::new(23.0, [13.0, 14.0, 14.0, 14.0, 14.0], 92.0),
        );
        main.insert(Stat::PenRatio, MainStatCurve::new(6.0, [3.6; 5], 24.0));
        main.insert(Stat::AnomalyMastery, MainStatCurve::new(7.5, [4.5; 5], 30.0));
        main.insert(Stat::EnergyRegen, MainStatCurve::new(15.0, [9.0; 5], 60.0));
        main.insert(Stat::Impact, MainStatCurve::new(4.5, [2.7; 5], 18.0));

        let elemental = MainStatCurve::new(7.5, [4.5; 5], 30.0);

        let mut sub = BTreeMap::new();
        sub.insert(Stat::Hp, SubStatStep::new(112.0));
        sub.insert(Stat::HpPercent, SubStatStep::new(3.0));
        sub.insert(Stat::Atk, SubStatStep::new(19.0));
        sub.insert(Stat::AtkPercent, SubStatStep::new(3.0));
        sub.insert(Stat::Def, SubStatStep::new(15.0));
        sub.insert(Stat::DefPercent, SubStatStep::new(4.8));
        sub.insert(Stat::CritRate, SubStatStep::new(2.4));
        sub.insert(Stat::CritDmg, SubStatStep::new(4.8));
        sub.insert(Stat::AnomalyProficiency, SubStatStep::new(9.0));
        sub.insert(Stat::Pen, SubStatStep::new(9.0));

        Self {
            main,
            elemental: Some(elemental),
            sub,
            elemental_step_reference: Stat::HpPercent,
        }
    }

    /// Curve for a main stat; every element shares one curve.
    pub fn main_curve(&self, stat: Stat) -> Option<&MainStatCurve> {
        match stat {
            Stat::ElementalDmg(_) => self.elemental.as_ref(),
            other => self.main.get(&other),
        }
    }

    pub fn sub_step(&self, stat: Stat) -> Option<&SubStatStep> {
        self.sub.get(&stat)
    }

    /// Stats that can appear as secondary rolls.
    pub fn sub_stats(&self) -> impl Iterator<Item = Stat> + '_ {
        self.sub.keys().copied()
    }

    /// Stats that have a main curve, with every element expanded.
    pub fn main_stats(&self) -> Vec<Stat> {
        let mut out: Vec<Stat> = self.main.keys().copied().collect();
        if self.elemental.is_some() {
            out.extend(
                <Element as strum::IntoEnumIterator>::iter().map(Stat::ElementalDmg),
            );
        }
        out
    }

    pub fn elemental_step_reference(&self) -> Stat {
        self.elemental_step_reference
    }
}

impl Default for GrowthTables {
    fn default() -> Self {
        Self::standard()
    }
}
