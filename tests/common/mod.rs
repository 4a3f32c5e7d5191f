#![allow(dead_code)]

use discforge::disc::{Disc, SecondaryRoll};
use discforge::profiles::{ProfileRegistry, WeightMap, WeightProfile};
use discforge::stats::Stat;

/// Builder for Disc to keep fixtures short.
pub struct DiscBuilder {
    disc: Disc,
}

impl DiscBuilder {
    pub fn new(slot: u8) -> Self {
        Self {
            disc: Disc {
                slot,
                level: 15,
                initial_rolls: 4,
                main_stat: None,
                rolls: [SecondaryRoll::EMPTY; 4],
            },
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.disc.level = level;
        self
    }

    pub fn initial(mut self, initial_rolls: u8) -> Self {
        self.disc.initial_rolls = initial_rolls;
        self
    }

    pub fn main(mut self, stat: Stat) -> Self {
        self.disc.main_stat = Some(stat);
        self
    }

    pub fn roll(mut self, index: usize, stat: Stat, hits: u8) -> Self {
        self.disc.rolls[index] = SecondaryRoll::new(stat, hits);
        self
    }

    /// Fills rolls in order, starting at 0.
    pub fn rolls(mut self, rolls: &[(Stat, u8)]) -> Self {
        for (i, &(stat, hits)) in rolls.iter().enumerate() {
            self.disc.rolls[i] = SecondaryRoll::new(stat, hits);
        }
        self
    }

    pub fn build(self) -> Disc {
        self.disc
    }
}

pub fn weights(entries: &[(Stat, f64)]) -> WeightMap {
    entries.iter().copied().collect()
}

pub fn profile(id: &str, role: &str, entries: &[(Stat, f64)]) -> WeightProfile {
    let mut p = WeightProfile::new(id, id.to_uppercase()).with_role(role);
    p.weights = weights(entries);
    p
}

/// An attacker that values crit, ATK% and flat ATK equally.
pub fn crit_attacker_weights() -> WeightMap {
    weights(&[
        (Stat::Atk, 1.0),
        (Stat::CritRate, 1.0),
        (Stat::CritDmg, 1.0),
        (Stat::AtkPercent, 1.0),
        (Stat::Pen, 1.0),
    ])
}

/// The slot-2 disc that hits its own theoretical maximum.
pub fn perfect_slot2_disc() -> Disc {
    DiscBuilder::new(2)
        .main(Stat::Atk)
        .rolls(&[
            (Stat::CritRate, 6),
            (Stat::CritDmg, 1),
            (Stat::AtkPercent, 1),
            (Stat::Pen, 1),
        ])
        .build()
}

pub fn sample_registry() -> ProfileRegistry {
    let mut reg = ProfileRegistry::new();
    reg.insert(profile(
        "attacker",
        "強攻",
        &[
            (Stat::Atk, 1.0),
            (Stat::CritRate, 1.0),
            (Stat::CritDmg, 1.0),
            (Stat::AtkPercent, 0.8),
        ],
    ));
    reg.insert(profile(
        "anomaly",
        "異常",
        &[
            (Stat::AnomalyProficiency, 1.0),
            (Stat::AtkPercent, 1.0),
            (Stat::Atk, 0.5),
        ],
    ));
    reg.insert(profile(
        "tank",
        "防護",
        &[(Stat::DefPercent, 1.0), (Stat::Def, 0.5)],
    ));
    reg.insert(profile(
        "current",
        "強攻",
        &[
            (Stat::Atk, 1.0),
            (Stat::CritRate, 1.0),
            (Stat::CritDmg, 1.0),
            (Stat::AtkPercent, 1.0),
        ],
    ));
    reg.insert(WeightProfile::new("empty", "Empty"));
    reg
}
