use crate::consts::CHECKPOINT_LEVELS;
use crate::growth::{checkpoint_index, GrowthTables};
use crate::stats::Stat;
use std::collections::BTreeMap;

const LEVELS: usize = CHECKPOINT_LEVELS.len();

#[inline(always)]
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Effective Rolls: a main stat's value expressed as a number of secondary
/// hits of the same stat. Everything is computed once in [`ErTable::build`];
/// lookups afterwards are plain map reads.
#[derive(Debug, Clone)]
pub struct ErTable {
    per_hit: BTreeMap<Stat, f64>,
    main_values: BTreeMap<Stat, [f64; LEVELS]>,
    er_values: BTreeMap<Stat, [f64; LEVELS]>,
}

impl ErTable {
    pub fn build(tables: &GrowthTables) -> Self {
        let reference = tables.elemental_step_reference();
        let reference_step = tables.sub_step(reference).map(|s| s.per_step);

        let mut per_hit = BTreeMap::new();
        for stat in Stat::all() {
            let step = if stat.is_elemental() {
                reference_step
            } else {
                tables.sub_step(stat).map(|s| s.per_step)
            };
            // No sub-stat counterpart: one hit is worth one point.
            per_hit.insert(stat, step.unwrap_or(1.0));
        }

        let mut main_values = BTreeMap::new();
        let mut er_values = BTreeMap::new();
        for stat in tables.main_stats() {
            let Some(curve) = tables.main_curve(stat) else {
                continue;
            };
            let hit = per_hit.get(&stat).copied().unwrap_or(1.0);

            let mut values = [0.0; LEVELS];
            let mut ers = [0.0; LEVELS];
            for (i, &level) in CHECKPOINT_LEVELS.iter().enumerate() {
                values[i] = curve.value_at(level);
                ers[i] = if hit > 0.0 {
                    round1(values[i] / hit)
                } else {
                    0.0
                };
            }
            main_values.insert(stat, values);
            er_values.insert(stat, ers);
        }

        Self {
            per_hit,
            main_values,
            er_values,
        }
    }

    /// Value of one secondary hit of `stat`.
    pub fn sub_stat_per_hit(&self, stat: Stat) -> f64 {
        self.per_hit.get(&stat).copied().unwrap_or(1.0)
    }

    /// Main stat value at `level`; 0 when the stat has no curve.
    pub fn main_stat_value_at(&self, stat: Stat, level: u8) -> f64 {
        self.main_values
            .get(&stat)
            .map(|v| v[checkpoint_index(level)])
            .unwrap_or(0.0)
    }

    /// ER of `stat` as a main stat at `level`, rounded to one decimal.
    pub fn er_value(&self, stat: Stat, level: u8) -> f64 {
        self.er_values
            .get(&stat)
            .map(|v| v[checkpoint_index(level)])
            .unwrap_or(0.0)
    }

    pub fn has_main_curve(&self, stat: Stat) -> bool {
        self.main_values.contains_key(&stat)
    }
}

impl Default for ErTable {
    fn default() -> Self {
        Self::build(&GrowthTables::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Element;

    #[test]
    fn test_elemental_uses_percent_reference() {
        let er = ErTable::default();
        let fire = Stat::ElementalDmg(Element::Fire);
        assert_eq!(er.sub_stat_per_hit(fire), 3.0);
        assert_eq!(er.er_value(fire, 15), 10.0);
    }

    #[test]
    fn test_missing_curve_is_zero() {
        let er = ErTable::default();
        assert_eq!(er.er_value(Stat::Pen, 15), 0.0);
        assert_eq!(er.main_stat_value_at(Stat::Pen, 15), 0.0);
    }
}
