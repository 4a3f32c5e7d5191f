use crate::consts::{LEVELS_PER_UPGRADE, MAX_HITS_PER_ROLL, ROLL_COUNT, SLOT_COUNT};
use crate::disc::{Disc, SecondaryRoll};
use crate::er::ErTable;
use crate::growth::clamp_level;
use crate::stats::{Element, Stat};
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Which main stats each slot may carry.
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: [Vec<Stat>; SLOT_COUNT as usize],
}

impl SlotTable {
    pub fn standard() -> Self {
        let common = [Stat::HpPercent, Stat::AtkPercent, Stat::DefPercent];

        let mut slot4 = common.to_vec();
        slot4.extend([
            Stat::CritRate,
            Stat::CritDmg,
            Stat::AnomalyProficiency,
        ]);

        let mut slot5 = common.to_vec();
        slot5.extend(Element::iter().map(Stat::ElementalDmg));
        slot5.push(Stat::PenRatio);

        let mut slot6 = common.to_vec();
        slot6.extend([Stat::AnomalyMastery, Stat::EnergyRegen, Stat::Impact]);

        Self {
            slots: [
                vec![Stat::Hp],
                vec![Stat::Atk],
                vec![Stat::Def],
                slot4,
                slot5,
                slot6,
            ],
        }
    }

    /// Eligible main stats for `slot`; out-of-range slots are clamped to 1..=6.
    pub fn eligible_main_stats(&self, slot: u8) -> &[Stat] {
        let idx = slot.clamp(1, SLOT_COUNT) as usize - 1;
        &self.slots[idx]
    }

    pub fn is_eligible(&self, slot: u8, stat: Stat) -> bool {
        self.eligible_main_stats(slot).contains(&stat)
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Upgrades available at `level`. A 3-roll piece spends its first upgrade
/// unlocking the fourth roll.
///
/// `level` is snapped to the checkpoint grid first, so a non-checkpoint level
/// (7, 20, ...) gets the level-15 budget, the same as for ER lookups.
pub fn max_upgrade_steps(level: u8, initial_rolls: u8) -> u8 {
    let steps = clamp_level(level) / LEVELS_PER_UPGRADE;
    if initial_rolls <= 3 {
        steps.saturating_sub(1)
    } else {
        steps
    }
}

pub fn max_total_hits(level: u8, initial_rolls: u8) -> u8 {
    initial_rolls.clamp(3, 4) + max_upgrade_steps(level, initial_rolls)
}

/// How many rolls can be filled at this level.
pub fn unlocked_rolls(level: u8, initial_rolls: u8) -> usize {
    if initial_rolls <= 3 && clamp_level(level) < LEVELS_PER_UPGRADE {
        3
    } else {
        ROLL_COUNT
    }
}

/// Upgrades roll `index` could still take, given what the others already use.
pub fn remaining_upgrades(disc: &Disc, index: usize) -> u8 {
    let budget = max_upgrade_steps(disc.level, disc.initial_rolls) as u32;
    let others: u32 = disc
        .assigned_rolls()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r.hits.saturating_sub(1) as u32)
        .sum();
    let own = disc
        .rolls
        .get(index)
        .map(|r| r.hits.saturating_sub(1) as u32)
        .unwrap_or(0);
    let per_roll_room = (MAX_HITS_PER_ROLL as u32 - 1).saturating_sub(own);
    budget
        .saturating_sub(others + own)
        .min(per_roll_room) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Adjustment {
    /// Hits outside 1..=6 were pulled back into range.
    HitsClamped { index: usize, from: u8, to: u8 },
    /// Hits were cut to fit the level's upgrade budget.
    HitsTrimmed { index: usize, from: u8, to: u8 },
    /// More rolls were filled than the piece has unlocked.
    RollLocked { index: usize, stat: Stat },
    /// A roll repeated the main stat or an earlier roll.
    DuplicateCleared { index: usize, stat: Stat },
}

/// Everything a repair pass changed. Empty means the piece was already valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub adjustments: Vec<Adjustment>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.adjustments.is_empty()
    }

    pub fn was_trimmed(&self) -> bool {
        self.adjustments
            .iter()
            .any(|a| matches!(a, Adjustment::HitsTrimmed { .. }))
    }

    fn merge(&mut self, other: RepairReport) {
        self.adjustments.extend(other.adjustments);
    }
}

/// Brings hit counts back within the budget. See [`reconcile`].
pub fn reconcile_with_report(disc: &Disc) -> (Disc, RepairReport) {
    let mut out = disc.clone();
    let mut report = RepairReport::default();

    // Over capacity: drop the surplus filled rolls, last position first.
    let capacity = unlocked_rolls(out.level, out.initial_rolls);
    let mut filled = out.assigned_rolls().count();
    for index in (0..ROLL_COUNT).rev() {
        if filled <= capacity {
            break;
        }
        if let Some(stat) = out.rolls[index].stat {
            report.adjustments.push(Adjustment::RollLocked { index, stat });
            out.rolls[index].clear();
            filled -= 1;
        }
    }

    for (index, roll) in out.rolls.iter_mut().enumerate() {
        let to = if roll.is_assigned() {
            roll.hits.clamp(1, MAX_HITS_PER_ROLL)
        } else {
            1
        };
        if roll.hits != to {
            if roll.is_assigned() {
                report.adjustments.push(Adjustment::HitsClamped {
                    index,
                    from: roll.hits,
                    to,
                });
            }
            roll.hits = to;
        }
    }

    let budget = max_upgrade_steps(out.level, out.initial_rolls) as u32;
    let before = out.rolls;
    let mut excess = out.spent_upgrades().saturating_sub(budget);
    if excess > 0 {
        // Stable sort: ties keep the lower index first.
        let mut order: Vec<usize> = (0..ROLL_COUNT)
            .filter(|&i| out.rolls[i].is_assigned())
            .collect();
        order.sort_by(|&a, &b| out.rolls[b].hits.cmp(&out.rolls[a].hits));

        for index in order {
            if excess == 0 {
                break;
            }
            let roll = &mut out.rolls[index];
            let cut = excess.min(roll.hits.saturating_sub(1) as u32);
            roll.hits -= cut as u8;
            excess -= cut;
        }
    }

    for (index, (old, new)) in before.iter().zip(out.rolls.iter()).enumerate() {
        if old.hits != new.hits {
            report.adjustments.push(Adjustment::HitsTrimmed {
                index,
                from: old.hits,
                to: new.hits,
            });
        }
    }

    if report.was_trimmed() {
        debug!(
            "Reconcile: slot {} trimmed to {} upgrades at level {}",
            out.slot, budget, out.level
        );
    }
    (out, report)
}

/// Trims hits until `Σ(hits - 1) <= max_upgrade_steps`. Rolls are visited
/// from most to fewest hits (ties go to the lowest index) and each one gives
/// up as much of the excess as it can before the next is touched. Idempotent.
pub fn reconcile(disc: &Disc) -> Disc {
    reconcile_with_report(disc).0
}

/// Clears rolls that repeat the main stat or an earlier roll.
pub fn deduplicate_with_report(disc: &Disc) -> (Disc, RepairReport) {
    let mut out = disc.clone();
    let mut report = RepairReport::default();
    let mut seen: Vec<Stat> = out.main_stat.into_iter().collect();

    for (index, roll) in out.rolls.iter_mut().enumerate() {
        let Some(stat) = roll.stat else {
            continue;
        };
        if seen.contains(&stat) {
            report
                .adjustments
                .push(Adjustment::DuplicateCleared { index, stat });
            *roll = SecondaryRoll::EMPTY;
        } else {
            seen.push(stat);
        }
    }
    (out, report)
}

pub fn deduplicate(disc: &Disc) -> Disc {
    deduplicate_with_report(disc).0
}

/// Deduplicate, then reconcile. Run before any score is computed.
pub fn repair_with_report(disc: &Disc) -> (Disc, RepairReport) {
    let (deduped, mut report) = deduplicate_with_report(disc);
    let (reconciled, second) = reconcile_with_report(&deduped);
    report.merge(second);
    (reconciled, report)
}

pub fn repair(disc: &Disc) -> Disc {
    repair_with_report(disc).0
}

/// Value shown for `hits` hits of a secondary stat.
pub fn roll_value(er: &ErTable, stat: Stat, hits: u8) -> f64 {
    er.sub_stat_per_hit(stat) * hits as f64
}

/// Converts a typed value into the nearest hit count for roll `index`,
/// capped by the per-roll maximum and the piece's remaining budget.
/// `None` when the roll has no stat or the stat has no step.
pub fn hits_for_value(er: &ErTable, disc: &Disc, index: usize, value: f64) -> Option<u8> {
    let stat = disc.rolls.get(index)?.stat?;
    let per_hit = er.sub_stat_per_hit(stat);
    if per_hit <= 0.0 || !value.is_finite() {
        return None;
    }

    let mut hits = (value / per_hit).round().clamp(1.0, MAX_HITS_PER_ROLL as f64) as u8;

    let budget = max_upgrade_steps(disc.level, disc.initial_rolls) as u32;
    let others: u32 = disc
        .assigned_rolls()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r.hits.saturating_sub(1) as u32)
        .sum();
    if others + (hits as u32 - 1) > budget {
        hits = (budget.saturating_sub(others) + 1) as u8;
    }
    Some(hits)
}

/// `12.0%` for percentage stats, `316` for flat ones.
pub fn format_stat_value(stat: Stat, value: f64) -> String {
    if stat.is_percentage() {
        format!("{:.1}%", value)
    } else {
        format!("{}", value.round() as i64)
    }
}

/// How desirable a roll is for a profile, bucketed by its weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum ValueTier {
    Gold,
    Purple,
    Blue,
    Green,
    Gray,
}

impl ValueTier {
    pub fn for_weight(weight: f64) -> Self {
        if weight >= 0.95 {
            Self::Gold
        } else if weight >= 0.8 {
            Self::Purple
        } else if weight >= 0.6 {
            Self::Blue
        } else if weight >= 0.3 {
            Self::Green
        } else {
            Self::Gray
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_table() {
        assert_eq!(max_upgrade_steps(15, 4), 5);
        assert_eq!(max_upgrade_steps(15, 3), 4);
        assert_eq!(max_upgrade_steps(0, 3), 0);
        assert_eq!(max_total_hits(15, 4), 9);
        assert_eq!(max_total_hits(0, 3), 3);
    }

    #[test]
    fn test_reconcile_tie_breaks_low_index() {
        let disc = Disc::new(4, 3, 4, Some(Stat::CritRate))
            .with_roll(0, Stat::AtkPercent, 2)
            .with_roll(1, Stat::CritDmg, 2)
            .with_roll(2, Stat::Atk, 1)
            .with_roll(3, Stat::Pen, 1);
        let fixed = reconcile(&disc);
        assert_eq!(fixed.rolls[0].hits, 1);
        assert_eq!(fixed.rolls[1].hits, 2);
    }

    #[test]
    fn test_format_stat_value() {
        assert_eq!(format_stat_value(Stat::CritRate, 9.6), "9.6%");
        assert_eq!(format_stat_value(Stat::Atk, 56.6), "57");
    }
}
