use crate::consts::{MAX_HITS_PER_ROLL, MAX_LEVEL, ROLL_COUNT, SLOT_COUNT};
use crate::growth::clamp_level;
use crate::stats::{normalize, Stat, StatKey};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One secondary stat position. `hits` counts the initial roll plus every
/// upgrade that landed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryRoll {
    pub stat: Option<Stat>,
    pub hits: u8,
}

impl SecondaryRoll {
    pub const EMPTY: SecondaryRoll = SecondaryRoll { stat: None, hits: 1 };

    pub fn new(stat: Stat, hits: u8) -> Self {
        Self {
            stat: Some(stat),
            hits,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.stat.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for SecondaryRoll {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// An equipment piece in one of the six slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disc {
    pub slot: u8,
    pub level: u8,
    pub initial_rolls: u8,
    pub main_stat: Option<Stat>,
    pub rolls: [SecondaryRoll; ROLL_COUNT],
}

impl Disc {
    pub fn new(slot: u8, level: u8, initial_rolls: u8, main_stat: Option<Stat>) -> Self {
        Self {
            slot: slot.clamp(1, SLOT_COUNT),
            level: clamp_level(level),
            initial_rolls: initial_rolls.clamp(3, 4),
            main_stat,
            rolls: [SecondaryRoll::EMPTY; ROLL_COUNT],
        }
    }

    /// Sets roll `index`; out-of-range indices are ignored.
    pub fn with_roll(mut self, index: usize, stat: Stat, hits: u8) -> Self {
        if let Some(roll) = self.rolls.get_mut(index) {
            *roll = SecondaryRoll::new(stat, hits);
        }
        self
    }

    pub fn assigned_rolls(&self) -> impl Iterator<Item = (usize, &SecondaryRoll)> {
        self.rolls.iter().enumerate().filter(|(_, r)| r.is_assigned())
    }

    /// Total extra hits currently spent across all assigned rolls.
    pub fn spent_upgrades(&self) -> u32 {
        self.assigned_rolls()
            .map(|(_, r)| r.hits.saturating_sub(1) as u32)
            .sum()
    }

    pub fn from_record(record: &DiscRecord) -> Self {
        let slot = record.slot.clamp(1, SLOT_COUNT as i64) as u8;
        let level = u8::try_from(record.level)
            .map(clamp_level)
            .unwrap_or(MAX_LEVEL);
        let initial_rolls = record.initial_rolls.clamp(3, 4) as u8;

        let main_stat = parse_stat_field(record.main_stat.as_deref(), slot, "main stat");

        let mut disc = Disc::new(slot, level, initial_rolls, main_stat);

        if record.sub_stats.len() > ROLL_COUNT {
            warn!(
                "Disc {}: ignoring {} extra secondary rolls",
                slot,
                record.sub_stats.len() - ROLL_COUNT
            );
        }
        for (roll, rec) in disc.rolls.iter_mut().zip(record.sub_stats.iter()) {
            roll.stat = parse_stat_field(rec.stat.as_deref(), slot, "secondary stat");
            roll.hits = rec.hits.clamp(1, MAX_HITS_PER_ROLL as i64) as u8;
        }
        disc
    }

    pub fn to_record(&self) -> DiscRecord {
        DiscRecord {
            slot: self.slot as i64,
            level: self.level as i64,
            initial_rolls: self.initial_rolls as i64,
            main_stat: self.main_stat.map(|s| s.canonical_name()),
            sub_stats: self
                .rolls
                .iter()
                .map(|r| SubStatRecord {
                    stat: r.stat.map(|s| s.canonical_name()),
                    hits: r.hits as i64,
                })
                .collect(),
        }
    }
}

fn parse_stat_field(raw: Option<&str>, slot: u8, what: &str) -> Option<Stat> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match normalize(raw) {
        StatKey::Known(stat) => Some(stat),
        StatKey::Unrecognized(name) => {
            warn!("Disc {}: unknown {} '{}', leaving unassigned", slot, what, name);
            None
        }
    }
}

/// Persisted, string-keyed form of a [`Disc`]. Numbers are kept wide so that
/// out-of-range input survives deserialization and gets clamped instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscRecord {
    pub slot: i64,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default = "default_initial_rolls")]
    pub initial_rolls: i64,
    #[serde(default)]
    pub main_stat: Option<String>,
    #[serde(default)]
    pub sub_stats: Vec<SubStatRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubStatRecord {
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default = "default_hits")]
    pub hits: i64,
}

fn default_level() -> i64 {
    MAX_LEVEL as i64
}

fn default_initial_rolls() -> i64 {
    ROLL_COUNT as i64
}

fn default_hits() -> i64 {
    1
}
