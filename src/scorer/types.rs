use crate::stats::Stat;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Level at which the theoretical maximum is computed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EvaluationMode {
    /// Against what the piece can reach right now.
    CurrentLevel,
    /// Against its level-15 end state.
    #[default]
    MaxLevel,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
pub enum Rank {
    SSS,
    SS,
    S,
    A,
    B,
    C,
}

impl Rank {
    pub fn for_score(score: f64) -> Self {
        if score >= 95.0 {
            Self::SSS
        } else if score >= 90.0 {
            Self::SS
        } else if score >= 85.0 {
            Self::S
        } else if score >= 75.0 {
            Self::A
        } else if score >= 65.0 {
            Self::B
        } else {
            Self::C
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SSS => "Theoretical-max class",
            Self::SS => "Fully curated",
            Self::S => "Very strong",
            Self::A => "Good compromise",
            Self::B => "Usable as a stopgap",
            Self::C => "Salvage for materials",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreStatus {
    Scored,
    /// The weight mapping was empty; nothing to score against.
    NoData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContributionSource {
    Main,
    Roll(usize),
}

/// One term of the score, already expressed in score points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub source: ContributionSource,
    pub stat: Option<Stat>,
    /// ER for the main stat, hits for a roll.
    pub effective_rolls: f64,
    pub weight: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub rank: Rank,
    pub status: ScoreStatus,
    pub contributions: Vec<Contribution>,
    pub current_weighted_er: f64,
    pub theoretical_max_weighted_er: f64,
}

impl ScoreResult {
    pub fn no_data() -> Self {
        Self {
            score: 0.0,
            rank: Rank::C,
            status: ScoreStatus::NoData,
            contributions: Vec::new(),
            current_weighted_er: 0.0,
            theoretical_max_weighted_er: 0.0,
        }
    }

    pub fn contribution_sum(&self) -> f64 {
        self.contributions.iter().map(|c| c.points).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetScore {
    pub pieces: Vec<ScoreResult>,
    pub average: f64,
    pub rank: Rank,
}
