pub mod builder;
pub mod engine;
pub mod types;

pub use self::builder::ScorerBuilder;
pub use self::types::{
    Contribution, ContributionSource, EvaluationMode, Rank, ScoreResult, ScoreStatus, SetScore,
};
use crate::disc::Disc;
use crate::er::ErTable;
use crate::error::DfResult;
use crate::growth::GrowthTables;
use crate::profiles::WeightMap;
use crate::rules::SlotTable;

/// Immutable scoring context. Build once, share by reference.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub tables: GrowthTables,
    pub er: ErTable,
    pub slots: SlotTable,
}

impl Scorer {
    /// Scorer over the built-in growth and slot tables.
    pub fn standard() -> Self {
        ScorerBuilder::new().build()
    }

    pub fn score_piece(
        &self,
        disc: &Disc,
        weights: &WeightMap,
        mode: EvaluationMode,
    ) -> DfResult<ScoreResult> {
        engine::score_piece(self, disc, weights, mode)
    }

    pub fn score_set(
        &self,
        discs: &[Disc],
        weights: &WeightMap,
        mode: EvaluationMode,
    ) -> DfResult<SetScore> {
        engine::score_set(self, discs, weights, mode)
    }

    /// `(current, theoretical)` weighted ER of a repaired copy of `disc`.
    pub fn weighted_er(
        &self,
        disc: &Disc,
        weights: &WeightMap,
        mode: EvaluationMode,
    ) -> DfResult<(f64, f64)> {
        engine::weighted_er(self, disc, weights, mode)
    }
}
