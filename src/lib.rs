pub mod api;
pub mod config;
pub mod consts;
pub mod disc;
pub mod er;
pub mod error;
pub mod growth;
pub mod profiles;
pub mod recommender;
pub mod rules;
pub mod scorer;
pub mod stats;

pub use disc::{Disc, DiscRecord, SecondaryRoll};
pub use error::{DfResult, DiscForgeError};
pub use profiles::{ProfileRegistry, WeightProfile};
pub use rules::{deduplicate, reconcile};
pub use scorer::{EvaluationMode, Rank, ScoreResult, Scorer};
pub use stats::{normalize, Stat, StatKey};
