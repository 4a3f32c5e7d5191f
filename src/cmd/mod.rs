pub mod recommend;
pub mod score;

use discforge::disc::{Disc, DiscRecord};
use discforge::error::DfResult;
use std::fs;

/// Reads a JSON array of disc records.
pub fn load_discs(path: &str) -> DfResult<Vec<Disc>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<DiscRecord> = serde_json::from_str(&content)?;
    Ok(records.iter().map(Disc::from_record).collect())
}
