use crate::consts::SCORE_EPSILON;
use crate::disc::Disc;
use crate::error::DfResult;
use crate::profiles::{ProfileRegistry, WeightProfile};
use crate::rules::repair;
use crate::scorer::{EvaluationMode, Rank, ScoreResult, Scorer};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Only keep profiles with this role.
    pub role_filter: Option<String>,
    /// Truncate after filtering. `None` keeps everything.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub profile_id: String,
    pub name: String,
    pub role: Option<String>,
    pub aggregate_score: f64,
    pub rank: Rank,
    pub contributing_pieces: usize,
}

fn scorable(scorer: &Scorer, discs: &[Disc]) -> Vec<Disc> {
    discs
        .iter()
        .map(repair)
        .filter(|d| match d.main_stat {
            Some(stat) => scorer.slots.is_eligible(d.slot, stat),
            None => false,
        })
        .collect()
}

// Ratio of sums over the pieces; `None` when no piece contributes.
fn aggregate(scorer: &Scorer, profile: &WeightProfile, pieces: &[Disc]) -> Option<(f64, usize)> {
    let weights = profile.weights_for(false);
    let mut current = 0.0;
    let mut theoretical = 0.0;
    let mut count = 0;

    for disc in pieces {
        let Ok((cur, theo)) = scorer.weighted_er(disc, weights, EvaluationMode::MaxLevel) else {
            continue;
        };
        count += 1;
        if theo > SCORE_EPSILON {
            current += cur;
            theoretical += theo;
        }
    }

    if count == 0 {
        return None;
    }
    let score = if theoretical > SCORE_EPSILON {
        (current / theoretical * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    Some((score, count))
}

/// Scores a set of discs against every profile except `exclude_id` and
/// returns the best fits, highest score first.
pub fn recommend(
    scorer: &Scorer,
    registry: &ProfileRegistry,
    discs: &[Disc],
    exclude_id: Option<&str>,
    options: &RecommendOptions,
) -> Vec<Recommendation> {
    let pieces = scorable(scorer, discs);
    if pieces.is_empty() {
        debug!("Recommend: no scorable pieces");
        return Vec::new();
    }

    let mut out: Vec<Recommendation> = registry
        .iter()
        .filter(|p| Some(p.id.as_str()) != exclude_id)
        .filter(|p| !p.weights_for(false).is_empty())
        .filter_map(|p| {
            let (score, count) = aggregate(scorer, p, &pieces)?;
            Some(Recommendation {
                profile_id: p.id.clone(),
                name: p.name.clone(),
                role: p.role.clone(),
                aggregate_score: score,
                rank: Rank::for_score(score),
                contributing_pieces: count,
            })
        })
        .collect();

    out.sort_by(|a, b| {
        b.aggregate_score
            .partial_cmp(&a.aggregate_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.profile_id.cmp(&b.profile_id))
    });

    if let Some(role) = options.role_filter.as_deref() {
        out.retain(|r| r.role.as_deref() == Some(role));
    }
    if let Some(limit) = options.limit {
        out.truncate(limit);
    }

    debug!("Recommend: {} candidates after filtering", out.len());
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceBreakdown {
    pub slot: u8,
    /// `None` when the piece was skipped (no or ineligible main stat).
    pub result: Option<ScoreResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileBreakdown {
    pub profile_id: String,
    pub name: String,
    pub pieces: Vec<PieceBreakdown>,
    pub average: f64,
    pub rank: Rank,
}

/// Per-piece detail for one candidate, using the same weights and level as
/// [`recommend`].
pub fn profile_breakdown(
    scorer: &Scorer,
    profile: &WeightProfile,
    discs: &[Disc],
) -> DfResult<ProfileBreakdown> {
    let weights = profile.weights_for(false);
    let mut pieces = Vec::with_capacity(discs.len());

    for disc in discs {
        let eligible = disc
            .main_stat
            .is_some_and(|s| scorer.slots.is_eligible(disc.slot, s));
        let result = if eligible {
            Some(scorer.score_piece(disc, weights, EvaluationMode::MaxLevel)?)
        } else {
            None
        };
        pieces.push(PieceBreakdown {
            slot: disc.slot,
            result,
        });
    }

    let scored: Vec<f64> = pieces
        .iter()
        .filter_map(|p| p.result.as_ref().map(|r| r.score))
        .collect();
    let average = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };

    Ok(ProfileBreakdown {
        profile_id: profile.id.clone(),
        name: profile.name.clone(),
        pieces,
        average,
        rank: Rank::for_score(average),
    })
}
