use super::types::{
    Contribution, ContributionSource, EvaluationMode, Rank, ScoreResult, ScoreStatus, SetScore,
};
use super::Scorer;
use crate::consts::{MAX_LEVEL, SCORE_EPSILON};
use crate::disc::Disc;
use crate::error::{DfResult, DiscForgeError};
use crate::profiles::{weight_of, WeightMap};
use crate::rules::{max_total_hits, repair};
use crate::stats::Stat;

fn eval_level(disc: &Disc, mode: EvaluationMode) -> u8 {
    match mode {
        EvaluationMode::CurrentLevel => disc.level,
        EvaluationMode::MaxLevel => MAX_LEVEL,
    }
}

/// Highest weight among stats that can roll as secondaries, capped at 1.
pub fn best_sub_weight(scorer: &Scorer, weights: &WeightMap) -> f64 {
    scorer
        .tables
        .sub_stats()
        .map(|s| weight_of(weights, s))
        .fold(0.0, f64::max)
        .min(1.0)
}

/// Best weighted ER any eligible main stat reaches at `level`.
pub fn best_main_weighted(scorer: &Scorer, slot: u8, level: u8, weights: &WeightMap) -> f64 {
    scorer
        .slots
        .eligible_main_stats(slot)
        .iter()
        .map(|&s| scorer.er.er_value(s, level) * weight_of(weights, s))
        .fold(0.0, f64::max)
}

/// Denominator: best main plus every possible hit on the best sub stat.
pub fn theoretical_max(
    scorer: &Scorer,
    slot: u8,
    initial_rolls: u8,
    level: u8,
    weights: &WeightMap,
) -> f64 {
    best_main_weighted(scorer, slot, level, weights)
        + max_total_hits(level, initial_rolls) as f64 * best_sub_weight(scorer, weights)
}

struct Terms {
    main_stat: Stat,
    main: (f64, f64),
    rolls: Vec<(Option<Stat>, f64, f64)>,
    current: f64,
    theoretical: f64,
}

// Expects a repaired disc.
fn compute_terms(
    scorer: &Scorer,
    disc: &Disc,
    weights: &WeightMap,
    mode: EvaluationMode,
) -> DfResult<Terms> {
    let main_stat = disc
        .main_stat
        .ok_or(DiscForgeError::MissingMainStat { slot: disc.slot })?;

    let main_er = scorer.er.er_value(main_stat, disc.level);
    let main = (main_er, weight_of(weights, main_stat));

    let rolls: Vec<(Option<Stat>, f64, f64)> = disc
        .rolls
        .iter()
        .map(|r| match r.stat {
            Some(stat) => (Some(stat), r.hits as f64, weight_of(weights, stat)),
            None => (None, 0.0, 0.0),
        })
        .collect();

    let current = main.0 * main.1 + rolls.iter().map(|(_, h, w)| h * w).sum::<f64>();
    let theoretical = theoretical_max(
        scorer,
        disc.slot,
        disc.initial_rolls,
        eval_level(disc, mode),
        weights,
    );

    Ok(Terms {
        main_stat,
        main,
        rolls,
        current,
        theoretical,
    })
}

pub fn weighted_er(
    scorer: &Scorer,
    disc: &Disc,
    weights: &WeightMap,
    mode: EvaluationMode,
) -> DfResult<(f64, f64)> {
    let terms = compute_terms(scorer, &repair(disc), weights, mode)?;
    Ok((terms.current, terms.theoretical))
}

pub fn score_piece(
    scorer: &Scorer,
    disc: &Disc,
    weights: &WeightMap,
    mode: EvaluationMode,
) -> DfResult<ScoreResult> {
    let disc = repair(disc);
    if disc.main_stat.is_none() {
        return Err(DiscForgeError::MissingMainStat { slot: disc.slot });
    }
    if weights.is_empty() {
        return Ok(ScoreResult::no_data());
    }

    let terms = compute_terms(scorer, &disc, weights, mode)?;
    let denom = terms.theoretical;

    let raw = if denom > SCORE_EPSILON {
        terms.current / denom * 100.0
    } else {
        0.0
    };
    let score = raw.clamp(0.0, 100.0);
    // Keeps the breakdown summing to the clamped score.
    let scale = if raw > 100.0 { score / raw } else { 1.0 };
    let to_points = |x: f64| {
        if denom > SCORE_EPSILON {
            x / denom * 100.0 * scale
        } else {
            0.0
        }
    };

    let mut contributions = Vec::with_capacity(1 + terms.rolls.len());
    contributions.push(Contribution {
        source: ContributionSource::Main,
        stat: Some(terms.main_stat),
        effective_rolls: terms.main.0,
        weight: terms.main.1,
        points: to_points(terms.main.0 * terms.main.1),
    });
    for (index, &(stat, hits, w)) in terms.rolls.iter().enumerate() {
        contributions.push(Contribution {
            source: ContributionSource::Roll(index),
            stat,
            effective_rolls: hits,
            weight: w,
            points: to_points(hits * w),
        });
    }

    Ok(ScoreResult {
        score,
        rank: Rank::for_score(score),
        status: ScoreStatus::Scored,
        contributions,
        current_weighted_er: terms.current,
        theoretical_max_weighted_er: denom,
    })
}

/// Mean of the piece scores. One refused piece refuses the set.
pub fn score_set(
    scorer: &Scorer,
    discs: &[Disc],
    weights: &WeightMap,
    mode: EvaluationMode,
) -> DfResult<SetScore> {
    let pieces = discs
        .iter()
        .map(|d| score_piece(scorer, d, weights, mode))
        .collect::<DfResult<Vec<_>>>()?;

    let average = if pieces.is_empty() {
        0.0
    } else {
        pieces.iter().map(|p| p.score).sum::<f64>() / pieces.len() as f64
    };

    Ok(SetScore {
        rank: Rank::for_score(average),
        average,
        pieces,
    })
}
