mod common;

use common::{perfect_slot2_disc, profile, sample_registry, DiscBuilder};
use discforge::recommender::{profile_breakdown, recommend, RecommendOptions};
use discforge::scorer::{Rank, Scorer};
use discforge::stats::Stat;

fn ids(recs: &[discforge::recommender::Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.profile_id.as_str()).collect()
}

#[test]
fn test_ranks_other_profiles_and_excludes_current() {
    let scorer = Scorer::standard();
    let recs = recommend(
        &scorer,
        &sample_registry(),
        &[perfect_slot2_disc()],
        Some("current"),
        &RecommendOptions::default(),
    );

    // "empty" has no weights and "current" is excluded.
    assert_eq!(ids(&recs), vec!["attacker", "anomaly", "tank"]);
    // (16.6 + 6 + 1 + 0.8) / (16.6 + 9)
    assert!((recs[0].aggregate_score - 24.4 / 25.6 * 100.0).abs() < 1e-9);
    assert_eq!(recs[0].rank, Rank::SSS);
    assert_eq!(recs[0].contributing_pieces, 1);
    assert_eq!(recs[2].aggregate_score, 0.0);
}

#[test]
fn test_aggregate_is_ratio_of_sums() {
    let scorer = Scorer::standard();
    let zero = DiscBuilder::new(3)
        .main(Stat::Def)
        .rolls(&[(Stat::HpPercent, 2)])
        .build();
    let recs = recommend(
        &scorer,
        &sample_registry(),
        &[perfect_slot2_disc(), zero],
        Some("current"),
        &RecommendOptions::default(),
    );
    let attacker = recs.iter().find(|r| r.profile_id == "attacker").unwrap();
    assert!((attacker.aggregate_score - 24.4 / 34.6 * 100.0).abs() < 1e-9);
    assert_eq!(attacker.contributing_pieces, 2);
}

#[test]
fn test_role_filter_applies_before_limit() {
    let scorer = Scorer::standard();
    let reg = sample_registry();
    let discs = [perfect_slot2_disc()];

    let only_anomaly = recommend(
        &scorer,
        &reg,
        &discs,
        Some("current"),
        &RecommendOptions {
            role_filter: Some("異常".to_string()),
            limit: Some(1),
        },
    );
    assert_eq!(ids(&only_anomaly), vec!["anomaly"]);

    let top_two = recommend(
        &scorer,
        &reg,
        &discs,
        None,
        &RecommendOptions {
            role_filter: None,
            limit: Some(2),
        },
    );
    assert_eq!(top_two.len(), 2);
}

#[test]
fn test_ties_break_by_profile_id() {
    let scorer = Scorer::standard();
    let mut reg = discforge::ProfileRegistry::new();
    let w = [(Stat::Atk, 1.0), (Stat::CritRate, 1.0)];
    reg.insert(profile("zeta", "強攻", &w));
    reg.insert(profile("alpha", "強攻", &w));
    let recs = recommend(
        &scorer,
        &reg,
        &[perfect_slot2_disc()],
        None,
        &RecommendOptions::default(),
    );
    assert_eq!(ids(&recs), vec!["alpha", "zeta"]);
}

#[test]
fn test_unassigned_main_gives_no_recommendations() {
    let scorer = Scorer::standard();
    let disc = DiscBuilder::new(2).roll(0, Stat::CritRate, 3).build();
    let recs = recommend(
        &scorer,
        &sample_registry(),
        &[disc],
        None,
        &RecommendOptions::default(),
    );
    assert!(recs.is_empty());
}

#[test]
fn test_ineligible_main_is_skipped() {
    let scorer = Scorer::standard();
    let disc = DiscBuilder::new(1)
        .main(Stat::Atk)
        .rolls(&[(Stat::CritRate, 3)])
        .build();
    let recs = recommend(
        &scorer,
        &sample_registry(),
        &[disc],
        None,
        &RecommendOptions::default(),
    );
    assert!(recs.is_empty());
}

#[test]
fn test_zero_ceiling_piece_contributes_nothing() {
    let scorer = Scorer::standard();
    let mut reg = discforge::ProfileRegistry::new();
    // Impact is neither a slot-2 main stat nor a sub stat.
    reg.insert(profile("breaker", "撃破", &[(Stat::Impact, 1.0)]));
    let recs = recommend(
        &scorer,
        &reg,
        &[perfect_slot2_disc()],
        None,
        &RecommendOptions::default(),
    );
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].aggregate_score, 0.0);
    assert_eq!(recs[0].contributing_pieces, 1);
}

#[test]
fn test_soft_cap_weights_are_ignored() {
    let scorer = Scorer::standard();
    let mut reg = discforge::ProfileRegistry::new();
    let normal = profile("capped", "異常", &[(Stat::Atk, 1.0), (Stat::CritRate, 1.0)]);
    let soft = common::weights(&[(Stat::Atk, 1.0)]);
    reg.insert(normal.with_soft_cap(soft, None));

    let recs = recommend(
        &scorer,
        &reg,
        &[perfect_slot2_disc()],
        None,
        &RecommendOptions::default(),
    );
    // (16.6 + 6) / 25.6 with the normal weights
    assert!((recs[0].aggregate_score - 22.6 / 25.6 * 100.0).abs() < 1e-9);
}

#[test]
fn test_profile_breakdown_marks_skipped_pieces() {
    let scorer = Scorer::standard();
    let reg = sample_registry();
    let discs = [perfect_slot2_disc(), DiscBuilder::new(4).build()];
    let b = profile_breakdown(&scorer, reg.get("attacker").unwrap(), &discs).unwrap();

    assert_eq!(b.pieces.len(), 2);
    assert!(b.pieces[1].result.is_none());
    assert!((b.average - 24.4 / 25.6 * 100.0).abs() < 1e-9);
    assert_eq!(b.rank, Rank::SSS);
}
