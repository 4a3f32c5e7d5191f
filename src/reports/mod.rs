use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use discforge::disc::Disc;
use discforge::profiles::WeightProfile;
use discforge::recommender::{ProfileBreakdown, Recommendation};
use discforge::rules::{format_stat_value, roll_value, Adjustment, RepairReport, ValueTier};
use discforge::scorer::{
    Contribution, ContributionSource, EvaluationMode, Rank, ScoreResult, ScoreStatus, Scorer,
    SetScore,
};

fn rank_color(rank: Rank) -> Color {
    match rank {
        Rank::SSS | Rank::SS => Color::Yellow,
        Rank::S => Color::Magenta,
        Rank::A => Color::Cyan,
        Rank::B => Color::Green,
        Rank::C => Color::Grey,
    }
}

fn tier_color(tier: ValueTier) -> Color {
    match tier {
        ValueTier::Gold => Color::Yellow,
        ValueTier::Purple => Color::Magenta,
        ValueTier::Blue => Color::Blue,
        ValueTier::Green => Color::Green,
        ValueTier::Gray => Color::Grey,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_repairs(slot: u8, report: &RepairReport) {
    println!("Disc {} was adjusted before scoring:", slot);
    for adj in &report.adjustments {
        let line = match adj {
            Adjustment::HitsClamped { index, from, to } => {
                format!("roll {}: hits {} -> {} (out of range)", index + 1, from, to)
            }
            Adjustment::HitsTrimmed { index, from, to } => {
                format!("roll {}: hits {} -> {} (over budget)", index + 1, from, to)
            }
            Adjustment::RollLocked { index, stat } => {
                format!("roll {}: {} cleared (too many rolls for this level)", index + 1, stat)
            }
            Adjustment::DuplicateCleared { index, stat } => {
                format!("roll {}: {} cleared (duplicate)", index + 1, stat)
            }
        };
        println!("  - {}", line);
    }
}

pub fn print_set_report(
    profile: &WeightProfile,
    discs: &[Disc],
    set: &SetScore,
    mode: EvaluationMode,
) {
    println!("\nProfile: {} ({}) [{}]", profile.name, profile.id, mode);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Lv"),
        Cell::new("Main"),
        Cell::new("Current ER"),
        Cell::new("Max ER"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Rank"),
    ]);

    for (disc, r) in discs.iter().zip(set.pieces.iter()) {
        let main = disc
            .main_stat
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let rank = match r.status {
            ScoreStatus::Scored => Cell::new(r.rank).fg(rank_color(r.rank)),
            ScoreStatus::NoData => Cell::new("no data"),
        };
        table.add_row(vec![
            Cell::new(disc.slot),
            Cell::new(disc.level),
            Cell::new(main),
            Cell::new(format!("{:.1}", r.current_weighted_er)),
            Cell::new(format!("{:.1}", r.theoretical_max_weighted_er)),
            Cell::new(format!("{:.1}", r.score)).fg(Color::Cyan),
            rank,
        ]);
    }

    table.add_row(vec![
        Cell::new("Average").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.1}", set.average)).add_attribute(Attribute::Bold),
        Cell::new(format!("{} {}", set.rank, set.rank.label())).fg(rank_color(set.rank)),
    ]);
    align_right(&mut table, 3..=5);
    println!("{}", table);
}

fn contribution_row(scorer: &Scorer, disc: &Disc, c: &Contribution) -> Vec<Cell> {
    let (label, value) = match c.source {
        ContributionSource::Main => (
            "Main".to_string(),
            c.stat.map(|s| {
                format_stat_value(s, scorer.er.main_stat_value_at(s, disc.level))
            }),
        ),
        ContributionSource::Roll(i) => (
            format!("Roll {}", i + 1),
            c.stat
                .map(|s| format_stat_value(s, roll_value(&scorer.er, s, c.effective_rolls as u8))),
        ),
    };
    let stat = c
        .stat
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let tier = ValueTier::for_weight(c.weight);

    vec![
        Cell::new(label),
        Cell::new(stat).fg(tier_color(tier)),
        Cell::new(value.unwrap_or_default()),
        Cell::new(format!("{:.1}", c.effective_rolls)),
        Cell::new(format!("{:.2}", c.weight)),
        Cell::new(format!("{:.1}", c.points)),
    ]
}

pub fn print_contributions(scorer: &Scorer, disc: &Disc, result: &ScoreResult) {
    if result.status == ScoreStatus::NoData {
        return;
    }
    println!("\nDisc {} breakdown", disc.slot);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Part").add_attribute(Attribute::Bold),
        Cell::new("Stat"),
        Cell::new("Value"),
        Cell::new("ER/Hits"),
        Cell::new("Weight"),
        Cell::new("Points").fg(Color::Cyan),
    ]);
    for c in &result.contributions {
        table.add_row(contribution_row(scorer, disc, c));
    }
    align_right(&mut table, 2..=5);
    println!("{}", table);
}

pub fn print_recommendations(recs: &[Recommendation], role: Option<&str>) {
    match role {
        Some(r) => println!("\nBest fits (role: {})", r),
        None => println!("\nBest fits"),
    }
    if recs.is_empty() {
        println!("No profile could score these discs.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Profile"),
        Cell::new("Role"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Rank"),
        Cell::new("Pieces"),
    ]);
    for (i, r) in recs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{} ({})", r.name, r.profile_id)),
            Cell::new(r.role.as_deref().unwrap_or("-")),
            Cell::new(format!("{:.1}", r.aggregate_score)).fg(Color::Cyan),
            Cell::new(r.rank).fg(rank_color(r.rank)),
            Cell::new(r.contributing_pieces),
        ]);
    }
    align_right(&mut table, 3..=3);
    println!("{}", table);
}

pub fn print_breakdown(b: &ProfileBreakdown) {
    println!("\nDetails for {} ({})", b.name, b.profile_id);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Rank"),
    ]);
    for p in &b.pieces {
        match &p.result {
            Some(r) => table.add_row(vec![
                Cell::new(p.slot),
                Cell::new(format!("{:.1}", r.score)),
                Cell::new(r.rank).fg(rank_color(r.rank)),
            ]),
            None => table.add_row(vec![Cell::new(p.slot), Cell::new("-"), Cell::new("skipped")]),
        };
    }
    table.add_row(vec![
        Cell::new("Average").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}", b.average)),
        Cell::new(b.rank),
    ]);
    println!("{}", table);
}
