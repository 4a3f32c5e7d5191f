use crate::reports;
use clap::Args;
use discforge::api::DiscForgeSession;
use discforge::config::Config;
use discforge::error::DfResult;
use discforge::rules::repair_with_report;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON array of disc records.
    #[arg(short, long)]
    pub discs: String,

    /// Profile id to score against.
    #[arg(short, long)]
    pub profile: String,

    /// Print the result as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, session: &DiscForgeSession) -> DfResult<()> {
    let discs = super::load_discs(&args.discs)?;
    let profile = session.profiles.require(&args.profile)?;
    let set = session.score_set(&discs, &args.profile)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    for disc in &discs {
        let (_, report) = repair_with_report(disc);
        if !report.is_clean() {
            reports::print_repairs(disc.slot, &report);
        }
    }

    reports::print_set_report(profile, &discs, &set, session.params.evaluation_mode);
    for (disc, result) in discs.iter().zip(set.pieces.iter()) {
        reports::print_contributions(&session.scorer, disc, result);
    }
    Ok(())
}
