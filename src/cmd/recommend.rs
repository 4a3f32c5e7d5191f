use crate::reports;
use clap::Args;
use discforge::api::DiscForgeSession;
use discforge::config::Config;
use discforge::error::DfResult;

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON array of disc records.
    #[arg(short, long)]
    pub discs: String,

    /// Profile currently wearing the discs; left out of the results.
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Also print the per-piece breakdown for this profile id.
    #[arg(long)]
    pub details: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &RecommendArgs, session: &DiscForgeSession) -> DfResult<()> {
    let discs = super::load_discs(&args.discs)?;
    let recs = session.recommend(&discs, args.exclude.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
        return Ok(());
    }

    reports::print_recommendations(&recs, session.params.role_filter());

    if let Some(id) = &args.details {
        let breakdown = session.breakdown(&discs, id)?;
        reports::print_breakdown(&breakdown);
    }
    Ok(())
}
