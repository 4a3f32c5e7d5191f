use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use discforge::api::DiscForgeSession;
use discforge::config::ScoringParams;
use std::process;
use tracing::{info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring preferences; explicit flags win over it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Score(cmd::score::ScoreArgs),
    Recommend(cmd::recommend::RecommendArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::WARN })
        .init();

    // Scoring flags live in the subcommand's matches, not the root.
    let (mut config, sub_name) = match &cli.command {
        Commands::Score(args) => (args.config.clone(), "score"),
        Commands::Recommend(args) => (args.config.clone(), "recommend"),
    };

    if let Some(path) = &cli.config {
        info!("Loading scoring config from {}", path);
        let mut file_params = ScoringParams::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        });
        if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
            file_params.merge_from_cli(&config.scoring, sub_matches);
        }
        config.scoring = file_params;
    }

    let session = match DiscForgeSession::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            process::exit(1);
        }
    };

    let result = match &cli.command {
        Commands::Score(args) => cmd::score::run(args, &session),
        Commands::Recommend(args) => cmd::recommend::run(args, &session),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
