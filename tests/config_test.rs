use clap::{CommandFactory, FromArgMatches, Parser};
use discforge::config::{Config, ScoringParams};
use discforge::error::DiscForgeError;
use discforge::scorer::EvaluationMode;
use discforge::stats::Stat;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let mut argv = vec!["test"];
    argv.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_defaults_match_cli_defaults() {
    let (cli, _) = parse(&[]);
    let def = Config::default();
    assert_eq!(cli.config.scoring.evaluation_mode, def.scoring.evaluation_mode);
    assert_eq!(cli.config.scoring.recommend_limit, 5);
    assert_eq!(cli.config.scoring.elemental_reference, "HP%");
    assert_eq!(cli.config.data.profiles, def.data.profiles);
    assert!(!cli.config.scoring.use_soft_cap);
}

#[test]
fn test_role_filter_all_means_none() {
    let mut params = ScoringParams::default();
    assert_eq!(params.role_filter(), None);
    params.role_filter = "All".to_string();
    assert_eq!(params.role_filter(), None);
    params.role_filter = " 撃破 ".to_string();
    assert_eq!(params.role_filter(), Some("撃破"));
}

#[test]
fn test_elemental_reference_parsing() {
    let mut params = ScoringParams::default();
    assert_eq!(params.elemental_reference_stat().unwrap(), Stat::HpPercent);
    params.elemental_reference = "攻撃力%".to_string();
    assert_eq!(params.elemental_reference_stat().unwrap(), Stat::AtkPercent);
    params.elemental_reference = "Mana".to_string();
    assert!(matches!(
        params.elemental_reference_stat(),
        Err(DiscForgeError::Config(_))
    ));
}

#[test]
fn test_file_values_with_cli_override() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"evaluation_mode": "current-level", "recommend_limit": 3, "use_soft_cap": true}}"#
    )
    .unwrap();

    let mut from_file = ScoringParams::load_from_file(file.path()).unwrap();
    assert_eq!(from_file.evaluation_mode, EvaluationMode::CurrentLevel);
    // Missing keys fall back to defaults.
    assert_eq!(from_file.elemental_reference, "HP%");

    let (cli, matches) = parse(&["--recommend-limit", "10"]);
    from_file.merge_from_cli(&cli.config.scoring, &matches);

    assert_eq!(from_file.recommend_limit, 10);
    // Not given on the command line: file value survives.
    assert_eq!(from_file.evaluation_mode, EvaluationMode::CurrentLevel);
    assert!(from_file.use_soft_cap);
}

#[test]
fn test_growth_files_must_come_in_pairs() {
    let (cli, _) = parse(&["--main-stats", "main.csv"]);
    assert!(cli.config.data.growth_files().is_err());

    let (cli, _) = parse(&["--main-stats", "a.csv", "--sub-stats", "b.csv"]);
    assert_eq!(
        cli.config.data.growth_files().unwrap(),
        Some(("a.csv", "b.csv"))
    );
}

#[test]
fn test_unreadable_config_is_config_error() {
    let res = ScoringParams::load_from_file("/definitely/not/here.json");
    assert!(matches!(res, Err(DiscForgeError::Config(_))));
}
