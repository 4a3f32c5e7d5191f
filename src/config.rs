use crate::consts::DEFAULT_RECOMMEND_LIMIT;
use crate::error::{DfResult, DiscForgeError};
use crate::scorer::EvaluationMode;
use crate::stats::Stat;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    pub data: DataPaths,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, value_enum, default_value_t = EvaluationMode::MaxLevel)]
    pub evaluation_mode: EvaluationMode,

    // Use the profile's soft-cap weights when it has them
    #[arg(long, default_value_t = false)]
    pub use_soft_cap: bool,

    #[arg(long, default_value_t = DEFAULT_RECOMMEND_LIMIT)]
    pub recommend_limit: usize,

    // Empty or "all" disables the filter
    #[arg(long, default_value = "")]
    pub role_filter: String,

    #[arg(long, default_value = "HP%")]
    pub elemental_reference: String,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            evaluation_mode: EvaluationMode::MaxLevel,
            use_soft_cap: false,
            recommend_limit: DEFAULT_RECOMMEND_LIMIT,
            role_filter: String::new(),
            elemental_reference: "HP%".to_string(),
        }
    }
}

impl ScoringParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DiscForgeError::Config(format!("Failed to read {:?}: {}", path, e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Flags given explicitly on the command line override file values.
    pub fn merge_from_cli(&mut self, cli: &ScoringParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(evaluation_mode, "evaluation_mode");
        update_if_present!(use_soft_cap, "use_soft_cap");
        update_if_present!(recommend_limit, "recommend_limit");
        update_if_present!(role_filter, "role_filter");
        update_if_present!(elemental_reference, "elemental_reference");
    }

    pub fn role_filter(&self) -> Option<&str> {
        match self.role_filter.trim() {
            "" => None,
            r if r.eq_ignore_ascii_case("all") => None,
            r => Some(r),
        }
    }

    pub fn elemental_reference_stat(&self) -> DfResult<Stat> {
        self.elemental_reference
            .parse::<Stat>()
            .map_err(DiscForgeError::Config)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Main-stat growth CSV. Built-in tables when omitted.
    #[arg(long)]
    pub main_stats: Option<String>,

    /// Sub-stat step CSV. Must be given together with --main-stats.
    #[arg(long)]
    pub sub_stats: Option<String>,

    #[arg(long, default_value = "data/profiles.json")]
    pub profiles: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            main_stats: None,
            sub_stats: None,
            profiles: "data/profiles.json".to_string(),
        }
    }
}

impl DataPaths {
    /// Both growth files, or neither.
    pub fn growth_files(&self) -> DfResult<Option<(&str, &str)>> {
        match (&self.main_stats, &self.sub_stats) {
            (Some(m), Some(s)) => Ok(Some((m.as_str(), s.as_str()))),
            (None, None) => Ok(None),
            _ => Err(DiscForgeError::Config(
                "--main-stats and --sub-stats must be given together".to_string(),
            )),
        }
    }
}
