use crate::config::{Config, ScoringParams};
use crate::disc::{Disc, DiscRecord};
use crate::error::DfResult;
use crate::profiles::ProfileRegistry;
use crate::recommender::{self, ProfileBreakdown, RecommendOptions, Recommendation};
use crate::rules;
use crate::scorer::{ScoreResult, Scorer, ScorerBuilder, SetScore};
use crate::stats::{self, StatKey};
use std::path::Path;
use tracing::{info, warn};

/// Everything a front end needs to score discs: the immutable scorer, the
/// loaded profiles and the user's scoring preferences.
#[derive(Debug, Clone)]
pub struct DiscForgeSession {
    pub scorer: Scorer,
    pub profiles: ProfileRegistry,
    pub params: ScoringParams,
}

impl DiscForgeSession {
    pub fn new(scorer: Scorer, profiles: ProfileRegistry, params: ScoringParams) -> Self {
        Self {
            scorer,
            profiles,
            params,
        }
    }

    pub fn from_config(config: &Config) -> DfResult<Self> {
        let mut builder = ScorerBuilder::new()
            .with_elemental_reference(config.scoring.elemental_reference_stat()?);
        if let Some((main, sub)) = config.data.growth_files()? {
            builder = builder.with_growth_from_files(main, sub)?;
        }
        let scorer = builder.build();

        let profiles_path = Path::new(&config.data.profiles);
        let profiles = if profiles_path.exists() {
            ProfileRegistry::load_from_file(profiles_path)?
        } else {
            warn!(
                "API: profiles file {:?} not found, starting with none",
                profiles_path
            );
            ProfileRegistry::new()
        };

        info!(
            "API: session ready with {} profiles ({})",
            profiles.len(),
            config.scoring.evaluation_mode
        );
        Ok(Self::new(scorer, profiles, config.scoring.clone()))
    }

    pub fn normalize(&self, raw: &str) -> StatKey {
        stats::normalize(raw)
    }

    pub fn reconcile(&self, disc: &Disc) -> Disc {
        rules::reconcile(disc)
    }

    pub fn deduplicate(&self, disc: &Disc) -> Disc {
        rules::deduplicate(disc)
    }

    pub fn discs_from_records(&self, records: &[DiscRecord]) -> Vec<Disc> {
        records.iter().map(Disc::from_record).collect()
    }

    pub fn score_piece(&self, disc: &Disc, profile_id: &str) -> DfResult<ScoreResult> {
        let profile = self.profiles.require(profile_id)?;
        self.scorer.score_piece(
            disc,
            profile.weights_for(self.params.use_soft_cap),
            self.params.evaluation_mode,
        )
    }

    pub fn score_set(&self, discs: &[Disc], profile_id: &str) -> DfResult<SetScore> {
        let profile = self.profiles.require(profile_id)?;
        self.scorer.score_set(
            discs,
            profile.weights_for(self.params.use_soft_cap),
            self.params.evaluation_mode,
        )
    }

    /// Other characters that would value `discs`, excluding `current_id`.
    pub fn recommend(&self, discs: &[Disc], current_id: Option<&str>) -> Vec<Recommendation> {
        let options = RecommendOptions {
            role_filter: self.params.role_filter().map(str::to_string),
            limit: Some(self.params.recommend_limit),
        };
        recommender::recommend(&self.scorer, &self.profiles, discs, current_id, &options)
    }

    pub fn breakdown(&self, discs: &[Disc], profile_id: &str) -> DfResult<ProfileBreakdown> {
        let profile = self.profiles.require(profile_id)?;
        recommender::profile_breakdown(&self.scorer, profile, discs)
    }
}
