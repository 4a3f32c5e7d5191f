use crate::error::{DfResult, DiscForgeError};
use crate::stats::{normalize, Stat, StatKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

pub type WeightMap = HashMap<Stat, f64>;

/// Weight of `stat` in `weights`; absent means 0.
#[inline(always)]
pub fn weight_of(weights: &WeightMap, stat: Stat) -> f64 {
    weights.get(&stat).copied().unwrap_or(0.0)
}

/// How much one character values each stat, in [0, 1] by convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightProfile {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub weights: WeightMap,
    pub soft_cap_weights: Option<WeightMap>,
    pub has_soft_cap: bool,
    pub soft_cap_desc: Option<String>,
}

impl WeightProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
            weights: WeightMap::new(),
            soft_cap_weights: None,
            has_soft_cap: false,
            soft_cap_desc: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_weight(mut self, stat: Stat, weight: f64) -> Self {
        self.weights.insert(stat, weight);
        self
    }

    pub fn with_soft_cap(mut self, weights: WeightMap, desc: Option<String>) -> Self {
        self.soft_cap_weights = Some(weights);
        self.has_soft_cap = true;
        self.soft_cap_desc = desc;
        self
    }

    /// The soft-cap mapping when asked for and present, else the normal one.
    pub fn weights_for(&self, use_soft_cap: bool) -> &WeightMap {
        match (&self.soft_cap_weights, use_soft_cap) {
            (Some(soft), true) => soft,
            _ => &self.weights,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    name: Option<String>,
    name_jp: Option<String>,
    role: Option<String>,
    weights: Option<BTreeMap<String, f64>>,
    weights_normal: Option<BTreeMap<String, f64>>,
    weights_soft_cap: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    has_soft_cap: bool,
    soft_cap_desc: Option<String>,
}

fn convert_weights(id: &str, raw: &BTreeMap<String, f64>) -> WeightMap {
    let mut out = WeightMap::new();
    for (key, &w) in raw {
        let stat = match normalize(key) {
            StatKey::Known(stat) => stat,
            StatKey::Unrecognized(name) => {
                warn!("Profile '{}': dropping unknown stat key '{}'", id, name);
                continue;
            }
        };
        if !w.is_finite() || w < 0.0 {
            warn!("Profile '{}': dropping invalid weight {} for {}", id, w, stat);
            continue;
        }
        out.insert(stat, w);
    }
    out
}

/// All profiles, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, WeightProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: WeightProfile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn get(&self, id: &str) -> Option<&WeightProfile> {
        self.profiles.get(id)
    }

    pub fn require(&self, id: &str) -> DfResult<&WeightProfile> {
        self.get(id)
            .ok_or_else(|| DiscForgeError::UnknownProfile(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Distinct roles, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.iter().filter_map(|p| p.role.as_deref()).collect();
        roles.sort_unstable();
        roles.dedup();
        roles
    }

    /// Parses a JSON object keyed by profile id.
    ///
    /// `name_jp` is preferred over `name`, then the id. For soft-cap profiles
    /// `weights_normal` wins over `weights` for the normal mapping and the
    /// soft-cap mapping falls back to the normal one when absent. Other
    /// profiles only read `weights`.
    pub fn from_json_str(json: &str) -> DfResult<Self> {
        let raw: BTreeMap<String, ProfileEntry> = serde_json::from_str(json)?;
        let mut registry = Self::new();

        for (id, entry) in raw {
            let normal_raw = if entry.has_soft_cap {
                entry.weights_normal.as_ref().or(entry.weights.as_ref())
            } else {
                entry.weights.as_ref()
            };
            let weights = normal_raw
                .map(|w| convert_weights(&id, w))
                .unwrap_or_default();

            // Soft-cap weights only count when the profile declares a soft cap.
            let soft_cap_weights = entry.has_soft_cap.then(|| {
                entry
                    .weights_soft_cap
                    .as_ref()
                    .map(|w| convert_weights(&id, w))
                    .unwrap_or_else(|| weights.clone())
            });

            if weights.is_empty() {
                warn!("Profile '{}' has no usable weights", id);
            }

            registry.insert(WeightProfile {
                name: entry
                    .name_jp
                    .or(entry.name)
                    .unwrap_or_else(|| id.clone()),
                id,
                role: entry.role.filter(|r| !r.trim().is_empty()),
                weights,
                soft_cap_weights,
                has_soft_cap: entry.has_soft_cap,
                soft_cap_desc: entry.soft_cap_desc,
            });
        }
        Ok(registry)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DfResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_json_str(&content)?;
        info!("Profiles: loaded {} from {:?}", registry.len(), path);
        Ok(registry)
    }
}
