//! Configuration for namefold-core
//!
//! The two score thresholds of a run plus the lookup limit and clustering
//! strategy. Loadable from TOML or JSON.

use serde::{Deserialize, Serialize};

use crate::canonical::{ClusterStrategy, DEFAULT_CANONICAL_THRESHOLD};
use crate::error::{check_score_bound, Result};
use crate::extract::check_limit;
use crate::similarity::Score;

/// Default cutoff for ad-hoc lookups
pub const DEFAULT_MATCH_CUTOFF: Score = 85;

/// Default number of results kept by an ad-hoc lookup
pub const DEFAULT_LOOKUP_LIMIT: usize = 5;

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum score for ad-hoc lookups (0 - 100)
    pub match_cutoff: Score,
    /// Minimum score for two names to share a canonical label (0 - 100)
    pub canonical_threshold: Score,
    /// Maximum results returned by an ad-hoc lookup
    pub lookup_limit: usize,
    /// Grouping strategy for canonicalization
    pub strategy: ClusterStrategy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            match_cutoff: DEFAULT_MATCH_CUTOFF,
            canonical_threshold: DEFAULT_CANONICAL_THRESHOLD,
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
            strategy: ClusterStrategy::default(),
        }
    }
}

impl ResolverConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        check_score_bound("match_cutoff", self.match_cutoff)?;
        check_score_bound("canonical_threshold", self.canonical_threshold)?;
        check_limit(self.lookup_limit)
    }
}
