//! Configuration: per-subsystem structs with serde defaults, a TOML loader,
//! and fail-fast validation.

pub mod defaults;

mod consolidation_config;
mod curation_config;
mod scoring_config;

pub use consolidation_config::{ConsolidationConfig, MergeSignalConfig};
pub use curation_config::CurationPolicy;
pub use scoring_config::{IconicSignature, ScoreWeights, ScoringConfig};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, KeepsakeResult};

/// Top-level configuration for the whole pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeepsakeConfig {
    pub consolidation: ConsolidationConfig,
    pub scoring: ScoringConfig,
    pub curation: CurationPolicy,
}

impl KeepsakeConfig {
    /// Parse from TOML and validate. Invalid configuration is fatal.
    pub fn from_toml_str(raw: &str) -> KeepsakeResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.consolidation.validate()?;
        self.scoring.validate()?;
        self.curation.validate()?;
        Ok(())
    }
}
