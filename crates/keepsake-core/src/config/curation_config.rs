use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Policy knobs for the member-curation selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationPolicy {
    /// Max selected members per calendar day.
    pub per_day_cap: usize,
    /// Max selected members per day slot (morning/afternoon/evening/night).
    pub per_bucket_cap: usize,
    /// Minimum seconds between two selected shots.
    pub min_spacing_secs: i64,
    /// Minimum perceptual-hash Hamming distance between selected shots.
    pub min_phash_distance: u32,
    /// Max selected members per staypoint.
    pub per_staypoint_cap: usize,
    /// How many selected hashes to sample into telemetry.
    pub hash_sample_limit: usize,
}

impl Default for CurationPolicy {
    fn default() -> Self {
        Self {
            per_day_cap: defaults::DEFAULT_PER_DAY_CAP,
            per_bucket_cap: defaults::DEFAULT_PER_BUCKET_CAP,
            min_spacing_secs: defaults::DEFAULT_MIN_SPACING_SECS,
            min_phash_distance: defaults::DEFAULT_MIN_PHASH_DISTANCE,
            per_staypoint_cap: defaults::DEFAULT_PER_STAYPOINT_CAP,
            hash_sample_limit: defaults::DEFAULT_HASH_SAMPLE_LIMIT,
        }
    }
}

impl CurationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("per_day_cap", self.per_day_cap),
            ("per_bucket_cap", self.per_bucket_cap),
            ("per_staypoint_cap", self.per_staypoint_cap),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCap { name, value });
            }
        }
        if self.min_spacing_secs < 0 {
            return Err(ConfigError::NonPositive {
                name: "min_spacing_secs",
                value: self.min_spacing_secs as f64,
            });
        }
        Ok(())
    }
}
