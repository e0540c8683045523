use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Thresholds for the five merge-vs-dedupe signals of the overlap resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSignalConfig {
    pub min_temporal_iou: f64,
    pub max_staypoint_distance_m: f64,
    pub min_core_group_jaccard: f64,
    pub max_median_phash_delta: f64,
    pub max_score_gap_ratio: f64,
}

impl Default for MergeSignalConfig {
    fn default() -> Self {
        Self {
            min_temporal_iou: defaults::DEFAULT_MIN_TEMPORAL_IOU,
            max_staypoint_distance_m: defaults::DEFAULT_MAX_STAYPOINT_DISTANCE_M,
            min_core_group_jaccard: defaults::DEFAULT_MIN_CORE_GROUP_JACCARD,
            max_median_phash_delta: defaults::DEFAULT_MAX_MEDIAN_PHASH_DELTA,
            max_score_gap_ratio: defaults::DEFAULT_MAX_SCORE_GAP_RATIO,
        }
    }
}

/// Consolidation pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Minimum normalized member count for a draft to survive filtering.
    pub min_size: usize,
    /// Minimum effective score for a draft to survive filtering.
    pub min_score: f64,
    /// Whether the filter stage drops drafts without a valid time range.
    pub require_valid_time: bool,
    /// Earliest acceptable start year for a valid time range.
    pub min_valid_year: i32,
    /// Jaccard overlap at which a lower-priority candidate is treated as the
    /// same story as a selected winner.
    pub merge_threshold: f64,
    /// Jaccard overlap at which a candidate is a near-exact duplicate.
    /// Invariant: `drop_threshold >= merge_threshold`.
    pub drop_threshold: f64,
    /// Run the dominance-selection stage. Dominance and the overlap
    /// resolver share threshold semantics but stay independently
    /// configurable.
    pub enable_dominance: bool,
    /// Run the overlap-resolver stage (merge-vs-dedupe with the five
    /// signals).
    pub enable_overlap_resolver: bool,
    /// Algorithm priority order, best first. Unlisted algorithms rank below
    /// every listed one.
    pub keep_order: Vec<String>,
    /// Optional per-algorithm classification ranking, best first.
    pub classification_ranks: BTreeMap<String, Vec<String>>,
    /// Algorithms whose output is supplementary and pruned unless it
    /// contributes enough unique members.
    pub annotation_algorithms: BTreeSet<String>,
    /// Per-algorithm minimum unique-member share for annotation-only drafts.
    pub min_unique_share: BTreeMap<String, f64>,
    /// Max accepted clusters any single media item may belong to, per
    /// algorithm group.
    pub per_media_cap: usize,
    /// Algorithm → group name. Ungrouped algorithms fall into
    /// `default_group`.
    pub algorithm_groups: BTreeMap<String, String>,
    pub default_group: String,
    pub merge_signals: MergeSignalConfig,
    /// Advisory batch size for progress callbacks.
    pub progress_batch: usize,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            min_size: defaults::DEFAULT_MIN_SIZE,
            min_score: defaults::DEFAULT_MIN_SCORE,
            require_valid_time: defaults::DEFAULT_REQUIRE_VALID_TIME,
            min_valid_year: defaults::DEFAULT_MIN_VALID_YEAR,
            merge_threshold: defaults::DEFAULT_MERGE_THRESHOLD,
            drop_threshold: defaults::DEFAULT_DROP_THRESHOLD,
            enable_dominance: defaults::DEFAULT_ENABLE_DOMINANCE,
            enable_overlap_resolver: defaults::DEFAULT_ENABLE_OVERLAP_RESOLVER,
            keep_order: vec![],
            classification_ranks: BTreeMap::new(),
            annotation_algorithms: BTreeSet::new(),
            min_unique_share: BTreeMap::new(),
            per_media_cap: defaults::DEFAULT_PER_MEDIA_CAP,
            algorithm_groups: BTreeMap::new(),
            default_group: defaults::DEFAULT_ALGORITHM_GROUP.to_string(),
            merge_signals: MergeSignalConfig::default(),
            progress_batch: defaults::DEFAULT_PROGRESS_BATCH,
        }
    }
}

impl ConsolidationConfig {
    /// Keep-order priority of an algorithm: earlier in the list = higher.
    /// Unlisted algorithms get 0, below every listed one.
    pub fn algorithm_priority(&self, algorithm: &str) -> i64 {
        match self.keep_order.iter().position(|a| a == algorithm) {
            Some(pos) => (self.keep_order.len() - pos) as i64,
            None => 0,
        }
    }

    /// Classification priority within an algorithm's configured ranking.
    /// Unranked classifications (or algorithms without a ranking) get 0.
    pub fn classification_rank(&self, algorithm: &str, classification: Option<&str>) -> i64 {
        let Some(class) = classification else {
            return 0;
        };
        let Some(order) = self.classification_ranks.get(algorithm) else {
            return 0;
        };
        match order.iter().position(|c| c == class) {
            Some(pos) => (order.len() - pos) as i64,
            None => 0,
        }
    }

    pub fn group_of(&self, algorithm: &str) -> &str {
        self.algorithm_groups
            .get(algorithm)
            .map(String::as_str)
            .unwrap_or(&self.default_group)
    }

    pub fn is_annotation_only(&self, algorithm: &str) -> bool {
        self.annotation_algorithms.contains(algorithm)
    }

    pub fn min_unique_share_for(&self, algorithm: &str) -> f64 {
        self.min_unique_share.get(algorithm).copied().unwrap_or(0.0)
    }

    /// Fail-fast construction-time validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_threshold < self.merge_threshold {
            return Err(ConfigError::ThresholdOrdering {
                merge_threshold: self.merge_threshold,
                drop_threshold: self.drop_threshold,
            });
        }
        for (name, value) in [
            ("merge_threshold", self.merge_threshold),
            ("drop_threshold", self.drop_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        if self.per_media_cap == 0 {
            return Err(ConfigError::ZeroCap {
                name: "per_media_cap",
                value: self.per_media_cap,
            });
        }
        for value in self.min_unique_share.values() {
            if !(0.0..=1.0).contains(value) {
                return Err(ConfigError::OutOfRange {
                    name: "min_unique_share",
                    value: *value,
                });
            }
        }
        let s = &self.merge_signals;
        if !(0.0..=1.0).contains(&s.min_temporal_iou) {
            return Err(ConfigError::OutOfRange {
                name: "min_temporal_iou",
                value: s.min_temporal_iou,
            });
        }
        if !(0.0..=1.0).contains(&s.min_core_group_jaccard) {
            return Err(ConfigError::OutOfRange {
                name: "min_core_group_jaccard",
                value: s.min_core_group_jaccard,
            });
        }
        if !(0.0..=1.0).contains(&s.max_median_phash_delta) {
            return Err(ConfigError::OutOfRange {
                name: "max_median_phash_delta",
                value: s.max_median_phash_delta,
            });
        }
        if s.max_staypoint_distance_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "max_staypoint_distance_m",
                value: s.max_staypoint_distance_m,
            });
        }
        if s.max_score_gap_ratio < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "max_score_gap_ratio",
                value: s.max_score_gap_ratio,
            });
        }
        Ok(())
    }
}
