use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Weights for the 12 composite-score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub quality: f64,
    pub aesthetics: f64,
    pub people: f64,
    pub content: f64,
    pub density: f64,
    pub novelty: f64,
    pub holiday: f64,
    pub recency: f64,
    pub poi: f64,
    pub location: f64,
    pub temporal: f64,
    pub liveliness: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            quality: 0.15,
            aesthetics: 0.05,
            people: 0.12,
            content: 0.06,
            density: 0.08,
            novelty: 0.15,
            holiday: 0.05,
            recency: 0.08,
            poi: 0.08,
            location: 0.08,
            temporal: 0.07,
            liveliness: 0.03,
        }
    }
}

impl ScoreWeights {
    pub fn as_pairs(&self) -> [(&'static str, f64); 12] {
        [
            ("quality", self.quality),
            ("aesthetics", self.aesthetics),
            ("people", self.people),
            ("content", self.content),
            ("density", self.density),
            ("novelty", self.novelty),
            ("holiday", self.holiday),
            ("recency", self.recency),
            ("poi", self.poi),
            ("location", self.location),
            ("temporal", self.temporal),
            ("liveliness", self.liveliness),
        ]
    }
}

/// Known-landmark perceptual-hash signature. A member phash within
/// `max_distance` bits of `phash` marks the draft as containing the landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconicSignature {
    pub label: String,
    pub phash: u64,
    pub max_distance: u32,
}

/// Composite scorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Per-algorithm multiplicative boost applied after the weighted sum.
    pub algorithm_boosts: BTreeMap<String, f64>,
    /// Linear recency decay horizon in days.
    pub recency_horizon_days: f64,
    /// Time-range span (hours) at and beyond which the temporal component
    /// scores zero.
    pub max_span_hours: f64,
    /// Megapixel target the resolution signal is measured against.
    pub baseline_megapixels: f64,
    /// Grid precision (degrees) for the geospatial rarity histogram.
    pub grid_precision_deg: f64,
    /// POI-category boosts added into the POI component.
    pub poi_category_boosts: BTreeMap<String, f64>,
    /// Iconic-landmark phash signatures granting a POI bonus.
    pub iconic_signatures: Vec<IconicSignature>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            algorithm_boosts: BTreeMap::new(),
            recency_horizon_days: defaults::DEFAULT_RECENCY_HORIZON_DAYS,
            max_span_hours: defaults::DEFAULT_MAX_SPAN_HOURS,
            baseline_megapixels: defaults::DEFAULT_BASELINE_MEGAPIXELS,
            grid_precision_deg: defaults::DEFAULT_GRID_PRECISION_DEG,
            poi_category_boosts: BTreeMap::new(),
            iconic_signatures: vec![],
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.weights.as_pairs() {
            if value < 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("recency_horizon_days", self.recency_horizon_days),
            ("max_span_hours", self.max_span_hours),
            ("baseline_megapixels", self.baseline_megapixels),
            ("grid_precision_deg", self.grid_precision_deg),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for value in self.algorithm_boosts.values() {
            if *value <= 0.0 {
                return Err(ConfigError::NonPositive {
                    name: "algorithm_boosts",
                    value: *value,
                });
            }
        }
        Ok(())
    }
}
