use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MediaId;

/// Telemetry a member selector attaches to a curated draft. Advisory only:
/// downstream consumers read it for observability, never for behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionTelemetry {
    /// Member count before curation.
    pub candidates: usize,
    /// Member count after curation.
    pub selected: usize,
    /// Rejection counts keyed by reason label.
    pub rejections: BTreeMap<String, usize>,
    pub avg_time_gap_secs: Option<f64>,
    pub avg_hash_distance: Option<f64>,
    /// Selected-member distribution per calendar day ("YYYY-MM-DD").
    pub per_day: BTreeMap<String, usize>,
    pub per_year: BTreeMap<i32, usize>,
    /// Selected-member distribution per day slot (morning/afternoon/…).
    pub per_bucket: BTreeMap<String, usize>,
    /// Sample of selected perceptual hashes, hex-encoded.
    pub hash_samples: Vec<String>,
}

/// Output of a `MemberSelector`: the curated member subset plus telemetry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    pub members: Vec<MediaId>,
    pub telemetry: SelectionTelemetry,
}
