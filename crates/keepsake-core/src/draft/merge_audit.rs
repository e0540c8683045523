use serde::{Deserialize, Serialize};

/// Which side of an overlap resolution this draft was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRole {
    Winner,
    Loser,
}

/// The five similarity signals computed between an overlap winner and loser.
/// Signals with missing inputs are `None` and count as failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeMetrics {
    pub temporal_iou: f64,
    pub staypoint_distance_m: Option<f64>,
    pub core_group_jaccard: f64,
    pub median_phash_delta: Option<f64>,
    pub score_gap_ratio: f64,
}

/// Audit entry recorded on a draft when the overlap resolver paired it with
/// another draft, whether the outcome was a merge or a dedupe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeAudit {
    pub role: MergeRole,
    pub counterpart_fingerprint: String,
    pub counterpart_algorithm: String,
    pub counterpart_score: f64,
    /// True if members were merged; false if the counterpart was dropped.
    pub merged: bool,
    pub metrics: MergeMetrics,
}
