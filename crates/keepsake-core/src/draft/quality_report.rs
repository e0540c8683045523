use serde::{Deserialize, Serialize};

use super::MediaId;

/// Per-member breakdown from the quality ranking stage. Entries are stored
/// in final rank order so persistence can honor the ordering without
/// recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberQualityEntry {
    pub id: MediaId,
    pub quality: f64,
    pub aesthetics: f64,
    pub duplicate_penalty: f64,
    /// `(quality*0.7 + aesthetics*0.3) * (1 - duplicate_penalty)`.
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberQualityReport {
    pub entries: Vec<MemberQualityEntry>,
}
