use std::fmt;

use serde::{Deserialize, Serialize};

use super::{members, DraftParams, GeoPoint};

/// Numeric media identifier, as issued by the external media catalog.
/// Ordering is the catalog's numeric ordering; normalization sorts by it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MediaId(pub i64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate grouping of media items proposed by a clustering strategy,
/// not yet finalized. Mutated in place by every pipeline stage; the member
/// list is replaced wholesale, never spliced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDraft {
    /// Producing strategy. Stable, never empty.
    pub algorithm: String,
    /// May contain duplicates on input; stages operate on the normalized
    /// view ([`ClusterDraft::normalized_members`]).
    pub members: Vec<MediaId>,
    pub centroid: Option<GeoPoint>,
    pub params: DraftParams,
}

impl ClusterDraft {
    pub fn new(algorithm: impl Into<String>, members: Vec<MediaId>) -> Self {
        Self {
            algorithm: algorithm.into(),
            members,
            centroid: None,
            params: DraftParams::default(),
        }
    }

    /// Sorted, deduplicated view of the member list.
    pub fn normalized_members(&self) -> Vec<MediaId> {
        members::normalize(&self.members)
    }

    /// Replace the member list with its normalized form.
    pub fn normalize_members_in_place(&mut self) {
        self.members = members::normalize(&self.members);
    }

    pub fn member_count(&self) -> usize {
        self.normalized_members().len()
    }

    /// Order-independent identity of the member set.
    pub fn fingerprint(&self) -> String {
        members::fingerprint(&self.members)
    }

    /// Score used by filtering/dominance/ranking: the explicit `score`
    /// param, falling back to the normalized member count.
    pub fn effective_score(&self) -> f64 {
        self.params
            .score
            .unwrap_or_else(|| self.member_count() as f64)
    }

    /// Duration of the draft's time range in seconds; 0 when unknown.
    pub fn time_span_secs(&self) -> i64 {
        self.params
            .time_range
            .map(|r| r.duration_secs())
            .unwrap_or(0)
    }

    pub fn is_sub_story(&self) -> bool {
        self.params.is_sub_story
    }

    /// Centroid, preferring the top-level field over the params copy.
    pub fn effective_centroid(&self) -> Option<GeoPoint> {
        self.centroid.or(self.params.centroid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_score_falls_back_to_member_count() {
        let draft = ClusterDraft::new("vacation", vec![MediaId(3), MediaId(1), MediaId(3)]);
        // 2 unique members, no explicit score.
        assert_eq!(draft.effective_score(), 2.0);

        let mut scored = draft.clone();
        scored.params.score = Some(0.75);
        assert_eq!(scored.effective_score(), 0.75);
    }

    #[test]
    fn fingerprint_matches_permuted_duplicate() {
        let a = ClusterDraft::new("vacation", vec![MediaId(1), MediaId(2), MediaId(3)]);
        let b = ClusterDraft::new("day_trip", vec![MediaId(3), MediaId(2), MediaId(1)]);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn normalize_in_place_sorts_and_dedups() {
        let mut draft = ClusterDraft::new("vacation", vec![MediaId(5), MediaId(2), MediaId(5)]);
        draft.normalize_members_in_place();
        assert_eq!(draft.members, vec![MediaId(2), MediaId(5)]);
    }
}
