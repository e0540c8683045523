use crate::draft::ClusterDraft;
use crate::media::MediaItem;

/// An upstream clustering strategy (time/location/similarity based).
///
/// Strategies run outside this core and emit candidate drafts; the
/// consolidation pipeline treats them as opaque producers. The contract
/// lives here so strategy crates and the pipeline agree on the shape.
pub trait ClusteringStrategy: Send + Sync {
    /// Stable strategy name, recorded as `ClusterDraft::algorithm`.
    fn name(&self) -> &str;

    fn propose(&self, media: &[MediaItem]) -> Vec<ClusterDraft>;
}
