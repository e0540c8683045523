use crate::draft::MediaId;
use crate::errors::KeepsakeResult;
use crate::media::MediaItem;

/// Batched media lookup against the external catalog.
///
/// Result order is not guaranteed; ids with no resolvable media are
/// silently omitted.
pub trait MediaLookup: Send + Sync {
    fn find_by_ids(&self, ids: &[MediaId]) -> KeepsakeResult<Vec<MediaItem>>;
}
