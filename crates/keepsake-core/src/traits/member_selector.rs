use std::collections::HashMap;

use crate::config::CurationPolicy;
use crate::draft::{ClusterDraft, MediaId, SelectionResult};
use crate::media::MediaItem;

/// Pluggable, policy-driven member curation.
///
/// Implementations trim a draft's members against the policy caps and
/// return the curated subset plus telemetry. They must be pure: same draft,
/// media, and policy → same result.
pub trait MemberSelector: Send + Sync {
    fn select(
        &self,
        draft: &ClusterDraft,
        media: &HashMap<MediaId, MediaItem>,
        policy: &CurationPolicy,
    ) -> SelectionResult;
}
