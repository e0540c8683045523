//! Stage 8: Member Curation — apply the pluggable selector policy and
//! attach its telemetry. Drafts with empty member lists pass through
//! unchanged.

use std::collections::HashMap;

use keepsake_core::config::CurationPolicy;
use keepsake_core::draft::{ClusterDraft, MediaId};
use keepsake_core::media::MediaItem;
use keepsake_core::traits::MemberSelector;

pub const STAGE_LABEL: &str = "curation";

pub fn run(
    mut drafts: Vec<ClusterDraft>,
    media: &HashMap<MediaId, MediaItem>,
    selector: &dyn MemberSelector,
    policy: &CurationPolicy,
) -> Vec<ClusterDraft> {
    for draft in &mut drafts {
        if draft.members.is_empty() {
            continue;
        }
        let result = selector.select(draft, media, policy);
        draft.members = result.members;
        draft.params.member_selection = Some(result.telemetry);
    }
    drafts
}
