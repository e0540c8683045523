//! Stage 9: Per-Media Cap — greedily accept drafts (score → priority →
//! size order) while no member exceeds the per-media cap within its
//! algorithm group. Sub-stories are exempt and re-appended in their
//! original relative order.

use std::collections::HashMap;

use tracing::debug;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::{ClusterDraft, MediaId};

use crate::ordering;

pub const STAGE_LABEL: &str = "media_cap";

pub fn run(
    drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
) -> (Vec<ClusterDraft>, usize) {
    let mut main: Vec<ClusterDraft> = Vec::new();
    let mut sub_stories: Vec<ClusterDraft> = Vec::new();
    for draft in drafts {
        if draft.is_sub_story() {
            sub_stories.push(draft);
        } else {
            main.push(draft);
        }
    }

    main.sort_by(|a, b| ordering::cap_order(a, b, cfg));

    // Accepted-use counters per algorithm group. Stage-local; never escapes.
    let mut assignments: HashMap<String, HashMap<MediaId, usize>> = HashMap::new();
    let mut accepted: Vec<ClusterDraft> = Vec::new();
    let mut rejected = 0usize;

    for draft in main {
        let group = cfg.group_of(&draft.algorithm).to_string();
        let counts = assignments.entry(group).or_default();
        let ids = draft.normalized_members();

        let capped = ids
            .iter()
            .any(|id| counts.get(id).copied().unwrap_or(0) >= cfg.per_media_cap);
        if capped {
            rejected += 1;
            debug!(algorithm = %draft.algorithm, "per-media cap rejected draft");
            continue;
        }

        for id in &ids {
            *counts.entry(*id).or_insert(0) += 1;
        }
        accepted.push(draft);
    }

    accepted.extend(sub_stories);
    (accepted, rejected)
}
