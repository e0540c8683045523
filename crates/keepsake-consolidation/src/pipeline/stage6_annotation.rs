//! Stage 6: Annotation Pruning — annotation-only algorithms survive only if
//! they contribute enough members not already covered by primary drafts.
//! Accepted annotation drafts register their members, so later annotation
//! drafts are judged against an up-to-date picture (left-to-right).

use std::collections::HashMap;

use tracing::debug;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::{ClusterDraft, MediaId};

pub const STAGE_LABEL: &str = "annotation";

pub fn run(
    drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
) -> (Vec<ClusterDraft>, usize) {
    let mut member_use: HashMap<MediaId, u32> = HashMap::new();
    for draft in drafts
        .iter()
        .filter(|d| !cfg.is_annotation_only(&d.algorithm))
    {
        for id in draft.normalized_members() {
            *member_use.entry(id).or_insert(0) += 1;
        }
    }

    let mut out = Vec::with_capacity(drafts.len());
    let mut pruned = 0usize;

    for draft in drafts {
        if !cfg.is_annotation_only(&draft.algorithm) {
            out.push(draft);
            continue;
        }

        let ids = draft.normalized_members();
        let unique = ids.iter().filter(|id| !member_use.contains_key(id)).count();
        let unique_share = if ids.is_empty() {
            0.0
        } else {
            unique as f64 / ids.len() as f64
        };

        if unique_share >= cfg.min_unique_share_for(&draft.algorithm) {
            for id in &ids {
                *member_use.entry(*id).or_insert(0) += 1;
            }
            out.push(draft);
        } else {
            pruned += 1;
            debug!(
                algorithm = %draft.algorithm,
                unique_share,
                "annotation pruning dropped draft"
            );
        }
    }

    (out, pruned)
}
