//! Shared comparators. Every cross-draft decision (overlap winner, nesting
//! parent, dominance order, cap order) goes through these so tie-breaks stay
//! identical across stages and runs.

use std::cmp::Ordering;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::ClusterDraft;

/// The shared winner/loser comparator: algorithm priority desc →
/// classification rank desc → member count desc → score desc → time span
/// desc → otherwise prefer the earlier pair member (left).
pub fn prefer_left(a: &ClusterDraft, b: &ClusterDraft, cfg: &ConsolidationConfig) -> bool {
    let pa = cfg.algorithm_priority(&a.algorithm);
    let pb = cfg.algorithm_priority(&b.algorithm);
    if pa != pb {
        return pa > pb;
    }

    let ca = cfg.classification_rank(&a.algorithm, a.params.classification.as_deref());
    let cb = cfg.classification_rank(&b.algorithm, b.params.classification.as_deref());
    if ca != cb {
        return ca > cb;
    }

    let ma = a.member_count();
    let mb = b.member_count();
    if ma != mb {
        return ma > mb;
    }

    let sa = a.effective_score();
    let sb = b.effective_score();
    if (sa - sb).abs() > f64::EPSILON {
        return sa > sb;
    }

    let ta = a.time_span_secs();
    let tb = b.time_span_secs();
    if ta != tb {
        return ta > tb;
    }

    true
}

/// Candidate order inside a dominance group: score desc → algorithm
/// priority desc → classification rank desc → member count desc.
pub fn dominance_order(
    a: &ClusterDraft,
    b: &ClusterDraft,
    cfg: &ConsolidationConfig,
) -> Ordering {
    b.effective_score()
        .partial_cmp(&a.effective_score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            cfg.algorithm_priority(&b.algorithm)
                .cmp(&cfg.algorithm_priority(&a.algorithm))
        })
        .then_with(|| {
            cfg.classification_rank(&b.algorithm, b.params.classification.as_deref())
                .cmp(&cfg.classification_rank(&a.algorithm, a.params.classification.as_deref()))
        })
        .then_with(|| b.member_count().cmp(&a.member_count()))
}

/// Per-media-cap acceptance order: score desc → algorithm priority desc →
/// size desc.
pub fn cap_order(a: &ClusterDraft, b: &ClusterDraft, cfg: &ConsolidationConfig) -> Ordering {
    b.effective_score()
        .partial_cmp(&a.effective_score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            cfg.algorithm_priority(&b.algorithm)
                .cmp(&cfg.algorithm_priority(&a.algorithm))
        })
        .then_with(|| b.member_count().cmp(&a.member_count()))
}
