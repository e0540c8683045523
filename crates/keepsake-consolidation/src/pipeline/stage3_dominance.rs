//! Stage 3: Dominance Selection — algorithms visited in keep-order (then
//! first-seen), candidates sorted by score/priority/classification/size,
//! each candidate suppressed if it overlaps an already-selected winner past
//! the merge or drop threshold. Sub-stories bypass suppression.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::{members, ClusterDraft};

use crate::ordering;

pub const STAGE_LABEL: &str = "dominance";

#[derive(Debug, Clone, Copy, Default)]
pub struct DominanceStats {
    /// Candidates rejected as near-exact duplicates (overlap >= drop).
    pub near_duplicates: usize,
    /// Candidates rejected as the same story (merge <= overlap < drop).
    pub same_story: usize,
}

impl DominanceStats {
    pub fn as_detail(&self) -> BTreeMap<String, usize> {
        BTreeMap::from([
            ("near_duplicates".to_string(), self.near_duplicates),
            ("same_story".to_string(), self.same_story),
        ])
    }
}

pub fn run(
    drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
) -> (Vec<ClusterDraft>, DominanceStats) {
    let mut stats = DominanceStats::default();

    // Bucket by algorithm, remembering first-seen order for algorithms not
    // in keep_order.
    let mut buckets: HashMap<String, Vec<ClusterDraft>> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for draft in drafts {
        if !buckets.contains_key(&draft.algorithm) {
            first_seen.push(draft.algorithm.clone());
        }
        buckets.entry(draft.algorithm.clone()).or_default().push(draft);
    }

    let mut visit_order: Vec<String> = cfg
        .keep_order
        .iter()
        .filter(|a| buckets.contains_key(*a))
        .cloned()
        .collect();
    for algorithm in first_seen {
        if !visit_order.contains(&algorithm) {
            visit_order.push(algorithm);
        }
    }

    let mut selected: Vec<ClusterDraft> = Vec::new();
    // Normalized views of selected non-sub-story winners.
    let mut winner_views: Vec<Vec<keepsake_core::draft::MediaId>> = Vec::new();

    for algorithm in visit_order {
        let mut group = buckets.remove(&algorithm).unwrap_or_default();
        group.sort_by(|a, b| ordering::dominance_order(a, b, cfg));

        for candidate in group {
            // Sub-stories were already placed by the nesting resolver (or
            // are being re-processed) — no overlap suppression.
            if candidate.is_sub_story() {
                selected.push(candidate);
                continue;
            }

            let view = candidate.normalized_members();
            let mut verdict: Option<&'static str> = None;
            for winner_view in &winner_views {
                let overlap = members::jaccard(&view, winner_view);
                if overlap >= cfg.drop_threshold {
                    verdict = Some("near_duplicate");
                    break;
                }
                if overlap >= cfg.merge_threshold {
                    verdict = Some("same_story");
                    break;
                }
            }

            match verdict {
                Some("near_duplicate") => {
                    stats.near_duplicates += 1;
                    debug!(algorithm = %candidate.algorithm, "dominance dropped near-duplicate");
                }
                Some(_) => {
                    stats.same_story += 1;
                    debug!(algorithm = %candidate.algorithm, "dominance suppressed same-story candidate");
                }
                None => {
                    winner_views.push(view);
                    selected.push(candidate);
                }
            }
        }
    }

    (selected, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::draft::MediaId;

    fn draft(algorithm: &str, members: &[i64], score: f64) -> ClusterDraft {
        let mut d = ClusterDraft::new(
            algorithm,
            members.iter().copied().map(MediaId).collect(),
        );
        d.params.score = Some(score);
        d
    }

    fn cfg() -> ConsolidationConfig {
        ConsolidationConfig {
            merge_threshold: 0.5,
            drop_threshold: 0.8,
            keep_order: vec!["vacation".into(), "day_trip".into()],
            ..Default::default()
        }
    }

    #[test]
    fn near_exact_duplicate_is_dropped() {
        // 9 of 10 shared: Jaccard 9/11 ≈ 0.82 >= 0.8.
        let winner = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9);
        let dup = draft("day_trip", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11], 0.8);
        let (out, stats) = run(vec![dup, winner], &cfg());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].algorithm, "vacation");
        assert_eq!(stats.near_duplicates, 1);
    }

    #[test]
    fn merge_zone_candidate_is_suppressed() {
        // 8 of 10 shared: Jaccard 8/12 ≈ 0.67 — merge zone, below drop.
        let winner = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9);
        let same = draft("day_trip", &[1, 2, 3, 4, 5, 6, 7, 8, 11, 12], 0.8);
        let (out, stats) = run(vec![same, winner], &cfg());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].algorithm, "vacation");
        assert_eq!(stats.same_story, 1);
    }

    #[test]
    fn low_overlap_candidates_both_survive() {
        // 2 of 10 shared: Jaccard 2/18 ≈ 0.11.
        let a = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9);
        let b = draft("day_trip", &[9, 10, 11, 12, 13, 14, 15, 16, 17, 18], 0.8);
        let (out, stats) = run(vec![a, b], &cfg());
        assert_eq!(out.len(), 2);
        assert_eq!(stats.near_duplicates + stats.same_story, 0);
    }

    #[test]
    fn keep_order_decides_which_algorithm_wins() {
        // day_trip has the higher score but vacation is visited first.
        let vac = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.5);
        let day = draft("day_trip", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11], 0.9);
        let (out, _) = run(vec![day, vac], &cfg());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].algorithm, "vacation");
    }

    #[test]
    fn within_group_best_score_wins() {
        let strong = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9);
        let weak = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11], 0.4);
        let (out, _) = run(vec![weak, strong], &cfg());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].params.score, Some(0.9));
    }

    #[test]
    fn sub_stories_bypass_suppression() {
        let winner = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9);
        let mut child = draft("day_trip", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.3);
        child.params.is_sub_story = true;
        let (out, _) = run(vec![winner, child], &cfg());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unlisted_algorithms_visited_after_keep_order() {
        let pets = draft("pets", &[20, 21, 22], 0.9);
        let vac = draft("vacation", &[1, 2, 3], 0.1);
        let (out, _) = run(vec![pets, vac], &cfg());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].algorithm, "vacation");
        assert_eq!(out[1].algorithm, "pets");
    }
}
