//! Stage 5: Nesting Resolver — detect strict subset/superset member
//! relationships. A subset draft is kept, tagged as a sub-story, and
//! cross-referenced from its parent; a child with several candidate parents
//! keeps only the strongest one (shared comparator).

use std::collections::BTreeMap;

use tracing::debug;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::{members, ClusterDraft, ParentRef, SubStoryRef};

use crate::ordering;

pub const STAGE_LABEL: &str = "nesting";

struct DraftInfo {
    fingerprint: String,
    algorithm: String,
    priority: i64,
    score: f64,
    member_count: usize,
}

pub fn run(
    mut drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
) -> (Vec<ClusterDraft>, usize) {
    let n = drafts.len();
    let views: Vec<Vec<keepsake_core::draft::MediaId>> =
        drafts.iter().map(|d| d.normalized_members()).collect();

    // Candidate parents per child, from the O(n+m) two-pointer containment
    // check over every unordered pair.
    let mut candidate_parents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if members::is_strict_subset(&views[i], &views[j]) {
                candidate_parents[i].push(j);
            } else if members::is_strict_subset(&views[j], &views[i]) {
                candidate_parents[j].push(i);
            }
        }
    }

    let info: Vec<DraftInfo> = drafts
        .iter()
        .map(|d| DraftInfo {
            fingerprint: d.fingerprint(),
            algorithm: d.algorithm.clone(),
            priority: cfg.algorithm_priority(&d.algorithm),
            score: d.effective_score(),
            member_count: d.member_count(),
        })
        .collect();

    // Strongest parent per child.
    let mut chosen_parent: Vec<Option<usize>> = vec![None; n];
    for child in 0..n {
        let mut best: Option<usize> = None;
        for &parent in &candidate_parents[child] {
            best = Some(match best {
                None => parent,
                Some(current) => {
                    if ordering::prefer_left(&drafts[parent], &drafts[current], cfg) {
                        parent
                    } else {
                        current
                    }
                }
            });
        }
        chosen_parent[child] = best;
    }

    let mut sub_lists: BTreeMap<usize, Vec<SubStoryRef>> = BTreeMap::new();
    let mut nested = 0usize;

    for child in 0..n {
        let Some(parent) = chosen_parent[child] else {
            continue;
        };
        nested += 1;
        debug!(
            child = %info[child].algorithm,
            parent = %info[parent].algorithm,
            "nesting resolver tagged sub-story"
        );

        let params = &mut drafts[child].params;
        params.is_sub_story = true;
        params.sub_story_priority = Some(info[child].priority);
        params.sub_story_of = Some(ParentRef {
            algorithm: info[parent].algorithm.clone(),
            fingerprint: info[parent].fingerprint.clone(),
            priority: info[parent].priority,
        });

        sub_lists.entry(parent).or_default().push(SubStoryRef {
            algorithm: info[child].algorithm.clone(),
            fingerprint: info[child].fingerprint.clone(),
            priority: info[child].priority,
            score: info[child].score,
            member_count: info[child].member_count,
        });
    }

    for (parent, mut subs) in sub_lists {
        // Child priority desc → score desc → member count desc →
        // fingerprint as the final tiebreak.
        subs.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| b.member_count.cmp(&a.member_count))
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        drafts[parent].params.has_sub_stories = true;
        drafts[parent].params.sub_stories = subs;
    }

    (drafts, nested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::draft::MediaId;

    fn draft(algorithm: &str, ids: &[i64], score: f64) -> ClusterDraft {
        let mut d = ClusterDraft::new(
            algorithm,
            ids.iter().copied().map(MediaId).collect(),
        );
        d.params.score = Some(score);
        d
    }

    fn cfg() -> ConsolidationConfig {
        ConsolidationConfig {
            keep_order: vec!["vacation".into(), "weekend".into(), "day_trip".into()],
            ..Default::default()
        }
    }

    #[test]
    fn subset_becomes_sub_story_and_is_never_dropped() {
        let parent = draft("vacation", &[1, 2, 3, 4, 5, 6], 0.9);
        let child = draft("day_trip", &[2, 3, 4], 0.5);
        let child_fingerprint = child.fingerprint();

        let (out, nested) = run(vec![parent, child], &cfg());
        assert_eq!(out.len(), 2, "children are retained, not dropped");
        assert_eq!(nested, 1);

        let child_out = &out[1];
        assert!(child_out.params.is_sub_story);
        assert_eq!(
            child_out.params.sub_story_of.as_ref().unwrap().algorithm,
            "vacation"
        );

        let parent_out = &out[0];
        assert!(parent_out.params.has_sub_stories);
        assert_eq!(parent_out.params.sub_stories.len(), 1);
        assert_eq!(parent_out.params.sub_stories[0].fingerprint, child_fingerprint);
    }

    #[test]
    fn non_nested_pairs_untouched() {
        let a = draft("vacation", &[1, 2, 3], 0.9);
        let b = draft("day_trip", &[3, 4, 5], 0.5);
        let (out, nested) = run(vec![a, b], &cfg());
        assert_eq!(nested, 0);
        assert!(out.iter().all(|d| !d.params.is_sub_story));
        assert!(out.iter().all(|d| d.params.sub_stories.is_empty()));
    }

    #[test]
    fn child_with_multiple_parents_keeps_the_strongest() {
        let strong = draft("vacation", &[1, 2, 3, 4, 5], 0.9);
        let weak = draft("weekend", &[1, 2, 3, 4], 0.8);
        let child = draft("day_trip", &[2, 3], 0.4);

        let (out, _) = run(vec![strong, weak, child], &cfg());
        let child_out = out.iter().find(|d| d.algorithm == "day_trip").unwrap();
        assert_eq!(
            child_out.params.sub_story_of.as_ref().unwrap().algorithm,
            "vacation"
        );
        // Only the chosen parent lists the child. The vacation draft also
        // nests the weekend draft (itself a strict subset).
        let strong_out = out.iter().find(|d| d.algorithm == "vacation").unwrap();
        assert_eq!(strong_out.params.sub_stories.len(), 2);
        assert!(strong_out
            .params
            .sub_stories
            .iter()
            .any(|s| s.algorithm == "day_trip"));
        let weak_out = out.iter().find(|d| d.algorithm == "weekend").unwrap();
        // The weekend draft is itself a subset of the vacation draft.
        assert!(weak_out.params.is_sub_story);
        assert!(!weak_out
            .params
            .sub_stories
            .iter()
            .any(|s| s.algorithm == "day_trip"));
    }

    #[test]
    fn sub_stories_ordered_by_priority_then_score() {
        let parent = draft("vacation", &[1, 2, 3, 4, 5, 6, 7, 8], 0.9);
        let low_priority = draft("day_trip", &[1, 2, 3], 0.9);
        let high_priority = draft("weekend", &[4, 5, 6], 0.2);

        let (out, _) = run(vec![parent, low_priority, high_priority], &cfg());
        let parent_out = out.iter().find(|d| d.algorithm == "vacation").unwrap();
        assert_eq!(parent_out.params.sub_stories.len(), 2);
        assert_eq!(parent_out.params.sub_stories[0].algorithm, "weekend");
        assert_eq!(parent_out.params.sub_stories[1].algorithm, "day_trip");
    }

    #[test]
    fn identical_sets_are_not_nested() {
        let a = draft("vacation", &[1, 2, 3], 0.9);
        let b = draft("day_trip", &[1, 2, 3], 0.5);
        let (_, nested) = run(vec![a, b], &cfg());
        assert_eq!(nested, 0);
    }
}
