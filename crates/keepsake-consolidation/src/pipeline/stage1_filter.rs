//! Stage 1: Filter/Normalization — drop drafts failing time validity,
//! minimum size, or minimum score. Survivors keep their relative order and
//! get normalized member lists.

use std::collections::BTreeMap;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::ClusterDraft;

pub const STAGE_LABEL: &str = "filter";

/// Per-reason drop counters, for observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub invalid_time: usize,
    pub too_small: usize,
    pub low_score: usize,
}

impl FilterStats {
    pub fn as_detail(&self) -> BTreeMap<String, usize> {
        BTreeMap::from([
            ("invalid_time".to_string(), self.invalid_time),
            ("too_small".to_string(), self.too_small),
            ("low_score".to_string(), self.low_score),
        ])
    }
}

pub fn run(
    drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
) -> (Vec<ClusterDraft>, FilterStats) {
    let mut stats = FilterStats::default();
    let mut out = Vec::with_capacity(drafts.len());

    for mut draft in drafts {
        draft.normalize_members_in_place();

        if cfg.require_valid_time {
            let valid = draft
                .params
                .time_range
                .map(|r| r.is_valid(cfg.min_valid_year))
                .unwrap_or(false);
            if !valid {
                stats.invalid_time += 1;
                continue;
            }
        }

        if draft.members.len() < cfg.min_size {
            stats.too_small += 1;
            continue;
        }

        if draft.effective_score() < cfg.min_score {
            stats.low_score += 1;
            continue;
        }

        out.push(draft);
    }

    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::draft::{MediaId, TimeRange};

    // 2021-06-01 00:00 UTC.
    const T0: i64 = 1_622_505_600;

    fn draft(members: &[i64], time: Option<(i64, i64)>, score: Option<f64>) -> ClusterDraft {
        let mut d = ClusterDraft::new(
            "vacation",
            members.iter().copied().map(MediaId).collect(),
        );
        d.params.time_range = time.map(|(from, to)| TimeRange::new(from, to));
        d.params.score = score;
        d
    }

    fn cfg() -> ConsolidationConfig {
        ConsolidationConfig {
            min_size: 3,
            min_score: 0.2,
            ..Default::default()
        }
    }

    #[test]
    fn drops_missing_and_inverted_time() {
        let drafts = vec![
            draft(&[1, 2, 3], None, Some(0.9)),
            draft(&[4, 5, 6], Some((T0 + 1000, T0)), Some(0.9)),
            draft(&[7, 8, 9], Some((T0, T0 + 1000)), Some(0.9)),
        ];
        let (out, stats) = run(drafts, &cfg());
        assert_eq!(out.len(), 1);
        assert_eq!(stats.invalid_time, 2);
    }

    #[test]
    fn time_check_skipped_when_not_required() {
        let config = ConsolidationConfig {
            require_valid_time: false,
            min_size: 1,
            min_score: 0.0,
            ..Default::default()
        };
        let (out, stats) = run(vec![draft(&[1], None, None)], &config);
        assert_eq!(out.len(), 1);
        assert_eq!(stats, FilterStats::default());
    }

    #[test]
    fn drops_small_drafts_after_normalization() {
        // 4 raw members but only 2 unique — below min_size 3.
        let drafts = vec![draft(&[1, 1, 2, 2], Some((T0, T0 + 100)), Some(0.9))];
        let (out, stats) = run(drafts, &cfg());
        assert!(out.is_empty());
        assert_eq!(stats.too_small, 1);
    }

    #[test]
    fn score_falls_back_to_member_count() {
        // No explicit score: effective score = 3 members >= 0.2.
        let drafts = vec![draft(&[1, 2, 3], Some((T0, T0 + 100)), None)];
        let (out, _) = run(drafts, &cfg());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn drops_low_scores_and_preserves_order() {
        let drafts = vec![
            draft(&[1, 2, 3], Some((T0, T0 + 100)), Some(0.9)),
            draft(&[4, 5, 6], Some((T0, T0 + 100)), Some(0.1)),
            draft(&[7, 8, 9], Some((T0, T0 + 100)), Some(0.5)),
        ];
        let (out, stats) = run(drafts, &cfg());
        assert_eq!(out.len(), 2);
        assert_eq!(stats.low_score, 1);
        assert_eq!(out[0].members[0], MediaId(1));
        assert_eq!(out[1].members[0], MediaId(7));
    }
}
