//! Stage 4: Overlap Resolver — for surviving near-duplicate pairs, decide
//! merge vs. dedupe with five independent signals:
//! temporal IoU >= 0.55, staypoint/centroid distance <= 25 000 m, core-group
//! Jaccard >= 0.5, median phash delta <= 0.18, score gap <= 35%.
//! All five must pass for a merge; otherwise the loser is dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::debug;

use keepsake_core::config::{ConsolidationConfig, MergeSignalConfig};
use keepsake_core::draft::{
    members, ClusterDraft, GeoPoint, MediaId, MergeAudit, MergeMetrics, MergeRole,
};
use keepsake_core::media::{quality as item_quality, MediaItem};

use crate::ordering;

pub const STAGE_LABEL: &str = "overlap";

/// Cap on member hashes sampled per side for the median phash delta.
const PHASH_SAMPLE: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapStats {
    pub merged: usize,
    pub deduped: usize,
}

impl OverlapStats {
    pub fn as_detail(&self) -> BTreeMap<String, usize> {
        BTreeMap::from([
            ("merged".to_string(), self.merged),
            ("deduped".to_string(), self.deduped),
        ])
    }
}

pub fn run(
    mut drafts: Vec<ClusterDraft>,
    cfg: &ConsolidationConfig,
    media: &HashMap<MediaId, MediaItem>,
) -> (Vec<ClusterDraft>, OverlapStats) {
    let mut stats = OverlapStats::default();

    let mut i = 0;
    'outer: while i < drafts.len() {
        if drafts[i].is_sub_story() {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < drafts.len() {
            if drafts[j].is_sub_story() {
                j += 1;
                continue;
            }

            let overlap = members::jaccard(
                &drafts[i].normalized_members(),
                &drafts[j].normalized_members(),
            );
            let same_algorithm = drafts[i].algorithm == drafts[j].algorithm;
            let in_scope = overlap >= cfg.merge_threshold
                && (overlap >= cfg.drop_threshold || same_algorithm);
            if !in_scope {
                j += 1;
                continue;
            }

            let left_wins = ordering::prefer_left(&drafts[i], &drafts[j], cfg);
            let (winner, loser) = if left_wins { (i, j) } else { (j, i) };

            let metrics = merge_metrics(&drafts[winner], &drafts[loser], media);
            let merge = signals_pass(&metrics, &cfg.merge_signals);

            let audit = MergeAudit {
                role: MergeRole::Winner,
                counterpart_fingerprint: drafts[loser].fingerprint(),
                counterpart_algorithm: drafts[loser].algorithm.clone(),
                counterpart_score: drafts[loser].effective_score(),
                merged: merge,
                metrics: metrics.clone(),
            };

            if merge {
                let absorbed = drafts[loser].clone();
                absorb(&mut drafts[winner], &absorbed);
                stats.merged += 1;
                debug!(
                    winner = %drafts[winner].algorithm,
                    loser = %absorbed.algorithm,
                    overlap,
                    "overlap resolver merged pair"
                );
            } else {
                stats.deduped += 1;
                debug!(
                    winner = %drafts[winner].algorithm,
                    loser = %drafts[loser].algorithm,
                    overlap,
                    "overlap resolver dropped loser"
                );
            }
            drafts[winner].params.merges.push(audit);
            drafts.remove(loser);

            if loser == i {
                // The winner sat at j and has shifted left; rescan from the
                // same outer index so it can absorb further counterparts.
                continue 'outer;
            }
            // loser == j: the next candidate now sits at j — do not advance.
        }
        i += 1;
    }

    (drafts, stats)
}

/// Check all five signals against the configured thresholds. A signal with
/// missing inputs (`None`) fails, so pairs without evidence dedupe.
fn signals_pass(metrics: &MergeMetrics, cfg: &MergeSignalConfig) -> bool {
    metrics.temporal_iou >= cfg.min_temporal_iou
        && metrics
            .staypoint_distance_m
            .is_some_and(|d| d <= cfg.max_staypoint_distance_m)
        && metrics.core_group_jaccard >= cfg.min_core_group_jaccard
        && metrics
            .median_phash_delta
            .is_some_and(|d| d <= cfg.max_median_phash_delta)
        && metrics.score_gap_ratio <= cfg.max_score_gap_ratio
}

fn merge_metrics(
    winner: &ClusterDraft,
    loser: &ClusterDraft,
    media: &HashMap<MediaId, MediaItem>,
) -> MergeMetrics {
    let temporal_iou = match (winner.params.time_range, loser.params.time_range) {
        (Some(a), Some(b)) => a.iou(b),
        _ => 0.0,
    };

    let staypoint_distance_m = match (anchor_point(winner), anchor_point(loser)) {
        (Some(a), Some(b)) => Some(a.distance_m(b)),
        _ => None,
    };

    let core_group_jaccard = string_jaccard(
        &core_group_signals(winner, media),
        &core_group_signals(loser, media),
    );

    let median_phash_delta = median_pair_delta(
        &member_hashes(winner, media),
        &member_hashes(loser, media),
    );

    let winner_score = winner.effective_score();
    let loser_score = loser.effective_score();
    let score_gap_ratio =
        (winner_score - loser_score).abs() / winner_score.abs().max(f64::EPSILON);

    MergeMetrics {
        temporal_iou,
        staypoint_distance_m,
        core_group_jaccard,
        median_phash_delta,
        score_gap_ratio,
    }
}

/// Primary staypoint location, falling back to the draft centroid.
fn anchor_point(draft: &ClusterDraft) -> Option<GeoPoint> {
    draft
        .params
        .primary_staypoint
        .as_ref()
        .and_then(|sp| sp.location)
        .or_else(|| draft.effective_centroid())
}

/// The "core group" string signals of a draft: place labels (draft place,
/// staypoint labels, countries) plus person names from member media.
fn core_group_signals(
    draft: &ClusterDraft,
    media: &HashMap<MediaId, MediaItem>,
) -> BTreeSet<String> {
    let mut signals = BTreeSet::new();

    if let Some(place) = &draft.params.place {
        for part in place.split(',') {
            let part = part.trim().to_lowercase();
            if !part.is_empty() {
                signals.insert(part);
            }
        }
    }
    for sp in draft
        .params
        .staypoints
        .iter()
        .chain(draft.params.primary_staypoint.iter())
    {
        if let Some(label) = sp.route_label() {
            signals.insert(label.to_lowercase());
        }
        if let Some(country) = &sp.country {
            signals.insert(country.to_lowercase());
        }
    }
    for country in &draft.params.countries {
        signals.insert(country.to_lowercase());
    }
    for id in draft.normalized_members() {
        if let Some(item) = media.get(&id) {
            for person in &item.persons {
                signals.insert(person.to_lowercase());
            }
        }
    }

    signals
}

fn string_jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

fn member_hashes(draft: &ClusterDraft, media: &HashMap<MediaId, MediaItem>) -> Vec<u64> {
    draft
        .normalized_members()
        .iter()
        .filter_map(|id| media.get(id).and_then(|m| m.phash))
        .take(PHASH_SAMPLE)
        .collect()
}

/// Median normalized Hamming distance across the cross product of the two
/// hash samples. `None` when either side has no hashes.
fn median_pair_delta(a: &[u64], b: &[u64]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let mut deltas: Vec<f64> = a
        .iter()
        .flat_map(|x| b.iter().map(move |y| item_quality::normalized_phash_delta(*x, *y)))
        .collect();
    deltas.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    let mid = deltas.len() / 2;
    Some(if deltas.len() % 2 == 0 {
        (deltas[mid - 1] + deltas[mid]) / 2.0
    } else {
        deltas[mid]
    })
}

/// Merge the loser into the winner: member union (winner order first,
/// loser-only appended), time envelope, staypoint/selection fallbacks, max
/// score.
fn absorb(winner: &mut ClusterDraft, loser: &ClusterDraft) {
    let mut seen: HashSet<MediaId> = winner.members.iter().copied().collect();
    for id in &loser.members {
        if seen.insert(*id) {
            winner.members.push(*id);
        }
    }

    winner.params.time_range = match (winner.params.time_range, loser.params.time_range) {
        (Some(a), Some(b)) => Some(a.envelope(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    };

    if winner.params.primary_staypoint.is_none() {
        winner.params.primary_staypoint = loser.params.primary_staypoint.clone();
    }
    if winner.params.member_selection.is_none() {
        winner.params.member_selection = loser.params.member_selection.clone();
    }

    winner.params.score = match (winner.params.score, loser.params.score) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    };
}
