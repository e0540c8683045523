//! Member quality ranking.
//!
//! Per member: quality (resolution/sharpness/ISO, blended against the
//! cluster average) and aesthetics (brightness balance, contrast, entropy,
//! colorfulness), scaled down by a multiplicative duplicate penalty for
//! repeated phash/dhash/burst keys. Members are reordered descending by the
//! final score, stable on ties.

use std::collections::HashMap;

use keepsake_core::draft::{
    ClusterDraft, MediaId, MemberQualityEntry, MemberQualityReport,
};
use keepsake_core::media::{quality as item_quality, MediaItem};

/// Weight of the quality component in the final member score.
const QUALITY_WEIGHT: f64 = 0.7;
/// Weight of the aesthetic component.
const AESTHETICS_WEIGHT: f64 = 0.3;
/// Neutral component value when an item carries no usable signals.
const NEUTRAL_COMPONENT: f64 = 0.5;
/// Share of the quality component taken from the cluster-relative blend.
const RELATIVE_BLEND: f64 = 0.3;
/// Penalty for the k-th repeat of a duplicate key: `1 - DUPLICATE_DECAY^k`.
const DUPLICATE_DECAY: f64 = 0.6;
/// Ceiling on the combined duplicate penalty.
const MAX_DUPLICATE_PENALTY: f64 = 0.9;

/// Output of the ranking: the reordered member list plus the full report.
#[derive(Debug, Clone)]
pub struct RankedMembers {
    pub ordered: Vec<MediaId>,
    pub report: MemberQualityReport,
}

/// Score and reorder a draft's members by per-item quality.
///
/// Members with no resolvable media record are skipped from computation
/// (components 0.0) but stay in the list; they sink to the bottom.
pub fn rank_members(
    draft: &ClusterDraft,
    media: &HashMap<MediaId, MediaItem>,
    baseline_megapixels: f64,
) -> RankedMembers {
    let members = draft.normalized_members();

    // Cluster averages for the relative blend.
    let qualities: Vec<f64> = members
        .iter()
        .filter_map(|id| media.get(id))
        .filter_map(|item| item_quality::quality_component(item, baseline_megapixels))
        .collect();
    let cluster_avg = if qualities.is_empty() {
        None
    } else {
        Some(qualities.iter().sum::<f64>() / qualities.len() as f64)
    };

    let mut phash_seen: HashMap<u64, u32> = HashMap::new();
    let mut dhash_seen: HashMap<u64, u32> = HashMap::new();
    let mut burst_seen: HashMap<String, u32> = HashMap::new();

    let mut entries: Vec<MemberQualityEntry> = members
        .iter()
        .map(|id| {
            let Some(item) = media.get(id) else {
                return MemberQualityEntry {
                    id: *id,
                    quality: 0.0,
                    aesthetics: 0.0,
                    duplicate_penalty: 0.0,
                    score: 0.0,
                };
            };

            let quality = quality_for(item, cluster_avg, baseline_megapixels);
            let aesthetics =
                item_quality::aesthetic_component(item).unwrap_or(NEUTRAL_COMPONENT);
            let duplicate_penalty = duplicate_penalty(
                item,
                &mut phash_seen,
                &mut dhash_seen,
                &mut burst_seen,
            );

            let base = quality * QUALITY_WEIGHT + aesthetics * AESTHETICS_WEIGHT;
            MemberQualityEntry {
                id: *id,
                quality,
                aesthetics,
                duplicate_penalty,
                score: base * (1.0 - duplicate_penalty),
            }
        })
        .collect();

    // Stable sort: ties keep the normalized (numeric) member order.
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let ordered = entries.iter().map(|e| e.id).collect();
    RankedMembers {
        ordered,
        report: MemberQualityReport { entries },
    }
}

fn quality_for(item: &MediaItem, cluster_avg: Option<f64>, baseline_megapixels: f64) -> f64 {
    let own = match item_quality::quality_component(item, baseline_megapixels) {
        Some(q) => q,
        None => return NEUTRAL_COMPONENT,
    };
    match cluster_avg {
        Some(avg) => {
            // Reward items above the cluster average, punish ones below.
            let relative = (0.5 + (own - avg) / 2.0).clamp(0.0, 1.0);
            (own * (1.0 - RELATIVE_BLEND) + relative * RELATIVE_BLEND).clamp(0.0, 1.0)
        }
        None => own,
    }
}

/// Multiplicative duplicate penalty across phash, dhash, and burst keys.
/// First occurrence of a key is free; repeats escalate, capped at 0.9.
fn duplicate_penalty(
    item: &MediaItem,
    phash_seen: &mut HashMap<u64, u32>,
    dhash_seen: &mut HashMap<u64, u32>,
    burst_seen: &mut HashMap<String, u32>,
) -> f64 {
    let mut parts: Vec<f64> = Vec::with_capacity(3);

    if let Some(phash) = item.phash {
        let repeats = *phash_seen.entry(phash).and_modify(|c| *c += 1).or_insert(0);
        parts.push(repeat_penalty(repeats));
    }
    if let Some(dhash) = item.dhash {
        let repeats = *dhash_seen.entry(dhash).and_modify(|c| *c += 1).or_insert(0);
        parts.push(repeat_penalty(repeats));
    }
    if let Some(burst) = &item.burst_id {
        let repeats = *burst_seen
            .entry(burst.clone())
            .and_modify(|c| *c += 1)
            .or_insert(0);
        parts.push(repeat_penalty(repeats));
    }

    let kept = parts.iter().fold(1.0, |acc, p| acc * (1.0 - p));
    (1.0 - kept).min(MAX_DUPLICATE_PENALTY)
}

fn repeat_penalty(repeats: u32) -> f64 {
    if repeats == 0 {
        0.0
    } else {
        1.0 - DUPLICATE_DECAY.powi(repeats as i32)
    }
}
