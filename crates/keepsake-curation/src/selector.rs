//! Default `MemberSelector`: trims a draft's members against per-day and
//! per-slot caps, minimum shot spacing, perceptual-hash near-duplicate
//! suppression, and per-staypoint caps, producing rejection telemetry.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::debug;

use keepsake_core::config::CurationPolicy;
use keepsake_core::draft::{ClusterDraft, MediaId, SelectionResult, SelectionTelemetry};
use keepsake_core::media::{quality as item_quality, MediaItem};
use keepsake_core::traits::MemberSelector;

/// Rejection reason labels recorded into telemetry.
const REASON_DAY_CAP: &str = "day_cap";
const REASON_SLOT_CAP: &str = "slot_cap";
const REASON_SPACING: &str = "spacing";
const REASON_NEAR_DUPLICATE: &str = "near_duplicate";
const REASON_STAYPOINT_CAP: &str = "staypoint_cap";

/// Bound on the pairwise hash comparisons folded into telemetry.
const HASH_PAIR_SAMPLE: usize = 32;

/// Spacing/dedup selector. Iterates members in the draft's current order
/// (quality-ranked when the ranking stage has run) and greedily accepts
/// members that violate no policy cap.
pub struct SpacingSelector;

impl MemberSelector for SpacingSelector {
    fn select(
        &self,
        draft: &ClusterDraft,
        media: &HashMap<MediaId, MediaItem>,
        policy: &CurationPolicy,
    ) -> SelectionResult {
        let mut seen: HashSet<MediaId> = HashSet::new();
        let candidates: Vec<MediaId> = draft
            .members
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut accepted: Vec<MediaId> = Vec::new();
        let mut accepted_times: Vec<DateTime<Utc>> = Vec::new();
        let mut accepted_hashes: Vec<u64> = Vec::new();
        let mut per_day: BTreeMap<String, usize> = BTreeMap::new();
        let mut per_slot: BTreeMap<(String, &'static str), usize> = BTreeMap::new();
        let mut per_staypoint: HashMap<String, usize> = HashMap::new();
        let mut rejections: BTreeMap<String, usize> = BTreeMap::new();

        for id in &candidates {
            let Some(item) = media.get(id) else {
                // No metadata to judge against — the caps cannot apply.
                accepted.push(*id);
                continue;
            };

            if let Some(reason) = rejection_reason(
                item,
                policy,
                &accepted_times,
                &accepted_hashes,
                &per_day,
                &per_slot,
                &per_staypoint,
            ) {
                *rejections.entry(reason.to_string()).or_insert(0) += 1;
                debug!(member = %id, reason, "curation rejected member");
                continue;
            }

            accepted.push(*id);
            if let Some(taken_at) = item.taken_at {
                let day = taken_at.format("%Y-%m-%d").to_string();
                *per_day.entry(day.clone()).or_insert(0) += 1;
                *per_slot.entry((day, day_slot(taken_at))).or_insert(0) += 1;
                accepted_times.push(taken_at);
            }
            if let Some(phash) = item.phash {
                accepted_hashes.push(phash);
            }
            if let Some(sp) = &item.staypoint_id {
                *per_staypoint.entry(sp.clone()).or_insert(0) += 1;
            }
        }

        let telemetry = build_telemetry(
            candidates.len(),
            &accepted,
            &accepted_times,
            &accepted_hashes,
            per_day,
            rejections,
            media,
            policy,
        );

        SelectionResult {
            members: accepted,
            telemetry,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn rejection_reason(
    item: &MediaItem,
    policy: &CurationPolicy,
    accepted_times: &[DateTime<Utc>],
    accepted_hashes: &[u64],
    per_day: &BTreeMap<String, usize>,
    per_slot: &BTreeMap<(String, &'static str), usize>,
    per_staypoint: &HashMap<String, usize>,
) -> Option<&'static str> {
    if let Some(taken_at) = item.taken_at {
        let day = taken_at.format("%Y-%m-%d").to_string();
        if per_day.get(&day).copied().unwrap_or(0) >= policy.per_day_cap {
            return Some(REASON_DAY_CAP);
        }
        let slot = (day, day_slot(taken_at));
        if per_slot.get(&slot).copied().unwrap_or(0) >= policy.per_bucket_cap {
            return Some(REASON_SLOT_CAP);
        }
        if accepted_times
            .iter()
            .any(|t| (taken_at - *t).num_seconds().abs() < policy.min_spacing_secs)
        {
            return Some(REASON_SPACING);
        }
    }

    if let Some(phash) = item.phash {
        if accepted_hashes
            .iter()
            .any(|h| item_quality::phash_distance(*h, phash) < policy.min_phash_distance)
        {
            return Some(REASON_NEAR_DUPLICATE);
        }
    }

    if let Some(sp) = &item.staypoint_id {
        if per_staypoint.get(sp).copied().unwrap_or(0) >= policy.per_staypoint_cap {
            return Some(REASON_STAYPOINT_CAP);
        }
    }

    None
}

/// Coarse day slot for per-bucket caps.
fn day_slot(at: DateTime<Utc>) -> &'static str {
    match at.hour() {
        0..=5 => "night",
        6..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    }
}

#[allow(clippy::too_many_arguments)]
fn build_telemetry(
    candidates: usize,
    accepted: &[MediaId],
    accepted_times: &[DateTime<Utc>],
    accepted_hashes: &[u64],
    per_day: BTreeMap<String, usize>,
    rejections: BTreeMap<String, usize>,
    media: &HashMap<MediaId, MediaItem>,
    policy: &CurationPolicy,
) -> SelectionTelemetry {
    let mut times = accepted_times.to_vec();
    times.sort_unstable();
    let avg_time_gap_secs = if times.len() >= 2 {
        let total: i64 = times
            .windows(2)
            .map(|w| (w[1] - w[0]).num_seconds())
            .sum();
        Some(total as f64 / (times.len() - 1) as f64)
    } else {
        None
    };

    let sample = &accepted_hashes[..accepted_hashes.len().min(HASH_PAIR_SAMPLE)];
    let mut pair_count = 0usize;
    let mut pair_total = 0u64;
    for (i, a) in sample.iter().enumerate() {
        for b in &sample[i + 1..] {
            pair_total += u64::from(item_quality::phash_distance(*a, *b));
            pair_count += 1;
        }
    }
    let avg_hash_distance = if pair_count > 0 {
        Some(pair_total as f64 / pair_count as f64)
    } else {
        None
    };

    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut per_bucket: BTreeMap<String, usize> = BTreeMap::new();
    for id in accepted {
        if let Some(taken_at) = media.get(id).and_then(|m| m.taken_at) {
            *per_year.entry(taken_at.year()).or_insert(0) += 1;
            *per_bucket.entry(day_slot(taken_at).to_string()).or_insert(0) += 1;
        }
    }

    let hash_samples = accepted_hashes
        .iter()
        .take(policy.hash_sample_limit)
        .map(|h| format!("{h:016x}"))
        .collect();

    SelectionTelemetry {
        candidates,
        selected: accepted.len(),
        rejections,
        avg_time_gap_secs,
        avg_hash_distance,
        per_day,
        per_year,
        per_bucket,
        hash_samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs_offset: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs_offset, 0).unwrap()
    }

    fn item(id: i64, taken_at: Option<DateTime<Utc>>) -> MediaItem {
        let mut m = MediaItem::bare(MediaId(id));
        m.taken_at = taken_at;
        m
    }

    fn catalog(items: Vec<MediaItem>) -> HashMap<MediaId, MediaItem> {
        items.into_iter().map(|m| (m.id, m)).collect()
    }

    fn draft(ids: &[i64]) -> ClusterDraft {
        ClusterDraft::new("vacation", ids.iter().copied().map(MediaId).collect())
    }

    #[test]
    fn spacing_rejects_rapid_fire_shots() {
        let media = catalog(vec![
            item(1, Some(at(0))),
            item(2, Some(at(30))),   // 30 s later — inside default 120 s spacing
            item(3, Some(at(3600))), // 1 h later — fine
        ]);
        let result =
            SpacingSelector.select(&draft(&[1, 2, 3]), &media, &CurationPolicy::default());
        assert_eq!(result.members, vec![MediaId(1), MediaId(3)]);
        assert_eq!(result.telemetry.rejections.get("spacing"), Some(&1));
        assert_eq!(result.telemetry.candidates, 3);
        assert_eq!(result.telemetry.selected, 2);
    }

    #[test]
    fn near_duplicate_hashes_suppressed() {
        let mut a = item(1, Some(at(0)));
        a.phash = Some(0b1111_0000);
        let mut b = item(2, Some(at(10_000)));
        b.phash = Some(0b1111_0001); // 1 bit away — under default min distance 6
        let mut c = item(3, Some(at(20_000)));
        c.phash = Some(u64::MAX); // far away

        let result = SpacingSelector.select(
            &draft(&[1, 2, 3]),
            &catalog(vec![a, b, c]),
            &CurationPolicy::default(),
        );
        assert_eq!(result.members, vec![MediaId(1), MediaId(3)]);
        assert_eq!(result.telemetry.rejections.get("near_duplicate"), Some(&1));
    }

    #[test]
    fn per_day_cap_enforced() {
        let policy = CurationPolicy {
            per_day_cap: 2,
            per_bucket_cap: 2,
            min_spacing_secs: 0,
            ..Default::default()
        };
        // Four shots on the same day (midnight-aligned base), well spaced.
        let midnight = Utc.timestamp_opt(1_700_006_400, 0).unwrap();
        let media = catalog(
            (0..4i64)
                .map(|i| item(i + 1, Some(midnight + chrono::Duration::seconds(i * 7200))))
                .collect(),
        );
        let result = SpacingSelector.select(&draft(&[1, 2, 3, 4]), &media, &policy);
        assert_eq!(result.members.len(), 2);
        assert_eq!(result.telemetry.rejections.get("day_cap"), Some(&2));
    }

    #[test]
    fn staypoint_cap_enforced() {
        let policy = CurationPolicy {
            per_staypoint_cap: 1,
            min_spacing_secs: 0,
            ..Default::default()
        };
        let mut a = item(1, Some(at(0)));
        a.staypoint_id = Some("sp-1".to_string());
        let mut b = item(2, Some(at(50_000)));
        b.staypoint_id = Some("sp-1".to_string());
        let result =
            SpacingSelector.select(&draft(&[1, 2]), &catalog(vec![a, b]), &policy);
        assert_eq!(result.members, vec![MediaId(1)]);
        assert_eq!(result.telemetry.rejections.get("staypoint_cap"), Some(&1));
    }

    #[test]
    fn members_without_metadata_pass_through() {
        let result = SpacingSelector.select(
            &draft(&[7, 8]),
            &HashMap::new(),
            &CurationPolicy::default(),
        );
        assert_eq!(result.members, vec![MediaId(7), MediaId(8)]);
        assert!(result.telemetry.rejections.is_empty());
    }

    #[test]
    fn telemetry_distributions_cover_selected() {
        let media = catalog(vec![
            item(1, Some(at(0))),
            item(2, Some(at(86_400 * 2))),
        ]);
        let result =
            SpacingSelector.select(&draft(&[1, 2]), &media, &CurationPolicy::default());
        assert_eq!(result.telemetry.per_day.len(), 2);
        let day_total: usize = result.telemetry.per_day.values().sum();
        assert_eq!(day_total, result.telemetry.selected);
        assert!(result.telemetry.avg_time_gap_secs.is_some());
    }
}
