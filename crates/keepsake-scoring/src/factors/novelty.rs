//! Novelty component: blend of staypoint rarity, rare-staypoint share,
//! day-of-year rarity, device rarity, and perceptual-hash rarity, scaled
//! down by a history-overlap penalty against previously surfaced stories.

use chrono::Datelike;

use keepsake_core::draft::{members, ClusterDraft};

use crate::formula::ScoreContext;

const W_STAYPOINT: f64 = 0.25;
const W_RARE_SHARE: f64 = 0.15;
const W_DAY_OF_YEAR: f64 = 0.20;
const W_DEVICE: f64 = 0.15;
const W_PHASH: f64 = 0.25;

/// A staypoint is "rare" when its corpus count is at most this share of the
/// most common staypoint's count.
const RARE_STAYPOINT_SHARE: f64 = 0.25;

/// How much of the blend a full overlap with history removes.
const HISTORY_PENALTY: f64 = 0.6;

/// Signal value when a sub-signal has no usable inputs.
const NEUTRAL: f64 = 0.5;

pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return NEUTRAL;
    }
    let stats = ctx.stats;

    let staypoint = mean_or_neutral(
        items
            .iter()
            .filter_map(|m| m.staypoint_id.as_deref())
            .map(|sp| stats.staypoint_rarity(sp)),
    );

    let rare_share = {
        let with_sp: Vec<&str> = items
            .iter()
            .filter_map(|m| m.staypoint_id.as_deref())
            .collect();
        if with_sp.is_empty() || stats.staypoint_max() == 0 {
            NEUTRAL
        } else {
            let ceiling = (stats.staypoint_max() as f64 * RARE_STAYPOINT_SHARE).ceil() as u32;
            let rare = with_sp
                .iter()
                .filter(|sp| stats.staypoint_count(sp) <= ceiling)
                .count();
            rare as f64 / with_sp.len() as f64
        }
    };

    let day_of_year = mean_or_neutral(
        items
            .iter()
            .filter_map(|m| m.taken_at)
            .map(|t| stats.day_of_year_rarity(t.ordinal())),
    );

    let device = mean_or_neutral(
        items
            .iter()
            .filter_map(|m| m.camera_model.as_deref())
            .map(|model| stats.camera_rarity(model)),
    );

    let phash = mean_or_neutral(
        items
            .iter()
            .filter_map(|m| m.phash)
            .map(|h| stats.phash_rarity(h)),
    );

    let blend = W_STAYPOINT * staypoint
        + W_RARE_SHARE * rare_share
        + W_DAY_OF_YEAR * day_of_year
        + W_DEVICE * device
        + W_PHASH * phash;

    // Penalize re-surfacing: overlap with the closest previously shown story.
    let own = draft.normalized_members();
    let max_overlap = ctx
        .history
        .iter()
        .map(|past| members::jaccard(&own, past))
        .fold(0.0f64, f64::max);

    (blend * (1.0 - max_overlap * HISTORY_PENALTY)).clamp(0.0, 1.0)
}

fn mean_or_neutral(values: impl Iterator<Item = f64>) -> f64 {
    let (mut sum, mut count) = (0.0f64, 0usize);
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        NEUTRAL
    } else {
        sum / count as f64
    }
}
