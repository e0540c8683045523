use std::collections::HashSet;

use keepsake_core::draft::ClusterDraft;
use keepsake_core::media::quality as item_quality;

use crate::formula::ScoreContext;

/// Weight of POI-label presence.
const W_PRESENCE: f64 = 0.6;
/// Bonus when a member matches an iconic-landmark phash signature.
const ICONIC_BONUS: f64 = 0.2;
/// Ceiling on accumulated per-category boosts.
const MAX_CATEGORY_BOOST: f64 = 0.3;

/// POI component: label presence, configured per-category boosts, and an
/// iconic-landmark phash-signature match bonus.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let n = items.len() as f64;

    let with_poi = items.iter().filter(|m| !m.poi_labels.is_empty()).count() as f64;
    let presence = with_poi / n;

    let categories: HashSet<&str> = items
        .iter()
        .flat_map(|m| m.poi_labels.iter())
        .filter_map(|label| label.category.as_deref())
        .collect();
    let category_boost: f64 = categories
        .iter()
        .filter_map(|cat| ctx.config.poi_category_boosts.get(*cat))
        .sum::<f64>()
        .min(MAX_CATEGORY_BOOST);

    let iconic = items.iter().filter_map(|m| m.phash).any(|phash| {
        ctx.config.iconic_signatures.iter().any(|sig| {
            item_quality::phash_distance(phash, sig.phash) <= sig.max_distance
        })
    });
    let iconic_bonus = if iconic { ICONIC_BONUS } else { 0.0 };

    (W_PRESENCE * presence + category_boost + iconic_bonus).clamp(0.0, 1.0)
}
