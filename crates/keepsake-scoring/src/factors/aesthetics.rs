use keepsake_core::draft::ClusterDraft;
use keepsake_core::media::quality as item_quality;

use crate::formula::ScoreContext;

/// Neutral value when no member carries aesthetic metadata.
const NEUTRAL: f64 = 0.5;

/// Mean aesthetic quality across members (brightness balance, contrast,
/// entropy, colorfulness).
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let values: Vec<f64> = ctx
        .member_items(draft)
        .iter()
        .filter_map(|item| item_quality::aesthetic_component(item))
        .collect();
    if values.is_empty() {
        return NEUTRAL;
    }
    (values.iter().sum::<f64>() / values.len() as f64).clamp(0.0, 1.0)
}
