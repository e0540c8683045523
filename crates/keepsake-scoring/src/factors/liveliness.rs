use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Liveliness component: share of members that are videos.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let videos = items.iter().filter(|m| m.is_video).count() as f64;
    (videos / items.len() as f64).clamp(0.0, 1.0)
}
