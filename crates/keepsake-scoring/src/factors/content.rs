use std::collections::HashSet;

use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Weight of keyword coverage.
const W_COVERAGE: f64 = 0.6;
/// Weight of distinct-keyword richness.
const W_RICHNESS: f64 = 0.4;

/// Content component: keyword coverage and richness across members.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let n = items.len() as f64;

    let with_keywords = items.iter().filter(|m| !m.keywords.is_empty()).count() as f64;
    let coverage = with_keywords / n;

    let distinct: HashSet<&str> = items
        .iter()
        .flat_map(|m| m.keywords.iter().map(String::as_str))
        .collect();
    let richness = (distinct.len() as f64 / n).min(1.0);

    (W_COVERAGE * coverage + W_RICHNESS * richness).clamp(0.0, 1.0)
}
