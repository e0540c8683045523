use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Neutral value for undated drafts — unknown age is not maximal staleness.
const NEUTRAL: f64 = 0.5;

/// Recency component: linear decay from 1.0 (now) to 0.0 at the configured
/// horizon (default 365 days), measured from the range's end.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let Some(range) = draft.params.time_range else {
        return NEUTRAL;
    };
    let Some(end) = range.end_datetime() else {
        return NEUTRAL;
    };
    let age_days = (ctx.now - end).num_seconds().max(0) as f64 / 86_400.0;
    (1.0 - age_days / ctx.config.recency_horizon_days).clamp(0.0, 1.0)
}
