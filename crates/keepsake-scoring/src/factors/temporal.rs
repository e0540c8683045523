use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Weight of timestamp coverage.
const W_COVERAGE: f64 = 0.5;
/// Weight of the span curve.
const W_SPAN: f64 = 0.5;
/// Spans at or below this many hours score the full span component.
const PEAK_HOURS: f64 = 6.0;

/// Temporal component: timestamp coverage plus a span curve — short spans
/// score highest, spans at or beyond the configured maximum (default 240 h)
/// score zero. No usable time range → 0.0.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let Some(range) = draft.params.time_range else {
        return 0.0;
    };
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let n = items.len() as f64;

    let with_time = items.iter().filter(|m| m.taken_at.is_some()).count() as f64;
    let coverage = with_time / n;

    let span_hours = range.duration_secs() as f64 / 3600.0;
    let max = ctx.config.max_span_hours;
    let span_score = if span_hours <= PEAK_HOURS {
        1.0
    } else if span_hours >= max {
        0.0
    } else {
        1.0 - (span_hours - PEAK_HOURS) / (max - PEAK_HOURS)
    };

    (W_COVERAGE * coverage + W_SPAN * span_score).clamp(0.0, 1.0)
}
