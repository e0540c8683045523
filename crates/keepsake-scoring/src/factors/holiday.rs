use chrono::{Datelike, Weekday};

use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Longest range (days) walked day-by-day; longer ranges are truncated.
const MAX_DAYS_SCANNED: i64 = 60;

/// Holiday component: share of the range's days that fall on a holiday or a
/// weekend. No usable time range → 0.0.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let Some(range) = draft.params.time_range else {
        return 0.0;
    };
    let (Some(start), Some(end)) = (range.start_datetime(), range.end_datetime()) else {
        return 0.0;
    };

    let mut day = start.date_naive();
    let last = end.date_naive();
    let mut scanned = 0i64;
    let mut festive = 0i64;

    while day <= last && scanned < MAX_DAYS_SCANNED {
        let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
        if weekend || ctx.holidays.is_holiday(day) {
            festive += 1;
        }
        scanned += 1;
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    if scanned == 0 {
        return 0.0;
    }
    (festive as f64 / scanned as f64).clamp(0.0, 1.0)
}
