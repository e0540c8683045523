use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Members per hour at which the density signal reaches 0.5.
const RATE_HALFWAY: f64 = 2.0;

/// Density component: members per unit time over the draft's range.
/// No usable time range → 0.0 (no evidence of a dense moment).
pub fn calculate(draft: &ClusterDraft, _ctx: &ScoreContext<'_>) -> f64 {
    let Some(range) = draft.params.time_range else {
        return 0.0;
    };
    let n = draft.member_count();
    if n == 0 {
        return 0.0;
    }
    // Sub-hour spans count as one hour so single bursts don't blow up.
    let hours = (range.duration_secs() as f64 / 3600.0).max(1.0);
    let rate = n as f64 / hours;
    (rate / (rate + RATE_HALFWAY)).clamp(0.0, 1.0)
}
