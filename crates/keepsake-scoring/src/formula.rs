//! Weighted composite score formula.
//!
//! ```text
//! score = (quality*w_q + aesthetics*w_a + people*w_p + content*w_c
//!        + density*w_d + novelty*w_n + holiday*w_h + recency*w_r
//!        + poi*w_poi + location*w_l + temporal*w_t + liveliness*w_v)
//!        × algorithmBoost
//! ```
//!
//! Every component lies in [0.0, 1.0]; the combined score is non-negative.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use keepsake_core::config::{ScoreWeights, ScoringConfig};
use keepsake_core::draft::{ClusterDraft, MediaId, ScoreBreakdown};
use keepsake_core::media::MediaItem;
use keepsake_core::traits::HolidayResolver;

use crate::factors;
use crate::stats::NoveltyStats;

/// Everything a factor needs, computed once per scoring run.
pub struct ScoreContext<'a> {
    pub media: &'a HashMap<MediaId, MediaItem>,
    pub stats: &'a NoveltyStats,
    pub holidays: &'a dyn HolidayResolver,
    pub config: &'a ScoringConfig,
    /// Member sets of previously surfaced stories (normalized), for the
    /// history-overlap penalty.
    pub history: &'a [Vec<MediaId>],
    pub now: DateTime<Utc>,
}

impl<'a> ScoreContext<'a> {
    /// Resolve a draft's members to media records, silently skipping
    /// lookup gaps.
    pub fn member_items(&self, draft: &ClusterDraft) -> Vec<&'a MediaItem> {
        draft
            .normalized_members()
            .iter()
            .filter_map(|id| self.media.get(id))
            .collect()
    }
}

/// Compute every component for a draft.
pub fn compute_breakdown(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> ScoreBreakdown {
    ScoreBreakdown {
        quality_avg: Some(factors::quality::calculate(draft, ctx)),
        aesthetics: Some(factors::aesthetics::calculate(draft, ctx)),
        people: Some(factors::people::calculate(draft, ctx)),
        content: Some(factors::content::calculate(draft, ctx)),
        density: Some(factors::density::calculate(draft, ctx)),
        novelty: Some(factors::novelty::calculate(draft, ctx)),
        holiday: Some(factors::holiday::calculate(draft, ctx)),
        recency: Some(factors::recency::calculate(draft, ctx)),
        location_score: Some(factors::location::calculate(draft, ctx)),
        poi_score: Some(factors::poi::calculate(draft, ctx)),
        temporal_score: Some(factors::temporal::calculate(draft, ctx)),
        liveliness: Some(factors::liveliness::calculate(draft, ctx)),
    }
}

/// Weighted sum of a breakdown. Missing components contribute nothing.
pub fn combine(breakdown: &ScoreBreakdown, weights: &ScoreWeights) -> f64 {
    let sum = weights.quality * breakdown.quality_avg.unwrap_or(0.0)
        + weights.aesthetics * breakdown.aesthetics.unwrap_or(0.0)
        + weights.people * breakdown.people.unwrap_or(0.0)
        + weights.content * breakdown.content.unwrap_or(0.0)
        + weights.density * breakdown.density.unwrap_or(0.0)
        + weights.novelty * breakdown.novelty.unwrap_or(0.0)
        + weights.holiday * breakdown.holiday.unwrap_or(0.0)
        + weights.recency * breakdown.recency.unwrap_or(0.0)
        + weights.poi * breakdown.poi_score.unwrap_or(0.0)
        + weights.location * breakdown.location_score.unwrap_or(0.0)
        + weights.temporal * breakdown.temporal_score.unwrap_or(0.0)
        + weights.liveliness * breakdown.liveliness.unwrap_or(0.0);
    sum.max(0.0)
}
