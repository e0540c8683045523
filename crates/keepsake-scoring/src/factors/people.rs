use std::collections::HashSet;

use keepsake_core::draft::ClusterDraft;

use crate::formula::ScoreContext;

/// Weight of person coverage (share of members with any person).
const W_COVERAGE: f64 = 0.5;
/// Weight of person uniqueness (distinct persons per member).
const W_UNIQUENESS: f64 = 0.3;
/// Weight of mention density.
const W_DENSITY: f64 = 0.2;

/// Mentions per member at which the density signal saturates.
const MENTIONS_SATURATION: f64 = 2.0;

/// People component: coverage, uniqueness, and mention density of detected
/// persons across the draft's members.
pub fn calculate(draft: &ClusterDraft, ctx: &ScoreContext<'_>) -> f64 {
    let items = ctx.member_items(draft);
    if items.is_empty() {
        return 0.0;
    }
    let n = items.len() as f64;

    let with_persons = items.iter().filter(|m| !m.persons.is_empty()).count() as f64;
    let coverage = with_persons / n;

    let distinct: HashSet<&str> = items
        .iter()
        .flat_map(|m| m.persons.iter().map(String::as_str))
        .collect();
    let uniqueness = (distinct.len() as f64 / n).min(1.0);

    let mentions: usize = items.iter().map(|m| m.persons.len()).sum();
    let density = (mentions as f64 / n / MENTIONS_SATURATION).min(1.0);

    (W_COVERAGE * coverage + W_UNIQUENESS * uniqueness + W_DENSITY * density).clamp(0.0, 1.0)
}
