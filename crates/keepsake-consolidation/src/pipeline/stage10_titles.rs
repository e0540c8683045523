//! Stage 10: Canonical Titles — vacation drafts get a route title
//! (staypoint labels, falling back to the place string or countries) and a
//! subtitle from classification, duration, and a formatted date range.

use chrono::Datelike;

use keepsake_core::constants::SECONDS_PER_DAY;
use keepsake_core::draft::{CanonicalTitle, ClusterDraft, TimeRange};

pub const STAGE_LABEL: &str = "titles";

/// Only this algorithm's drafts are eligible for canonical titles.
pub const VACATION_ALGORITHM: &str = "vacation";

pub fn run(mut drafts: Vec<ClusterDraft>) -> Vec<ClusterDraft> {
    for draft in &mut drafts {
        if draft.algorithm != VACATION_ALGORITHM {
            continue;
        }
        if let Some(title) = derive_title(draft) {
            draft.params.title = Some(title);
        }
    }
    drafts
}

fn derive_title(draft: &ClusterDraft) -> Option<CanonicalTitle> {
    let route = route_parts(draft);
    let title = if !route.is_empty() {
        route.join(" – ")
    } else if !draft.params.countries.is_empty() {
        draft.params.countries.join(" – ")
    } else {
        return None;
    };

    Some(CanonicalTitle {
        title,
        subtitle: subtitle(draft),
    })
}

/// Ordered route labels: per staypoint, location parts → comma-split place.
/// Falls back to the draft-level place string. Consecutive repeats are
/// collapsed.
fn route_parts(draft: &ClusterDraft) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for sp in &draft.params.staypoints {
        if let Some(label) = sp.route_label() {
            if parts.last().map(|p| p.eq_ignore_ascii_case(&label)) != Some(true) {
                parts.push(label);
            }
        }
    }
    if parts.is_empty() {
        if let Some(place) = &draft.params.place {
            if let Some(first) = place.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    parts.push(first.to_string());
                }
            }
        }
    }
    parts
}

fn subtitle(draft: &ClusterDraft) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();

    if let Some(classification) = &draft.params.classification {
        pieces.push(humanize(classification));
    }

    if let Some(range) = draft.params.time_range {
        let days = range.duration_secs() / SECONDS_PER_DAY + 1;
        pieces.push(if days <= 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        });
        if let Some(dates) = date_range_label(range) {
            pieces.push(dates);
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(pieces.join(" · "))
    }
}

/// Same-day, same-year, or full date-range formatting.
fn date_range_label(range: TimeRange) -> Option<String> {
    let start = range.start_datetime()?.date_naive();
    let end = range.end_datetime()?.date_naive();

    Some(if start == end {
        start.format("%b %-d, %Y").to_string()
    } else if start.year() == end.year() {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!(
            "{} – {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )
    })
}

fn humanize(label: &str) -> String {
    let spaced = label.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
