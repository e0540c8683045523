use serde::{Deserialize, Serialize};

use super::{
    CanonicalTitle, GeoPoint, MemberQualityReport, MergeAudit, ParentRef, ScoreBreakdown,
    SelectionTelemetry, Staypoint, SubStoryRef, TimeRange,
};

/// Typed draft parameters.
///
/// This struct is the serialized contract downstream consumers (persistence,
/// title rendering, feed API) read from; field names are stable and must not
/// be renamed without a migration plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftParams {
    /// Composite score. Absent until the scorer has run; stages fall back to
    /// the normalized member count when absent.
    pub score: Option<f64>,
    pub time_range: Option<TimeRange>,
    pub centroid: Option<GeoPoint>,
    /// Algorithm-specific classification label ("vacation", "short_trip", …).
    pub classification: Option<String>,
    /// Ordered route staypoints, as emitted by the clustering strategy.
    pub staypoints: Vec<Staypoint>,
    pub primary_staypoint: Option<Staypoint>,
    /// Reverse-geocoded place string for the whole draft.
    pub place: Option<String>,
    pub countries: Vec<String>,

    // Nesting
    pub is_sub_story: bool,
    pub sub_story_priority: Option<i64>,
    pub sub_story_of: Option<ParentRef>,
    pub has_sub_stories: bool,
    pub sub_stories: Vec<SubStoryRef>,

    // Audit / telemetry
    pub merges: Vec<MergeAudit>,
    pub member_quality: Option<MemberQualityReport>,
    pub member_selection: Option<SelectionTelemetry>,

    pub title: Option<CanonicalTitle>,

    /// Scorer component cache.
    pub scores: ScoreBreakdown,
}
