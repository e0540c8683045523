//! The cluster-draft data model: the mutable unit of work every pipeline
//! stage reads and writes, plus the shared set/geo/time math.

mod draft;
mod geo;
pub mod members;
mod merge_audit;
mod params;
mod quality_report;
mod scores;
mod selection;
mod staypoint;
mod sub_story;
mod time_range;
mod title;

pub use draft::{ClusterDraft, MediaId};
pub use geo::GeoPoint;
pub use merge_audit::{MergeAudit, MergeMetrics, MergeRole};
pub use params::DraftParams;
pub use quality_report::{MemberQualityEntry, MemberQualityReport};
pub use scores::ScoreBreakdown;
pub use selection::{SelectionResult, SelectionTelemetry};
pub use staypoint::Staypoint;
pub use sub_story::{ParentRef, SubStoryRef};
pub use time_range::TimeRange;
pub use title::CanonicalTitle;
