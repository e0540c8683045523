use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A geographically/temporally clustered dwell location, computed upstream
/// and consumed here as an opaque key plus optional labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staypoint {
    /// Opaque staypoint key from the upstream GPS clustering.
    pub id: String,
    pub location: Option<GeoPoint>,
    /// Reverse-geocoded place string, possibly comma-separated
    /// ("Lisbon, Portugal").
    pub place: Option<String>,
    /// Pre-split location parts, most specific first.
    #[serde(default)]
    pub location_parts: Vec<String>,
    pub country: Option<String>,
}

impl Staypoint {
    /// The label a route title uses for this staypoint:
    /// first location part → first comma-split segment of `place` → `place`.
    pub fn route_label(&self) -> Option<String> {
        if let Some(part) = self.location_parts.first() {
            return Some(part.clone());
        }
        self.place
            .as_ref()
            .and_then(|p| p.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
