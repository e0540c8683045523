use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::{GeoPoint, MediaId};

/// Point-of-interest label attached to a media item by upstream scene
/// detection / reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiLabel {
    pub label: String,
    pub category: Option<String>,
}

/// A media record from the external catalog. Read-only within this core;
/// every metadata field is optional — extraction upstream is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub taken_at: Option<DateTime<Utc>>,
    pub location: Option<GeoPoint>,
    /// Opaque staypoint key assigned by upstream GPS clustering.
    pub staypoint_id: Option<String>,
    pub camera_model: Option<String>,
    /// 64-bit perceptual hash.
    pub phash: Option<u64>,
    /// 64-bit difference hash.
    pub dhash: Option<u64>,
    /// Burst-capture group id.
    pub burst_id: Option<String>,
    pub is_video: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Sharpness estimate in [0.0, 1.0].
    pub sharpness: Option<f64>,
    pub iso: Option<u32>,
    /// Mean brightness in [0.0, 1.0].
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub entropy: Option<f64>,
    pub colorfulness: Option<f64>,
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub poi_labels: Vec<PoiLabel>,
}

impl MediaItem {
    /// Bare record with only an id — everything else unknown.
    pub fn bare(id: MediaId) -> Self {
        Self {
            id,
            taken_at: None,
            location: None,
            staypoint_id: None,
            camera_model: None,
            phash: None,
            dhash: None,
            burst_id: None,
            is_video: false,
            width: None,
            height: None,
            sharpness: None,
            iso: None,
            brightness: None,
            contrast: None,
            entropy: None,
            colorfulness: None,
            persons: vec![],
            keywords: vec![],
            poi_labels: vec![],
        }
    }

    pub fn megapixels(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(w as f64 * h as f64 / 1_000_000.0),
            _ => None,
        }
    }
}
