//! Shared test fixtures: builders for media items and drafts, plus
//! in-memory doubles for the collaborator traits.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate};

use keepsake_core::draft::{ClusterDraft, GeoPoint, MediaId, Staypoint, TimeRange};
use keepsake_core::errors::KeepsakeResult;
use keepsake_core::media::{MediaItem, PoiLabel};
use keepsake_core::traits::{HolidayResolver, MediaLookup, ProgressObserver};

/// Builder for media records.
pub struct MediaItemBuilder {
    item: MediaItem,
}

impl MediaItemBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            item: MediaItem::bare(MediaId(id)),
        }
    }

    /// Capture timestamp from unix seconds.
    pub fn taken_at(mut self, unix_secs: i64) -> Self {
        self.item.taken_at = DateTime::from_timestamp(unix_secs, 0);
        self
    }

    pub fn location(mut self, lat: f64, lon: f64) -> Self {
        self.item.location = Some(GeoPoint::new(lat, lon));
        self
    }

    pub fn staypoint(mut self, id: &str) -> Self {
        self.item.staypoint_id = Some(id.to_string());
        self
    }

    pub fn camera(mut self, model: &str) -> Self {
        self.item.camera_model = Some(model.to_string());
        self
    }

    pub fn phash(mut self, hash: u64) -> Self {
        self.item.phash = Some(hash);
        self
    }

    pub fn dhash(mut self, hash: u64) -> Self {
        self.item.dhash = Some(hash);
        self
    }

    pub fn burst(mut self, id: &str) -> Self {
        self.item.burst_id = Some(id.to_string());
        self
    }

    pub fn video(mut self) -> Self {
        self.item.is_video = true;
        self
    }

    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.item.width = Some(width);
        self.item.height = Some(height);
        self
    }

    pub fn sharpness(mut self, value: f64) -> Self {
        self.item.sharpness = Some(value);
        self
    }

    pub fn iso(mut self, value: u32) -> Self {
        self.item.iso = Some(value);
        self
    }

    pub fn brightness(mut self, value: f64) -> Self {
        self.item.brightness = Some(value);
        self
    }

    pub fn contrast(mut self, value: f64) -> Self {
        self.item.contrast = Some(value);
        self
    }

    pub fn entropy(mut self, value: f64) -> Self {
        self.item.entropy = Some(value);
        self
    }

    pub fn colorfulness(mut self, value: f64) -> Self {
        self.item.colorfulness = Some(value);
        self
    }

    pub fn person(mut self, name: &str) -> Self {
        self.item.persons.push(name.to_string());
        self
    }

    pub fn keyword(mut self, word: &str) -> Self {
        self.item.keywords.push(word.to_string());
        self
    }

    pub fn poi(mut self, label: &str, category: Option<&str>) -> Self {
        self.item.poi_labels.push(PoiLabel {
            label: label.to_string(),
            category: category.map(str::to_string),
        });
        self
    }

    pub fn build(self) -> MediaItem {
        self.item
    }
}

/// Builder for cluster drafts.
pub struct DraftBuilder {
    draft: ClusterDraft,
}

impl DraftBuilder {
    pub fn new(algorithm: &str, members: &[i64]) -> Self {
        Self {
            draft: ClusterDraft::new(
                algorithm,
                members.iter().copied().map(MediaId).collect(),
            ),
        }
    }

    pub fn score(mut self, score: f64) -> Self {
        self.draft.params.score = Some(score);
        self
    }

    pub fn time(mut self, from: i64, to: i64) -> Self {
        self.draft.params.time_range = Some(TimeRange::new(from, to));
        self
    }

    pub fn centroid(mut self, lat: f64, lon: f64) -> Self {
        self.draft.centroid = Some(GeoPoint::new(lat, lon));
        self
    }

    pub fn classification(mut self, label: &str) -> Self {
        self.draft.params.classification = Some(label.to_string());
        self
    }

    pub fn place(mut self, place: &str) -> Self {
        self.draft.params.place = Some(place.to_string());
        self
    }

    pub fn countries(mut self, countries: &[&str]) -> Self {
        self.draft.params.countries = countries.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append a route staypoint with a place string.
    pub fn route_stop(mut self, id: &str, place: &str) -> Self {
        self.draft.params.staypoints.push(Staypoint {
            id: id.to_string(),
            location: None,
            place: Some(place.to_string()),
            location_parts: vec![],
            country: None,
        });
        self
    }

    pub fn primary_staypoint(mut self, id: &str, lat: f64, lon: f64) -> Self {
        self.draft.params.primary_staypoint = Some(Staypoint {
            id: id.to_string(),
            location: Some(GeoPoint::new(lat, lon)),
            place: None,
            location_parts: vec![],
            country: None,
        });
        self
    }

    pub fn sub_story(mut self) -> Self {
        self.draft.params.is_sub_story = true;
        self
    }

    pub fn build(self) -> ClusterDraft {
        self.draft
    }
}

/// In-memory media catalog double.
pub struct InMemoryMediaLookup {
    items: HashMap<MediaId, MediaItem>,
}

impl InMemoryMediaLookup {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items: items.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl MediaLookup for InMemoryMediaLookup {
    fn find_by_ids(&self, ids: &[MediaId]) -> KeepsakeResult<Vec<MediaItem>> {
        // Missing ids silently omitted, per the catalog contract.
        Ok(ids
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect())
    }
}

/// Holiday resolver with a fixed date set.
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new(dates: &[(i32, u32, u32)]) -> Self {
        Self {
            dates: dates
                .iter()
                .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(*y, *m, *d))
                .collect(),
        }
    }
}

impl HolidayResolver for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Progress observer that records every callback.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<(usize, usize, String)>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(usize, usize, String)> {
        self.events.lock().expect("progress mutex poisoned").clone()
    }
}

impl ProgressObserver for RecordingProgress {
    fn on_progress(&self, done: usize, total: usize, stage: &str) {
        self.events
            .lock()
            .expect("progress mutex poisoned")
            .push((done, total, stage.to_string()));
    }
}
