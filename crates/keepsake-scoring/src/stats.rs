//! Corpus rarity statistics (`NoveltyStats`).
//!
//! Histograms over the full media collection keyed by camera model,
//! geospatial grid cell, staypoint id, day of year, and perceptual-hash
//! prefix, plus their maxima. Rebuilt fresh every scoring run; never
//! persisted.

use std::collections::HashMap;

use chrono::Datelike;

use keepsake_core::draft::GeoPoint;
use keepsake_core::media::MediaItem;

/// Rarity with an empty histogram: no evidence either way.
const NEUTRAL_RARITY: f64 = 0.5;

/// High bits of a phash used as the rarity-histogram key.
const PHASH_PREFIX_SHIFT: u32 = 48;

#[derive(Debug, Clone)]
pub struct NoveltyStats {
    camera_counts: HashMap<String, u32>,
    camera_max: u32,
    grid_counts: HashMap<(i32, i32), u32>,
    grid_max: u32,
    staypoint_counts: HashMap<String, u32>,
    staypoint_max: u32,
    day_of_year_counts: HashMap<u32, u32>,
    day_of_year_max: u32,
    phash_prefix_counts: HashMap<u16, u32>,
    phash_prefix_max: u32,
    grid_precision_deg: f64,
}

impl NoveltyStats {
    /// Build the histograms from the full media map.
    pub fn build<'a>(
        media: impl Iterator<Item = &'a MediaItem>,
        grid_precision_deg: f64,
    ) -> Self {
        let mut stats = Self {
            camera_counts: HashMap::new(),
            camera_max: 0,
            grid_counts: HashMap::new(),
            grid_max: 0,
            staypoint_counts: HashMap::new(),
            staypoint_max: 0,
            day_of_year_counts: HashMap::new(),
            day_of_year_max: 0,
            phash_prefix_counts: HashMap::new(),
            phash_prefix_max: 0,
            grid_precision_deg,
        };

        for item in media {
            if let Some(model) = &item.camera_model {
                let count = stats.camera_counts.entry(model.clone()).or_insert(0);
                *count += 1;
                stats.camera_max = stats.camera_max.max(*count);
            }
            if let Some(location) = item.location {
                let cell = location.grid_cell(grid_precision_deg);
                let count = stats.grid_counts.entry(cell).or_insert(0);
                *count += 1;
                stats.grid_max = stats.grid_max.max(*count);
            }
            if let Some(sp) = &item.staypoint_id {
                let count = stats.staypoint_counts.entry(sp.clone()).or_insert(0);
                *count += 1;
                stats.staypoint_max = stats.staypoint_max.max(*count);
            }
            if let Some(taken_at) = item.taken_at {
                let doy = taken_at.ordinal();
                let count = stats.day_of_year_counts.entry(doy).or_insert(0);
                *count += 1;
                stats.day_of_year_max = stats.day_of_year_max.max(*count);
            }
            if let Some(phash) = item.phash {
                let prefix = (phash >> PHASH_PREFIX_SHIFT) as u16;
                let count = stats.phash_prefix_counts.entry(prefix).or_insert(0);
                *count += 1;
                stats.phash_prefix_max = stats.phash_prefix_max.max(*count);
            }
        }

        stats
    }

    pub fn camera_rarity(&self, model: &str) -> f64 {
        rarity(
            self.camera_counts.get(model).copied(),
            self.camera_max,
        )
    }

    pub fn grid_rarity(&self, point: GeoPoint) -> f64 {
        let cell = point.grid_cell(self.grid_precision_deg);
        rarity(self.grid_counts.get(&cell).copied(), self.grid_max)
    }

    pub fn staypoint_rarity(&self, id: &str) -> f64 {
        rarity(
            self.staypoint_counts.get(id).copied(),
            self.staypoint_max,
        )
    }

    pub fn staypoint_count(&self, id: &str) -> u32 {
        self.staypoint_counts.get(id).copied().unwrap_or(0)
    }

    pub fn staypoint_max(&self) -> u32 {
        self.staypoint_max
    }

    pub fn day_of_year_rarity(&self, day_of_year: u32) -> f64 {
        rarity(
            self.day_of_year_counts.get(&day_of_year).copied(),
            self.day_of_year_max,
        )
    }

    pub fn phash_rarity(&self, phash: u64) -> f64 {
        let prefix = (phash >> PHASH_PREFIX_SHIFT) as u16;
        rarity(
            self.phash_prefix_counts.get(&prefix).copied(),
            self.phash_prefix_max,
        )
    }
}

/// Relative rarity in [0.0, 1.0]: never-seen keys are maximally rare,
/// the most common key scores 0.0, an empty histogram is neutral.
fn rarity(count: Option<u32>, max: u32) -> f64 {
    if max == 0 {
        return NEUTRAL_RARITY;
    }
    match count {
        None | Some(0) => 1.0,
        Some(c) => 1.0 - c as f64 / max as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::draft::MediaId;

    fn item_with_camera(id: i64, model: &str) -> MediaItem {
        let mut m = MediaItem::bare(MediaId(id));
        m.camera_model = Some(model.to_string());
        m
    }

    #[test]
    fn common_camera_scores_low_rarity() {
        let items: Vec<MediaItem> = (0..9)
            .map(|i| item_with_camera(i, "Pixel 8"))
            .chain(std::iter::once(item_with_camera(100, "Film SLR")))
            .collect();
        let stats = NoveltyStats::build(items.iter(), 0.01);
        assert!(stats.camera_rarity("Film SLR") > stats.camera_rarity("Pixel 8"));
        assert_eq!(stats.camera_rarity("Pixel 8"), 0.0);
        assert_eq!(stats.camera_rarity("never seen"), 1.0);
    }

    #[test]
    fn empty_corpus_is_neutral() {
        let stats = NoveltyStats::build(std::iter::empty(), 0.01);
        assert_eq!(stats.camera_rarity("anything"), NEUTRAL_RARITY);
        assert_eq!(stats.staypoint_rarity("sp"), NEUTRAL_RARITY);
        assert_eq!(stats.day_of_year_rarity(100), NEUTRAL_RARITY);
    }

    #[test]
    fn grid_rarity_distinguishes_cells() {
        let home = GeoPoint::new(52.52, 13.405);
        let away = GeoPoint::new(35.6586, 139.7454);
        let items: Vec<MediaItem> = (0..5)
            .map(|i| {
                let mut m = MediaItem::bare(MediaId(i));
                m.location = Some(home);
                m
            })
            .chain(std::iter::once({
                let mut m = MediaItem::bare(MediaId(99));
                m.location = Some(away);
                m
            }))
            .collect();
        let stats = NoveltyStats::build(items.iter(), 0.01);
        assert!(stats.grid_rarity(away) > stats.grid_rarity(home));
    }

    #[test]
    fn rarities_are_bounded() {
        let items: Vec<MediaItem> = (0..20)
            .map(|i| {
                let mut m = MediaItem::bare(MediaId(i));
                m.camera_model = Some(format!("cam-{}", i % 3));
                m.staypoint_id = Some(format!("sp-{}", i % 4));
                m.phash = Some((i as u64) << 48);
                m
            })
            .collect();
        let stats = NoveltyStats::build(items.iter(), 0.01);
        for i in 0..5 {
            let r = stats.camera_rarity(&format!("cam-{i}"));
            assert!((0.0..=1.0).contains(&r));
        }
    }
}
