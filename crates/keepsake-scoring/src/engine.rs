//! Scoring engine: loads every referenced media item once, builds corpus
//! rarity statistics, scores each draft independently (rayon), and returns
//! the drafts sorted by score descending.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::info;

use keepsake_core::config::ScoringConfig;
use keepsake_core::draft::{members, ClusterDraft, MediaId};
use keepsake_core::errors::KeepsakeResult;
use keepsake_core::media::MediaItem;
use keepsake_core::traits::{HolidayResolver, MediaLookup};

use crate::formula::{self, ScoreContext};
use crate::stats::NoveltyStats;

pub struct ScoringEngine {
    config: ScoringConfig,
    media: Box<dyn MediaLookup>,
    holidays: Box<dyn HolidayResolver>,
    /// Normalized member sets of previously surfaced stories.
    history: Vec<Vec<MediaId>>,
}

impl ScoringEngine {
    /// Create an engine. Invalid configuration fails fast.
    pub fn new(
        config: ScoringConfig,
        media: Box<dyn MediaLookup>,
        holidays: Box<dyn HolidayResolver>,
    ) -> KeepsakeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            media,
            holidays,
            history: vec![],
        })
    }

    /// Provide previously surfaced stories for the history-overlap penalty.
    pub fn with_history(mut self, history: Vec<Vec<MediaId>>) -> Self {
        self.history = history
            .iter()
            .map(|ids| members::normalize(ids))
            .collect();
        self
    }

    /// Score drafts against the current wall clock.
    pub fn score(&self, drafts: Vec<ClusterDraft>) -> KeepsakeResult<Vec<ClusterDraft>> {
        self.score_at(Utc::now(), drafts)
    }

    /// Score drafts against an explicit `now` (reproducible runs and tests).
    ///
    /// Mutates `params` in place: fills the component breakdown and `score`,
    /// then sorts descending by score (stable on ties).
    pub fn score_at(
        &self,
        now: DateTime<Utc>,
        mut drafts: Vec<ClusterDraft>,
    ) -> KeepsakeResult<Vec<ClusterDraft>> {
        let media = self.load_media(&drafts)?;
        let stats = NoveltyStats::build(media.values(), self.config.grid_precision_deg);
        info!(
            drafts = drafts.len(),
            media = media.len(),
            "scoring drafts"
        );

        let ctx = ScoreContext {
            media: &media,
            stats: &stats,
            holidays: self.holidays.as_ref(),
            config: &self.config,
            history: &self.history,
            now,
        };

        drafts.par_iter_mut().for_each(|draft| {
            let breakdown = formula::compute_breakdown(draft, &ctx);
            let base = formula::combine(&breakdown, &self.config.weights);
            let boost = self
                .config
                .algorithm_boosts
                .get(&draft.algorithm)
                .copied()
                .unwrap_or(1.0);
            draft.params.scores = breakdown;
            draft.params.score = Some(base * boost);
        });

        drafts.sort_by(|a, b| {
            b.params
                .score
                .unwrap_or(0.0)
                .partial_cmp(&a.params.score.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(drafts)
    }

    /// Batch-load every referenced media item into a read-only map.
    /// Missing ids are silently omitted by the catalog contract.
    fn load_media(
        &self,
        drafts: &[ClusterDraft],
    ) -> KeepsakeResult<HashMap<MediaId, MediaItem>> {
        let mut ids: Vec<MediaId> = drafts
            .iter()
            .flat_map(|d| d.normalized_members())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let items = self.media.find_by_ids(&ids)?;
        Ok(items.into_iter().map(|m| (m.id, m)).collect())
    }
}
