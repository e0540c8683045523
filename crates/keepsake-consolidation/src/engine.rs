//! ConsolidationEngine: owns the configuration and collaborators, enforces
//! a single-execution guard, loads media once per run, and hands the draft
//! list to the stage pipeline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use keepsake_core::config::KeepsakeConfig;
use keepsake_core::draft::{ClusterDraft, MediaId};
use keepsake_core::errors::{KeepsakeError, KeepsakeResult, PipelineError};
use keepsake_core::media::MediaItem;
use keepsake_core::traits::{MediaLookup, MemberSelector, NoopProgress, ProgressObserver};
use keepsake_curation::SpacingSelector;

use crate::monitoring::ConsolidationReport;
use crate::pipeline;

pub struct ConsolidationEngine {
    /// Guard: only one consolidation can run at a time.
    is_running: Arc<AtomicBool>,
    config: KeepsakeConfig,
    media: Box<dyn MediaLookup>,
    selector: Box<dyn MemberSelector>,
}

impl ConsolidationEngine {
    /// Create an engine with the default curation selector.
    /// Invalid configuration fails fast.
    pub fn new(config: KeepsakeConfig, media: Box<dyn MediaLookup>) -> KeepsakeResult<Self> {
        config.validate()?;
        Ok(Self {
            is_running: Arc::new(AtomicBool::new(false)),
            config,
            media,
            selector: Box::new(SpacingSelector),
        })
    }

    /// Replace the member selector with a custom policy implementation.
    pub fn with_selector(mut self, selector: Box<dyn MemberSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &KeepsakeConfig {
        &self.config
    }

    /// Consolidate a draft list without progress reporting.
    pub fn consolidate(&self, drafts: Vec<ClusterDraft>) -> KeepsakeResult<Vec<ClusterDraft>> {
        self.consolidate_with_progress(drafts, &NoopProgress)
            .map(|(drafts, _)| drafts)
    }

    /// Consolidate a draft list, reporting stage-boundary progress to the
    /// observer and returning the advisory run report.
    pub fn consolidate_with_progress(
        &self,
        drafts: Vec<ClusterDraft>,
        observer: &dyn ProgressObserver,
    ) -> KeepsakeResult<(Vec<ClusterDraft>, ConsolidationReport)> {
        // Acquire the single-execution guard.
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(KeepsakeError::Pipeline(PipelineError::AlreadyRunning));
        }

        let result = self.run(drafts, observer);

        // Release the guard.
        self.is_running.store(false, Ordering::SeqCst);

        result
    }

    fn run(
        &self,
        drafts: Vec<ClusterDraft>,
        observer: &dyn ProgressObserver,
    ) -> KeepsakeResult<(Vec<ClusterDraft>, ConsolidationReport)> {
        let media = self.load_media(&drafts)?;
        info!(
            drafts = drafts.len(),
            media = media.len(),
            "starting consolidation"
        );

        let (drafts, report) = pipeline::run_pipeline(
            drafts,
            &self.config,
            &media,
            self.selector.as_ref(),
            observer,
        );

        info!(
            input = report.input,
            output = report.output,
            "consolidation complete"
        );
        Ok((drafts, report))
    }

    /// Batch-load every referenced media item once per run. The map is
    /// read-only for the rest of the run.
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
