//! Sequential 10-stage pipeline runner.
//!
//! Stage 1: Filter → Stage 2: Duplicate Collapse → Stage 3: Dominance →
//! Stage 4: Overlap Resolution → Stage 5: Nesting → Stage 6: Annotation
//! Pruning → Stage 7: Quality Ranking → Stage 8: Curation → Stage 9:
//! Per-Media Cap → Stage 10: Titles.
//!
//! No stage begins before the previous stage's full output is materialized.
//! Progress callbacks fire at stage boundaries and are purely advisory.

pub mod stage1_filter;
pub mod stage2_collapse;
pub mod stage3_dominance;
pub mod stage4_overlap;
pub mod stage5_nesting;
pub mod stage6_annotation;
pub mod stage7_quality;
pub mod stage8_curation;
pub mod stage9_media_cap;
pub mod stage10_titles;

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use keepsake_core::config::KeepsakeConfig;
use keepsake_core::draft::{ClusterDraft, MediaId};
use keepsake_core::media::MediaItem;
use keepsake_core::traits::{MemberSelector, ProgressObserver};

use crate::monitoring::ConsolidationReport;

pub const STAGE_COUNT: usize = 10;

/// Run the full pipeline over a draft list.
///
/// Returns the surviving drafts plus the advisory run report.
pub fn run_pipeline(
    drafts: Vec<ClusterDraft>,
    config: &KeepsakeConfig,
    media: &HashMap<MediaId, MediaItem>,
    selector: &dyn MemberSelector,
    observer: &dyn ProgressObserver,
) -> (Vec<ClusterDraft>, ConsolidationReport) {
    let cfg = &config.consolidation;
    let mut report = ConsolidationReport {
        input: drafts.len(),
        ..Default::default()
    };

    // Stage 1: Filter/Normalization.
    let before = drafts.len();
    let (drafts, filter_stats) = stage1_filter::run(drafts, cfg);
    info!(input = before, output = drafts.len(), "stage 1: filter");
    report.record(stage1_filter::STAGE_LABEL, before, drafts.len(), filter_stats.as_detail());
    observer.on_progress(1, STAGE_COUNT, stage1_filter::STAGE_LABEL);

    // Stage 2: Duplicate Collapse.
    let before = drafts.len();
    let drafts = stage2_collapse::run(drafts, cfg);
    info!(input = before, output = drafts.len(), "stage 2: duplicate collapse");
    report.record(
        stage2_collapse::STAGE_LABEL,
        before,
        drafts.len(),
        BTreeMap::from([("collapsed".to_string(), before - drafts.len())]),
    );
    observer.on_progress(2, STAGE_COUNT, stage2_collapse::STAGE_LABEL);

    // Stage 3: Dominance Selection (independently configurable).
    let before = drafts.len();
    let drafts = if cfg.enable_dominance {
        let (drafts, dominance_stats) = stage3_dominance::run(drafts, cfg);
        info!(input = before, output = drafts.len(), "stage 3: dominance selection");
        report.record(
            stage3_dominance::STAGE_LABEL,
            before,
            drafts.len(),
            dominance_stats.as_detail(),
        );
        drafts
    } else {
        report.record(
            stage3_dominance::STAGE_LABEL,
            before,
            before,
            BTreeMap::from([("skipped".to_string(), 1)]),
        );
        drafts
    };
    observer.on_progress(3, STAGE_COUNT, stage3_dominance::STAGE_LABEL);

    // Stage 4: Overlap Resolution (independently configurable).
    let before = drafts.len();
    let drafts = if cfg.enable_overlap_resolver {
        let (drafts, overlap_stats) = stage4_overlap::run(drafts, cfg, media);
        info!(input = before, output = drafts.len(), "stage 4: overlap resolution");
        report.record(
            stage4_overlap::STAGE_LABEL,
            before,
            drafts.len(),
            overlap_stats.as_detail(),
        );
        drafts
    } else {
        report.record(
            stage4_overlap::STAGE_LABEL,
            before,
            before,
            BTreeMap::from([("skipped".to_string(), 1)]),
        );
        drafts
    };
    observer.on_progress(4, STAGE_COUNT, stage4_overlap::STAGE_LABEL);

    // Stage 5: Nesting. Runs before anything that would discard small
    // drafts — nested sub-stories are retained for narrative structure.
    let before = drafts.len();
    let (drafts, nested) = stage5_nesting::run(drafts, cfg);
    info!(nested, "stage 5: nesting resolution");
    report.record(
        stage5_nesting::STAGE_LABEL,
        before,
        drafts.len(),
        BTreeMap::from([("nested".to_string(), nested)]),
    );
    observer.on_progress(5, STAGE_COUNT, stage5_nesting::STAGE_LABEL);

    // Stage 6: Annotation Pruning.
    let before = drafts.len();
    let (drafts, pruned) = stage6_annotation::run(drafts, cfg);
    info!(input = before, output = drafts.len(), "stage 6: annotation pruning");
    report.record(
        stage6_annotation::STAGE_LABEL,
        before,
        drafts.len(),
        BTreeMap::from([("pruned".to_string(), pruned)]),
    );
    observer.on_progress(6, STAGE_COUNT, stage6_annotation::STAGE_LABEL);

    // Stage 7: Member Quality Ranking.
    let before = drafts.len();
    let drafts = stage7_quality::run(drafts, media, config.scoring.baseline_megapixels);
    info!("stage 7: member quality ranking");
    report.record(stage7_quality::STAGE_LABEL, before, drafts.len(), BTreeMap::new());
    observer.on_progress(7, STAGE_COUNT, stage7_quality::STAGE_LABEL);

    // Stage 8: Member Curation.
    let before = drafts.len();
    let drafts = stage8_curation::run(drafts, media, selector, &config.curation);
    info!("stage 8: member curation");
    report.record(stage8_curation::STAGE_LABEL, before, drafts.len(), BTreeMap::new());
    observer.on_progress(8, STAGE_COUNT, stage8_curation::STAGE_LABEL);

    // Stage 9: Per-Media Cap.
    let before = drafts.len();
    let (drafts, rejected) = stage9_media_cap::run(drafts, cfg);
    info!(input = before, output = drafts.len(), "stage 9: per-media cap");
    report.record(
        stage9_media_cap::STAGE_LABEL,
        before,
        drafts.len(),
        BTreeMap::from([("rejected".to_string(), rejected)]),
    );
    observer.on_progress(9, STAGE_COUNT, stage9_media_cap::STAGE_LABEL);

    // Stage 10: Canonical Titles.
    let before = drafts.len();
    let drafts = stage10_titles::run(drafts);
    info!("stage 10: canonical titles");
    report.record(stage10_titles::STAGE_LABEL, before, drafts.len(), BTreeMap::new());
    observer.on_progress(10, STAGE_COUNT, stage10_titles::STAGE_LABEL);

    report.output = drafts.len();
    (drafts, report)
}
