//! # keepsake-consolidation
//!
//! 10-stage consolidation pipeline: filter → duplicate collapse → dominance
//! selection → overlap resolution → nesting → annotation pruning → member
//! quality ranking → member curation → per-media cap → canonical titles.
//! Deterministic, single-threaded, with advisory progress reporting and a
//! per-stage run report.

pub mod engine;
pub mod monitoring;
pub mod ordering;
pub mod pipeline;

pub use engine::ConsolidationEngine;
pub use monitoring::{ConsolidationReport, StageReport};
