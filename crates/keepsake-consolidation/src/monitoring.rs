//! Advisory run report: per-stage input/output counts plus per-reason
//! detail counters. Never affects pipeline results.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: String,
    pub input: usize,
    pub output: usize,
    /// Stage-specific counters (drop reasons, merge counts, …).
    pub detail: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsolidationReport {
    pub input: usize,
    pub output: usize,
    pub stages: Vec<StageReport>,
}

impl ConsolidationReport {
    pub fn record(
        &mut self,
        stage: &str,
        input: usize,
        output: usize,
        detail: BTreeMap<String, usize>,
    ) {
        self.stages.push(StageReport {
            stage: stage.to_string(),
            input,
            output,
            detail,
        });
    }

    /// Total drafts dropped across all stages.
    pub fn total_dropped(&self) -> usize {
        self.input.saturating_sub(self.output)
    }
}
