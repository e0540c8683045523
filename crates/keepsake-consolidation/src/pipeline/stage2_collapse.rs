//! Stage 2: Duplicate Collapse — exactly one winner per member-set
//! fingerprint. Winner: higher score → higher keep-order priority → larger
//! member count → first encountered.

use std::collections::HashMap;

use tracing::debug;

use keepsake_core::config::ConsolidationConfig;
use keepsake_core::draft::ClusterDraft;

pub const STAGE_LABEL: &str = "collapse";

pub fn run(drafts: Vec<ClusterDraft>, cfg: &ConsolidationConfig) -> Vec<ClusterDraft> {
    let mut winners: Vec<ClusterDraft> = Vec::with_capacity(drafts.len());
    let mut position: HashMap<String, usize> = HashMap::new();

    for draft in drafts {
        let fingerprint = draft.fingerprint();
        match position.get(&fingerprint) {
            None => {
                position.insert(fingerprint, winners.len());
                winners.push(draft);
            }
            Some(&pos) => {
                if beats(&draft, &winners[pos], cfg) {
                    debug!(
                        fingerprint = %fingerprint,
                        winner = %draft.algorithm,
                        loser = %winners[pos].algorithm,
                        "duplicate collapse replaced incumbent"
                    );
                    winners[pos] = draft;
                }
            }
        }
    }

    winners
}

/// Whether `challenger` beats `incumbent` for the same fingerprint.
/// Fully tied challengers lose: the first encountered draft is stable.
fn beats(challenger: &ClusterDraft, incumbent: &ClusterDraft, cfg: &ConsolidationConfig) -> bool {
    let cs = challenger.effective_score();
    let is = incumbent.effective_score();
    if (cs - is).abs() > f64::EPSILON {
        return cs > is;
    }

    let cp = cfg.algorithm_priority(&challenger.algorithm);
    let ip = cfg.algorithm_priority(&incumbent.algorithm);
    if cp != ip {
        return cp > ip;
    }

    challenger.member_count() > incumbent.member_count()
}
