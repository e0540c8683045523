//! Stage 7: Member Quality Ranking — delegate to the curation crate's
//! ranking and record the report so persistence can honor the ordering
//! without recomputation.

use std::collections::HashMap;

use keepsake_core::draft::{ClusterDraft, MediaId};
use keepsake_core::media::MediaItem;
use keepsake_curation::quality;

pub const STAGE_LABEL: &str = "quality_ranking";

pub fn run(
    mut drafts: Vec<ClusterDraft>,
    media: &HashMap<MediaId, MediaItem>,
    baseline_megapixels: f64,
) -> Vec<ClusterDraft> {
    for draft in &mut drafts {
        if draft.members.is_empty() {
            continue;
        }
        let ranked = quality::rank_members(draft, media, baseline_megapixels);
        draft.members = ranked.ordered;
        draft.params.member_quality = Some(ranked.report);
    }
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_reordered_and_report_recorded() {
        let mut sharp = MediaItem::bare(MediaId(2));
        sharp.sharpness = Some(0.9);
        let mut soft = MediaItem::bare(MediaId(1));
        soft.sharpness = Some(0.1);
        let media: HashMap<MediaId, MediaItem> =
            [(MediaId(1), soft), (MediaId(2), sharp)].into_iter().collect();

        let draft = ClusterDraft::new("vacation", vec![MediaId(1), MediaId(2)]);
        let out = run(vec![draft], &media, 12.0);
        assert_eq!(out[0].members, vec![MediaId(2), MediaId(1)]);
        let report = out[0].params.member_quality.as_ref().unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].id, MediaId(2));
    }

    #[test]
    fn empty_drafts_pass_through() {
        let draft = ClusterDraft::new("vacation", vec![]);
        let out = run(vec![draft], &HashMap::new(), 12.0);
        assert!(out[0].params.member_quality.is_none());
    }
}
