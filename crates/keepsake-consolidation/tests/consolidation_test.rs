//! Integration tests for the consolidation pipeline.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use keepsake_consolidation::pipeline::{self, stage9_media_cap};
use keepsake_consolidation::ConsolidationEngine;
use keepsake_core::config::{ConsolidationConfig, KeepsakeConfig};
use keepsake_core::draft::{ClusterDraft, MediaId};
use test_fixtures::{DraftBuilder, InMemoryMediaLookup, MediaItemBuilder, RecordingProgress};

// 2021-06-01 00:00 UTC; all test ranges sit well after the min-valid-year.
const T0: i64 = 1_622_505_600;
const DAY: i64 = 86_400;

fn test_config() -> KeepsakeConfig {
    KeepsakeConfig {
        consolidation: ConsolidationConfig {
            keep_order: vec!["vacation".into(), "day_trip".into()],
            annotation_algorithms: BTreeSet::from(["faces".to_string()]),
            min_unique_share: BTreeMap::from([("faces".to_string(), 0.2)]),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn engine_with_empty_catalog() -> ConsolidationEngine {
    init_tracing();
    ConsolidationEngine::new(test_config(), Box::new(InMemoryMediaLookup::empty())).unwrap()
}

/// Opt-in test logging via RUST_LOG.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn timed(builder: DraftBuilder) -> ClusterDraft {
    builder.time(T0, T0 + 2 * DAY).build()
}

// Duplicate collapse determinism: identical member sets with different
// scores → the higher-score draft always survives, fingerprint count 2 → 1.
#[test]
fn duplicate_collapse_keeps_the_higher_score() {
    let engine = engine_with_empty_catalog();
    let a = timed(DraftBuilder::new("vacation", &[1, 2, 3]).score(0.8));
    let b = timed(DraftBuilder::new("vacation", &[3, 2, 1]).score(0.5));

    let out = engine.consolidate(vec![b, a]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].params.score, Some(0.8));
}

// Dominance threshold ordering with merge=0.5, drop=0.8.
#[test]
fn dominance_thresholds_partition_overlap_zones() {
    let engine = engine_with_empty_catalog();

    // 9 of 10 shared (Jaccard ≈ 0.82): drop zone → one survivor.
    let out = engine
        .consolidate(vec![
            timed(DraftBuilder::new("vacation", &(1..=10).collect::<Vec<_>>()).score(0.9)),
            timed(
                DraftBuilder::new(
                    "day_trip",
                    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11],
                )
                .score(0.8),
            ),
        ])
        .unwrap();
    assert_eq!(out.len(), 1, "drop zone must leave one survivor");
    assert_eq!(out[0].algorithm, "vacation");

    // 6 shared of 8+8 (Jaccard = 0.6): merge zone → one survivor.
    let out = engine
        .consolidate(vec![
            timed(DraftBuilder::new("vacation", &[1, 2, 3, 4, 5, 6, 7, 8]).score(0.9)),
            timed(
                DraftBuilder::new("day_trip", &[1, 2, 3, 4, 5, 6, 9, 10]).score(0.8),
            ),
        ])
        .unwrap();
    assert_eq!(out.len(), 1, "merge zone must collapse to one");

    // 2 of 10 shared (Jaccard ≈ 0.11): both survive.
    let out = engine
        .consolidate(vec![
            timed(DraftBuilder::new("vacation", &(1..=10).collect::<Vec<_>>()).score(0.9)),
            timed(
                DraftBuilder::new("day_trip", &(9..=18).collect::<Vec<_>>()).score(0.8),
            ),
        ])
        .unwrap();
    assert_eq!(out.len(), 2, "low overlap must keep both");
}

// Nesting monotonicity: a strict subset is never dropped, is tagged as a
// sub-story, and its parent references its fingerprint.
#[test]
fn nesting_retains_and_cross_references_children() {
    let engine = engine_with_empty_catalog();
    let parent = timed(
        DraftBuilder::new("vacation", &(1..=8).collect::<Vec<_>>()).score(0.9),
    );
    let child = timed(DraftBuilder::new("day_trip", &[2, 3, 4]).score(0.4));
    let child_fingerprint = child.fingerprint();

    let out = engine.consolidate(vec![parent, child]).unwrap();
    assert_eq!(out.len(), 2);

    let child_out = out.iter().find(|d| d.algorithm == "day_trip").unwrap();
    assert!(child_out.params.is_sub_story);

    let parent_out = out.iter().find(|d| d.algorithm == "vacation").unwrap();
    assert!(parent_out.params.has_sub_stories);
    assert!(parent_out
        .params
        .sub_stories
        .iter()
        .any(|s| s.fingerprint == child_fingerprint));
}

// Per-media cap bound: with cap 2, no media id appears in more than 2
// accepted non-sub-story drafts of the same algorithm group.
#[test]
fn per_media_cap_bound_holds() {
    let cfg = ConsolidationConfig {
        per_media_cap: 2,
        ..Default::default()
    };
    let drafts: Vec<ClusterDraft> = (0..5)
        .map(|i| {
            DraftBuilder::new("vacation", &[1, 100 + i])
                .score(0.9 - i as f64 / 10.0)
                .build()
        })
        .collect();

    let (out, rejected) = stage9_media_cap::run(drafts, &cfg);
    assert_eq!(rejected, 3);

    let mut uses: HashMap<MediaId, usize> = HashMap::new();
    for draft in out.iter().filter(|d| !d.params.is_sub_story) {
        for id in draft.normalized_members() {
            *uses.entry(id).or_insert(0) += 1;
        }
    }
    assert!(uses.values().all(|count| *count <= 2));
}

// End-to-end scenario: five raw drafts in, exactly two out.
#[test]
fn end_to_end_scenario_yields_two_drafts() {
    let engine = engine_with_empty_catalog();

    // Near-duplicate pair (Jaccard ≈ 0.82) across vacation and day_trip.
    let vacation = timed(
        DraftBuilder::new("vacation", &(1..=10).collect::<Vec<_>>()).score(0.9),
    );
    let near_dup = timed(
        DraftBuilder::new("day_trip", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11]).score(0.8),
    );
    // Below min_size (default 3).
    let tiny = timed(DraftBuilder::new("day_trip", &[20, 21]).score(0.9));
    // Annotation-only, fully covered by the survivors' members.
    let annotation = timed(DraftBuilder::new("faces", &[1, 2, 31]).score(0.5));
    // Standalone valid draft.
    let standalone = timed(DraftBuilder::new("day_trip", &[30, 31, 32]).score(0.7));

    let out = engine
        .consolidate(vec![vacation, near_dup, tiny, annotation, standalone])
        .unwrap();

    assert_eq!(out.len(), 2, "expected the vacation winner and the standalone");
    assert!(out.iter().any(|d| d.algorithm == "vacation"));
    assert!(out
        .iter()
        .any(|d| d.algorithm == "day_trip" && d.normalized_members()
            == vec![MediaId(30), MediaId(31), MediaId(32)]));
}

// Progress callbacks fire once per stage, advisory only.
#[test]
fn progress_observer_sees_every_stage() {
    let engine = engine_with_empty_catalog();
    let progress = RecordingProgress::new();
    let drafts = vec![timed(DraftBuilder::new("vacation", &[1, 2, 3]).score(0.9))];

    let (with_progress, _) = engine
        .consolidate_with_progress(drafts.clone(), &progress)
        .unwrap();
    let without_progress = engine.consolidate(drafts).unwrap();

    let events = progress.events();
    assert_eq!(events.len(), pipeline::STAGE_COUNT);
    assert_eq!(events[0].1, pipeline::STAGE_COUNT);
    assert_eq!(events.last().unwrap().0, pipeline::STAGE_COUNT);
    // Reporting never affects results.
    assert_eq!(
        serde_json::to_string(&with_progress).unwrap(),
        serde_json::to_string(&without_progress).unwrap()
    );
}

// The run report mirrors what the stages did.
#[test]
fn run_report_records_stage_counters() {
    let engine = engine_with_empty_catalog();
    let drafts = vec![
        timed(DraftBuilder::new("vacation", &[1, 2, 3]).score(0.9)),
        // Dropped by the filter: below min size.
        timed(DraftBuilder::new("vacation", &[9]).score(0.9)),
    ];

    let (out, report) = engine
        .consolidate_with_progress(drafts, &RecordingProgress::new())
        .unwrap();
    assert_eq!(report.input, 2);
    assert_eq!(report.output, out.len());
    assert_eq!(report.stages.len(), pipeline::STAGE_COUNT);
    let filter = &report.stages[0];
    assert_eq!(filter.detail.get("too_small"), Some(&1));
}

// Same inputs and configuration → byte-identical outputs.
#[test]
fn consolidation_is_deterministic() {
    let media: Vec<_> = (1..=12)
        .map(|id| {
            MediaItemBuilder::new(id)
                .taken_at(T0 + id * 600)
                .phash(0x5555_0000_0000_0000 + id as u64)
                .build()
        })
        .collect();
    let engine = ConsolidationEngine::new(
        test_config(),
        Box::new(InMemoryMediaLookup::new(media)),
    )
    .unwrap();

    let drafts = || {
        vec![
            timed(DraftBuilder::new("vacation", &(1..=10).collect::<Vec<_>>()).score(0.9)),
            timed(DraftBuilder::new("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11]).score(0.8)),
            timed(DraftBuilder::new("day_trip", &[10, 11, 12]).score(0.6)),
        ]
    };

    let first = engine.consolidate(drafts()).unwrap();
    let second = engine.consolidate(drafts()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// With dominance disabled (the resolver-only configuration from the
// stages' shared-responsibility contract), same-algorithm near-duplicates
// merge when every signal agrees, and the merge is audited on the winner.
#[test]
fn same_algorithm_merge_records_audit() {
    let media: Vec<_> = (1..=11)
        .map(|id| {
            MediaItemBuilder::new(id)
                .taken_at(T0 + id * 600)
                .phash(0xAAAA_AAAA_AAAA_AAAA)
                .build()
        })
        .collect();
    let mut config = test_config();
    config.consolidation.enable_dominance = false;
    let engine =
        ConsolidationEngine::new(config, Box::new(InMemoryMediaLookup::new(media))).unwrap();

    let a = DraftBuilder::new("vacation", &(1..=10).collect::<Vec<_>>())
        .score(0.9)
        .time(T0, T0 + DAY)
        .place("Lisbon, Portugal")
        .centroid(38.72, -9.14)
        .build();
    let b = DraftBuilder::new("vacation", &[1, 2, 3, 4, 5, 6, 7, 8, 9, 11])
        .score(0.8)
        .time(T0, T0 + DAY)
        .place("Lisbon, Portugal")
        .centroid(38.72, -9.14)
        .build();

    let out = engine.consolidate(vec![a, b]).unwrap();
    assert_eq!(out.len(), 1);
    let winner = &out[0];
    assert_eq!(winner.params.merges.len(), 1);
    assert!(winner.params.merges[0].merged);
    // Union of both member sets.
    assert_eq!(winner.normalized_members().len(), 11);
}
