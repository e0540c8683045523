//! Default values for every configuration knob.

// Filter / normalization
pub const DEFAULT_MIN_SIZE: usize = 3;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_REQUIRE_VALID_TIME: bool = true;
pub const DEFAULT_MIN_VALID_YEAR: i32 = 1990;

// Overlap suppression
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_DROP_THRESHOLD: f64 = 0.8;
pub const DEFAULT_ENABLE_DOMINANCE: bool = true;
pub const DEFAULT_ENABLE_OVERLAP_RESOLVER: bool = true;

// Merge signals (overlap resolver)
pub const DEFAULT_MIN_TEMPORAL_IOU: f64 = 0.55;
pub const DEFAULT_MAX_STAYPOINT_DISTANCE_M: f64 = 25_000.0;
pub const DEFAULT_MIN_CORE_GROUP_JACCARD: f64 = 0.5;
pub const DEFAULT_MAX_MEDIAN_PHASH_DELTA: f64 = 0.18;
pub const DEFAULT_MAX_SCORE_GAP_RATIO: f64 = 0.35;

// Per-media cap
pub const DEFAULT_PER_MEDIA_CAP: usize = 2;
pub const DEFAULT_ALGORITHM_GROUP: &str = "default";

// Progress reporting
pub const DEFAULT_PROGRESS_BATCH: usize = 25;

// Scoring
pub const DEFAULT_RECENCY_HORIZON_DAYS: f64 = 365.0;
pub const DEFAULT_MAX_SPAN_HOURS: f64 = 240.0;
pub const DEFAULT_BASELINE_MEGAPIXELS: f64 = 12.0;
pub const DEFAULT_GRID_PRECISION_DEG: f64 = 0.01;

// Curation
pub const DEFAULT_PER_DAY_CAP: usize = 8;
pub const DEFAULT_PER_BUCKET_CAP: usize = 3;
pub const DEFAULT_MIN_SPACING_SECS: i64 = 120;
pub const DEFAULT_MIN_PHASH_DISTANCE: u32 = 6;
pub const DEFAULT_PER_STAYPOINT_CAP: usize = 10;
pub const DEFAULT_HASH_SAMPLE_LIMIT: usize = 8;
