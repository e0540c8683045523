/// Configuration errors. These are fatal: they are raised at construction
/// time and never recovered from at runtime.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("drop threshold {drop_threshold} must be >= merge threshold {merge_threshold}")]
    ThresholdOrdering {
        merge_threshold: f64,
        drop_threshold: f64,
    },

    #[error("{name} must be within [0.0, 1.0], got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be at least 1, got {value}")]
    ZeroCap { name: &'static str, value: usize },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}
