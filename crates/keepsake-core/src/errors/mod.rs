//! Error types, split per domain with a single top-level enum.

mod config_error;
mod lookup_error;
mod pipeline_error;

pub use config_error::ConfigError;
pub use lookup_error::LookupError;
pub use pipeline_error::PipelineError;

/// Top-level error for the keepsake workspace.
#[derive(Debug, thiserror::Error)]
pub enum KeepsakeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type KeepsakeResult<T> = Result<T, KeepsakeError>;
