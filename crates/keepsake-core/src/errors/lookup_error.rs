/// Errors surfaced by the external media catalog.
///
/// A member id with no resolvable media is NOT an error — the catalog omits
/// it silently. This type covers batch-level failures only.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("media batch lookup failed: {reason}")]
    BatchFailed { reason: String },
}
