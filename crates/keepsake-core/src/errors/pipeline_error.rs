/// Errors raised by the consolidation pipeline runner.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("consolidation already in progress")]
    AlreadyRunning,
}
