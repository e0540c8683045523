/// Coarse progress reporting at stage boundaries.
///
/// Advisory only: implementations must never affect pipeline results.
/// Invoked synchronously from the single pipeline thread.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, done: usize, total: usize, stage: &str);
}

/// Observer that ignores all progress.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _done: usize, _total: usize, _stage: &str) {}
}
