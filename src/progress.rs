// src/progress.rs
/// Lightweight progress reporting used by long-running conversions.
/// Frontends (CLI, store importers) implement this to surface status to users.
/// Purely a notification channel: nothing here can pause or cancel a batch.
pub trait Progress {
    /// Called at the start with the number of records in the batch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called every `progress_every` records and once more on the last record.
    fn advance(&mut self, _done: usize, _total: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
