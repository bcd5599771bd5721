// src/config/options.rs
use super::consts::PROGRESS_EVERY;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Enables the diagnostic heuristics (leftover tags, stray price tables).
    /// Never changes converted output.
    pub debug: bool,
    /// Progress cadence in records. Zero is treated as one.
    pub progress_every: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            debug: false,
            progress_every: PROGRESS_EVERY,
        }
    }
}

impl ConvertOptions {
    pub fn debug() -> Self {
        Self { debug: true, ..Self::default() }
    }

    pub fn cadence(&self) -> usize {
        self.progress_every.max(1)
    }
}
