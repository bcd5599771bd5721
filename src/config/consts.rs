// src/config/consts.rs

// Batch progress
pub const PROGRESS_EVERY: usize = 100;

// Classification: a label listing at least this many comma-separated
// alternatives is collapsed to `ANY_TYPE`.
pub const ANY_TYPE_THRESHOLD: usize = 5;
pub const ANY_TYPE: &str = "Any";

// Logging
pub const DEFAULT_LOG_FILE: &str = ".store/convert.log";

// Environment overrides read by the CLI
pub const ENV_DEBUG: &str = "COMPENDIUM_DEBUG";
pub const ENV_PROGRESS_EVERY: &str = "COMPENDIUM_PROGRESS_EVERY";
