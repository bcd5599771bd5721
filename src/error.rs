// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of a conversion batch. Everything else is a warning
/// recorded on the entry.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{name} ({category}) has no content")]
    MissingContent {
        id: String,
        name: String,
        category: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed catalog {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}
