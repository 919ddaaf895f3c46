//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for material-search operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` where configuration and catalogs are loaded.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by a [`HistoryStore`](crate::history::HistoryStore).
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Reading or writing the backing file failed.
    #[error("recent searches at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The history could not be encoded for storage.
    #[error("failed to encode recent searches: {0}")]
    Encode(#[from] serde_json::Error),
}
