//! Error types for the dedup indexer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for index operations
///
/// Either failure is fatal for the single file being pushed, never for the
/// crawl or the index as a whole: the caller logs and skips the entry.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Failed to read metadata for a file being indexed
    #[error("failed to read metadata for {}: {source}", path.display())]
    Metadata { path: PathBuf, source: io::Error },

    /// Failed to hash a file's contents
    #[error("failed to hash {}: {source}", path.display())]
    Hash { path: PathBuf, source: io::Error },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, IndexerError>;
