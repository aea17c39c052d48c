//! Cache error types.

use thiserror::Error;

/// Errors that can occur in the cache store.
///
/// These never escape [`ParseCache::get_or_parse`](crate::ParseCache):
/// every variant degrades to direct parsing with a logged warning.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read a cache entry.
    #[error("Failed to read cache entry: {0}")]
    Read(String),

    /// Failed to write a cache entry.
    #[error("Failed to write cache entry: {0}")]
    Write(String),

    /// A stored entry could not be decoded.
    #[error("Corrupted cache entry: {0}")]
    Corrupted(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    /// Creates a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read(message.into())
    }

    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }

    /// Creates a corrupted entry error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted(message.into())
    }
}
