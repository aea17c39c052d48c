//! Persisted cache entries.

use serde::{Deserialize, Serialize};

use poulint_ast::ParseOutcome;

use crate::CacheKey;

/// One persisted parse result.
///
/// Entries are immutable once written; a content change produces a new key
/// and a new entry, leaving the old one unreferenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The full key the outcome was computed under.
    pub key: CacheKey,
    /// The cached parse outcome (success or syntax failure).
    pub outcome: ParseOutcome,
    /// Unix timestamp of entry creation.
    pub created_at: u64,
}

impl CacheEntry {
    /// Creates a new entry stamped with the current time.
    pub fn new(key: CacheKey, outcome: ParseOutcome) -> Self {
        Self {
            key,
            outcome,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Returns true if this entry is valid for the given key.
    ///
    /// Validity requires exact equality of all key components; the digest
    /// file name alone is not trusted.
    pub fn is_valid_for(&self, key: &CacheKey) -> bool {
        self.key == *key
    }
}
