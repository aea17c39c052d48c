//! Cache keys.

use serde::{Deserialize, Serialize};

use crate::SourceFile;

/// The identity of a cached parse result.
///
/// A persisted entry is valid for a lookup if and only if all three
/// components match exactly: the normalized relative path, the content
/// fingerprint, and the parser version tag. Identical content parsed by a
/// different grammar revision must never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Normalized path relative to the lint root.
    pub path: String,
    /// BLAKE3 fingerprint of the file content.
    pub fingerprint: String,
    /// Version tag of the parser that produced the outcome.
    pub parser_version: String,
}

impl CacheKey {
    /// Builds the key for a source file under the given parser version.
    pub fn for_file(file: &SourceFile, parser_version: &str) -> Self {
        // Normalize the separator so the same file keys identically across
        // platforms.
        let path = file.rel_path().to_string_lossy().replace('\\', "/");
        Self {
            path,
            fingerprint: file.fingerprint().to_string(),
            parser_version: parser_version.to_string(),
        }
    }

    /// Stable digest of the key, used as the persisted entry file name.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.path.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.fingerprint.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.parser_version.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}
