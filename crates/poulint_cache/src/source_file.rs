//! Selected source files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A source file selected for linting.
///
/// Identified by its path relative to the lint root; carries the file
/// content and a BLAKE3 fingerprint of it. The fingerprint, not the
/// modification time, drives cache validity, so touching a file without
/// changing it never invalidates its entry.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the lint root.
    rel_path: PathBuf,
    /// File content.
    content: String,
    /// BLAKE3 hex fingerprint of the content.
    fingerprint: String,
}

impl SourceFile {
    /// Reads a file relative to `root`.
    pub fn read(root: &Path, rel_path: impl Into<PathBuf>) -> io::Result<Self> {
        let rel_path = rel_path.into();
        let content = fs::read_to_string(root.join(&rel_path))?;
        Ok(Self::from_content(rel_path, content))
    }

    /// Builds a source file from in-memory content.
    pub fn from_content(rel_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let fingerprint = Self::fingerprint_of(&content);
        Self {
            rel_path: rel_path.into(),
            content,
            fingerprint,
        }
    }

    /// Computes the BLAKE3 hex fingerprint of content.
    pub fn fingerprint_of(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Path relative to the lint root.
    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    /// File content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fingerprint_is_content_addressed() {
        let a = SourceFile::from_content("a.st", "PROGRAM Main\nEND_PROGRAM\n");
        let b = SourceFile::from_content("b.st", "PROGRAM Main\nEND_PROGRAM\n");
        let c = SourceFile::from_content("a.st", "PROGRAM Other\nEND_PROGRAM\n");

        // Same content, same fingerprint, regardless of path.
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_on_whitespace() {
        let a = SourceFile::from_content("a.st", "PROGRAM Main");
        let b = SourceFile::from_content("a.st", "PROGRAM Main ");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_read_from_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("unit.st"), "PROGRAM Main\nEND_PROGRAM\n").unwrap();

        let file = SourceFile::read(dir.path(), "unit.st").unwrap();
        assert_eq!(file.rel_path(), Path::new("unit.st"));
        assert!(file.content().starts_with("PROGRAM"));
        assert_eq!(file.fingerprint().len(), 64);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(SourceFile::read(dir.path(), "missing.st").is_err());
    }
}
