//! Source file selection.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::info;
use walkdir::WalkDir;

use crate::LintError;

/// Resolves include/exclude glob patterns into a set of source files.
///
/// Includes are matched against paths relative to the lint root; a
/// candidate matching any exclude pattern is dropped, regardless of which
/// include produced it. The result is sorted and deduplicated.
pub struct FileSelector {
    include_patterns: Vec<String>,
    includes: GlobSet,
    excludes: Option<GlobSet>,
}

impl FileSelector {
    /// Compiles the pattern sets.
    ///
    /// An empty include set is a usage error; invalid glob syntax in either
    /// set is a configuration error.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, LintError> {
        if include.is_empty() {
            return Err(LintError::config(
                "at least one include pattern is required",
            ));
        }

        let includes = Self::build_globset(include)?.expect("non-empty include set");
        let excludes = Self::build_globset(exclude)?;

        Ok(Self {
            include_patterns: include.to_vec(),
            includes,
            excludes,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LintError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                LintError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LintError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Walks `root` and returns the selected files, relative to `root`.
    pub fn select(&self, root: &Path) -> Result<Vec<PathBuf>, LintError> {
        let mut files = Vec::new();
        let mut pattern_matched = vec![false; self.include_patterns.len()];

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let rel = path.strip_prefix(root).unwrap_or(path);
            let hits = self.includes.matches(rel);
            if hits.is_empty() {
                continue;
            }
            for hit in hits {
                pattern_matched[hit] = true;
            }

            // Exclude wins over include.
            if self
                .excludes
                .as_ref()
                .is_some_and(|excludes| excludes.is_match(rel))
            {
                continue;
            }

            files.push(rel.to_path_buf());
        }

        files.sort();
        files.dedup();

        for (pattern, matched) in self.include_patterns.iter().zip(&pattern_matched) {
            if !matched {
                info!("Include pattern '{}' matched no files", pattern);
            }
        }

        info!("Selected {} files to lint", files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "PROGRAM Main\nEND_PROGRAM\n").unwrap();
    }

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_include_set_is_an_error() {
        let result = FileSelector::new(&[], &[]);
        assert!(matches!(result, Err(LintError::Config(_))));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let result = FileSelector::new(&patterns(&["[invalid"]), &[]);
        assert!(matches!(result, Err(LintError::Config(_))));

        let result = FileSelector::new(&patterns(&["**/*.pou"]), &patterns(&["[invalid"]));
        assert!(matches!(result, Err(LintError::Config(_))));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.pou");
        touch(dir.path(), "b.pou");
        touch(dir.path(), "generated/c.pou");

        let selector =
            FileSelector::new(&patterns(&["**/*.pou"]), &patterns(&["generated/**"])).unwrap();
        let files = selector.select(dir.path()).unwrap();

        assert_eq!(files, vec![PathBuf::from("a.pou"), PathBuf::from("b.pou")]);
    }

    #[test]
    fn test_union_of_include_patterns() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "main.st");
        touch(dir.path(), "motor.pou");
        touch(dir.path(), "readme.md");

        let selector = FileSelector::new(&patterns(&["**/*.st", "**/*.pou"]), &[]).unwrap();
        let files = selector.select(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("main.st"), PathBuf::from("motor.pou")]
        );
    }

    #[test]
    fn test_overlapping_patterns_deduplicate() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "units/main.st");

        let selector =
            FileSelector::new(&patterns(&["**/*.st", "units/**/*.st"]), &[]).unwrap();
        let files = selector.select(dir.path()).unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_results_are_relative_and_sorted() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "z.st");
        touch(dir.path(), "a.st");
        touch(dir.path(), "sub/m.st");

        let selector = FileSelector::new(&patterns(&["**/*.st"]), &[]).unwrap();
        let files = selector.select(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("a.st"),
                PathBuf::from("sub/m.st"),
                PathBuf::from("z.st")
            ]
        );
        assert!(files.iter().all(|f| f.is_relative()));
    }

    #[test]
    fn test_pattern_matching_nothing_is_not_an_error() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "main.st");

        let selector = FileSelector::new(&patterns(&["**/*.st", "**/*.pou"]), &[]).unwrap();
        let files = selector.select(dir.path()).unwrap();

        // The .pou pattern matched nothing; selection still succeeds.
        assert_eq!(files.len(), 1);
    }
}
