//! Run reports.

use serde::Serialize;

use poulint_registry::{LintIssue, Severity};

/// The outcome of one lint run.
///
/// Carries every diagnostic produced, including the synthetic issues for
/// parse failures; the exit-code decision is simply whether any issue
/// exists, regardless of severity mix.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Number of files selected and processed.
    pub files_checked: usize,
    /// How many of them were served from the parse cache.
    pub cache_hits: usize,
    /// How many failed to parse (or to read).
    pub parse_failures: usize,
    /// All diagnostics, parse failures first, then check findings in check
    /// code order.
    pub issues: Vec<LintIssue>,
}

impl RunReport {
    /// Returns true if the run produced no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues with the given severity.
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}
