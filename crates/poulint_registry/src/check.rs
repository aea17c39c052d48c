//! Check descriptors.

use poulint_ast::Summary;

use crate::{LintIssue, Settings};

/// Error type surfaced by a failing check callback.
pub type CheckFailure = Box<dyn std::error::Error + Send + Sync>;

/// The callable body of a check.
///
/// Callbacks must be free of shared mutable state: `run_all` may invoke
/// them concurrently against the same immutable summary.
pub type CheckCallback =
    Box<dyn Fn(&Summary, &Settings) -> Result<Vec<LintIssue>, CheckFailure> + Send + Sync>;

/// One registered lint check.
///
/// Created at registration time, immutable afterwards, read by every run
/// for the lifetime of the process.
pub struct CheckDescriptor {
    /// Short unique code, e.g. `N001`.
    pub code: String,
    /// Human-readable check name.
    pub name: String,
    /// Documentation shown by the check listing.
    pub doc: String,
    /// The check body.
    pub callback: CheckCallback,
}

impl std::fmt::Debug for CheckDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckDescriptor")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Maximum length of a check code; the listing pads codes to this width.
pub const CODE_WIDTH: usize = 7;

/// Validates a check code: one to three ASCII uppercase letters followed by
/// one to four digits.
pub fn code_is_valid(code: &str) -> bool {
    if code.len() > CODE_WIDTH {
        return false;
    }
    let letters = code.chars().take_while(|c| c.is_ascii_uppercase()).count();
    if !(1..=3).contains(&letters) {
        return false;
    }
    let digits = &code[letters..];
    (1..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
