//! Lint issues.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use poulint_ast::SourceLocation;

/// Severity level for lint issues.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

impl Severity {
    /// Lowercase name as shown in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Parses a severity name; unknown names are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

/// One finding produced by a check (or synthesized by the driver for parse
/// failures and crashed checks). Produced fresh per run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Code of the check that produced this issue.
    pub code: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Affected file, when the issue is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Location within the file, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Human-readable message.
    pub message: String,
}

impl LintIssue {
    /// Creates a new error-severity issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity: Severity::Error,
            file: None,
            location: None,
            message: message.into(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the affected file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_defaults() {
        let issue = LintIssue::new("N001", "bad name");
        assert_eq!(issue.code, "N001");
        assert_eq!(issue.severity, Severity::Error);
        assert!(issue.file.is_none());
        assert!(issue.location.is_none());
    }

    #[test]
    fn test_issue_builder_chain() {
        let issue = LintIssue::new("N001", "bad name")
            .with_severity(Severity::Warning)
            .with_file("units/motor.st")
            .with_location(SourceLocation::new(3, 1));

        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.file, Some(PathBuf::from("units/motor.st")));
        assert_eq!(issue.location.unwrap().line, 3);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("error"), Some(Severity::Error));
        assert_eq!(Severity::parse("warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse("info"), Some(Severity::Info));
        assert_eq!(Severity::parse("fatal"), None);
    }

    #[test]
    fn test_severity_roundtrip_through_names() {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
    }

    #[test]
    fn test_issue_serialization_omits_empty_fields() {
        let issue = LintIssue::new("D001", "duplicate unit");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("\"file\""));
        assert!(!json.contains("\"location\""));
        assert!(json.contains("\"severity\":\"error\""));
    }
}
