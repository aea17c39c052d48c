//! The check registry.

use std::collections::BTreeMap;

use tracing::{debug, error};

use poulint_ast::Summary;

use crate::check::code_is_valid;
use crate::{CheckCallback, CheckDescriptor, LintIssue, RegistryError, Settings, Severity};

/// Process-wide table of registered lint checks.
///
/// Constructed once per invocation and populated during the startup phase
/// (builtin registrations, then plugin loading) before any listing or run.
/// The table is keyed by code, so listings and runs are deterministic in
/// code order.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, CheckDescriptor>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check.
    ///
    /// Fails fatally on a malformed or duplicate code; both indicate a
    /// programming error in the registering plugin, not a recoverable
    /// condition.
    pub fn register(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        doc: impl Into<String>,
        callback: CheckCallback,
    ) -> Result<(), RegistryError> {
        let code = code.into();

        if !code_is_valid(&code) {
            return Err(RegistryError::InvalidCode(code));
        }
        if self.checks.contains_key(&code) {
            return Err(RegistryError::DuplicateCode(code));
        }

        debug!("registered check {code}");
        self.checks.insert(
            code.clone(),
            CheckDescriptor {
                code,
                name: name.into(),
                doc: doc.into(),
                callback,
            },
        );
        Ok(())
    }

    /// Registered checks, ordered by code.
    pub fn checks(&self) -> impl Iterator<Item = &CheckDescriptor> {
        self.checks.values()
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every enabled check against the summary.
    ///
    /// A check whose callback fails does not abort the run: the failure is
    /// logged and converted into exactly one synthetic error-severity issue
    /// carrying that check's code, and the remaining checks still run.
    pub fn run_all(&self, summary: &Summary, settings: &Settings) -> Vec<LintIssue> {
        let mut issues = Vec::new();

        for check in self.checks.values() {
            if !settings.is_enabled(&check.code) {
                debug!("check {} disabled by settings", check.code);
                continue;
            }

            match (check.callback)(summary, settings) {
                Ok(mut found) => {
                    if let Some(severity) = settings.severity_override(&check.code) {
                        for issue in &mut found {
                            issue.severity = severity;
                        }
                    }
                    issues.extend(found);
                }
                Err(e) => {
                    error!("check {} failed: {}", check.code, e);
                    issues.push(
                        LintIssue::new(
                            &check.code,
                            format!("internal error in check '{}': {}", check.name, e),
                        )
                        .with_severity(Severity::Error),
                    );
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop() -> CheckCallback {
        Box::new(|_, _| Ok(Vec::new()))
    }

    fn one_issue(code: &'static str, message: &'static str) -> CheckCallback {
        Box::new(move |_, _| Ok(vec![LintIssue::new(code, message)]))
    }

    fn crashing() -> CheckCallback {
        Box::new(|_, _| Err("summary index out of range".into()))
    }

    #[test]
    fn test_register_and_list_in_code_order() {
        let mut registry = CheckRegistry::new();
        registry.register("C002", "second", "", noop()).unwrap();
        registry.register("C001", "first", "", noop()).unwrap();

        let codes: Vec<_> = registry.checks().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C001", "C002"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_duplicate_code_fails() {
        let mut registry = CheckRegistry::new();
        registry.register("C001", "first", "", noop()).unwrap();

        let err = registry.register("C001", "again", "", noop()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCode(code) if code == "C001"));
        // The original registration is untouched.
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.checks().next().unwrap().name, "first");
    }

    #[test]
    fn test_register_invalid_code_fails() {
        let mut registry = CheckRegistry::new();
        let err = registry.register("nope", "bad", "", noop()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCode(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_run_all_collects_issues_in_code_order() {
        let mut registry = CheckRegistry::new();
        registry
            .register("B001", "b", "", one_issue("B001", "from b"))
            .unwrap();
        registry
            .register("A001", "a", "", one_issue("A001", "from a"))
            .unwrap();

        let issues = registry.run_all(&Summary::default(), &Settings::empty());
        let codes: Vec<_> = issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["A001", "B001"]);
    }

    #[test]
    fn test_crashing_check_is_isolated() {
        let mut registry = CheckRegistry::new();
        registry
            .register("A001", "healthy", "", one_issue("A001", "real finding"))
            .unwrap();
        registry.register("B001", "broken", "", crashing()).unwrap();
        registry
            .register("C001", "also healthy", "", one_issue("C001", "another finding"))
            .unwrap();

        let issues = registry.run_all(&Summary::default(), &Settings::empty());

        // Exactly one synthetic issue for the broken check, and the other
        // checks' findings are still reported.
        assert_eq!(issues.len(), 3);
        let synthetic: Vec<_> = issues.iter().filter(|i| i.code == "B001").collect();
        assert_eq!(synthetic.len(), 1);
        assert_eq!(synthetic[0].severity, Severity::Error);
        assert!(synthetic[0].message.contains("internal error"));
        assert!(synthetic[0].message.contains("summary index out of range"));
        assert!(issues.iter().any(|i| i.code == "A001"));
        assert!(issues.iter().any(|i| i.code == "C001"));
    }

    #[test]
    fn test_disabled_check_is_skipped() {
        let mut registry = CheckRegistry::new();
        registry
            .register("A001", "a", "", one_issue("A001", "finding"))
            .unwrap();
        registry
            .register("B001", "b", "", one_issue("B001", "finding"))
            .unwrap();

        let settings = Settings::from_value(serde_json::json!({"checks": {"A001": false}}));
        let issues = registry.run_all(&Summary::default(), &settings);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "B001");
    }

    #[test]
    fn test_severity_override_applies() {
        let mut registry = CheckRegistry::new();
        registry
            .register("A001", "a", "", one_issue("A001", "finding"))
            .unwrap();

        let settings = Settings::from_value(serde_json::json!({"checks": {"A001": "warning"}}));
        let issues = registry.run_all(&Summary::default(), &settings);

        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_run_all_with_empty_registry() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert!(
            registry
                .run_all(&Summary::default(), &Settings::empty())
                .is_empty()
        );
    }
}
