//! Builtin checks.
//!
//! These cover the project-wide conventions that do not warrant a plugin:
//! naming prefixes, duplicate unit names, and empty implementations. They
//! are registered statically at startup, before plugin loading.

use std::collections::HashMap;

use poulint_ast::{Summary, UnitKind};
use poulint_registry::{CheckFailure, CheckRegistry, LintIssue, RegistryError, Settings, Severity};

/// Registers the builtin check set.
pub fn register_builtin_checks(registry: &mut CheckRegistry) -> Result<(), RegistryError> {
    registry.register(
        "N001",
        "function-block-prefix",
        "Function block names must carry the FB_ prefix so instances and type names are \
         distinguishable at call sites. The prefix can be changed via the check's 'prefix' \
         option.",
        Box::new(function_block_prefix),
    )?;
    registry.register(
        "N002",
        "function-prefix",
        "Function names must carry the F_ prefix. The prefix can be changed via the check's \
         'prefix' option.",
        Box::new(function_prefix),
    )?;
    registry.register(
        "D001",
        "duplicate-unit-name",
        "A logical unit (same kind and name) must be defined in exactly one file; later \
         definitions shadow earlier ones in most toolchains and are almost always a merge \
         accident.",
        Box::new(duplicate_unit_name),
    )?;
    registry.register(
        "E001",
        "empty-implementation",
        "A program, function block or function with no implementation lines is either dead \
         scaffolding or an unfinished port.",
        Box::new(empty_implementation),
    )?;
    registry.register(
        "V001",
        "duplicate-variable",
        "A variable name declared more than once across a unit's VAR sections shadows itself; \
         identifiers are compared case-insensitively, as the language does.",
        Box::new(duplicate_variable),
    )?;
    Ok(())
}

/// Reads the configured name prefix for a check, falling back to `default`.
fn configured_prefix<'a>(settings: &'a Settings, code: &str, default: &'a str) -> &'a str {
    settings
        .check_option(code)
        .and_then(|option| option.get("prefix"))
        .and_then(|prefix| prefix.as_str())
        .unwrap_or(default)
}

fn prefix_check(
    summary: &Summary,
    code: &str,
    kind: UnitKind,
    prefix: &str,
) -> Vec<LintIssue> {
    summary
        .units_of_kind(kind)
        .filter(|entry| !entry.unit.name.starts_with(prefix))
        .map(|entry| {
            LintIssue::new(
                code,
                format!(
                    "{} '{}' is missing the '{}' prefix",
                    kind, entry.unit.name, prefix
                ),
            )
            .with_severity(Severity::Warning)
            .with_file(entry.file.clone())
        })
        .collect()
}

fn function_block_prefix(
    summary: &Summary,
    settings: &Settings,
) -> Result<Vec<LintIssue>, CheckFailure> {
    let prefix = configured_prefix(settings, "N001", "FB_");
    Ok(prefix_check(summary, "N001", UnitKind::FunctionBlock, prefix))
}

fn function_prefix(
    summary: &Summary,
    settings: &Settings,
) -> Result<Vec<LintIssue>, CheckFailure> {
    let prefix = configured_prefix(settings, "N002", "F_");
    Ok(prefix_check(summary, "N002", UnitKind::Function, prefix))
}

fn duplicate_unit_name(
    summary: &Summary,
    _settings: &Settings,
) -> Result<Vec<LintIssue>, CheckFailure> {
    let mut first_seen: HashMap<(UnitKind, &str), &std::path::Path> = HashMap::new();
    let mut issues = Vec::new();

    for entry in summary.units() {
        let key = (entry.unit.kind, entry.unit.name.as_str());
        match first_seen.get(&key) {
            Some(original) => {
                issues.push(
                    LintIssue::new(
                        "D001",
                        format!(
                            "{} '{}' is already defined in {}",
                            entry.unit.kind,
                            entry.unit.name,
                            original.display()
                        ),
                    )
                    .with_file(entry.file.clone()),
                );
            }
            None => {
                first_seen.insert(key, entry.file.as_path());
            }
        }
    }

    Ok(issues)
}

fn empty_implementation(
    summary: &Summary,
    _settings: &Settings,
) -> Result<Vec<LintIssue>, CheckFailure> {
    let issues = summary
        .units()
        .iter()
        .filter(|entry| {
            matches!(
                entry.unit.kind,
                UnitKind::Program | UnitKind::FunctionBlock | UnitKind::Function
            ) && entry.unit.body_lines == 0
        })
        .map(|entry| {
            LintIssue::new(
                "E001",
                format!("{} '{}' has no implementation", entry.unit.kind, entry.unit.name),
            )
            .with_severity(Severity::Warning)
            .with_file(entry.file.clone())
        })
        .collect();

    Ok(issues)
}

fn duplicate_variable(
    summary: &Summary,
    _settings: &Settings,
) -> Result<Vec<LintIssue>, CheckFailure> {
    let mut issues = Vec::new();

    for entry in summary.units() {
        let mut seen = std::collections::HashSet::new();
        for variable in &entry.unit.variables {
            if !seen.insert(variable.name.to_ascii_lowercase()) {
                issues.push(
                    LintIssue::new(
                        "V001",
                        format!(
                            "variable '{}' is declared more than once in {} '{}'",
                            variable.name, entry.unit.kind, entry.unit.name
                        ),
                    )
                    .with_file(entry.file.clone()),
                );
            }
        }
    }

    Ok(issues)
}
