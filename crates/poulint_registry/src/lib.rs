//! # poulint_registry
//!
//! The lint check registry.
//!
//! Checks are registered once per process, before any lint run: builtin
//! checks through static registration calls, plugin checks through the
//! loader in `poulint_plugin`. Registration validates the check code
//! eagerly and fatally; duplicate or malformed codes are programming
//! errors, not recoverable conditions.
//!
//! At run time the registry is read-only: [`CheckRegistry::run_all`] walks
//! every registered check in code order against one immutable [`Summary`]
//! and [`Settings`] pair, isolating each check's failures so a single bad
//! check cannot suppress the findings of the others.
//!
//! [`Summary`]: poulint_ast::Summary

mod check;
mod error;
mod issue;
mod registry;
mod settings;

pub use check::{CODE_WIDTH, CheckCallback, CheckDescriptor, CheckFailure, code_is_valid};
pub use error::RegistryError;
pub use issue::{LintIssue, Severity};
pub use registry::CheckRegistry;
pub use settings::Settings;
