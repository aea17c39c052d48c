//! # poulint_core
//!
//! Core lint driver for poulint.
//!
//! This crate provides:
//! - The [`Orchestrator`] driving selection, cached parsing, aggregation,
//!   and check execution
//! - Configuration loading ([`LintConfig`])
//! - File discovery ([`FileSelector`])
//! - The builtin check set
//!
//! ## Example
//!
//! ```rust,ignore
//! use poulint_core::{LintConfig, Orchestrator, register_builtin_checks};
//! use poulint_parser::StructuredTextParser;
//! use poulint_registry::{CheckRegistry, Settings};
//!
//! let mut registry = CheckRegistry::new();
//! register_builtin_checks(&mut registry)?;
//!
//! let config = LintConfig::from_file(".poulint.json")?;
//! let orchestrator = Orchestrator::new(config, registry, Box::new(StructuredTextParser::new()))?;
//!
//! let report = orchestrator.run(&Settings::empty())?;
//! println!("found {} issues", report.issues.len());
//! ```

mod checks;
mod config;
mod error;
mod orchestrator;
mod report;
mod selector;

pub use checks::register_builtin_checks;
pub use config::LintConfig;
pub use error::LintError;
pub use orchestrator::{Orchestrator, SYNTAX_FAILURE_CODE};
pub use report::RunReport;
pub use selector::FileSelector;
