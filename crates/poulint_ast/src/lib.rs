//! # poulint_ast
//!
//! Data model for parsed structured-text program units.
//!
//! This crate defines the types shared across the linter pipeline:
//! - [`ParsedUnit`] and [`UnitKind`] describe one successfully parsed
//!   program unit (POU)
//! - [`ParseFailure`] records a syntax failure with its location
//! - [`ParseOutcome`] is the cacheable result of parsing one file
//! - [`Summary`] aggregates units across a file set for lint checks
//!
//! All types are plain data and serde-serializable so that parse results
//! can be persisted by the cache and emitted as JSON output.

mod location;
mod summary;
mod unit;

pub use location::SourceLocation;
pub use summary::{Summary, SummaryUnit};
pub use unit::{ParseFailure, ParseOutcome, ParsedUnit, UnitKind, VarSection, Variable};
