//! # poulint_parser
//!
//! Parsing front end for poulint.
//!
//! The linter core never depends on a concrete grammar: it sees parsing as
//! a single capability, the [`SourceParser`] trait, injected into the parse
//! cache. This crate provides that trait plus [`StructuredTextParser`], a
//! summarizing parser for IEC 61131-3 structured text that extracts the
//! unit header, variable declarations, and body size of one program unit
//! per file.

mod structured_text;
mod traits;

pub use structured_text::StructuredTextParser;
pub use traits::SourceParser;
