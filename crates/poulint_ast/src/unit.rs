//! Parsed program units and parse outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SourceLocation;

/// The kind of a program unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A `PROGRAM` unit.
    Program,
    /// A `FUNCTION_BLOCK` unit.
    FunctionBlock,
    /// A `FUNCTION` unit.
    Function,
    /// A `TYPE` declaration unit.
    Type,
}

impl UnitKind {
    /// The source keyword introducing this unit kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            UnitKind::Program => "PROGRAM",
            UnitKind::FunctionBlock => "FUNCTION_BLOCK",
            UnitKind::Function => "FUNCTION",
            UnitKind::Type => "TYPE",
        }
    }

    /// The keyword terminating this unit kind.
    pub fn end_keyword(&self) -> &'static str {
        match self {
            UnitKind::Program => "END_PROGRAM",
            UnitKind::FunctionBlock => "END_FUNCTION_BLOCK",
            UnitKind::Function => "END_FUNCTION",
            UnitKind::Type => "END_TYPE",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The variable section a declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarSection {
    /// Local variables (`VAR`).
    Var,
    /// Inputs (`VAR_INPUT`).
    Input,
    /// Outputs (`VAR_OUTPUT`).
    Output,
    /// In-out variables (`VAR_IN_OUT`).
    InOut,
}

/// A declared variable inside a program unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Declared identifier.
    pub name: String,
    /// Which section the declaration appeared in.
    pub section: VarSection,
    /// Declared type, as written in the source.
    pub ty: String,
}

/// Metadata extracted from one successfully parsed program unit.
///
/// This is the per-file view that checks inspect after aggregation; it is
/// deliberately a summary, not a full syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUnit {
    /// Unit name, as declared in the header.
    pub name: String,
    /// Unit kind.
    pub kind: UnitKind,
    /// Declared variables across all sections, in declaration order.
    pub variables: Vec<Variable>,
    /// Number of non-empty implementation lines.
    pub body_lines: usize,
}

impl ParsedUnit {
    /// Returns declared variables in the given section.
    pub fn variables_in(&self, section: VarSection) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(move |v| v.section == section)
    }
}

/// A syntax failure recorded while parsing one file.
///
/// Failures are values, not errors: they are cached alongside successful
/// outcomes so an unfixed broken file is not re-parsed every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("syntax error at {location}: {message}")]
pub struct ParseFailure {
    /// Where the failure was detected.
    pub location: SourceLocation,
    /// Human-readable description.
    pub message: String,
}

impl ParseFailure {
    /// Creates a new failure.
    pub fn new(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// The result of parsing one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// The file parsed into a program unit.
    Parsed(ParsedUnit),
    /// The file failed to parse.
    Failed(ParseFailure),
}

impl ParseOutcome {
    /// Returns the parsed unit, if parsing succeeded.
    pub fn unit(&self) -> Option<&ParsedUnit> {
        match self {
            ParseOutcome::Parsed(unit) => Some(unit),
            ParseOutcome::Failed(_) => None,
        }
    }

    /// Returns the failure, if parsing failed.
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Returns true if parsing failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, ParseOutcome::Failed(_))
    }
}

impl From<Result<ParsedUnit, ParseFailure>> for ParseOutcome {
    fn from(result: Result<ParsedUnit, ParseFailure>) -> Self {
        match result {
            Ok(unit) => ParseOutcome::Parsed(unit),
            Err(failure) => ParseOutcome::Failed(failure),
        }
    }
}
