//! Parser trait definition.

use poulint_ast::{ParseFailure, ParsedUnit};

/// Trait for parsing one source file into a program unit summary.
///
/// Implementations convert the raw text of a single file into a
/// [`ParsedUnit`], or a [`ParseFailure`] describing why the file could not
/// be parsed. A failure is ordinary data, not an error condition: the parse
/// cache stores failures exactly like successes.
///
/// The [`version`](SourceParser::version) tag participates in cache keys,
/// so two parsers (or two grammar revisions of the same parser) never share
/// cached results.
pub trait SourceParser: Send + Sync {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the grammar version tag for cache keying.
    fn version(&self) -> &str;

    /// Parses the source text of one file.
    fn parse(&self, source: &str) -> Result<ParsedUnit, ParseFailure>;
}
