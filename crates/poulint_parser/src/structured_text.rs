//! Summarizing parser for IEC 61131-3 structured text.

use poulint_ast::{ParseFailure, ParsedUnit, SourceLocation, UnitKind, VarSection, Variable};

use crate::SourceParser;

/// Grammar version tag; bumped whenever parse output changes shape or
/// meaning, so stale cache entries stop matching.
const GRAMMAR_VERSION: &str = "st-summary/1";

/// A line-oriented summarizing parser for structured-text program units.
///
/// One file is expected to declare exactly one unit: a `PROGRAM`,
/// `FUNCTION_BLOCK`, `FUNCTION` or `TYPE`. The parser extracts the header,
/// the declarations of `VAR*` sections, and the number of implementation
/// lines. It is not a full grammar; anything it does not understand is a
/// [`ParseFailure`] with a location.
#[derive(Debug, Default)]
pub struct StructuredTextParser;

impl StructuredTextParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for StructuredTextParser {
    fn name(&self) -> &str {
        "structured-text"
    }

    fn version(&self) -> &str {
        GRAMMAR_VERSION
    }

    fn parse(&self, source: &str) -> Result<ParsedUnit, ParseFailure> {
        let lines = clean_lines(source);
        let mut significant = lines.iter().filter(|(_, text)| !text.is_empty());

        let (header_line, header) = significant.next().ok_or_else(|| {
            ParseFailure::new(SourceLocation::start(), "expected a program unit header")
        })?;
        let (kind, name) = parse_header(*header_line, header)?;

        let mut variables = Vec::new();
        let mut body_lines = 0usize;
        let mut section: Option<(VarSection, u32)> = None;

        for (line_no, text) in significant {
            let upper = text.to_ascii_uppercase();

            match section {
                Some((current, _)) => {
                    if upper == "END_VAR" {
                        section = None;
                    } else {
                        parse_declaration(*line_no, text, current, &mut variables)?;
                    }
                }
                None => {
                    if let Some(entered) = section_keyword(&upper) {
                        section = Some((entered, *line_no));
                    } else if first_token(&upper) == kind.end_keyword() {
                        return Ok(ParsedUnit {
                            name,
                            kind,
                            variables,
                            body_lines,
                        });
                    } else {
                        body_lines += 1;
                    }
                }
            }
        }

        let last_line = lines.last().map(|(n, _)| *n).unwrap_or(1);
        match section {
            Some((current, opened_at)) => Err(ParseFailure::new(
                SourceLocation::new(opened_at, 1),
                format!("unterminated {current:?} section (missing END_VAR)"),
            )),
            None => Err(ParseFailure::new(
                SourceLocation::new(last_line, 1),
                format!("missing {}", kind.end_keyword()),
            )),
        }
    }
}

/// Strips `//` line comments and `(* ... *)` block comments, returning
/// trimmed lines with their original 1-based line numbers.
fn clean_lines(source: &str) -> Vec<(u32, String)> {
    let mut in_block = false;
    let mut cleaned = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let mut out = String::new();
        let mut rest = raw;

        loop {
            if in_block {
                match rest.find("*)") {
                    Some(pos) => {
                        in_block = false;
                        rest = &rest[pos + 2..];
                    }
                    None => break,
                }
            } else {
                let block = rest.find("(*");
                let line = rest.find("//");
                match (block, line) {
                    (Some(b), Some(l)) if l < b => {
                        out.push_str(&rest[..l]);
                        break;
                    }
                    (Some(b), _) => {
                        out.push_str(&rest[..b]);
                        in_block = true;
                        rest = &rest[b + 2..];
                    }
                    (None, Some(l)) => {
                        out.push_str(&rest[..l]);
                        break;
                    }
                    (None, None) => {
                        out.push_str(rest);
                        break;
                    }
                }
            }
        }

        cleaned.push((idx as u32 + 1, out.trim().to_string()));
    }

    cleaned
}

fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

fn section_keyword(upper: &str) -> Option<VarSection> {
    match first_token(upper) {
        "VAR_INPUT" => Some(VarSection::Input),
        "VAR_OUTPUT" => Some(VarSection::Output),
        "VAR_IN_OUT" => Some(VarSection::InOut),
        // Qualifiers such as `VAR CONSTANT` or `VAR RETAIN` still open a
        // plain local section.
        "VAR" => Some(VarSection::Var),
        _ => None,
    }
}

fn parse_header(line_no: u32, header: &str) -> Result<(UnitKind, String), ParseFailure> {
    let mut tokens = header.split_whitespace();
    let keyword = tokens.next().unwrap_or("").to_ascii_uppercase();

    let kind = match keyword.as_str() {
        "PROGRAM" => UnitKind::Program,
        "FUNCTION_BLOCK" => UnitKind::FunctionBlock,
        "FUNCTION" => UnitKind::Function,
        "TYPE" => UnitKind::Type,
        _ => {
            return Err(ParseFailure::new(
                SourceLocation::new(line_no, 1),
                format!("expected a program unit header, found '{}'", first_token(header)),
            ));
        }
    };

    // FUNCTION headers carry a return type (`FUNCTION F_Scale : REAL`) and
    // TYPE headers may end in a colon; the name is whatever precedes it.
    let rest = header[header.find(char::is_whitespace).unwrap_or(header.len())..].trim();
    let name = rest.split(':').next().unwrap_or("").trim();

    if name.is_empty() {
        return Err(ParseFailure::new(
            SourceLocation::new(line_no, 1),
            format!("{} header is missing a unit name", kind.keyword()),
        ));
    }
    if !is_identifier(name) {
        let column = header.find(name).map(|p| p as u32 + 1).unwrap_or(1);
        return Err(ParseFailure::new(
            SourceLocation::new(line_no, column),
            format!("invalid unit name '{name}'"),
        ));
    }

    Ok((kind, name.to_string()))
}

fn parse_declaration(
    line_no: u32,
    line: &str,
    section: VarSection,
    variables: &mut Vec<Variable>,
) -> Result<(), ParseFailure> {
    let colon = line
        .char_indices()
        .find(|&(i, c)| c == ':' && line[i + 1..].chars().next() != Some('='))
        .map(|(i, _)| i)
        .ok_or_else(|| {
            ParseFailure::new(
                SourceLocation::new(line_no, 1),
                format!("expected a variable declaration, found '{line}'"),
            )
        })?;

    let ty = line[colon + 1..]
        .split(":=")
        .next()
        .unwrap_or("")
        .trim_end_matches(';')
        .trim();
    if ty.is_empty() {
        return Err(ParseFailure::new(
            SourceLocation::new(line_no, colon as u32 + 2),
            "declaration is missing a type",
        ));
    }

    for name in line[..colon].split(',') {
        let name = name.trim();
        if !is_identifier(name) {
            let column = line.find(name).map(|p| p as u32 + 1).unwrap_or(1);
            return Err(ParseFailure::new(
                SourceLocation::new(line_no, column),
                format!("invalid variable name '{name}'"),
            ));
        }
        variables.push(Variable {
            name: name.to_string(),
            section,
            ty: ty.to_string(),
        });
    }

    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
