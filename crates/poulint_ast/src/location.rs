//! Source locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
}

impl SourceLocation {
    /// Creates a new location.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The start of a file.
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new(12, 5);
        assert_eq!(loc.to_string(), "12:5");
    }

    #[test]
    fn test_location_start() {
        let loc = SourceLocation::start();
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 1);
    }

    #[test]
    fn test_location_ordering() {
        assert!(SourceLocation::new(1, 9) < SourceLocation::new(2, 1));
        assert!(SourceLocation::new(3, 1) < SourceLocation::new(3, 2));
    }

    #[test]
    fn test_location_serialization_roundtrip() {
        let loc = SourceLocation::new(7, 3);
        let json = serde_json::to_string(&loc).unwrap();
        let back: SourceLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }
}
