//! Cross-file aggregation of parsed units.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ParsedUnit, UnitKind};

/// One successfully parsed unit, tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryUnit {
    /// Source file path, relative to the lint root.
    pub file: PathBuf,
    /// The parsed unit.
    pub unit: ParsedUnit,
}

/// The aggregated view of all successfully parsed units that lint checks
/// operate on.
///
/// The summary is immutable once collected; checks only read it, so it can
/// be shared freely across concurrently running checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    units: Vec<SummaryUnit>,
}

impl Summary {
    /// Aggregates units into a summary.
    ///
    /// With `squash` set, duplicate logical units (same kind and name) are
    /// collapsed to their first occurrence; otherwise every per-file unit is
    /// kept.
    pub fn collect(mut units: Vec<SummaryUnit>, squash: bool) -> Self {
        units.sort_by(|a, b| a.file.cmp(&b.file));

        if squash {
            let mut seen: Vec<(UnitKind, String)> = Vec::new();
            units.retain(|entry| {
                let key = (entry.unit.kind, entry.unit.name.clone());
                if seen.contains(&key) {
                    false
                } else {
                    seen.push(key);
                    true
                }
            });
        }

        Self { units }
    }

    /// All units, ordered by source file.
    pub fn units(&self) -> &[SummaryUnit] {
        &self.units
    }

    /// Units of the given kind.
    pub fn units_of_kind(&self, kind: UnitKind) -> impl Iterator<Item = &SummaryUnit> {
        self.units.iter().filter(move |u| u.unit.kind == kind)
    }

    /// Number of aggregated units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if no units were aggregated.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UnitKind, Variable};
    use pretty_assertions::assert_eq;

    fn unit(name: &str, kind: UnitKind) -> ParsedUnit {
        ParsedUnit {
            name: name.to_string(),
            kind,
            variables: Vec::<Variable>::new(),
            body_lines: 1,
        }
    }

    fn entry(file: &str, name: &str, kind: UnitKind) -> SummaryUnit {
        SummaryUnit {
            file: PathBuf::from(file),
            unit: unit(name, kind),
        }
    }

    #[test]
    fn test_collect_keeps_per_file_granularity_by_default() {
        let summary = Summary::collect(
            vec![
                entry("b.st", "FB_Motor", UnitKind::FunctionBlock),
                entry("a.st", "FB_Motor", UnitKind::FunctionBlock),
            ],
            false,
        );

        assert_eq!(summary.len(), 2);
        // Ordered by file, not insertion order.
        assert_eq!(summary.units()[0].file, PathBuf::from("a.st"));
    }

    #[test]
    fn test_collect_squash_collapses_duplicates() {
        let summary = Summary::collect(
            vec![
                entry("a.st", "FB_Motor", UnitKind::FunctionBlock),
                entry("b.st", "FB_Motor", UnitKind::FunctionBlock),
                entry("c.st", "FB_Pump", UnitKind::FunctionBlock),
            ],
            true,
        );

        assert_eq!(summary.len(), 2);
        assert_eq!(summary.units()[0].unit.name, "FB_Motor");
        assert_eq!(summary.units()[0].file, PathBuf::from("a.st"));
        assert_eq!(summary.units()[1].unit.name, "FB_Pump");
    }

    #[test]
    fn test_squash_distinguishes_kinds() {
        // Same name but different kinds are distinct logical units.
        let summary = Summary::collect(
            vec![
                entry("a.st", "Main", UnitKind::Program),
                entry("b.st", "Main", UnitKind::FunctionBlock),
            ],
            true,
        );

        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_units_of_kind() {
        let summary = Summary::collect(
            vec![
                entry("a.st", "Main", UnitKind::Program),
                entry("b.st", "FB_Motor", UnitKind::FunctionBlock),
                entry("c.st", "FB_Pump", UnitKind::FunctionBlock),
            ],
            false,
        );

        let blocks: Vec<_> = summary.units_of_kind(UnitKind::FunctionBlock).collect();
        assert_eq!(blocks.len(), 2);
        assert!(summary.units_of_kind(UnitKind::Type).next().is_none());
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::collect(Vec::new(), false);
        assert!(summary.is_empty());
        assert_eq!(summary.len(), 0);
    }
}
