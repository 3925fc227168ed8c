//! Offline score sheets: a two-column `Key,Score` CSV that can be loaded into
//! a registry (to regenerate a report) or written out from one.

mod parser;

use crate::training::{AggregatedReport, ScoreAggregator, SessionScoreRegistry};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug)]
pub enum ScoreSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ScoreSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreSheetImportError::Io(err) => write!(f, "failed to access score sheet: {err}"),
            ScoreSheetImportError::Csv(err) => write!(f, "invalid score sheet data: {err}"),
        }
    }
}

impl std::error::Error for ScoreSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreSheetImportError::Io(err) => Some(err),
            ScoreSheetImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScoreSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<SessionScoreRegistry, ScoreSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads every row into a fresh registry. A key listed twice keeps the
    /// later score.
    pub fn from_reader<R: Read>(reader: R) -> Result<SessionScoreRegistry, ScoreSheetImportError> {
        let mut registry = SessionScoreRegistry::new();
        for row in parser::parse_rows(reader)? {
            registry.publish(&row.key, row.score);
        }
        Ok(registry)
    }

    pub fn report_from_reader<R: Read>(
        reader: R,
        aggregator: &ScoreAggregator,
    ) -> Result<AggregatedReport, ScoreSheetImportError> {
        let registry = Self::from_reader(reader)?;
        Ok(aggregator.compute_report(&registry))
    }
}

/// Writes the registry as a score sheet, one row per published key in key
/// order.
pub fn export<W: Write>(
    registry: &SessionScoreRegistry,
    writer: W,
) -> Result<(), ScoreSheetImportError> {
    parser::write_rows(writer, registry.entries())?;
    Ok(())
}

pub fn export_to_path<P: AsRef<Path>>(
    registry: &SessionScoreRegistry,
    path: P,
) -> Result<(), ScoreSheetImportError> {
    let file = std::fs::File::create(path)?;
    export(registry, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::ScoreKey;
    use std::io::Cursor;

    #[test]
    fn later_rows_override_earlier_ones() {
        let csv = "Key,Score\npriority_sort_1,20\npriority_sort_1,35\nadvisor_round_3,100\n";
        let registry = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(registry.read(&ScoreKey::from("priority_sort_1")), 35);
        assert_eq!(registry.read(&ScoreKey::from("advisor_round_3")), 100);
        assert_eq!(registry.entries().count(), 2);
    }

    #[test]
    fn strips_bom_and_padding_from_keys() {
        let rows = parser::parse_rows(Cursor::new("Key,Score\n\u{feff} advisor_round_1 , 60\n"))
            .expect("parse");
        assert_eq!(rows[0].key, ScoreKey::from("advisor_round_1"));
        assert_eq!(rows[0].score, 60);
    }

    #[test]
    fn rejects_non_numeric_scores() {
        let result = ScoreSheetImporter::from_reader(Cursor::new("Key,Score\nadvisor_round_1,lots\n"));
        assert!(matches!(result, Err(ScoreSheetImportError::Csv(_))));
    }

    #[test]
    fn export_writes_header_and_sorted_rows() {
        let mut registry = SessionScoreRegistry::new();
        registry.publish(&ScoreKey::from("priority_sort_2"), 10);
        registry.publish(&ScoreKey::from("advisor_round_1"), 30);

        let mut buffer = Vec::new();
        export(&registry, &mut buffer).expect("export");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "Key,Score\nadvisor_round_1,30\npriority_sort_2,10\n");
    }
}
