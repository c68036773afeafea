// ============================================================
// SUMMARY GENERATOR
// ============================================================
// Parse a CSV and render its descriptive-statistics table

use crate::domain::csv::SummaryTable;
use crate::domain::error::Result;
use crate::infrastructure::csv::CsvParser;
use std::path::Path;

/// Produces the textual statistics table for an uploaded CSV
pub struct SummarizeUseCase {
    parser: CsvParser,
}

impl SummarizeUseCase {
    pub fn new() -> Self {
        Self {
            parser: CsvParser::new(),
        }
    }

    /// Read the CSV and describe every column. Parse failures propagate;
    /// there is no schema validation.
    pub fn execute(&self, csv_path: &Path) -> Result<String> {
        let columns = self.parser.parse_file(csv_path)?;
        Ok(SummaryTable::describe(&columns).to_string())
    }
}

impl Default for SummarizeUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_mixed_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "age,name\n25,alice\n30,bob\n35,alice\n").expect("write");

        let table = SummarizeUseCase::new().execute(&path).expect("summarize");
        assert!(table.contains("age"));
        assert!(table.contains("name"));
        assert!(table.contains("mean"));
        assert!(table.contains("top"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SummarizeUseCase::new()
            .execute(Path::new("/nonexistent/data.csv"))
            .expect_err("missing file");
        assert!(err.to_string().contains("IO error"));
    }
}
