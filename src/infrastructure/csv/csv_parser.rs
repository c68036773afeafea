// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV files into columns with encoding detection

use crate::domain::csv::Column;
use crate::domain::error::AppError;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// CSV parser producing column-major data
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a CSV file into columns
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Column>, AppError> {
        let content = self.read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<Vec<Column>, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let mut columns: Vec<Column> = headers.iter().map(Column::new).collect();

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            // Short rows pad with empty values, long rows drop the overflow
            for (i, column) in columns.iter_mut().enumerate() {
                column
                    .values
                    .push(record.get(i).unwrap_or_default().to_string());
            }
        }

        Ok(columns)
    }

    /// Read a file as UTF-8, falling back to latin-1 for legacy exports
    fn read_with_encoding_detection(&self, path: &Path) -> Result<String, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;

        if let Ok(content) = std::str::from_utf8(&bytes) {
            return Ok(content.to_string());
        }

        let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
        if had_errors {
            return Err(AppError::ParseError(
                "File is neither valid UTF-8 nor latin-1".to_string(),
            ));
        }
        Ok(decoded.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_csv() {
        let columns = CsvParser::new()
            .parse_content("age,name\n25,alice\n30,bob\n")
            .expect("parse");
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "age");
        assert_eq!(columns[0].values, vec!["25", "30"]);
        assert_eq!(columns[1].values, vec!["alice", "bob"]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let columns = CsvParser::new()
            .parse_content("a,b\n 1 , x \n")
            .expect("parse");
        assert_eq!(columns[0].values, vec!["1"]);
        assert_eq!(columns[1].values, vec!["x"]);
    }

    #[test]
    fn test_short_rows_pad_with_empty() {
        let columns = CsvParser::new()
            .parse_content("a,b,c\n1,2\n4,5,6\n")
            .expect("parse");
        assert_eq!(columns[2].values, vec!["", "6"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let columns = CsvParser::new()
            .with_delimiter(b';')
            .parse_content("a;b\n1;2\n")
            .expect("parse");
        assert_eq!(columns[0].values, vec!["1"]);
    }

    #[test]
    fn test_headers_only() {
        let columns = CsvParser::new().parse_content("a,b\n").expect("parse");
        assert_eq!(columns.len(), 2);
        assert!(columns[0].values.is_empty());
    }

    #[test]
    fn test_latin1_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.csv");
        // "café" in latin-1: 0xe9 is not valid UTF-8
        std::fs::write(&path, b"name\ncaf\xe9\n").expect("write");
        let columns = CsvParser::new().parse_file(&path).expect("parse");
        assert_eq!(columns[0].values, vec!["café"]);
    }
}
