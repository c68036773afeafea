// ============================================================
// CSV INFRASTRUCTURE
// ============================================================
// File parsing with encoding detection

mod csv_parser;

pub use csv_parser::CsvParser;
