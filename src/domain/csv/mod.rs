// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Column model, type coercion, and descriptive statistics
// No I/O, no async, no external services

mod column;
mod summary;

pub use column::{parse_numeric, parse_plain_numeric, parse_temporal, CoercedColumn, Column, ColumnKind};
pub use summary::{ColumnSummary, SummaryTable};
