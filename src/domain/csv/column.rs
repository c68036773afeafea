// ============================================================
// COLUMN MODEL & COERCION
// ============================================================
// Best-effort conversion of raw CSV columns to numeric/temporal
// values, replacing unconvertible entries with a missing marker

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CURRENCY_SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$,%]").unwrap());

/// Storage kind a column resolved to after coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Values parse as floating-point numbers (after symbol stripping)
    Numeric,

    /// Values parse as dates or timestamps
    Temporal,

    /// Everything else: free text, identifiers, labels
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Temporal => write!(f, "temporal"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// A single raw CSV column: header plus values in row order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Values that are not blank after trimming
    pub fn non_empty_values(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Coerce this column for plotting.
    ///
    /// Numeric conversion (with currency/percent/comma stripping) is tried
    /// first; temporal parsing is the fallback. A column keeps the kind only
    /// if at least one value converts; otherwise it stays categorical.
    /// Unconvertible entries become `None`.
    pub fn coerce(&self) -> CoercedColumn {
        let numeric: Vec<Option<f64>> = self
            .values
            .iter()
            .map(|raw| parse_numeric(raw))
            .collect();
        if numeric.iter().any(|p| p.is_some()) {
            return CoercedColumn {
                name: self.name.clone(),
                kind: ColumnKind::Numeric,
                points: numeric,
            };
        }

        let temporal: Vec<Option<f64>> = self
            .values
            .iter()
            .map(|raw| parse_temporal(raw).map(|ts| ts as f64))
            .collect();
        if temporal.iter().any(|p| p.is_some()) {
            return CoercedColumn {
                name: self.name.clone(),
                kind: ColumnKind::Temporal,
                points: temporal,
            };
        }

        CoercedColumn {
            name: self.name.clone(),
            kind: ColumnKind::Categorical,
            points: vec![None; self.values.len()],
        }
    }
}

/// A column after coercion, ready for histogram selection
#[derive(Debug, Clone)]
pub struct CoercedColumn {
    pub name: String,

    pub kind: ColumnKind,

    /// One entry per row; `None` marks a missing/unconvertible value.
    /// Temporal values are unix timestamps.
    pub points: Vec<Option<f64>>,
}

impl CoercedColumn {
    /// Whether this column should get a histogram
    pub fn is_plottable(&self) -> bool {
        matches!(self.kind, ColumnKind::Numeric | ColumnKind::Temporal)
    }

    /// Values with the missing entries dropped
    pub fn present_points(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| *p).collect()
    }
}

/// Parse a value as a number after stripping currency symbols, percent
/// signs, and thousands separators (`"$1,200"` and `"5%"` both convert).
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = CURRENCY_SYMBOLS.replace_all(trimmed, "");
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strict numeric parse with no symbol stripping. The statistics table uses
/// this so that `"$1,200"` counts as categorical there, matching how the
/// table and the plot treat raw text differently.
pub fn parse_plain_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a value as a date/timestamp, returning unix seconds.
pub fn parse_temporal(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
        }
    }
    None
}
