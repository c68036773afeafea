// ============================================================
// DESCRIPTIVE STATISTICS
// ============================================================
// Per-column count/mean/std/quartiles (numeric) and
// count/unique/top/freq (categorical), rendered as one table

use super::{parse_plain_numeric, Column};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Numeric statistics for a single column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN for a single observation
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Frequency statistics for a non-numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub unique: usize,
    /// Most frequent value (first seen wins ties)
    pub top: String,
    pub freq: usize,
}

/// Descriptive statistics for one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,

    /// Number of non-empty values
    pub count: usize,

    pub numeric: Option<NumericStats>,

    pub categorical: Option<CategoricalStats>,
}

impl ColumnSummary {
    /// Summarize a single column. A column is numeric only if every
    /// non-empty value parses as a number without symbol stripping.
    pub fn describe(column: &Column) -> Self {
        let present: Vec<&str> = column.non_empty_values().collect();
        let count = present.len();

        let parsed: Vec<Option<f64>> = present.iter().map(|v| parse_plain_numeric(v)).collect();
        let all_numeric = !parsed.is_empty() && parsed.iter().all(|p| p.is_some());

        if all_numeric {
            let mut values: Vec<f64> = parsed.into_iter().flatten().collect();
            values.sort_by(|a, b| a.total_cmp(b));
            return Self {
                name: column.name.clone(),
                count,
                numeric: Some(NumericStats::from_sorted(&values)),
                categorical: None,
            };
        }

        Self {
            name: column.name.clone(),
            count,
            numeric: None,
            categorical: CategoricalStats::from_values(&present),
        }
    }
}

impl NumericStats {
    fn from_sorted(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if values.len() > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        } else {
            f64::NAN
        };

        Self {
            mean,
            std,
            min: values[0],
            q1: percentile(values, 0.25),
            median: percentile(values, 0.50),
            q3: percentile(values, 0.75),
            max: values[values.len() - 1],
        }
    }
}

impl CategoricalStats {
    fn from_values(values: &[&str]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for value in values {
            let entry = counts.entry(value).or_insert(0);
            if *entry == 0 {
                first_seen.push(value);
            }
            *entry += 1;
        }

        let mut top = "";
        let mut freq = 0;
        for value in &first_seen {
            let c = counts[value];
            if c > freq {
                top = value;
                freq = c;
            }
        }

        Some(Self {
            unique: first_seen.len(),
            top: top.to_string(),
            freq,
        })
    }
}

/// Quantile with linear interpolation between closest ranks.
/// `values` must be sorted ascending and non-empty.
fn percentile(values: &[f64], q: f64) -> f64 {
    if values.len() == 1 {
        return values[0];
    }
    let rank = q * (values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return values[lo];
    }
    let weight = rank - lo as f64;
    values[lo] * (1.0 - weight) + values[hi] * weight
}

/// Statistics for all columns of a CSV, rendered as a fixed-width table
/// with statistic names down the side and one column per CSV column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTable {
    pub columns: Vec<ColumnSummary>,
}

impl SummaryTable {
    pub fn describe(columns: &[Column]) -> Self {
        Self {
            columns: columns.iter().map(ColumnSummary::describe).collect(),
        }
    }

    fn has_numeric(&self) -> bool {
        self.columns.iter().any(|c| c.numeric.is_some())
    }

    fn has_categorical(&self) -> bool {
        self.columns.iter().any(|c| c.categorical.is_some())
    }

    /// Statistic rows in display order, depending on column mix
    fn stat_rows(&self) -> Vec<&'static str> {
        let mut rows = vec!["count"];
        if self.has_categorical() {
            rows.extend(["unique", "top", "freq"]);
        }
        if self.has_numeric() {
            rows.extend(["mean", "std", "min", "25%", "50%", "75%", "max"]);
        }
        rows
    }

    fn cell(&self, summary: &ColumnSummary, stat: &str) -> String {
        match stat {
            "count" => summary.count.to_string(),
            "unique" => summary
                .categorical
                .as_ref()
                .map(|c| c.unique.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            "top" => summary
                .categorical
                .as_ref()
                .map(|c| c.top.clone())
                .unwrap_or_else(|| "NaN".to_string()),
            "freq" => summary
                .categorical
                .as_ref()
                .map(|c| c.freq.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            _ => summary
                .numeric
                .as_ref()
                .map(|n| {
                    let value = match stat {
                        "mean" => n.mean,
                        "std" => n.std,
                        "min" => n.min,
                        "25%" => n.q1,
                        "50%" => n.median,
                        "75%" => n.q3,
                        "max" => n.max,
                        _ => f64::NAN,
                    };
                    format_number(value)
                })
                .unwrap_or_else(|| "NaN".to_string()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{:.1}", value);
    }
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0');
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.to_string()
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Empty table");
        }

        let stats = self.stat_rows();

        // Column widths: header vs widest cell
        let label_width = stats.iter().map(|s| s.len()).max().unwrap_or(0);
        let mut widths: Vec<usize> = Vec::with_capacity(self.columns.len());
        for summary in &self.columns {
            let mut width = summary.name.len();
            for stat in &stats {
                width = width.max(self.cell(summary, stat).len());
            }
            widths.push(width);
        }

        write!(f, "{:label_width$}", "")?;
        for (summary, width) in self.columns.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>width$}", summary.name)?;
        }

        for stat in &stats {
            write!(f, "\n{:<label_width$}", stat)?;
            for (summary, width) in self.columns.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>width$}", self.cell(summary, stat))?;
            }
        }

        Ok(())
    }
}
