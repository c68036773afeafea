// ============================================================
// ANALYSIS REPORT
// ============================================================
// Typed results carried between pipeline steps and the HTTP layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of the histogram rendering step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlotOutcome {
    /// Plot was rendered and saved to disk
    Rendered { path: PathBuf },

    /// No plot was produced; carries a human-readable reason
    Skipped { reason: String },
}

impl PlotOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, PlotOutcome::Rendered { .. })
    }
}

/// Result of a full analysis run over one uploaded CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Server-generated identifier for this upload
    pub upload_id: String,

    /// Raw descriptive statistics table, as rendered text
    pub statistics: String,

    /// LLM narration derived from the statistics table
    pub narration: String,

    /// Whether a histogram image was produced, and where
    pub plot: PlotOutcome,
}
