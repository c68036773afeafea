// ============================================================
// VISUALIZER
// ============================================================
// Coerce columns, select numeric/temporal ones, render histograms

use crate::domain::csv::CoercedColumn;
use crate::domain::error::{AppError, Result};
use crate::domain::report::PlotOutcome;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::plot::HistogramRenderer;
use std::path::Path;

const NO_PLOTTABLE_COLUMNS: &str =
    "No numerical or datetime columns found for histogram generation after cleaning.";

/// Renders the per-upload histogram image, or reports why it could not
pub struct VisualizeUseCase {
    parser: CsvParser,
    renderer: HistogramRenderer,
}

impl VisualizeUseCase {
    pub fn new() -> Self {
        Self {
            parser: CsvParser::new(),
            renderer: HistogramRenderer::new(),
        }
    }

    /// Never fails: rendering problems are folded into the outcome so the
    /// rest of the pipeline keeps its result. Parse failures of the CSV
    /// itself still propagate (the summary step would have hit them first).
    pub fn execute(&self, csv_path: &Path, plot_path: &Path) -> Result<PlotOutcome> {
        let columns = self.parser.parse_file(csv_path)?;

        let plottable: Vec<CoercedColumn> = columns
            .iter()
            .map(|c| c.coerce())
            .filter(|c| c.is_plottable() && !c.present_points().is_empty())
            .collect();

        if plottable.is_empty() {
            return Ok(PlotOutcome::Skipped {
                reason: NO_PLOTTABLE_COLUMNS.to_string(),
            });
        }

        if let Some(parent) = plot_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::IoError(format!("Failed to create plot dir: {}", e)))?;
        }

        match self.renderer.render(&plottable, plot_path) {
            Ok(()) => Ok(PlotOutcome::Rendered {
                path: plot_path.to_path_buf(),
            }),
            Err(AppError::PlotError(msg)) if msg.contains("Invalid value range") => {
                Ok(PlotOutcome::Skipped {
                    reason: format!(
                        "Error generating plot: {}. Double-check your CSV data types and column names.",
                        msg
                    ),
                })
            }
            Err(e) => Ok(PlotOutcome::Skipped {
                reason: format!("An unexpected error occurred during plot generation: {}", e),
            }),
        }
    }
}

impl Default for VisualizeUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("data.csv");
        std::fs::write(&path, content).expect("write csv");
        path
    }

    #[test]
    fn test_numeric_csv_renders_plot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = write_csv(dir.path(), "age,name\n25,alice\n30,bob\n35,carol\n");
        let plot = dir.path().join("out/plot.png");

        let outcome = VisualizeUseCase::new().execute(&csv, &plot).expect("run");
        assert!(outcome.is_rendered());
        assert!(plot.is_file());
    }

    #[test]
    fn test_currency_column_is_plotted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = write_csv(dir.path(), "price\n$1,200\n$900\n5%\n");
        let plot = dir.path().join("plot.png");

        let outcome = VisualizeUseCase::new().execute(&csv, &plot).expect("run");
        assert!(outcome.is_rendered());
    }

    #[test]
    fn test_text_only_csv_is_skipped_with_diagnostic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = write_csv(dir.path(), "name,city\nalice,berlin\nbob,paris\n");
        let plot = dir.path().join("plot.png");

        let outcome = VisualizeUseCase::new().execute(&csv, &plot).expect("run");
        match outcome {
            PlotOutcome::Skipped { reason } => {
                assert_eq!(reason, NO_PLOTTABLE_COLUMNS);
            }
            PlotOutcome::Rendered { .. } => panic!("should not render"),
        }
        assert!(!plot.exists());
    }

    #[test]
    fn test_rerender_overwrites_plot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = write_csv(dir.path(), "x\n1\n2\n3\n");
        let plot = dir.path().join("plot.png");

        let use_case = VisualizeUseCase::new();
        use_case.execute(&csv, &plot).expect("first run");
        let first = std::fs::metadata(&plot).expect("meta").len();
        use_case.execute(&csv, &plot).expect("second run");
        let second = std::fs::metadata(&plot).expect("meta").len();
        assert_eq!(first, second);
    }
}
