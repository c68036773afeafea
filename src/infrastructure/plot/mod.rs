// ============================================================
// HISTOGRAM RENDERER
// ============================================================
// One histogram per plottable column, stacked vertically in a
// single PNG

use crate::domain::csv::CoercedColumn;
use crate::domain::error::{AppError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Renders stacked histograms into a single bitmap
pub struct HistogramRenderer {
    /// Image width in pixels
    width: u32,

    /// Height per subplot in pixels
    row_height: u32,

    /// Number of equal-width bins per histogram
    bins: usize,
}

impl Default for HistogramRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            row_height: 500,
            bins: 10,
        }
    }
}

impl HistogramRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one histogram per column into `out_path`, overwriting any
    /// existing file. Missing values are dropped per column.
    pub fn render(&self, columns: &[CoercedColumn], out_path: &Path) -> Result<()> {
        if columns.is_empty() {
            return Err(AppError::PlotError(
                "No columns to render".to_string(),
            ));
        }

        let height = self.row_height * columns.len() as u32;
        let root = BitMapBackend::new(out_path, (self.width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AppError::PlotError(format!("Failed to prepare canvas: {}", e)))?;

        let areas = root.split_evenly((columns.len(), 1));
        for (area, column) in areas.iter().zip(columns) {
            self.draw_histogram(area, column)?;
        }

        root.present()
            .map_err(|e| AppError::PlotError(format!("Failed to write image: {}", e)))?;
        Ok(())
    }

    fn draw_histogram(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        column: &CoercedColumn,
    ) -> Result<()> {
        let values = column.present_points();
        if values.is_empty() {
            return Err(AppError::PlotError(format!(
                "Column '{}' has no values to plot",
                column.name
            )));
        }

        let (min, max) = value_range(&values)?;
        let counts = bin_counts(&values, min, max, self.bins);
        let y_max = counts.iter().copied().max().unwrap_or(1).max(1);
        let bin_width = (max - min) / self.bins as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Distribution of {}", column.name),
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(min..max, 0u32..y_max + 1)
            .map_err(|e| AppError::PlotError(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc(column.name.as_str())
            .y_desc("Frequency")
            .draw()
            .map_err(|e| AppError::PlotError(format!("Failed to draw axes: {}", e)))?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                let lo = min + bin_width * i as f64;
                let hi = lo + bin_width;
                Rectangle::new([(lo, 0u32), (hi, count)], BLUE.mix(0.6).filled())
            }))
            .map_err(|e| AppError::PlotError(format!("Failed to draw series: {}", e)))?;

        Ok(())
    }
}

/// Value range for the x axis. A degenerate range (all values equal) is
/// widened by half a unit on each side so the bins keep nonzero width.
fn value_range(values: &[f64]) -> Result<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            return Err(AppError::PlotError(
                "Invalid value range: non-finite data point".to_string(),
            ));
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    Ok((min, max))
}

fn bin_counts(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<u32> {
    let width = (max - min) / bins as f64;
    let mut counts = vec![0u32; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}
