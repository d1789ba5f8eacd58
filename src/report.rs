//! Report assembly: read-only views handed to the renderers
//!
//! The plot bounds are taken from the measured runs only. Theoretical curves
//! may run past them; renderers clip to the bounds.

use crate::aggregate::{AggregatedDataset, DatasetWarning};
use crate::amdahl::TheoreticalCurve;
use serde::{Deserialize, Serialize};

pub const X_AXIS_LABEL: &str = "Number of Processes N";
pub const Y_AXIS_LABEL: &str = "Speedup Factor S";
pub const ACTUAL_SERIES_LABEL: &str = "actual data";

/// One row of the performance table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "nproc")]
    pub processor_count: u32,
    pub execution_time: f64,
    pub parallel_proportion: f64,
    pub speedup: f64,
}

/// How a renderer should draw a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStyle {
    /// Unconnected markers (measured data)
    Markers,
    /// Dotted line with small markers (theory)
    Dotted,
}

/// A labelled `(x, y)` series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

/// Default visible region of the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotBounds {
    /// Smallest box containing every point, `None` for an empty slice
    pub fn enclosing(points: &[(f64, f64)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                x_min: x0,
                x_max: x0,
                y_min: y0,
                y_max: y0,
            },
            |b, &(x, y)| Self {
                x_min: b.x_min.min(x),
                x_max: b.x_max.max(x),
                y_min: b.y_min.min(y),
                y_max: b.y_max.max(y),
            },
        ))
    }

    /// Grow each axis by `fraction` of its span on both sides
    ///
    /// A zero-width axis is widened by `fraction` of its value (or by
    /// `fraction` itself at zero) so the renderer never divides by zero.
    pub fn padded(&self, fraction: f64) -> Self {
        fn pad(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
            let span = hi - lo;
            let margin = if span > 0.0 {
                span * fraction
            } else if lo != 0.0 {
                lo.abs() * fraction
            } else {
                fraction
            };
            (lo - margin, hi + margin)
        }
        let (x_min, x_max) = pad(self.x_min, self.x_max, fraction);
        let (y_min, y_max) = pad(self.y_min, self.y_max, fraction);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Everything a renderer needs for one scaling study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingReport {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub table: Vec<TableRow>,
    pub actual: PointSeries,
    pub theory: Vec<PointSeries>,
    pub bounds: PlotBounds,
    pub warnings: Vec<DatasetWarning>,
}

/// Legend label for a theoretical curve
pub fn theory_label(parallel_proportion: f64) -> String {
    format!("theory, p={:.2}", parallel_proportion)
}

/// Chart title naming the recorded parallel share
pub fn study_title(parallel_proportion: f64) -> String {
    format!(
        "Amdahl's Law: {:.0}% Parallel Work",
        100.0 * parallel_proportion
    )
}

/// Combine the dataset and theoretical curves into renderer views
pub fn assemble(dataset: &AggregatedDataset, curves: &[TheoreticalCurve]) -> ScalingReport {
    let table: Vec<TableRow> = dataset
        .iter()
        .map(|run| TableRow {
            processor_count: run.processor_count,
            execution_time: run.execution_time,
            parallel_proportion: run.parallel_proportion,
            speedup: run.speedup,
        })
        .collect();

    let actual_points: Vec<(f64, f64)> = table
        .iter()
        .map(|row| (f64::from(row.processor_count), row.speedup))
        .collect();

    // Unreachable: the dataset always holds the baseline
    let baseline = dataset.baseline();
    let bounds = PlotBounds::enclosing(&actual_points).unwrap_or(PlotBounds {
        x_min: f64::from(baseline.processor_count),
        x_max: f64::from(baseline.processor_count),
        y_min: baseline.speedup,
        y_max: baseline.speedup,
    });

    let theory = curves
        .iter()
        .map(|curve| PointSeries {
            label: theory_label(curve.parallel_proportion),
            style: SeriesStyle::Dotted,
            points: curve
                .points
                .iter()
                .map(|p| (f64::from(p.processor_count), p.speedup))
                .collect(),
        })
        .collect();

    ScalingReport {
        title: study_title(dataset.recorded_parallel_proportion()),
        x_label: X_AXIS_LABEL.to_string(),
        y_label: Y_AXIS_LABEL.to_string(),
        table,
        actual: PointSeries {
            label: ACTUAL_SERIES_LABEL.to_string(),
            style: SeriesStyle::Markers,
            points: actual_points,
        },
        theory,
        bounds,
        warnings: dataset.warnings().to_vec(),
    }
}
