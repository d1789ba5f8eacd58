//! Theoretical speedup curves from Amdahl's Law
//!
//! For a parallel proportion `p` and serial proportion `s = 1 - p`, the
//! predicted speedup on `n` processes is `1 / (s + p / n)`. It approaches
//! `1 / s` as `n` grows.
//!
//! Reference:
//! Amdahl, G. M. (1967). Validity of the single processor approach to
//! achieving large scale computing capabilities. AFIPS Spring Joint Computer
//! Conference.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Candidate proportions compared against every study by default
pub const DEFAULT_PROPORTIONS: [f64; 4] = [0.70, 0.80, 0.90, 1.00];

/// One sampled point of a theoretical curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub processor_count: u32,
    pub speedup: f64,
}

/// Predicted speedup for every process count from 1 to `max_processor_count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalCurve {
    pub parallel_proportion: f64,
    pub points: Vec<CurvePoint>,
}

impl TheoreticalCurve {
    pub fn max_processor_count(&self) -> u32 {
        self.points.last().map_or(0, |p| p.processor_count)
    }
}

fn check_proportion(parallel_proportion: f64) -> Result<()> {
    if (0.0..=1.0).contains(&parallel_proportion) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidProportion {
            value: parallel_proportion,
        })
    }
}

/// Amdahl's Law speedup for `processor_count` processes
///
/// Evaluated as `n / (s * n + p)`, which is exact at both `n = 1` and `p = 1`.
///
/// # Example
/// ```
/// use amdahl_scaling::amdahl::theoretical_speedup;
///
/// let s = theoretical_speedup(0.9, 4).unwrap();
/// assert!((s - 1.0 / (0.1 + 0.225)).abs() < 1e-12);
/// assert_eq!(theoretical_speedup(1.0, 16).unwrap(), 16.0);
/// ```
pub fn theoretical_speedup(parallel_proportion: f64, processor_count: u32) -> Result<f64> {
    check_proportion(parallel_proportion)?;
    if processor_count == 0 {
        return Err(AnalysisError::InvalidRange { processor_count });
    }
    if processor_count == 1 {
        return Ok(1.0);
    }

    let n = f64::from(processor_count);
    let serial_proportion = 1.0 - parallel_proportion;
    Ok(n / (serial_proportion * n + parallel_proportion))
}

/// Upper bound on speedup for a proportion, `None` when unbounded (`p = 1`)
pub fn speedup_ceiling(parallel_proportion: f64) -> Result<Option<f64>> {
    check_proportion(parallel_proportion)?;
    let serial_proportion = 1.0 - parallel_proportion;
    if serial_proportion == 0.0 {
        Ok(None)
    } else {
        Ok(Some(1.0 / serial_proportion))
    }
}

/// Sample the curve at every integer process count in `1..=max_processor_count`
pub fn generate_curve(parallel_proportion: f64, max_processor_count: u32) -> Result<TheoreticalCurve> {
    check_proportion(parallel_proportion)?;
    if max_processor_count < 1 {
        return Err(AnalysisError::InvalidRange {
            processor_count: max_processor_count,
        });
    }

    let points = (1..=max_processor_count)
        .map(|n| {
            theoretical_speedup(parallel_proportion, n).map(|speedup| CurvePoint {
                processor_count: n,
                speedup,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TheoreticalCurve {
        parallel_proportion,
        points,
    })
}

/// Proportions to draw: candidates first, then the recorded one if new
///
/// Duplicates are dropped so each proportion yields exactly one curve.
pub fn comparison_proportions(candidates: &[f64], recorded: Option<f64>) -> Vec<f64> {
    let mut proportions: Vec<f64> = Vec::with_capacity(candidates.len() + 1);
    for &p in candidates.iter().chain(recorded.iter()) {
        if !proportions.iter().any(|&q| (q - p).abs() < 1e-9) {
            proportions.push(p);
        }
    }
    proportions
}

/// One curve per proportion; fails on the first invalid proportion
pub fn generate_curves(proportions: &[f64], max_processor_count: u32) -> Result<Vec<TheoreticalCurve>> {
    let curves = proportions
        .iter()
        .map(|&p| generate_curve(p, max_processor_count))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        curves = curves.len(),
        max_processor_count,
        "generated theoretical speedup curves"
    );

    Ok(curves)
}
