//! Run aggregation: validated, sorted, de-duplicated dataset with speedup
//!
//! The baseline is the run with the smallest processor count. It is treated
//! as the serial reference even when that count is greater than one, so a
//! study that starts at 2 processes reports speedup relative to 2 processes.

use crate::error::{AnalysisError, Result};
use crate::record::RunRecord;
use serde::{Deserialize, Serialize};

/// How duplicate (non-baseline) processor counts are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first record for each count and report a warning
    #[default]
    Warn,
    /// Fail with [`AnalysisError::DuplicateProcessorCount`]
    Reject,
}

/// Non-fatal data-quality signals raised during aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetWarning {
    /// Several records share a processor count; only the first was kept
    DuplicateProcessorCount {
        processor_count: u32,
        kept: usize,
        dropped: Vec<usize>,
    },
    /// Records disagree on the configured parallel proportion
    MixedParallelProportion { recorded: f64, min: f64, max: f64 },
}

impl std::fmt::Display for DatasetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetWarning::DuplicateProcessorCount {
                processor_count,
                kept,
                dropped,
            } => write!(
                f,
                "duplicate processor count {}: kept record #{}, dropped {:?}",
                processor_count, kept, dropped
            ),
            DatasetWarning::MixedParallelProportion { recorded, min, max } => write!(
                f,
                "records disagree on parallel proportion ({} to {}), using baseline value {}",
                min, max, recorded
            ),
        }
    }
}

/// A validated run with its observed speedup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRun {
    pub processor_count: u32,
    pub execution_time: f64,
    pub parallel_proportion: f64,
    /// `baseline.execution_time / execution_time`
    pub speedup: f64,
}

/// Runs sorted strictly ascending by processor count
///
/// Only constructed by [`aggregate`], so it is never empty and the first run
/// is always the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedDataset {
    runs: Vec<AggregatedRun>,
    warnings: Vec<DatasetWarning>,
}

impl AggregatedDataset {
    pub fn runs(&self) -> &[AggregatedRun] {
        &self.runs
    }

    pub fn warnings(&self) -> &[DatasetWarning] {
        &self.warnings
    }

    /// The reference run all speedups are measured against
    pub fn baseline(&self) -> &AggregatedRun {
        &self.runs[0]
    }

    pub fn min_processor_count(&self) -> u32 {
        self.baseline().processor_count
    }

    pub fn max_processor_count(&self) -> u32 {
        self.runs[self.runs.len() - 1].processor_count
    }

    /// Parallel proportion the experiment was configured with
    ///
    /// Taken from the baseline run.
    pub fn recorded_parallel_proportion(&self) -> f64 {
        self.baseline().parallel_proportion
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Never true for a dataset returned by [`aggregate`]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatedRun> {
        self.runs.iter()
    }
}

/// Observed speedup of a run relative to the serial reference time
pub fn observed_speedup(serial_time: f64, parallel_time: f64) -> f64 {
    serial_time / parallel_time
}

fn invalid(index: usize, field: &'static str, reason: String) -> AnalysisError {
    AnalysisError::InvalidRecord {
        index,
        field,
        reason,
    }
}

fn validate_record(index: usize, record: &RunRecord) -> Result<u32> {
    if record.processor_count <= 0 {
        return Err(invalid(
            index,
            "nproc",
            format!("must be positive, got {}", record.processor_count),
        ));
    }
    let processor_count = u32::try_from(record.processor_count).map_err(|_| {
        invalid(
            index,
            "nproc",
            format!("is out of range, got {}", record.processor_count),
        )
    })?;

    if !record.execution_time.is_finite() || record.execution_time <= 0.0 {
        return Err(invalid(
            index,
            "execution_time",
            format!("must be a positive number, got {}", record.execution_time),
        ));
    }

    if !(0.0..=1.0).contains(&record.parallel_proportion) {
        return Err(invalid(
            index,
            "parallel_proportion",
            format!("must be in [0, 1], got {}", record.parallel_proportion),
        ));
    }

    Ok(processor_count)
}

/// Build the aggregated dataset from raw run records
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] for an empty input
/// - [`AnalysisError::InvalidRecord`] for the first record with a
///   non-positive count, a non-positive or non-finite time, a proportion
///   outside `[0, 1]`, or a time whose speedup against the baseline
///   overflows
/// - [`AnalysisError::AmbiguousBaseline`] when the smallest count repeats
/// - [`AnalysisError::DuplicateProcessorCount`] for other repeated counts
///   under [`DuplicatePolicy::Reject`]
///
/// # Example
/// ```
/// use amdahl_scaling::aggregate::{aggregate, DuplicatePolicy};
/// use amdahl_scaling::record::RunRecord;
///
/// let records = vec![
///     RunRecord::new(4, 30.0, 0.9),
///     RunRecord::new(1, 100.0, 0.9),
///     RunRecord::new(2, 55.0, 0.9),
/// ];
/// let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
/// assert_eq!(dataset.baseline().processor_count, 1);
/// assert_eq!(dataset.baseline().speedup, 1.0);
/// ```
pub fn aggregate(records: &[RunRecord], policy: DuplicatePolicy) -> Result<AggregatedDataset> {
    if records.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    let mut validated = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let processor_count = validate_record(index, record)?;
        validated.push((index, processor_count, record));
    }

    // Stable: equal counts stay in input order
    validated.sort_by_key(|&(_, processor_count, _)| processor_count);

    let mut warnings = Vec::new();
    let mut kept: Vec<(usize, u32, &RunRecord)> = Vec::with_capacity(validated.len());

    for group in validated.chunk_by(|a, b| a.1 == b.1) {
        let (first_index, processor_count, first) = group[0];
        if group.len() > 1 {
            let indices: Vec<usize> = group.iter().map(|&(index, _, _)| index).collect();
            if kept.is_empty() {
                return Err(AnalysisError::AmbiguousBaseline {
                    processor_count,
                    indices,
                });
            }
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(AnalysisError::DuplicateProcessorCount {
                        processor_count,
                        indices,
                    });
                }
                DuplicatePolicy::Warn => {
                    let warning = DatasetWarning::DuplicateProcessorCount {
                        processor_count,
                        kept: first_index,
                        dropped: indices[1..].to_vec(),
                    };
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }
        kept.push((first_index, processor_count, first));
    }

    let serial_time = kept[0].2.execution_time;
    let mut runs: Vec<AggregatedRun> = Vec::with_capacity(kept.len());
    for &(index, processor_count, record) in &kept {
        let speedup = observed_speedup(serial_time, record.execution_time);
        if !speedup.is_finite() {
            return Err(invalid(
                index,
                "execution_time",
                format!(
                    "speedup against baseline time {} is not finite",
                    serial_time
                ),
            ));
        }
        runs.push(AggregatedRun {
            processor_count,
            execution_time: record.execution_time,
            parallel_proportion: record.parallel_proportion,
            speedup,
        });
    }

    let recorded = runs[0].parallel_proportion;
    let (min, max) = runs.iter().fold((recorded, recorded), |(lo, hi), run| {
        (lo.min(run.parallel_proportion), hi.max(run.parallel_proportion))
    });
    if min != max {
        let warning = DatasetWarning::MixedParallelProportion { recorded, min, max };
        tracing::warn!("{}", warning);
        warnings.push(warning);
    }

    tracing::debug!(
        runs = runs.len(),
        baseline = runs[0].processor_count,
        max_processor_count = runs[runs.len() - 1].processor_count,
        "aggregated scaling runs"
    );

    Ok(AggregatedDataset { runs, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study() -> Vec<RunRecord> {
        vec![
            RunRecord::new(1, 100.0, 0.9),
            RunRecord::new(2, 55.0, 0.9),
            RunRecord::new(4, 30.0, 0.9),
        ]
    }

    #[test]
    fn test_speedups_for_reference_study() {
        let dataset = aggregate(&study(), DuplicatePolicy::Warn).unwrap();
        let speedups: Vec<f64> = dataset.iter().map(|r| r.speedup).collect();

        assert_eq!(speedups[0], 1.0);
        assert!((speedups[1] - 100.0 / 55.0).abs() < 1e-12);
        assert!((speedups[2] - 100.0 / 30.0).abs() < 1e-12);
        assert!(dataset.warnings().is_empty());
    }

    #[test]
    fn test_sorts_by_processor_count() {
        let mut records = study();
        records.reverse();
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        let counts: Vec<u32> = dataset.iter().map(|r| r.processor_count).collect();
        assert_eq!(counts, vec![1, 2, 4]);
        assert_eq!(dataset.baseline().execution_time, 100.0);
    }

    #[test]
    fn test_baseline_need_not_be_serial() {
        let records = vec![RunRecord::new(8, 20.0, 0.8), RunRecord::new(2, 60.0, 0.8)];
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        assert_eq!(dataset.min_processor_count(), 2);
        assert_eq!(dataset.max_processor_count(), 8);
        assert_eq!(dataset.baseline().speedup, 1.0);
        assert!((dataset.runs()[1].speedup - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_degraded_scaling_is_not_an_error() {
        let records = vec![
            RunRecord::new(1, 10.0, 0.5),
            RunRecord::new(2, 8.0, 0.5),
            RunRecord::new(4, 12.0, 0.5),
        ];
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        assert!(dataset.runs()[2].speedup < dataset.runs()[1].speedup);
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        assert_eq!(
            aggregate(&[], DuplicatePolicy::Warn),
            Err(AnalysisError::InsufficientData)
        );
    }

    #[test]
    fn test_zero_processor_count_is_invalid() {
        let records = vec![RunRecord::new(0, 10.0, 0.5)];
        match aggregate(&records, DuplicatePolicy::Warn) {
            Err(AnalysisError::InvalidRecord { index, field, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(field, "nproc");
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_processor_count_is_invalid() {
        let records = vec![RunRecord::new(i64::from(u32::MAX) + 1, 10.0, 0.5)];
        assert!(matches!(
            aggregate(&records, DuplicatePolicy::Warn),
            Err(AnalysisError::InvalidRecord { field: "nproc", .. })
        ));
    }

    #[test]
    fn test_non_positive_execution_time_is_invalid() {
        for time in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let records = vec![RunRecord::new(1, 10.0, 0.5), RunRecord::new(2, time, 0.5)];
            match aggregate(&records, DuplicatePolicy::Warn) {
                Err(AnalysisError::InvalidRecord { index, field, .. }) => {
                    assert_eq!(index, 1);
                    assert_eq!(field, "execution_time");
                }
                other => panic!("expected InvalidRecord for {}, got {:?}", time, other),
            }
        }
    }

    #[test]
    fn test_proportion_out_of_range_is_invalid() {
        for proportion in [-0.1, 1.5, f64::NAN] {
            let records = vec![RunRecord::new(1, 10.0, proportion)];
            assert!(matches!(
                aggregate(&records, DuplicatePolicy::Warn),
                Err(AnalysisError::InvalidRecord {
                    field: "parallel_proportion",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_duplicate_baseline_is_ambiguous() {
        let records = vec![
            RunRecord::new(1, 100.0, 0.9),
            RunRecord::new(2, 55.0, 0.9),
            RunRecord::new(1, 98.0, 0.9),
        ];
        assert_eq!(
            aggregate(&records, DuplicatePolicy::Warn),
            Err(AnalysisError::AmbiguousBaseline {
                processor_count: 1,
                indices: vec![0, 2],
            })
        );
    }

    #[test]
    fn test_duplicate_non_baseline_warns_and_keeps_first() {
        let records = vec![
            RunRecord::new(1, 100.0, 0.9),
            RunRecord::new(4, 30.0, 0.9),
            RunRecord::new(2, 55.0, 0.9),
            RunRecord::new(4, 40.0, 0.9),
        ];
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.runs()[2].execution_time, 30.0);
        assert_eq!(
            dataset.warnings(),
            &[DatasetWarning::DuplicateProcessorCount {
                processor_count: 4,
                kept: 1,
                dropped: vec![3],
            }]
        );
    }

    #[test]
    fn test_duplicate_non_baseline_rejected_under_strict_policy() {
        let records = vec![
            RunRecord::new(1, 100.0, 0.9),
            RunRecord::new(4, 30.0, 0.9),
            RunRecord::new(4, 40.0, 0.9),
        ];
        assert_eq!(
            aggregate(&records, DuplicatePolicy::Reject),
            Err(AnalysisError::DuplicateProcessorCount {
                processor_count: 4,
                indices: vec![1, 2],
            })
        );
    }

    #[test]
    fn test_mixed_proportions_warn() {
        let records = vec![RunRecord::new(1, 100.0, 0.9), RunRecord::new(2, 60.0, 0.8)];
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        assert_eq!(dataset.recorded_parallel_proportion(), 0.9);
        assert!(matches!(
            dataset.warnings(),
            [DatasetWarning::MixedParallelProportion { .. }]
        ));
    }

    #[test]
    fn test_single_record_dataset() {
        let dataset = aggregate(&[RunRecord::new(1, 5.0, 0.5)], DuplicatePolicy::Warn).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.max_processor_count(), 1);
    }

    #[test]
    fn test_overflowing_speedup_is_invalid() {
        let records = vec![RunRecord::new(1, 1e300, 0.9), RunRecord::new(2, 1e-10, 0.9)];
        let err = aggregate(&records, DuplicatePolicy::Warn).unwrap_err();
        match err {
            AnalysisError::InvalidRecord { index, field, .. } => {
                assert_eq!(index, 1);
                assert_eq!(field, "execution_time");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_speedup_reports_input_position() {
        let records = vec![
            RunRecord::new(2, 1e-10, 0.9),
            RunRecord::new(4, 5.0, 0.9),
            RunRecord::new(1, 1e300, 0.9),
        ];
        assert!(matches!(
            aggregate(&records, DuplicatePolicy::Reject),
            Err(AnalysisError::InvalidRecord { index: 0, field: "execution_time", .. })
        ));
    }
}
