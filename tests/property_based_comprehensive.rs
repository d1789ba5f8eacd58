//! Property-based tests for the scaling analysis core
//!
//! Core properties covered:
//! 1. Aggregated processor counts are strictly increasing
//! 2. The baseline speedup is exactly 1.0
//! 3. Amdahl speedup is 1 at one process and linear when fully parallel
//! 4. Amdahl speedup converges to 1 / (1 - p)
//! 5. Curves have one point per process count
//! 6. Plot bounds depend on measured data only

use amdahl_scaling::aggregate::{aggregate, DuplicatePolicy};
use amdahl_scaling::amdahl::{generate_curve, speedup_ceiling, theoretical_speedup};
use amdahl_scaling::analysis::ScalingAnalysis;
use amdahl_scaling::config::AnalysisConfig;
use amdahl_scaling::record::RunRecord;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Runs with distinct processor counts, in shuffled order
fn distinct_runs() -> impl Strategy<Value = Vec<RunRecord>> {
    (
        prop::collection::btree_set(1i64..512, 1..20),
        0.0f64..=1.0,
    )
        .prop_flat_map(|(counts, proportion)| {
            let counts: Vec<i64> = counts.into_iter().collect();
            let n = counts.len();
            (
                Just(counts),
                prop::collection::vec(0.001f64..10_000.0, n),
                Just(proportion),
            )
        })
        .prop_map(|(counts, times, proportion)| {
            counts
                .into_iter()
                .zip(times)
                .map(|(nproc, time)| RunRecord::new(nproc, time, proportion))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_aggregate_strictly_increasing(records in distinct_runs()) {
        let dataset = aggregate(&records, DuplicatePolicy::Reject).unwrap();
        prop_assert_eq!(dataset.len(), records.len());
        for pair in dataset.runs().windows(2) {
            prop_assert!(pair[0].processor_count < pair[1].processor_count);
        }
    }

    #[test]
    fn prop_baseline_speedup_is_one(records in distinct_runs()) {
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        prop_assert_eq!(dataset.baseline().speedup, 1.0);

        let min = records.iter().map(|r| r.processor_count).min().unwrap();
        prop_assert_eq!(i64::from(dataset.min_processor_count()), min);
    }

    #[test]
    fn prop_speedups_non_negative(records in distinct_runs()) {
        let dataset = aggregate(&records, DuplicatePolicy::Warn).unwrap();
        prop_assert!(dataset.iter().all(|r| r.speedup > 0.0 && r.speedup.is_finite()));
    }

    #[test]
    fn prop_duplicate_counts_never_survive(
        records in distinct_runs(),
        repeat in 0usize..20,
    ) {
        // Repeat a non-baseline record; the output must still be unique
        let mut sorted = records.clone();
        sorted.sort_by_key(|r| r.processor_count);
        prop_assume!(sorted.len() > 1);
        let copy = sorted[1 + repeat % (sorted.len() - 1)];

        let mut input = records.clone();
        input.push(RunRecord::new(copy.processor_count, copy.execution_time * 2.0, copy.parallel_proportion));

        let dataset = aggregate(&input, DuplicatePolicy::Warn).unwrap();
        let unique: BTreeSet<u32> = dataset.iter().map(|r| r.processor_count).collect();
        prop_assert_eq!(unique.len(), dataset.len());
        prop_assert_eq!(dataset.warnings().len(), 1);
        prop_assert!(aggregate(&input, DuplicatePolicy::Reject).is_err());
    }

    #[test]
    fn prop_single_process_speedup_is_one(p in 0.0f64..=1.0) {
        prop_assert_eq!(theoretical_speedup(p, 1).unwrap(), 1.0);
    }

    #[test]
    fn prop_fully_parallel_is_linear(n in 1u32..1_000_000) {
        prop_assert_eq!(theoretical_speedup(1.0, n).unwrap(), f64::from(n));
    }

    #[test]
    fn prop_speedup_bounded_by_n_and_ceiling(p in 0.0f64..0.999, n in 1u32..100_000) {
        let s = theoretical_speedup(p, n).unwrap();
        let ceiling = speedup_ceiling(p).unwrap().unwrap();
        prop_assert!(s >= 1.0 - 1e-12);
        prop_assert!(s <= f64::from(n) + 1e-9);
        prop_assert!(s <= ceiling * (1.0 + 1e-12));
    }

    #[test]
    fn prop_converges_to_ceiling(p in 0.0f64..0.99) {
        let ceiling = speedup_ceiling(p).unwrap().unwrap();
        let s = theoretical_speedup(p, u32::MAX).unwrap();
        prop_assert!((ceiling - s).abs() / ceiling < 1e-6);
    }

    #[test]
    fn prop_curve_length_and_order(p in 0.0f64..=1.0, max_n in 1u32..2048) {
        let curve = generate_curve(p, max_n).unwrap();
        prop_assert_eq!(curve.points.len(), max_n as usize);
        for (i, point) in curve.points.iter().enumerate() {
            prop_assert_eq!(point.processor_count as usize, i + 1);
        }
    }

    #[test]
    fn prop_invalid_proportion_rejected(p in prop_oneof![-10.0f64..-1e-9, 1.0f64 + 1e-9..10.0]) {
        prop_assert!(theoretical_speedup(p, 4).is_err());
        prop_assert!(generate_curve(p, 4).is_err());
    }

    #[test]
    fn prop_bounds_from_measured_data(records in distinct_runs()) {
        let report = ScalingAnalysis::new(AnalysisConfig::default())
            .unwrap()
            .run(&records)
            .unwrap();

        let max_x = report.actual.points.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        let max_y = report.actual.points.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        prop_assert_eq!(report.bounds.x_max, max_x);
        prop_assert_eq!(report.bounds.y_max, max_y);
        prop_assert_eq!(report.bounds.x_min, report.actual.points[0].0);

        for series in &report.theory {
            prop_assert_eq!(series.points.len() as f64, max_x);
        }
    }
}
