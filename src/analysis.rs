//! One scaling study analysis: aggregate, generate curves, assemble
//!
//! # Example
//!
//! ```
//! use amdahl_scaling::analysis::ScalingAnalysis;
//! use amdahl_scaling::config::AnalysisConfig;
//! use amdahl_scaling::record::RunRecord;
//!
//! let analysis = ScalingAnalysis::new(AnalysisConfig::default()).unwrap();
//! let report = analysis
//!     .run(&[
//!         RunRecord::new(1, 100.0, 0.9),
//!         RunRecord::new(2, 55.0, 0.9),
//!         RunRecord::new(4, 30.0, 0.9),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(report.table.len(), 3);
//! // 0.9 is already a default candidate, so no extra curve is added
//! assert_eq!(report.theory.len(), 4);
//! ```

use crate::aggregate::aggregate;
use crate::amdahl::{comparison_proportions, generate_curves};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::record::RunRecord;
use crate::report::{assemble, ScalingReport};

/// Validated analysis settings, reusable across independent studies
#[derive(Debug, Clone)]
pub struct ScalingAnalysis {
    config: AnalysisConfig,
}

impl ScalingAnalysis {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate().map_err(AnalysisError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one set of run records
    pub fn run(&self, records: &[RunRecord]) -> Result<ScalingReport> {
        let _span = tracing::debug_span!("scaling_analysis", records = records.len()).entered();

        let dataset = aggregate(records, self.config.duplicates)?;

        let recorded = self
            .config
            .include_recorded_proportion
            .then(|| dataset.recorded_parallel_proportion());
        let proportions = comparison_proportions(&self.config.proportions, recorded);
        tracing::debug!(?proportions, "comparing against theoretical proportions");

        let curves = generate_curves(&proportions, dataset.max_processor_count())?;

        Ok(assemble(&dataset, &curves))
    }
}
