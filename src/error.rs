//! Error taxonomy for the scaling analysis core
//!
//! Every failure is detected at the boundary of the aggregator or the curve
//! generator and returned as-is. Nothing is silently corrected.

use thiserror::Error;

/// Errors raised by aggregation, curve generation and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid record #{index}: {field} {reason}")]
    InvalidRecord {
        /// Position of the record in the caller's input
        index: usize,
        /// Offending field (`nproc`, `execution_time`, `parallel_proportion`)
        field: &'static str,
        reason: String,
    },

    #[error("Insufficient data: at least one run record is required")]
    InsufficientData,

    #[error(
        "Ambiguous baseline: processor count {processor_count} appears in records {indices:?}"
    )]
    AmbiguousBaseline {
        processor_count: u32,
        indices: Vec<usize>,
    },

    #[error("Duplicate processor count {processor_count} in records {indices:?}")]
    DuplicateProcessorCount {
        processor_count: u32,
        indices: Vec<usize>,
    },

    #[error("Invalid parallel proportion {value}: must be in [0, 1]")]
    InvalidProportion { value: f64 },

    #[error("Invalid processor count range: {processor_count} (must be >= 1)")]
    InvalidRange { processor_count: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
