//! JSON output format for scaling reports
//!
//! `--format json`: the full report (table, chart series, bounds, warnings)
//! wrapped in a versioned envelope.

use crate::report::ScalingReport;
use serde::{Deserialize, Serialize};

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Number of measured runs in the table
    pub runs: usize,
    #[serde(flatten)]
    pub report: ScalingReport,
}

impl JsonOutput {
    /// Wrap a report for serialization
    pub fn new(report: ScalingReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "amdahl-scaling-json-v1".to_string(),
            runs: report.table.len(),
            report,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
