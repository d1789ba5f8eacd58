//! Run records as written by the scaling study jobs
//!
//! Each job logs one JSON object:
//!
//! ```json
//! {"nproc": 4, "execution_time": 30.0, "parallel_proportion": 0.9}
//! ```
//!
//! Extra fields are ignored. Values are not validated here; that happens in
//! [`crate::aggregate::aggregate`] so the error can name the offending record.

use serde::{Deserialize, Serialize};

/// One measured run of the experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Number of processes the run used
    ///
    /// Signed so that zero and negative counts surface as invalid records
    /// instead of decode failures.
    #[serde(rename = "nproc")]
    pub processor_count: i64,

    /// Wall-clock time in seconds
    pub execution_time: f64,

    /// Fraction of the work the job was configured to run in parallel
    pub parallel_proportion: f64,
}

impl RunRecord {
    pub fn new(processor_count: i64, execution_time: f64, parallel_proportion: f64) -> Self {
        Self {
            processor_count,
            execution_time,
            parallel_proportion,
        }
    }

    /// Decode a log body holding either a single record or an array of records
    pub fn from_json_str(content: &str) -> serde_json::Result<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LogBody {
            One(RunRecord),
            Many(Vec<RunRecord>),
        }

        Ok(match serde_json::from_str(content)? {
            LogBody::One(record) => vec![record],
            LogBody::Many(records) => records,
        })
    }
}
