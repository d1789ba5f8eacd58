//! CSV output format for the performance table
//!
//! `--format csv` for spreadsheet analysis and machine parsing

use crate::report::{ScalingReport, TableRow};

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    rows: Vec<TableRow>,
}

impl CsvOutput {
    /// Build a formatter holding the report's table
    pub fn from_report(report: &ScalingReport) -> Self {
        Self {
            rows: report.table.clone(),
        }
    }

    fn header() -> &'static str {
        "nproc,execution_time,parallel_proportion,speedup"
    }

    /// Format a table row as CSV
    fn format_row(row: &TableRow) -> String {
        format!(
            "{},{},{},{}",
            row.processor_count, row.execution_time, row.parallel_proportion, row.speedup
        )
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}
