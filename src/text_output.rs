//! Plain text performance table (default output)

use crate::report::{ScalingReport, TableRow};

const HEADERS: [&str; 4] = ["nproc", "execution_time", "parallel_proportion", "speedup"];

fn cells(row: &TableRow) -> [String; 4] {
    [
        row.processor_count.to_string(),
        row.execution_time.to_string(),
        format!("{:.2}", row.parallel_proportion),
        format!("{:.6}", row.speedup),
    ]
}

/// Render the table with right-aligned, space-separated columns
///
/// # Example
/// ```
/// use amdahl_scaling::report::TableRow;
/// use amdahl_scaling::text_output::format_table;
///
/// let table = format_table(&[TableRow {
///     processor_count: 1,
///     execution_time: 100.0,
///     parallel_proportion: 0.9,
///     speedup: 1.0,
/// }]);
/// assert!(table.starts_with(" nproc  execution_time"));
/// ```
pub fn format_table(rows: &[TableRow]) -> String {
    let body: Vec<[String; 4]> = rows.iter().map(cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |fields: &[&str]| -> String {
        fields
            .iter()
            .zip(widths)
            .map(|(field, width)| format!("{:>width$}", field, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut output = String::new();
    output.push(' ');
    output.push_str(&line(&HEADERS));
    output.push('\n');
    for row in &body {
        let fields: Vec<&str> = row.iter().map(String::as_str).collect();
        output.push(' ');
        output.push_str(&line(&fields));
        output.push('\n');
    }
    output
}

/// Title line followed by the table
pub fn format_report(report: &ScalingReport) -> String {
    format!("{}\n\n{}", report.title, format_table(&report.table))
}
