use amdahl_scaling::{
    analysis::ScalingAnalysis,
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output::CsvOutput,
    error::AnalysisError,
    json_output::JsonOutput,
    loader,
    record::RunRecord,
    svg_output::SvgChart,
    text_output,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; warnings always, everything with --debug
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    Ok(args.apply_overrides(base))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let analysis = ScalingAnalysis::new(config)?;

    let loaded = loader::load_records(&args.logs)?;
    for (index, entry) in loaded.iter().enumerate() {
        tracing::debug!(index, source = %entry.source.display(), record = ?entry.record, "run record");
    }
    let records: Vec<RunRecord> = loaded.iter().map(|entry| entry.record).collect();

    let report = analysis.run(&records).map_err(|e| {
        // Point at the file behind an invalid record
        let hint = match &e {
            AnalysisError::InvalidRecord { index, .. } => loaded
                .get(*index)
                .map(|entry| format!(" (from {})", entry.source.display())),
            _ => None,
        };
        anyhow::anyhow!("{}{}", e, hint.unwrap_or_default())
    })?;

    match args.format {
        OutputFormat::Text => print!("{}", text_output::format_report(&report)),
        OutputFormat::Json => println!(
            "{}",
            JsonOutput::new(report.clone())
                .to_json()
                .context("Failed to serialize report")?
        ),
        OutputFormat::Csv => print!("{}", CsvOutput::from_report(&report).to_csv()),
    }

    if let Some(path) = &args.plot {
        SvgChart::default().write_to_file(&report, path)?;
    }

    Ok(())
}
