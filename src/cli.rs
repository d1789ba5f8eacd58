//! CLI argument parsing for amdahl-scaling

use crate::aggregate::DuplicatePolicy;
use crate::config::AnalysisConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the performance table
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text table (default)
    Text,
    /// JSON report for machine parsing
    Json,
    /// CSV table for spreadsheet analysis
    Csv,
}

/// Duplicate processor count handling
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DuplicatesArg {
    /// Keep the first run for each count and warn
    Warn,
    /// Fail on any repeated processor count
    Reject,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Warn => DuplicatePolicy::Warn,
            DuplicatesArg::Reject => DuplicatePolicy::Reject,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "amdahl-scaling")]
#[command(version)]
#[command(about = "Compare observed parallel speedup with Amdahl's Law", long_about = None)]
pub struct Cli {
    /// Run logs (JSON files, or directories of *.json files)
    #[arg(value_name = "LOGS", required = true)]
    pub logs: Vec<PathBuf>,

    /// Candidate parallel proportions for theoretical curves (e.g., -p 0.7,0.8,0.9,1.0)
    #[arg(
        short = 'p',
        long = "proportions",
        value_name = "P",
        value_delimiter = ','
    )]
    pub proportions: Option<Vec<f64>>,

    /// Do not add a curve for the proportion recorded in the logs
    #[arg(long = "no-recorded")]
    pub no_recorded: bool,

    /// How to handle repeated processor counts
    #[arg(long = "duplicates", value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Output format for the performance table
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the speedup chart as SVG to this file
    #[arg(short = 'o', long = "plot", value_name = "FILE")]
    pub plot: Option<PathBuf>,

    /// Load analysis settings from a TOML file (flags take precedence)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a base configuration
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(proportions) = &self.proportions {
            config.proportions = proportions.clone();
        }
        if self.no_recorded {
            config.include_recorded_proportion = false;
        }
        if let Some(duplicates) = self.duplicates {
            config.duplicates = duplicates.into();
        }
        config
    }
}
