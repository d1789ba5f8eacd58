//! amdahl-scaling - Parallel scaling study analysis
//!
//! This library turns the per-run logs of a scaling study into a sorted
//! performance table with observed speedup, and compares that speedup with
//! the predictions of Amdahl's Law for several assumed parallel proportions.
//!
//! The analysis core (`aggregate`, `amdahl`, `report`, `analysis`) is pure;
//! loading logs and rendering output live in the remaining modules.

pub mod aggregate;
pub mod amdahl;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod loader;
pub mod record;
pub mod report;
pub mod svg_output;
pub mod text_output;
