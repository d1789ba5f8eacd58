// Configuration for a scaling study analysis
//
// Loaded from TOML (`--config`) or built from defaults, then overridden by
// command-line flags.

use crate::aggregate::DuplicatePolicy;
use crate::amdahl::DEFAULT_PROPORTIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one analysis run
///
/// # Example
/// ```
/// use amdahl_scaling::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.proportions, vec![0.70, 0.80, 0.90, 1.00]);
/// assert!(config.include_recorded_proportion);
/// ```
///
/// # Example TOML
/// ```toml
/// proportions = [0.5, 0.75, 0.95]
/// include_recorded_proportion = false
/// duplicates = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Candidate parallel proportions drawn as theoretical curves
    pub proportions: Vec<f64>,

    /// Also draw a curve for the proportion recorded in the run logs
    pub include_recorded_proportion: bool,

    /// Handling of repeated (non-baseline) processor counts
    pub duplicates: DuplicatePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            proportions: DEFAULT_PROPORTIONS.to_vec(),
            include_recorded_proportion: true,
            duplicates: DuplicatePolicy::Warn,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.proportions.is_empty() && !self.include_recorded_proportion {
            return Err(
                "no theoretical curves requested: proportions is empty and the recorded proportion is excluded"
                    .to_string(),
            );
        }

        if let Some(bad) = self
            .proportions
            .iter()
            .find(|p| !(0.0..=1.0).contains(*p))
        {
            return Err(format!("proportions must be in [0, 1], got {}", bad));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.proportions, vec![0.7, 0.8, 0.9, 1.0]);
        assert!(config.include_recorded_proportion);
        assert_eq!(config.duplicates, DuplicatePolicy::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            proportions = [0.5, 0.95]
            include_recorded_proportion = false
            duplicates = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(config.proportions, vec![0.5, 0.95]);
        assert!(!config.include_recorded_proportion);
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str("duplicates = \"reject\"").unwrap();
        assert_eq!(config.proportions, DEFAULT_PROPORTIONS.to_vec());
        assert!(config.include_recorded_proportion);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(AnalysisConfig::from_toml_str("proportion = [0.5]").is_err());
    }

    #[test]
    fn test_invalid_proportion_rejected() {
        assert!(AnalysisConfig::from_toml_str("proportions = [0.5, 1.2]").is_err());
    }

    #[test]
    fn test_nothing_to_draw_rejected() {
        let config = AnalysisConfig {
            proportions: vec![],
            include_recorded_proportion: false,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        assert!(AnalysisConfig::from_file("/nonexistent/amdahl.toml").is_err());
    }
}
