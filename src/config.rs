//! Analysis configuration.
//!
//! Replaces hardcoded log paths and capacity constants with one explicit
//! structure that can be read from YAML or built from CLI flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::plot::DEFAULT_PLOT_FILE;

/// Bottleneck capacity used when none is configured (Mbps)
pub const DEFAULT_BOTTLENECK_MBPS: f64 = 10.0;

fn default_bottleneck_mbps() -> f64 {
    DEFAULT_BOTTLENECK_MBPS
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_PLOT_FILE)
}

/// Inputs of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// iperf client logs, one per flow
    #[serde(default)]
    pub source_logs: Vec<PathBuf>,
    /// Capacity of the shared bottleneck link in Mbps
    #[serde(default = "default_bottleneck_mbps")]
    pub bottleneck_mbps: f64,
    /// Where the plot is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_logs: Vec::new(),
            bottleneck_mbps: DEFAULT_BOTTLENECK_MBPS,
            output: default_output(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.bottleneck_mbps.is_finite() && self.bottleneck_mbps > 0.0) {
            return Err(ValidationError::InvalidCapacity(format!(
                "bottleneck_mbps must be a positive number, got {}",
                self.bottleneck_mbps
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutput("output path cannot be empty".to_string()));
        }

        if let Some(empty) = self.source_logs.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(ValidationError::InvalidSources(format!(
                "source_logs[{}] is an empty path",
                empty
            )));
        }

        Ok(())
    }

    /// Validate for the pair plot, which needs exactly two logs
    pub fn validate_for_plot(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.source_logs.len() != 2 {
            return Err(ValidationError::InvalidSources(format!(
                "plotting needs exactly 2 source logs, got {}",
                self.source_logs.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid bottleneck capacity: {0}")]
    InvalidCapacity(String),
    #[error("Invalid source logs: {0}")]
    InvalidSources(String),
    #[error("Invalid output: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_config() -> AnalysisConfig {
        AnalysisConfig {
            source_logs: vec![PathBuf::from("iperf_h1_reno.txt"), PathBuf::from("iperf_h2_bbr.txt")],
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.bottleneck_mbps, 10.0);
        assert_eq!(config.output, PathBuf::from("throughput_plot.svg"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_capacity() {
        for capacity in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = AnalysisConfig { bottleneck_mbps: capacity, ..pair_config() };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidCapacity(_))));
        }
    }

    #[test]
    fn test_plot_needs_two_logs() {
        assert!(pair_config().validate_for_plot().is_ok());

        let mut config = pair_config();
        config.source_logs.pop();
        assert!(matches!(config.validate_for_plot(), Err(ValidationError::InvalidSources(_))));
    }

    #[test]
    fn test_rejects_empty_paths() {
        let config = AnalysisConfig { output: PathBuf::new(), ..pair_config() };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidOutput(_))));

        let config = AnalysisConfig {
            source_logs: vec![PathBuf::from("a.txt"), PathBuf::new()],
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSources(_))));
    }
}
