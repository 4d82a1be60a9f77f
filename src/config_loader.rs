use crate::config::AnalysisConfig;
use color_eyre::eyre::Context;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalysisConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;

    let config: AnalysisConfig = serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source_logs: Vec<PathBuf>,
    pub bottleneck_mbps: Option<f64>,
    pub output: Option<PathBuf>,
}

/// Apply CLI overrides to a configuration
pub fn apply_cli_overrides(config: &mut AnalysisConfig, overrides: &CliOverrides) -> Result<()> {
    if !overrides.source_logs.is_empty() {
        info!("Overriding source logs from command line: {:?}", overrides.source_logs);
        config.source_logs = overrides.source_logs.clone();
    }

    if let Some(capacity) = overrides.bottleneck_mbps {
        info!("Overriding bottleneck capacity: {} Mbps", capacity);
        config.bottleneck_mbps = capacity;
    }

    if let Some(ref output) = overrides.output {
        config.output = output.clone();
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}

/// Build the effective configuration: YAML file if given, then CLI overrides
pub fn resolve_config(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<AnalysisConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    apply_cli_overrides(&mut config, overrides)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
source_logs:
  - results/iperf_h1_reno.txt
  - results/iperf_h2_bbr.txt
bottleneck_mbps: 1.5
output: plots/competition.svg
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.source_logs.len(), 2);
        assert_eq!(config.bottleneck_mbps, 1.5);
        assert_eq!(config.output, PathBuf::from("plots/competition.svg"));
    }

    #[test]
    fn test_load_config_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "source_logs: [a.txt, b.txt]\n").unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.bottleneck_mbps, 10.0);
        assert_eq!(config.output, PathBuf::from("throughput_plot.svg"));
    }

    #[test]
    fn test_load_config_rejects_invalid_capacity() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "bottleneck_mbps: -1\n").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AnalysisConfig::default();
        let overrides = CliOverrides {
            source_logs: vec![PathBuf::from("x.txt"), PathBuf::from("y.txt")],
            bottleneck_mbps: Some(100.0),
            output: Some(PathBuf::from("out.svg")),
        };

        apply_cli_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.source_logs, overrides.source_logs);
        assert_eq!(config.bottleneck_mbps, 100.0);
        assert_eq!(config.output, PathBuf::from("out.svg"));
    }

    #[test]
    fn test_resolve_without_file() {
        let config = resolve_config(None, &CliOverrides::default()).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }
}
