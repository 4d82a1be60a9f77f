//! Core data types for throughput and competition analysis.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::stats;

/// Throughput in megabits per second
pub type Mbps = f64;

/// Match: "<prefix>_<host>_<algorithm>.txt", e.g. "iperf_h1_reno.txt"
static FLOW_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]+)_([A-Za-z0-9]+)_(\w+)\.txt$").expect("Invalid flow file name regex")
});

/// Identity of one measured flow, recovered from its log file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlowId {
    pub prefix: String,
    pub host: String,
    pub algorithm: String,
}

impl FlowId {
    pub fn new(prefix: &str, host: &str, algorithm: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            host: host.to_string(),
            algorithm: algorithm.to_string(),
        }
    }

    /// Parse a flow identity from a path whose file name follows
    /// `<prefix>_<host>_<algorithm>.txt`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let caps = FLOW_FILE_NAME.captures(name)?;
        Some(Self::new(
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
            caps.get(3)?.as_str(),
        ))
    }

    /// Conventional log file name for this flow
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.txt", self.prefix, self.host, self.algorithm)
    }

    /// Algorithm name as shown in reports ("reno" -> "RENO")
    pub fn algorithm_label(&self) -> String {
        self.algorithm.to_uppercase()
    }
}

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (TCP {})", self.host, self.algorithm_label())
    }
}

/// Ordered per-interval throughput samples of a single flow.
///
/// Insertion order is temporal order; the series is never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowId>,
    samples: Vec<Mbps>,
}

impl ThroughputSeries {
    pub fn new(samples: Vec<Mbps>) -> Self {
        Self { flow: None, samples }
    }

    pub fn with_flow(mut self, flow: Option<FlowId>) -> Self {
        self.flow = flow;
        self
    }

    pub fn samples(&self) -> &[Mbps] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Label used on plot axes and in logs
    pub fn label(&self) -> String {
        match &self.flow {
            Some(flow) => flow.to_string(),
            None => "unlabelled flow".to_string(),
        }
    }

    /// Summary statistics, `None` for an empty series
    pub fn stats(&self) -> Option<SeriesStats> {
        let last = *self.samples.last()?;
        Some(SeriesStats {
            count: self.samples.len(),
            mean: stats::mean(&self.samples)?,
            std_dev: stats::std_dev(&self.samples)?,
            min: self.samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            last,
        })
    }
}

/// Descriptive statistics of one throughput series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: Mbps,
    pub std_dev: Mbps,
    pub min: Mbps,
    pub max: Mbps,
    pub last: Mbps,
}

/// Final (summary) throughput of one competing flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub flow: FlowId,
    pub throughput_mbps: Mbps,
}

/// Outcome of comparing congestion-control algorithms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// One algorithm's mean beat all others by more than the dominance margin
    Dominant { algorithm: String, mean_mbps: Mbps },
    /// No algorithm stood out
    Comparable,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Dominant { algorithm, mean_mbps } => {
                write!(f, "TCP {} dominates this scenario ({:.2} Mbits/sec mean)", algorithm, mean_mbps)
            }
            Verdict::Comparable => write!(f, "Similar performance across algorithms"),
        }
    }
}

/// Metadata attached to every competition report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub analysis_timestamp: String,
    pub results_dir: String,
    pub bottleneck_mbps: Mbps,
}

/// Result of analysing all flow logs of one competition run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionReport {
    pub metadata: ReportMetadata,
    pub flows: Vec<FlowResult>,
    pub total_throughput_mbps: Mbps,
    pub utilization_percent: f64,
    pub winner: Option<FlowResult>,
    pub fairness_index: Option<f64>,
    /// Mean throughput per algorithm, keyed by upper-cased algorithm name
    pub algorithm_means: BTreeMap<String, Mbps>,
    pub verdict: Option<Verdict>,
}

/// Typed failures of the analysis pipeline
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Throughput series '{label}' is empty after alignment; nothing to plot")]
    EmptySeries { label: String },
    #[error("Bottleneck capacity must be a positive number of Mbps, got {0}")]
    InvalidCapacity(f64),
    #[error("No flow logs found in {0}")]
    NoFlowLogs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_id_from_path() {
        let flow = FlowId::from_path(Path::new("results/iperf_h2_bbr.txt")).unwrap();
        assert_eq!(flow, FlowId::new("iperf", "h2", "bbr"));
        assert_eq!(flow.file_name(), "iperf_h2_bbr.txt");
        assert_eq!(flow.to_string(), "h2 (TCP BBR)");
    }

    #[test]
    fn test_flow_id_rejects_other_files() {
        assert!(FlowId::from_path(Path::new("ping.txt")).is_none());
        assert!(FlowId::from_path(Path::new("buffer.txt")).is_none());
        assert!(FlowId::from_path(Path::new("iperf_h1_reno.log")).is_none());
    }

    #[test]
    fn test_series_stats() {
        let series = ThroughputSeries::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let stats = series.stats().unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.last, 9.0);

        assert!(ThroughputSeries::default().stats().is_none());
    }
}
