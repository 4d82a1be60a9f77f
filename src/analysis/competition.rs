//! Competition analysis across all flows of one experiment run.
//!
//! Each competing iperf client leaves an `iperf_<host>_<algorithm>.txt` log
//! in the results directory. The final summary record of each log gives that
//! flow's throughput for the whole run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};

use super::fairness::jain_index;
use super::log_parser::parse_summary_mbps;
use super::types::*;

/// File name prefix of iperf client logs
pub const IPERF_LOG_PREFIX: &str = "iperf";

/// An algorithm dominates when its mean beats every other algorithm's by this factor
pub const DOMINANCE_MARGIN: f64 = 1.1;

/// Find all iperf flow logs in a results directory, sorted by flow identity
pub fn discover_flow_logs(results_dir: &Path) -> Result<Vec<(FlowId, PathBuf)>> {
    let entries = fs::read_dir(results_dir)
        .with_context(|| format!("Failed to read results directory: {}", results_dir.display()))?;

    let mut logs = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", results_dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        match FlowId::from_path(&path) {
            Some(flow) if flow.prefix == IPERF_LOG_PREFIX => logs.push((flow, path)),
            _ => log::debug!("Skipping non-flow file {}", path.display()),
        }
    }

    logs.sort();
    Ok(logs)
}

/// Read the summary throughput of one flow log
pub fn read_flow_result(flow: FlowId, path: &Path) -> Result<Option<FlowResult>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read iperf log: {}", path.display()))?;

    Ok(parse_summary_mbps(&content).map(|throughput_mbps| FlowResult { flow, throughput_mbps }))
}

/// Mean throughput per algorithm, keyed by the upper-cased algorithm name
pub fn algorithm_means(flows: &[FlowResult]) -> BTreeMap<String, Mbps> {
    let mut groups: BTreeMap<String, Vec<Mbps>> = BTreeMap::new();
    for result in flows {
        groups
            .entry(result.flow.algorithm_label())
            .or_default()
            .push(result.throughput_mbps);
    }

    groups
        .into_iter()
        .filter_map(|(algo, values)| crate::utils::mean(&values).map(|mean| (algo, mean)))
        .collect()
}

/// Decide whether one algorithm dominated. Needs at least two algorithms.
pub fn judge(means: &BTreeMap<String, Mbps>) -> Option<Verdict> {
    if means.len() < 2 {
        return None;
    }

    let (leader, leader_mean) = means
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))?;

    let dominates = means
        .iter()
        .filter(|(algo, _)| *algo != leader)
        .all(|(_, mean)| *leader_mean > mean * DOMINANCE_MARGIN);

    Some(if dominates {
        Verdict::Dominant {
            algorithm: leader.clone(),
            mean_mbps: *leader_mean,
        }
    } else {
        Verdict::Comparable
    })
}

/// Build a competition report from already-collected flow results
pub fn summarize(flows: Vec<FlowResult>, metadata: ReportMetadata) -> CompetitionReport {
    let total_throughput_mbps: Mbps = flows.iter().map(|f| f.throughput_mbps).sum();
    let utilization_percent = total_throughput_mbps / metadata.bottleneck_mbps * 100.0;

    let (winner, fairness_index) = if flows.len() >= 2 {
        let winner = flows
            .iter()
            .max_by(|a, b| a.throughput_mbps.total_cmp(&b.throughput_mbps))
            .cloned();
        let throughputs: Vec<Mbps> = flows.iter().map(|f| f.throughput_mbps).collect();
        (winner, Some(jain_index(&throughputs)))
    } else {
        (None, None)
    };

    let algorithm_means = algorithm_means(&flows);
    let verdict = judge(&algorithm_means);

    CompetitionReport {
        metadata,
        flows,
        total_throughput_mbps,
        utilization_percent,
        winner,
        fairness_index,
        algorithm_means,
        verdict,
    }
}

/// Analyze every flow log in a results directory.
///
/// Logs that cannot be read or carry no summary record are skipped with a
/// warning; the run fails only when no flow produced a result.
pub fn analyze_competition(results_dir: &Path, bottleneck_mbps: Mbps) -> Result<CompetitionReport> {
    if !(bottleneck_mbps.is_finite() && bottleneck_mbps > 0.0) {
        return Err(AnalysisError::InvalidCapacity(bottleneck_mbps).into());
    }

    let logs = discover_flow_logs(results_dir)?;
    log::info!("Found {} flow logs in {}", logs.len(), results_dir.display());

    let mut flows = Vec::new();
    for (flow, path) in logs {
        match read_flow_result(flow, &path) {
            Ok(Some(result)) => {
                log::debug!("{}: {:.2} Mbits/sec", result.flow, result.throughput_mbps);
                flows.push(result);
            }
            Ok(None) => log::warn!("No summary record in {}", path.display()),
            Err(e) => log::warn!("Failed to analyze {}: {:#}", path.display(), e),
        }
    }

    if flows.is_empty() {
        return Err(AnalysisError::NoFlowLogs(results_dir.display().to_string()).into());
    }

    let metadata = ReportMetadata {
        analysis_timestamp: chrono::Utc::now().to_rfc3339(),
        results_dir: results_dir.display().to_string(),
        bottleneck_mbps,
    };

    Ok(summarize(flows, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(host: &str, algo: &str, mbps: Mbps) -> FlowResult {
        FlowResult {
            flow: FlowId::new("iperf", host, algo),
            throughput_mbps: mbps,
        }
    }

    fn metadata(bottleneck_mbps: Mbps) -> ReportMetadata {
        ReportMetadata {
            analysis_timestamp: String::new(),
            results_dir: "results".to_string(),
            bottleneck_mbps,
        }
    }

    #[test]
    fn test_algorithm_means() {
        let flows = vec![
            result("h1", "reno", 2.0),
            result("h2", "reno", 4.0),
            result("h3", "bbr", 5.0),
        ];
        let means = algorithm_means(&flows);
        assert_eq!(means.get("RENO"), Some(&3.0));
        assert_eq!(means.get("BBR"), Some(&5.0));
    }

    #[test]
    fn test_judge_dominant_and_comparable() {
        let mut means = BTreeMap::new();
        means.insert("RENO".to_string(), 2.0);
        means.insert("BBR".to_string(), 7.5);
        assert_eq!(
            judge(&means),
            Some(Verdict::Dominant { algorithm: "BBR".to_string(), mean_mbps: 7.5 })
        );

        means.insert("BBR".to_string(), 2.1);
        assert_eq!(judge(&means), Some(Verdict::Comparable));
    }

    #[test]
    fn test_judge_needs_two_algorithms() {
        let mut means = BTreeMap::new();
        means.insert("RENO".to_string(), 4.0);
        assert_eq!(judge(&means), None);
    }

    #[test]
    fn test_summarize() {
        let report = summarize(
            vec![result("h1", "reno", 2.0), result("h2", "bbr", 6.0)],
            metadata(10.0),
        );
        assert_eq!(report.total_throughput_mbps, 8.0);
        assert_eq!(report.utilization_percent, 80.0);
        assert_eq!(report.winner.as_ref().unwrap().flow.host, "h2");
        assert_eq!(report.fairness_index, Some(0.8));
        assert!(matches!(report.verdict, Some(Verdict::Dominant { .. })));
    }

    #[test]
    fn test_summarize_single_flow() {
        let report = summarize(vec![result("h1", "reno", 9.5)], metadata(10.0));
        assert!(report.winner.is_none());
        assert!(report.fairness_index.is_none());
        assert!(report.verdict.is_none());
    }
}
