//! Catalog of TCP competition scenarios.
//!
//! Each scenario fixes which client hosts run which congestion-control
//! algorithm against a single server host behind the bottleneck link. The
//! experiment writes one iperf log per client, so a scenario is enough to
//! locate every log of a run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::types::FlowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// 1 Reno flow vs 1 BBR flow
    #[default]
    RenoVsBbr,
    /// 2 Reno flows vs 2 BBR flows
    DualRenoVsDualBbr,
    /// 2 Reno flows vs 1 BBR flow
    DualRenoVsBbr,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::RenoVsBbr,
        Scenario::DualRenoVsDualBbr,
        Scenario::DualRenoVsBbr,
    ];

    /// Client flows as `(host, algorithm)` pairs, in start order
    pub fn flows(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Scenario::RenoVsBbr => &[("h1", "reno"), ("h2", "bbr")],
            Scenario::DualRenoVsDualBbr => &[("h1", "reno"), ("h2", "reno"), ("h3", "bbr"), ("h4", "bbr")],
            Scenario::DualRenoVsBbr => &[("h1", "reno"), ("h2", "reno"), ("h3", "bbr")],
        }
    }

    /// Host running the iperf server; always the one after the last client
    pub fn server_host(&self) -> String {
        format!("h{}", self.host_count())
    }

    /// Clients plus the server
    pub fn host_count(&self) -> usize {
        self.flows().len() + 1
    }

    /// Flow identities for logs written with the given file name prefix
    pub fn flow_ids(&self, prefix: &str) -> Vec<FlowId> {
        self.flows()
            .iter()
            .map(|(host, algo)| FlowId::new(prefix, host, algo))
            .collect()
    }

    /// Conventional log paths (`<dir>/<prefix>_<host>_<algo>.txt`) of every client
    pub fn log_paths(&self, dir: &Path, prefix: &str) -> Vec<PathBuf> {
        self.flow_ids(prefix)
            .iter()
            .map(|flow| dir.join(flow.file_name()))
            .collect()
    }

    /// Log paths of the first Reno flow and the first BBR flow, the pair
    /// compared in the vector plot
    pub fn plot_pair(&self, dir: &Path, prefix: &str) -> Option<(PathBuf, PathBuf)> {
        let flows = self.flow_ids(prefix);
        let first = flows.first()?;
        let rival = flows.iter().find(|flow| flow.algorithm != first.algorithm)?;
        Some((dir.join(first.file_name()), dir.join(rival.file_name())))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::RenoVsBbr => "reno_vs_bbr",
            Scenario::DualRenoVsDualBbr => "dual_reno_vs_dual_bbr",
            Scenario::DualRenoVsBbr => "dual_reno_vs_bbr",
        };
        f.write_str(name)
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.to_string() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown scenario '{}', expected one of: reno_vs_bbr, dual_reno_vs_dual_bbr, dual_reno_vs_bbr",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_host_follows_clients() {
        assert_eq!(Scenario::RenoVsBbr.server_host(), "h3");
        assert_eq!(Scenario::DualRenoVsDualBbr.server_host(), "h5");
        assert_eq!(Scenario::DualRenoVsBbr.server_host(), "h4");
    }

    #[test]
    fn test_name_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.to_string().parse::<Scenario>(), Ok(scenario));
        }
        assert!("cubic_vs_bbr".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_log_paths() {
        let paths = Scenario::RenoVsBbr.log_paths(Path::new("results"), "iperf");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("results/iperf_h1_reno.txt"),
                PathBuf::from("results/iperf_h2_bbr.txt"),
            ]
        );
    }

    #[test]
    fn test_plot_pair_picks_rival_algorithm() {
        let (a, b) = Scenario::DualRenoVsDualBbr
            .plot_pair(Path::new("out"), "iperf")
            .unwrap();
        assert_eq!(a, PathBuf::from("out/iperf_h1_reno.txt"));
        assert_eq!(b, PathBuf::from("out/iperf_h3_bbr.txt"));
    }
}
