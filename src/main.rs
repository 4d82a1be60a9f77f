//! Throughput analysis CLI for bufferbloat / TCP competition experiments.
//!
//! Plots the joint throughput of two competing flows, computes Jain's
//! fairness index and reports which congestion-control algorithm won.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};
use env_logger::Env;
use log::info;

use bloatlab::analysis::{self, alignment, competition::IPERF_LOG_PREFIX};
use bloatlab::config_loader::{self, CliOverrides};
use bloatlab::plot;
use bloatlab::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "bloatlab")]
#[command(about = "Throughput analysis for bufferbloat and TCP competition experiments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plot the throughput trajectory of two competing flows
    Plot {
        /// The two iperf logs to compare (connection 1, connection 2)
        #[arg(num_args = 0..=2)]
        logs: Vec<PathBuf>,

        /// YAML analysis configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bottleneck capacity (Mb/s)
        #[arg(short = 'b', long = "bw-net")]
        bw_net: Option<f64>,

        /// Output SVG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Take the logs of this competition scenario from --dir
        #[arg(long, requires = "dir", conflicts_with = "logs")]
        scenario: Option<Scenario>,

        /// Results directory of the scenario run
        #[arg(short, long, requires = "scenario")]
        dir: Option<PathBuf>,
    },

    /// Analyze every flow log of a competition run
    Compete {
        /// Results directory holding iperf_<host>_<algorithm>.txt logs
        #[arg(short, long)]
        dir: PathBuf,

        /// Bottleneck capacity (Mb/s)
        #[arg(short = 'b', long = "bw-net", default_value = "10")]
        bw_net: f64,

        /// Output directory for reports
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Compute Jain's fairness index over throughput values
    Fairness {
        /// One throughput value per flow (Mb/s)
        #[arg(required = true, num_args = 1..)]
        values: Vec<f64>,
    },

    /// Print the interval throughput series of one iperf log
    Parse {
        /// iperf log file
        log: PathBuf,

        /// Emit JSON instead of one value per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Commands::Plot {
            logs,
            config,
            bw_net,
            output,
            scenario,
            dir,
        } => {
            let logs = match (scenario, dir) {
                (Some(scenario), Some(dir)) => {
                    let (first, second) = scenario
                        .plot_pair(&dir, IPERF_LOG_PREFIX)
                        .ok_or_else(|| color_eyre::eyre::eyre!("Scenario {} has no rival flows", scenario))?;
                    info!("Scenario {}: comparing {:?} and {:?}", scenario, first, second);
                    vec![first, second]
                }
                _ => logs,
            };
            let overrides = CliOverrides {
                source_logs: logs,
                bottleneck_mbps: bw_net,
                output,
            };
            run_plot(config, &overrides)?;
        }
        Commands::Compete { dir, bw_net, output } => {
            run_compete(&dir, bw_net, &output)?;
        }
        Commands::Fairness { values } => {
            let index = analysis::jain_index(&values);
            println!("Jain's Fairness Index: {:.3}", index);
        }
        Commands::Parse { log, json } => {
            let series = analysis::parse_throughput_file(&log)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                for sample in series.samples() {
                    println!("{}", sample);
                }
            }
        }
    }

    Ok(())
}

fn run_plot(config_path: Option<PathBuf>, overrides: &CliOverrides) -> Result<()> {
    let config = config_loader::resolve_config(config_path.as_deref(), overrides)?;
    config.validate_for_plot()?;

    let first = analysis::parse_throughput_file(&config.source_logs[0])?;
    let second = analysis::parse_throughput_file(&config.source_logs[1])?;

    for series in [&first, &second] {
        match series.stats() {
            Some(stats) => info!(
                "{}: {} intervals, mean {:.2} Mbps, std dev {:.2} Mbps",
                series.label(),
                stats.count,
                stats.mean,
                stats.std_dev
            ),
            None => info!("{}: no interval records", series.label()),
        }
    }

    let (x, y) = analysis::align_pair(first.samples(), second.samples());
    let means = alignment::aligned_means(&[x, y]);
    if means.len() == 2 {
        info!("Jain's Fairness Index over aligned means: {:.3}", analysis::jain_index(&means));
    }

    plot::plot_throughput_pair(&first, &second, config.bottleneck_mbps, &config.output)?;
    println!("Plot written to {}", config.output.display());
    Ok(())
}

fn run_compete(dir: &PathBuf, bw_net: f64, output: &PathBuf) -> Result<()> {
    if !dir.is_dir() {
        bail!("Results directory {} does not exist", dir.display());
    }

    let report = analysis::analyze_competition(dir, bw_net)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    analysis::generate_json_report(&report, &output.join("competition_report.json"))?;
    analysis::generate_text_report(&report, &output.join("competition_report.txt"))?;
    analysis::report::print_summary(&report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_args() {
        let cli = Cli::parse_from([
            "bloatlab",
            "plot",
            "iperf_h1_reno.txt",
            "iperf_h2_bbr.txt",
            "--bw-net",
            "20",
        ]);

        match cli.command {
            Commands::Plot { logs, bw_net, output, .. } => {
                assert_eq!(logs.len(), 2);
                assert_eq!(bw_net, Some(20.0));
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_plot_scenario_args() {
        let cli = Cli::parse_from([
            "bloatlab",
            "plot",
            "--scenario",
            "dual_reno_vs_bbr",
            "--dir",
            "results",
        ]);

        match cli.command {
            Commands::Plot { scenario, dir, .. } => {
                assert_eq!(scenario, Some(Scenario::DualRenoVsBbr));
                assert_eq!(dir, Some(PathBuf::from("results")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_compete_defaults() {
        let cli = Cli::parse_from(["bloatlab", "compete", "--dir", "results"]);
        match cli.command {
            Commands::Compete { bw_net, output, .. } => {
                assert_eq!(bw_net, 10.0);
                assert_eq!(output, PathBuf::from("."));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_plot_dir_requires_scenario() {
        assert!(Cli::try_parse_from(["bloatlab", "plot", "--dir", "results"]).is_err());
        assert!(Cli::try_parse_from(["bloatlab", "plot", "--scenario", "reno_vs_bbr"]).is_err());
    }

    #[test]
    fn test_fairness_requires_values() {
        assert!(Cli::try_parse_from(["bloatlab", "fairness"]).is_err());
    }
}
