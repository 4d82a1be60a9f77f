//! # Bloatlab - Throughput analysis for bufferbloat experiments
//!
//! This library analyses the logs left behind by a bufferbloat / TCP
//! congestion-control competition experiment run on an emulated network
//! (Mininet). Several iperf clients, each using a different congestion-control
//! algorithm, share one bottleneck link; every client logs its throughput once
//! per second.
//!
//! ## Overview
//!
//! The emulator and the measurement tools are external. Bloatlab only reads
//! their plain-text output:
//!
//! - **Log parsing**: per-interval Mbps samples from `iperf -i 1` logs
//! - **Fairness**: Jain's Fairness Index over competing flows
//! - **Vector plot**: the joint throughput trajectory of two flows against
//!   the full-utilization and equal-share lines, as SVG
//! - **Competition reports**: per-flow summary throughput, link utilization,
//!   winner and per-algorithm comparison
//!
//! ## Architecture
//!
//! - `analysis`: log parsing, alignment, fairness, competition analysis and reports
//! - `plot`: SVG vector-field plot
//! - `scenario`: catalog of competition scenarios and their log file names
//! - `config`: analysis configuration and validation
//! - `config_loader`: YAML loading and CLI overrides
//! - `utils`: descriptive statistics
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use bloatlab::{analysis, plot};
//!
//! let reno = analysis::parse_throughput_file(Path::new("results/iperf_h1_reno.txt"))?;
//! let bbr = analysis::parse_throughput_file(Path::new("results/iperf_h2_bbr.txt"))?;
//!
//! let (x, y) = analysis::align_pair(reno.samples(), bbr.samples());
//! println!("{} aligned intervals", x.len().min(y.len()));
//!
//! plot::plot_throughput_pair(&reno, &bbr, 10.0, Path::new("throughput_plot.svg"))?;
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible functions return `color_eyre::eyre::Result` with context attached.
//! Domain failures (`analysis::AnalysisError`, `config::ValidationError`) are
//! typed and can be recovered with `Report::downcast_ref`.

pub mod analysis;
pub mod plot;
pub mod scenario;
pub mod config;
pub mod config_loader;
pub mod utils;
