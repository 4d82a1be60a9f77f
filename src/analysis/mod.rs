//! Throughput analysis for bufferbloat / TCP competition experiments.
//!
//! This module provides iperf log parsing, series alignment, Jain's
//! fairness index and competition reports.

pub mod types;
pub mod log_parser;
pub mod alignment;
pub mod fairness;
pub mod competition;
pub mod report;

pub use types::*;
pub use log_parser::{parse_throughput_file, parse_throughput_str};
pub use alignment::{align_all, align_pair};
pub use fairness::jain_index;
pub use competition::analyze_competition;
pub use report::{generate_json_report, generate_text_report};
