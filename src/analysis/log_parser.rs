//! Log parsing for iperf client logs.
//!
//! Extracts per-interval throughput samples from `iperf -i 1` output and the
//! final run summary used by the competition analysis.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use color_eyre::eyre::{Context, Result};
use regex::Regex;

use super::types::*;

/// Compiled regex patterns for log parsing
pub struct LogPatterns {
    /// Match: "8.80 Mbits/sec", "500 Kbits/sec", "9.1Mbits/sec"
    pub rate: Regex,
    /// Match: "[  3]  0.0-10.0 sec  11.2 MBytes  9.38 Mbits/sec"
    pub summary: Regex,
}

impl LogPatterns {
    pub fn new() -> Self {
        Self {
            rate: Regex::new(
                r"([\d.]+)\s*(M|K)bits/sec"
            ).expect("Invalid rate regex"),
            summary: Regex::new(
                r"\[\s*\d+\]\s+([\d.]+)\s*-\s*([\d.]+)\s+sec\s+[\d.]+\s+\w*Bytes\s+([\d.]+)\s+([GMK]?)bits/sec"
            ).expect("Invalid summary regex"),
        }
    }
}

impl Default for LogPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<LogPatterns> = LazyLock::new(LogPatterns::new);

/// Marker every iperf report line starts with ("[  3] ...")
const RECORD_MARKER: char = '[';
/// Time-unit token present on interval lines
const TIME_TOKEN: &str = "sec";
/// iperf column header ("[ ID] Interval       Transfer     Bandwidth")
const HEADER_PREFIX: &str = "[ ID]";

/// Classification of a single log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Per-interval report line carrying a bandwidth value
    Interval,
    /// Column header line
    Header,
    /// Connection banners, blank lines, anything else
    Noise,
}

/// Classify a log line. The trailing summary line is removed positionally
/// before classification and never reaches this function.
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with(HEADER_PREFIX) {
        LineKind::Header
    } else if line.starts_with(RECORD_MARKER) && line.contains(TIME_TOKEN) {
        LineKind::Interval
    } else {
        LineKind::Noise
    }
}

/// Convert a value with its magnitude prefix to Mbps
fn to_mbps(value: f64, prefix: &str) -> Mbps {
    match prefix {
        "G" => value * 1000.0,
        "M" => value,
        "K" => value / 1000.0,
        // bare "bits/sec"
        _ => value / 1_000_000.0,
    }
}

/// Extract the rate on a line, in Mbps.
///
/// When a line carries several rate tokens the last one wins.
pub fn extract_rate_mbps(line: &str) -> Option<Mbps> {
    let caps = PATTERNS.rate.captures_iter(line).last()?;
    let value_str = caps.get(1)?.as_str();
    let prefix = caps.get(2)?.as_str();

    match value_str.parse::<f64>() {
        Ok(value) => Some(to_mbps(value, prefix)),
        Err(_) => {
            log::debug!("Ignoring malformed rate '{}' in line: {}", value_str, line);
            None
        }
    }
}

/// Parse interval throughput from a sequence of log lines.
///
/// The final line is the run summary and is dropped unread.
pub fn parse_throughput_lines<I, S>(lines: I) -> ThroughputSeries
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines: Vec<S> = lines.into_iter().collect();
    lines.pop();

    let samples = lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| classify_line(line) == LineKind::Interval)
        .filter_map(extract_rate_mbps)
        .collect();

    ThroughputSeries::new(samples)
}

/// Parse interval throughput from the full text of a log
pub fn parse_throughput_str(text: &str) -> ThroughputSeries {
    parse_throughput_lines(text.lines())
}

/// Parse interval throughput from a log file.
///
/// The series is labelled with the flow identity when the file name follows
/// the `<prefix>_<host>_<algorithm>.txt` convention.
pub fn parse_throughput_file(path: &Path) -> Result<ThroughputSeries> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open iperf log: {}", path.display()))?;
    let reader = BufReader::new(file);

    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .with_context(|| format!("Failed to read iperf log: {}", path.display()))?;

    let series = parse_throughput_lines(lines).with_flow(FlowId::from_path(path));
    log::debug!("Parsed {} samples from {}", series.len(), path.display());

    Ok(series)
}

/// Extract the run summary throughput (Mbps) from the text of a log.
///
/// iperf prints the summary once the test completes: a final report record
/// covering the whole run, so it starts at 0.0 and, when interval records
/// precede it, spans longer than the first of them. A log cut off before the
/// summary has none and yields `None`.
pub fn parse_summary_mbps(text: &str) -> Option<Mbps> {
    let records: Vec<_> = PATTERNS.summary.captures_iter(text).collect();
    let first = records.first()?;
    let last = records.last()?;

    let span = |caps: &regex::Captures| -> Option<(f64, f64)> {
        let start: f64 = caps.get(1)?.as_str().parse().ok()?;
        let end: f64 = caps.get(2)?.as_str().parse().ok()?;
        Some((start, end))
    };
    let (start, end) = span(last)?;
    if start != 0.0 {
        return None;
    }
    if records.len() > 1 {
        let (_, first_end) = span(first)?;
        if end <= first_end {
            return None;
        }
    }

    let value: f64 = last.get(3)?.as_str().parse().ok()?;
    let prefix = last.get(4).map(|m| m.as_str()).unwrap_or("");
    Some(to_mbps(value, prefix))
}
