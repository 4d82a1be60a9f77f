//! Report generation for TCP competition analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Generate JSON report
pub fn generate_json_report(report: &CompetitionReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Render the human-readable report body
pub fn render_text_report(report: &CompetitionReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(60));
    lines.push("              TCP COMPETITION ANALYSIS".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push(format!("Analysis Date: {}", report.metadata.analysis_timestamp));
    lines.push(format!("Results Directory: {}", report.metadata.results_dir));
    lines.push(format!("Bottleneck: {:.2} Mbits/sec", report.metadata.bottleneck_mbps));
    lines.push(String::new());

    lines.push("Results per flow:".to_string());
    lines.push("-".repeat(50));
    for result in &report.flows {
        lines.push(format!("{}: {:.2} Mbits/sec", result.flow, result.throughput_mbps));
    }
    lines.push("-".repeat(50));
    lines.push(format!("Total throughput: {:.2} Mbits/sec", report.total_throughput_mbps));
    lines.push(format!(
        "Link utilization ({:.2} Mbits/sec): {:.1}%",
        report.metadata.bottleneck_mbps, report.utilization_percent
    ));
    lines.push(String::new());

    if let Some(ref winner) = report.winner {
        lines.push(format!("WINNER: {}", winner.flow));
        lines.push(format!("  Throughput: {:.2} Mbits/sec", winner.throughput_mbps));
        lines.push(String::new());
    }

    if let Some(index) = report.fairness_index {
        lines.push(format!("Jain's Fairness Index: {:.3}", index));
        lines.push("(1.0 = perfectly fair, lower = less fair)".to_string());
        lines.push(String::new());
    }

    if report.algorithm_means.len() > 1 {
        lines.push("Mean throughput per algorithm:".to_string());
        for (algo, mean) in &report.algorithm_means {
            lines.push(format!("  TCP {}: {:.2} Mbits/sec", algo, mean));
        }
        lines.push(String::new());
    }

    if let Some(ref verdict) = report.verdict {
        lines.push(format!("Verdict: {}", verdict));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Generate human-readable text report
pub fn generate_text_report(report: &CompetitionReport, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_text_report(report))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a short summary to stdout
pub fn print_summary(report: &CompetitionReport) {
    println!("\n=== TCP COMPETITION SUMMARY ===\n");
    println!("Flows analyzed: {}", report.flows.len());
    println!("Total throughput: {:.2} Mbits/sec", report.total_throughput_mbps);
    println!("Link utilization: {:.1}%", report.utilization_percent);

    if let Some(ref winner) = report.winner {
        println!("Winner: {} at {:.2} Mbits/sec", winner.flow, winner.throughput_mbps);
    }
    if let Some(index) = report.fairness_index {
        println!("Jain's Fairness Index: {:.3}", index);
    }
    if let Some(ref verdict) = report.verdict {
        println!("Verdict: {}", verdict);
    }
    println!();
}
