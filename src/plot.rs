//! Vector-field plot of two competing flows' throughput.
//!
//! Every interval contributes one point `(flow 1 Mbps, flow 2 Mbps)`; arrows
//! join consecutive points, so the figure shows how the two flows' shares of
//! the bottleneck moved over time. Oscillation, convergence to the
//! equal-share diagonal or starvation against an axis are visible at a glance.

use std::path::Path;

use color_eyre::eyre::{Context, Result};
use plotters::prelude::*;

use crate::analysis::alignment::align_pair;
use crate::analysis::types::{AnalysisError, Mbps, ThroughputSeries};

/// Default output file, written to the working directory
pub const DEFAULT_PLOT_FILE: &str = "throughput_plot.svg";

const PLOT_SIZE: (u32, u32) = (800, 600);
const TITLE: &str = "Throughput Through Shared Bottleneck Over Time";
/// Arrow head length as a fraction of the axis span
const HEAD_FRACTION: f64 = 0.025;
/// Number of dashes on the full-utilization line
const DASH_COUNT: usize = 24;

type Point = (f64, f64);

/// One arrow of the trajectory, from interval `i` to interval `i + 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    fn length(&self) -> f64 {
        (self.to.0 - self.from.0).hypot(self.to.1 - self.from.1)
    }

    /// Arrow head triangle with the tip on `to`; `None` for a zero-length move
    fn head(&self, head_len: f64) -> Option<[Point; 3]> {
        let len = self.length();
        if len == 0.0 {
            return None;
        }
        let (ux, uy) = ((self.to.0 - self.from.0) / len, (self.to.1 - self.from.1) / len);
        let head_len = head_len.min(len);
        let half_width = head_len / 2.0;
        let base = (self.to.0 - ux * head_len, self.to.1 - uy * head_len);
        Some([
            self.to,
            (base.0 - uy * half_width, base.1 + ux * half_width),
            (base.0 + uy * half_width, base.1 - ux * half_width),
        ])
    }
}

/// Directed segments between consecutive aligned samples.
///
/// Yields `min(len) - 1` segments, none for fewer than two samples.
pub fn trajectory_segments(first: &[Mbps], second: &[Mbps]) -> Vec<Segment> {
    let (x, y) = align_pair(first, second);
    let points: Vec<Point> = x.iter().copied().zip(y.iter().copied()).collect();
    points
        .windows(2)
        .map(|pair| Segment { from: pair[0], to: pair[1] })
        .collect()
}

/// Axis label for the n-th connection, naming its algorithm when known
fn axis_label(index: usize, series: &ThroughputSeries) -> String {
    match &series.flow {
        Some(flow) => format!("Connection {} Throughput (Mbps) ({})", index, flow.algorithm_label()),
        None => format!("Connection {} Throughput (Mbps)", index),
    }
}

/// Split the line `from -> to` into evenly spaced dashes
fn dashes(from: Point, to: Point, count: usize) -> Vec<Vec<Point>> {
    let step = 1.0 / (2 * count - 1) as f64;
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..count)
        .map(|i| {
            let start = 2.0 * i as f64 * step;
            vec![lerp(start), lerp(start + step)]
        })
        .collect()
}

/// Full-utilization line `x + y = C`, drawn dashed
fn utilization_dashes(capacity_mbps: Mbps) -> Vec<Vec<Point>> {
    dashes((0.0, capacity_mbps), (capacity_mbps, 0.0), DASH_COUNT)
}

/// Equal-share diagonal, drawn solid with an arrow head at `(C, C)`
fn equal_share_line(capacity_mbps: Mbps) -> Segment {
    Segment {
        from: (0.0, 0.0),
        to: (capacity_mbps, capacity_mbps),
    }
}

/// Render the throughput trajectory of two flows to an SVG file.
///
/// Both series are truncated to the shorter length first. The file is
/// overwritten if it exists. Fails without writing anything when either
/// series is empty after truncation or the capacity is not a positive number.
pub fn plot_throughput_pair(
    first: &ThroughputSeries,
    second: &ThroughputSeries,
    capacity_mbps: Mbps,
    output: &Path,
) -> Result<()> {
    if !(capacity_mbps.is_finite() && capacity_mbps > 0.0) {
        return Err(AnalysisError::InvalidCapacity(capacity_mbps).into());
    }

    let (x, y) = align_pair(first.samples(), second.samples());
    for (samples, series) in [(x, first), (y, second)] {
        if samples.is_empty() {
            return Err(AnalysisError::EmptySeries { label: series.label() }.into());
        }
    }

    let segments = trajectory_segments(x, y);
    let peak = x.iter().chain(y).copied().fold(capacity_mbps, f64::max);
    let axis_max = peak * 1.05;
    let head_len = axis_max * HEAD_FRACTION;

    log::info!(
        "Plotting {} intervals ({} arrows) against {} Mbps capacity",
        x.len(),
        segments.len(),
        capacity_mbps
    );

    let root = SVGBackend::new(output, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..axis_max, 0f64..axis_max)?;

    chart
        .configure_mesh()
        .x_desc(axis_label(1, first))
        .y_desc(axis_label(2, second))
        .draw()?;

    let trajectory_style = BLUE.stroke_width(1);
    chart
        .draw_series(
            segments
                .iter()
                .map(|s| PathElement::new(vec![s.from, s.to], trajectory_style)),
        )?
        .label("Throughput trajectory")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], trajectory_style));
    chart.draw_series(
        segments
            .iter()
            .filter_map(|s| s.head(head_len))
            .map(|head| Polygon::new(head.to_vec(), BLUE.filled())),
    )?;

    let reference_style = BLACK.stroke_width(2);
    chart
        .draw_series(
            utilization_dashes(capacity_mbps)
                .into_iter()
                .map(|dash| PathElement::new(dash, reference_style)),
        )?
        .label("Full bandwidth utilization line")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 8, y)], reference_style)
        });

    let diagonal = equal_share_line(capacity_mbps);
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![diagonal.from, diagonal.to],
            reference_style,
        )))?
        .label("Equal bandwidth share")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));
    chart.draw_series(
        diagonal
            .head(head_len * 1.5)
            .map(|head| Polygon::new(head.to_vec(), BLACK.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write plot to {}", output.display()))?;

    log::info!("Plot written to {}", output.display());
    Ok(())
}
