//! SVG chart of observed versus theoretical speedup
//!
//! The visible region is the report's bounds padded by 5% on each side.
//! Theoretical series are clipped to it; markers outside it are skipped.

use crate::report::{PlotBounds, PointSeries, ScalingReport, SeriesStyle};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;
const Y_TICKS: usize = 5;

/// Line colours for theoretical series, cycled
const PALETTE: [&str; 6] = [
    "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
];
const ACTUAL_COLOR: &str = "#1f77b4";

/// SVG chart renderer
#[derive(Debug, Clone)]
pub struct SvgChart {
    width: f64,
    height: f64,
    padding: f64,
}

impl Default for SvgChart {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

/// Maps data coordinates into the plot area
struct Frame {
    view: PlotBounds,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn x(&self, x: f64) -> f64 {
        self.left + (x - self.view.x_min) / (self.view.x_max - self.view.x_min) * self.width
    }

    fn y(&self, y: f64) -> f64 {
        self.top + (self.view.y_max - y) / (self.view.y_max - self.view.y_min) * self.height
    }
}

impl SvgChart {
    /// Create a chart renderer with the given canvas size in pixels
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: 0.05,
        }
    }

    /// Escape XML special characters
    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn frame(&self, bounds: &PlotBounds) -> Frame {
        Frame {
            view: bounds.padded(self.padding),
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: self.width - MARGIN_LEFT - MARGIN_RIGHT,
            height: self.height - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    /// Integer process counts for the x axis, at most ten of them
    fn x_ticks(view: &PlotBounds) -> Vec<f64> {
        let lo = view.x_min.ceil().max(1.0);
        let hi = view.x_max.floor();
        if hi < lo {
            return Vec::new();
        }
        let step = ((hi - lo) / 10.0).ceil().max(1.0);
        let mut ticks = Vec::new();
        let mut tick = lo;
        while tick <= hi {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }

    fn y_ticks(view: &PlotBounds) -> Vec<f64> {
        let step = (view.y_max - view.y_min) / Y_TICKS as f64;
        (0..=Y_TICKS).map(|i| view.y_min + step * i as f64).collect()
    }

    fn render_axes(&self, svg: &mut String, frame: &Frame, report: &ScalingReport) {
        let bottom = frame.top + frame.height;

        let _ = writeln!(
            svg,
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
            frame.left, frame.top, frame.width, frame.height
        );

        for tick in Self::x_ticks(&frame.view) {
            let x = frame.x(tick);
            let _ = writeln!(
                svg,
                r#"  <line x1="{x:.1}" y1="{bottom:.1}" x2="{x:.1}" y2="{:.1}" stroke="black"/>"#,
                bottom + 5.0
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" class="tick">{}</text>"#,
                bottom + 18.0,
                tick
            );
        }

        for tick in Self::y_ticks(&frame.view) {
            let y = frame.y(tick);
            let _ = writeln!(
                svg,
                r#"  <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="black"/>"#,
                frame.left - 5.0,
                frame.left
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" class="tick">{:.2}</text>"#,
                frame.left - 8.0,
                y + 4.0,
                tick
            );
        }

        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" class="title">{}</text>"#,
            frame.left + frame.width / 2.0,
            MARGIN_TOP / 2.0 + 5.0,
            Self::escape_xml(&report.title)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" class="label">{}</text>"#,
            frame.left + frame.width / 2.0,
            self.height - 12.0,
            Self::escape_xml(&report.x_label)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="18" y="{:.1}" text-anchor="middle" class="label" transform="rotate(-90 18 {:.1})">{}</text>"#,
            frame.top + frame.height / 2.0,
            frame.top + frame.height / 2.0,
            Self::escape_xml(&report.y_label)
        );
    }

    fn render_series(svg: &mut String, frame: &Frame, series: &PointSeries, color: &str) {
        match series.style {
            SeriesStyle::Markers => {
                for &(x, y) in &series.points {
                    let _ = writeln!(
                        svg,
                        r#"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}" class="actual"/>"#,
                        frame.x(x),
                        frame.y(y),
                        color
                    );
                }
            }
            SeriesStyle::Dotted => {
                let points: Vec<String> = series
                    .points
                    .iter()
                    .map(|&(x, y)| format!("{:.1},{:.1}", frame.x(x), frame.y(y)))
                    .collect();
                let _ = writeln!(
                    svg,
                    r#"  <polyline points="{}" fill="none" stroke="{}" stroke-dasharray="2,3" clip-path="url(#plot-area)" class="theory"/>"#,
                    points.join(" "),
                    color
                );
                for &(x, y) in series.points.iter().filter(|&&(x, y)| frame.view.contains(x, y)) {
                    let _ = writeln!(
                        svg,
                        r#"  <rect x="{:.1}" y="{:.1}" width="4" height="4" fill="{}"/>"#,
                        frame.x(x) - 2.0,
                        frame.y(y) - 2.0,
                        color
                    );
                }
            }
        }
    }

    fn render_legend(svg: &mut String, frame: &Frame, entries: &[(&PointSeries, &str)]) {
        let x = frame.left + 10.0;
        for (i, (series, color)) in entries.iter().enumerate() {
            let y = frame.top + 16.0 + 16.0 * i as f64;
            match series.style {
                SeriesStyle::Markers => {
                    let _ = writeln!(
                        svg,
                        r#"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
                        x + 10.0,
                        y - 4.0,
                        color
                    );
                }
                SeriesStyle::Dotted => {
                    let _ = writeln!(
                        svg,
                        r#"  <line x1="{x:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="2,3"/>"#,
                        y - 4.0,
                        x + 20.0,
                        y - 4.0,
                        color
                    );
                }
            }
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{y:.1}" class="legend">{}</text>"#,
                x + 26.0,
                Self::escape_xml(&series.label)
            );
        }
    }

    /// Generate the complete SVG document
    pub fn to_svg(&self, report: &ScalingReport) -> String {
        let frame = self.frame(&report.bounds);
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str("  <style>text { font-family: sans-serif; font-size: 12px; } .title { font-size: 15px; } .tick { font-size: 10px; }</style>\n");
        let _ = writeln!(
            svg,
            r#"  <defs><clipPath id="plot-area"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"/></clipPath></defs>"#,
            frame.left, frame.top, frame.width, frame.height
        );
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

        self.render_axes(&mut svg, &frame, report);

        // Theory underneath the measured points
        let mut legend: Vec<(&PointSeries, &str)> = vec![(&report.actual, ACTUAL_COLOR)];
        for (i, series) in report.theory.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            Self::render_series(&mut svg, &frame, series, color);
            legend.push((series, color));
        }
        Self::render_series(&mut svg, &frame, &report.actual, ACTUAL_COLOR);
        Self::render_legend(&mut svg, &frame, &legend);

        svg.push_str("</svg>\n");
        svg
    }

    /// Render and write the chart to `path`
    pub fn write_to_file<P: AsRef<Path>>(&self, report: &ScalingReport, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_svg(report))
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote speedup chart");
        Ok(())
    }
}
