//! SVG Plotting of Recorded Trajectories
//!
//! Renders [`Trajectory`](crate::trace::Trajectory) data as self-contained
//! SVG line charts, built directly as strings. [`LinePlot`] covers both
//! pictures the bilinear comparison needs: the phase-plane path
//! (`trace.path()`) and the objective value against iteration
//! (`trace.values()`).

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering or saving a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: {0}")]
    Empty(&'static str),

    #[error("non-finite coordinate in series `{0}`")]
    NonFinite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plotting operations.
pub type PlotResult<T> = Result<T, PlotError>;

const PALETTE: &[&str] = &[
    "steelblue",
    "crimson",
    "seagreen",
    "darkorange",
    "mediumpurple",
];

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 48.0;
const NTICKS: usize = 5;

#[derive(Clone, Debug)]
struct Series {
    label: String,
    points: Vec<(f64, f64)>,
}

/// A titled multi-series line chart rendered as an SVG string.
///
/// Series are drawn in insertion order with colors from a fixed palette.
/// Data bounds are computed over all series and padded; a constant series
/// gets a widened range rather than an error.
pub struct LinePlot {
    title: String,
    x_label: String,
    y_label: String,
    width: u32,
    height: u32,
    series: Vec<Series>,
}

impl LinePlot {
    pub fn new(title: &str) -> LinePlot {
        LinePlot {
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            width: 640,
            height: 480,
            series: Vec::new(),
        }
    }

    pub fn labels(mut self, x_label: &str, y_label: &str) -> LinePlot {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> LinePlot {
        self.width = width;
        self.height = height;
        self
    }

    /// Append a named polyline in data coordinates.
    pub fn series(mut self, label: &str, points: Vec<(f64, f64)>) -> LinePlot {
        self.series.push(Series {
            label: label.to_string(),
            points,
        });
        self
    }

    /// Render as SVG.
    pub fn render_svg(&self) -> PlotResult<String> {
        if self.series.is_empty() {
            return Err(PlotError::Empty("no series"));
        }
        if self.series.iter().all(|s| s.points.is_empty()) {
            return Err(PlotError::Empty("all series are empty"));
        }
        for s in &self.series {
            if s.points.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
                return Err(PlotError::NonFinite(s.label.clone()));
            }
        }

        let (x_lo, x_hi) = padded_bounds(self.series.iter().flat_map(|s| &s.points).map(|p| p.0));
        let (y_lo, y_hi) = padded_bounds(self.series.iter().flat_map(|s| &s.points).map(|p| p.1));

        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let plot_w = w - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = h - MARGIN_TOP - MARGIN_BOTTOM;
        let px = |x: f64| MARGIN_LEFT + (x - x_lo) / (x_hi - x_lo) * plot_w;
        let py = |y: f64| MARGIN_TOP + (y_hi - y) / (y_hi - y_lo) * plot_h;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
            self.width, self.height
        );

        // background and plot area
        svg.push_str(&format!(
            r##"<rect width="{}" height="{}" fill="#fafafa"/>"##,
            self.width, self.height
        ));
        svg.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="white" stroke="#ccc"/>"##,
            MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h
        ));

        // title
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="22" text-anchor="middle" font-size="14" font-weight="bold">{}</text>"#,
            w / 2.0,
            self.title
        ));

        // ticks with labels on both axes
        for i in 0..NTICKS {
            let t = i as f64 / (NTICKS - 1) as f64;
            let xv = x_lo + t * (x_hi - x_lo);
            let yv = y_lo + t * (y_hi - y_lo);

            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333"/>"##,
                px(xv),
                MARGIN_TOP + plot_h,
                px(xv),
                MARGIN_TOP + plot_h + 4.0
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{}</text>"#,
                px(xv),
                MARGIN_TOP + plot_h + 16.0,
                fmt_tick(xv)
            ));

            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333"/>"##,
                MARGIN_LEFT - 4.0,
                py(yv),
                MARGIN_LEFT,
                py(yv)
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="10">{}</text>"#,
                MARGIN_LEFT - 8.0,
                py(yv),
                fmt_tick(yv)
            ));
        }

        // dashed zero lines when the origin is in view
        if y_lo < 0.0 && 0.0 < y_hi {
            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#999" stroke-dasharray="4,3"/>"##,
                MARGIN_LEFT,
                py(0.0),
                MARGIN_LEFT + plot_w,
                py(0.0)
            ));
        }
        if x_lo < 0.0 && 0.0 < x_hi {
            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#999" stroke-dasharray="4,3"/>"##,
                px(0.0),
                MARGIN_TOP,
                px(0.0),
                MARGIN_TOP + plot_h
            ));
        }

        // one polyline per series
        for (i, s) in self.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let mut points = String::new();
            for &(x, y) in &s.points {
                let _ = write!(points, "{:.2},{:.2} ", px(x), py(y));
            }
            svg.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
                points.trim_end(),
                color
            ));
        }

        // legend, top-right inside the plot area
        for (i, s) in self.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let ly = MARGIN_TOP + 16.0 + 16.0 * i as f64;
            let lx = MARGIN_LEFT + plot_w - 110.0;
            svg.push_str(&format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
                lx,
                ly,
                lx + 18.0,
                ly,
                color
            ));
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" dominant-baseline="middle" font-size="11">{}</text>"#,
                lx + 24.0,
                ly,
                s.label
            ));
        }

        // axis labels
        if !self.x_label.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
                MARGIN_LEFT + plot_w / 2.0,
                h - 10.0,
                self.x_label
            ));
        }
        if !self.y_label.is_empty() {
            svg.push_str(&format!(
                r#"<text x="16" y="{:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 16 {:.1})">{}</text>"#,
                MARGIN_TOP + plot_h / 2.0,
                MARGIN_TOP + plot_h / 2.0,
                self.y_label
            ));
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Render and write to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PlotResult<()> {
        let svg = self.render_svg()?;
        fs::write(path, svg)?;
        Ok(())
    }
}

/// Data bounds padded by 5%; a zero-span range is widened instead.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    if span > 0.0 {
        (lo - 0.05 * span, hi + 0.05 * span)
    } else {
        let pad = 0.5 * lo.abs().max(1.0);
        (lo - pad, hi + pad)
    }
}

fn fmt_tick(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1000.0 || v.abs() < 0.01 {
        format!("{:.1e}", v)
    } else {
        format!("{:.2}", v)
    }
}
