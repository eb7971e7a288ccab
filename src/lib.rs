use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
pub mod plot;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Timestamp format used by the benchmark runner in history rows
/// and in the default output filename.
pub const TS_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const MODE_BASELINE: &str = "baseline";
pub const MODE_PROFILED: &str = "profiled";

pub const COLOR_BASELINE: &str = "#22c55e";
pub const COLOR_PROFILED: &str = "#38bdf8";

pub const CANVAS_W: f64 = 1000.0;
pub const CANVAS_H: f64 = 520.0;
pub const MARGIN_LEFT: f64 = 70.0;
pub const MARGIN_RIGHT: f64 = 30.0;
pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_BOTTOM: f64 = 70.0;
pub const PLOT_W: f64 = CANVAS_W - MARGIN_LEFT - MARGIN_RIGHT;
pub const PLOT_H: f64 = CANVAS_H - MARGIN_TOP - MARGIN_BOTTOM;

/// Lowest allowed y-axis ceiling, keeps the scale readable
/// when every sample is near zero.
pub const Y_FLOOR: f64 = 10.0;

const Y_TICKS: usize = 6;

#[derive(Debug, Deserialize)]
struct Record {
    timestamp: String,
    mode: String,
    max_us: f64,
    avg_us: f64,
    min_us: f64,
}

/// One benchmark observation from the history csv.
#[derive(Debug, Clone)]
pub struct Sample {
    pub timestamp: String,
    pub dt: NaiveDateTime,
    pub mode: String,
    pub max_us: f64,
    pub avg_us: f64,
    pub min_us: f64,
}

/// The main struct for the latency benchmark history
#[derive(Debug, Clone)]
pub struct BenchHistory {
    pub samples: Vec<Sample>,
}

impl BenchHistory {
    pub fn new(capacity: usize) -> BenchHistory {
        BenchHistory {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Init a BenchHistory from csv, sorted ascending by timestamp.
    /// Rows are matched to columns by header name, extra columns are ignored.
    /// Rows that fail to parse (missing field, non-numeric statistic,
    /// malformed timestamp) are skipped.
    pub fn from_csv(fin: &Path) -> Result<BenchHistory> {
        let mut reader = csv::Reader::from_path(fin)?;
        let mut history = BenchHistory::new(256);
        for row in reader.deserialize() {
            let record: Record = match row {
                Ok(r) => r,
                Err(_) => continue,
            };
            let dt = match NaiveDateTime::parse_from_str(&record.timestamp, TS_FORMAT) {
                Ok(dt) => dt,
                Err(_) => continue,
            };
            history.samples.push(Sample {
                timestamp: record.timestamp,
                dt,
                mode: record.mode,
                max_us: record.max_us,
                avg_us: record.avg_us,
                min_us: record.min_us,
            });
        }
        history.samples.sort_by_key(|s| s.dt);
        Ok(history)
    }

    /// Splits the history into the baseline and profiled series,
    /// keeping timestamp order; samples with any other mode are left out.
    pub fn split_modes(&self) -> (Vec<&Sample>, Vec<&Sample>) {
        let baseline = self
            .samples
            .iter()
            .filter(|s| s.mode == MODE_BASELINE)
            .collect();
        let profiled = self
            .samples
            .iter()
            .filter(|s| s.mode == MODE_PROFILED)
            .collect();
        (baseline, profiled)
    }

    /// Y-axis ceiling: the largest max_us over all samples, floored at Y_FLOOR.
    pub fn scale_max(&self) -> f64 {
        self.samples.iter().map(|s| s.max_us).fold(Y_FLOOR, f64::max)
    }

    /// Renders the history as a fixed-size svg document.
    pub fn to_svg(&self, source: &str) -> String {
        let (baseline, profiled) = self.split_modes();
        let max_y = self.scale_max();
        let n = baseline.len().max(profiled.len()).max(1);

        let mut parts: Vec<String> = Vec::new();
        parts.push(format!(
            r##"<rect x="0" y="0" width="{}" height="{}" fill="#0f172a" />"##,
            CANVAS_W, CANVAS_H
        ));
        parts.push(format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#111827" stroke="#334155" />"##,
            MARGIN_LEFT, MARGIN_TOP, PLOT_W, PLOT_H
        ));

        for t in 0..=Y_TICKS {
            let tv = max_y * t as f64 / Y_TICKS as f64;
            let y = y_position(tv, max_y);
            parts.push(format!(
                r##"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" stroke="#1f2937" />"##,
                MARGIN_LEFT,
                y,
                MARGIN_LEFT + PLOT_W,
                y
            ));
            parts.push(format!(
                r##"<text x="{}" y="{:.1}" fill="#94a3b8" font-size="12" text-anchor="end">{:.0}</text>"##,
                MARGIN_LEFT - 10.0,
                y + 4.0,
                tv
            ));
        }

        if let Some(line) = svg_polyline(&baseline, COLOR_BASELINE, n, max_y) {
            parts.push(line);
        }
        if let Some(line) = svg_polyline(&profiled, COLOR_PROFILED, n, max_y) {
            parts.push(line);
        }

        for (i, s) in baseline.iter().enumerate() {
            parts.push(format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}" />"##,
                x_position(i, n),
                y_position(s.max_us, max_y),
                COLOR_BASELINE
            ));
        }
        for (i, s) in profiled.iter().enumerate() {
            parts.push(format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}" />"##,
                x_position(i, n),
                y_position(s.max_us, max_y),
                COLOR_PROFILED
            ));
        }

        parts.push(String::from(
            r##"<text x="24" y="28" fill="#e5e7eb" font-size="20" font-family="monospace">RT Latency Max(us) Trend</text>"##,
        ));
        parts.push(String::from(
            r##"<text x="24" y="48" fill="#94a3b8" font-size="12" font-family="monospace">green=baseline blue=profiled</text>"##,
        ));
        parts.push(format!(
            r##"<text x="{}" y="{}" fill="#94a3b8" font-size="12" font-family="monospace">samples={}  source={}</text>"##,
            MARGIN_LEFT,
            CANVAS_H - 18.0,
            self.samples.len(),
            source
        ));

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"##,
            w = CANVAS_W,
            h = CANVAS_H,
            body = parts.concat()
        )
    }

    /// Renders and writes the svg at the given path,
    /// creating the parent directory if needed.
    pub fn write_svg(&self, fout: &Path, source: &str) -> Result<()> {
        if let Some(parent) = fout.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(fout)?;
        let mut buf = BufWriter::new(file);
        buf.write_all(self.to_svg(source).as_bytes())?;
        Ok(())
    }
}

/// Maps series index i to an x pixel; n points are spread evenly
/// across the plotting width, a lone point sits at the center.
pub fn x_position(i: usize, n: usize) -> f64 {
    if n <= 1 {
        MARGIN_LEFT + PLOT_W / 2.0
    } else {
        MARGIN_LEFT + (i as f64 / (n - 1) as f64) * PLOT_W
    }
}

/// Maps a latency value to a y pixel, larger values closer to the top.
pub fn y_position(v: f64, max_y: f64) -> f64 {
    MARGIN_TOP + (1.0 - v / max_y) * PLOT_H
}

fn svg_polyline(series: &[&Sample], color: &str, n: usize, max_y: f64) -> Option<String> {
    if series.is_empty() {
        return None;
    }
    let coords: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{:.1},{:.1}", x_position(i, n), y_position(s.max_us, max_y)))
        .collect();
    Some(format!(
        r##"<polyline fill="none" stroke="{}" stroke-width="2" points="{}" />"##,
        color,
        coords.join(" ")
    ))
}
