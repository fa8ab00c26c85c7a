//! SVG path-data output
//!
//! Writes drawing operations back out as an SVG `d` attribute, which is how
//! tests and the demo inspect rendered geometry without a graphics backend.

use glam::DVec2;

use super::defaults;
use super::sink::{DrawOp, PathSink};

/// A [`PathSink`] that accumulates SVG path data.
///
/// Commands are absolute and separated by single spaces, for example
/// `M300 70 L300 0 Z`.
#[derive(Debug, Default, Clone)]
pub struct SvgPathWriter {
    data: String,
}

impl SvgPathWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path data written so far.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn finish(self) -> String {
        self.data
    }

    fn command(&mut self, letter: char, points: &[DVec2]) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(letter);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.data.push(' ');
            }
            self.data.push_str(&fmt_num(p.x));
            self.data.push(' ');
            self.data.push_str(&fmt_num(p.y));
        }
    }
}

impl PathSink for SvgPathWriter {
    fn move_to(&mut self, to: DVec2) {
        self.command('M', &[to]);
    }

    fn line_to(&mut self, to: DVec2) {
        self.command('L', &[to]);
    }

    fn curve_to(&mut self, to: DVec2, control1: DVec2, control2: DVec2) {
        self.command('C', &[control1, control2, to]);
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }
}

/// SVG path data for a recorded operation list.
pub fn path_data(ops: &[DrawOp]) -> String {
    let mut writer = SvgPathWriter::new();
    for op in ops {
        op.replay(&mut writer);
    }
    writer.finish()
}

/// Format a number with [`defaults::SVG_PRECISION`] significant figures,
/// trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, defaults::SVG_PRECISION)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if !value.is_finite() || value.abs() < defaults::SVG_ZERO_EPSILON {
        return "0".to_string();
    }

    // Round to specified significant figures
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
