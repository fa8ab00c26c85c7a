//! Parsed path segments.
//!
//! One variant per path-data command. Segments only record what was written;
//! resolving relative coordinates, reflecting control points and scaling all
//! happen when a segment is evaluated against a [`PriorContext`].

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::render::context::PriorContext;
use crate::render::sink::PathSink;
use crate::types::Scale;

/// Whether a command's coordinates are absolute (uppercase letter) or
/// relative to the current point (lowercase letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,
    Relative,
}

impl Mode {
    /// Resolve `point` against `origin` (the current point).
    #[inline]
    pub fn resolve(self, origin: DVec2, point: DVec2) -> DVec2 {
        match self {
            Mode::Absolute => point,
            Mode::Relative => origin + point,
        }
    }

    /// Resolve a single coordinate.
    #[inline]
    pub fn resolve_scalar(self, origin: f64, value: f64) -> f64 {
        match self {
            Mode::Absolute => value,
            Mode::Relative => origin + value,
        }
    }

    /// The command letter for this mode, given the uppercase form.
    pub fn letter(self, upper: char) -> char {
        match self {
            Mode::Absolute => upper,
            Mode::Relative => upper.to_ascii_lowercase(),
        }
    }
}

/// Emit a segment's drawing operations and produce the context for the
/// segment after it.
#[enum_dispatch]
pub trait Evaluate {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext;
}

/// `M` / `m`: start a new subpath.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTo {
    pub mode: Mode,
    pub to: DVec2,
}

/// `L` / `l`, and the extra coordinate pairs after a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTo {
    pub mode: Mode,
    pub to: DVec2,
}

/// `H` / `h`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLineTo {
    pub mode: Mode,
    pub x: f64,
}

/// `V` / `v`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLineTo {
    pub mode: Mode,
    pub y: f64,
}

/// `C` / `c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTo {
    pub mode: Mode,
    pub control1: DVec2,
    pub control2: DVec2,
    pub to: DVec2,
}

/// `S` / `s`: first control point is the reflection of the previous
/// cubic's second control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothCubicTo {
    pub mode: Mode,
    pub control2: DVec2,
    pub to: DVec2,
}

/// `Q` / `q`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticTo {
    pub mode: Mode,
    pub control: DVec2,
    pub to: DVec2,
}

/// `T` / `t`: control point is the reflection of the previous quadratic's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothQuadraticTo {
    pub mode: Mode,
    pub to: DVec2,
}

/// `A` / `a`: elliptical arc in endpoint form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcTo {
    pub mode: Mode,
    pub radii: DVec2,
    /// Rotation of the ellipse's x axis, in degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: DVec2,
}

/// `Z` / `z`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClosePath;

/// A single parsed path-data command.
#[enum_dispatch(Evaluate)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(MoveTo),
    LineTo(LineTo),
    HorizontalLineTo(HorizontalLineTo),
    VerticalLineTo(VerticalLineTo),
    CubicTo(CubicTo),
    SmoothCubicTo(SmoothCubicTo),
    QuadraticTo(QuadraticTo),
    SmoothQuadraticTo(SmoothQuadraticTo),
    ArcTo(ArcTo),
    ClosePath(ClosePath),
}

fn write_point(f: &mut fmt::Formatter<'_>, p: DVec2) -> fmt::Result {
    write!(f, "{},{}", p.x, p.y)
}

/// Writes the segment back as path data. Every segment carries its own
/// command letter, so concatenating segments separated by spaces parses back
/// to the same list.
impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::MoveTo(s) => {
                write!(f, "{}", s.mode.letter('M'))?;
                write_point(f, s.to)
            }
            PathSegment::LineTo(s) => {
                write!(f, "{}", s.mode.letter('L'))?;
                write_point(f, s.to)
            }
            PathSegment::HorizontalLineTo(s) => write!(f, "{}{}", s.mode.letter('H'), s.x),
            PathSegment::VerticalLineTo(s) => write!(f, "{}{}", s.mode.letter('V'), s.y),
            PathSegment::CubicTo(s) => {
                write!(f, "{}", s.mode.letter('C'))?;
                write_point(f, s.control1)?;
                f.write_str(" ")?;
                write_point(f, s.control2)?;
                f.write_str(" ")?;
                write_point(f, s.to)
            }
            PathSegment::SmoothCubicTo(s) => {
                write!(f, "{}", s.mode.letter('S'))?;
                write_point(f, s.control2)?;
                f.write_str(" ")?;
                write_point(f, s.to)
            }
            PathSegment::QuadraticTo(s) => {
                write!(f, "{}", s.mode.letter('Q'))?;
                write_point(f, s.control)?;
                f.write_str(" ")?;
                write_point(f, s.to)
            }
            PathSegment::SmoothQuadraticTo(s) => {
                write!(f, "{}", s.mode.letter('T'))?;
                write_point(f, s.to)
            }
            PathSegment::ArcTo(s) => {
                write!(
                    f,
                    "{}{},{} {} {},{} ",
                    s.mode.letter('A'),
                    s.radii.x,
                    s.radii.y,
                    s.x_axis_rotation,
                    u8::from(s.large_arc),
                    u8::from(s.sweep),
                )?;
                write_point(f, s.to)
            }
            PathSegment::ClosePath(_) => f.write_str("Z"),
        }
    }
}
