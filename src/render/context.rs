//! Cursor state threaded between path segments.

use glam::DVec2;

use super::geometry::reflect;

/// Which kind of curve produced the remembered control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Cubic,
    Quadratic,
}

/// Trailing control point of the previous curve segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveControl {
    pub kind: CurveKind,
    pub point: DVec2,
}

impl CurveControl {
    pub fn cubic(point: DVec2) -> Self {
        CurveControl {
            kind: CurveKind::Cubic,
            point,
        }
    }

    pub fn quadratic(point: DVec2) -> Self {
        CurveControl {
            kind: CurveKind::Quadratic,
            point,
        }
    }
}

/// Cursor state in document (viewport) units.
///
/// Every path starts from [`PriorContext::ZERO`]; contexts are never shared
/// between paths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriorContext {
    /// Current point
    pub point: DVec2,
    /// Start of the current subpath; close-path returns here
    pub start: DVec2,
    /// Set only when the previous segment was a curve
    pub control: Option<CurveControl>,
}

impl PriorContext {
    pub const ZERO: PriorContext = PriorContext {
        point: DVec2::ZERO,
        start: DVec2::ZERO,
        control: None,
    };

    /// Context at the start of a new subpath.
    pub fn at(point: DVec2) -> Self {
        PriorContext {
            point,
            start: point,
            control: None,
        }
    }

    /// After a straight segment (or arc) ending at `point`.
    pub fn line_to(self, point: DVec2) -> Self {
        PriorContext {
            point,
            start: self.start,
            control: None,
        }
    }

    /// After a curve ending at `point`.
    pub fn curve_to(self, point: DVec2, control: CurveControl) -> Self {
        PriorContext {
            point,
            start: self.start,
            control: Some(control),
        }
    }

    /// After close-path: back at the subpath start, no curve to reflect.
    pub fn closed(self) -> Self {
        PriorContext::at(self.start)
    }

    /// Implicit control point for a smooth curve of the given kind.
    ///
    /// The previous control point mirrored about the current point when the
    /// previous segment was the same kind of curve, otherwise the current
    /// point itself.
    pub fn reflected_control(&self, kind: CurveKind) -> DVec2 {
        match self.control {
            Some(control) if control.kind == kind => reflect(control.point, self.point),
            _ => self.point,
        }
    }
}
