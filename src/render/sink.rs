//! The path-sink capability and the sinks this crate ships.
//!
//! A [`PathSink`] receives drawing operations in target units. Backends
//! (a Cairo/Skia path, a GPU tessellator) implement it directly; for tests
//! and offline use, `Vec<DrawOp>` records the operations.

use glam::{DAffine2, DVec2};

/// Receiver of drawing operations.
pub trait PathSink {
    fn move_to(&mut self, to: DVec2);
    fn line_to(&mut self, to: DVec2);
    fn curve_to(&mut self, to: DVec2, control1: DVec2, control2: DVec2);
    fn close(&mut self);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    MoveTo(DVec2),
    LineTo(DVec2),
    CurveTo {
        to: DVec2,
        control1: DVec2,
        control2: DVec2,
    },
    Close,
}

impl DrawOp {
    /// The same operation with every point mapped through `transform`.
    pub fn transformed(self, transform: &DAffine2) -> DrawOp {
        match self {
            DrawOp::MoveTo(to) => DrawOp::MoveTo(transform.transform_point2(to)),
            DrawOp::LineTo(to) => DrawOp::LineTo(transform.transform_point2(to)),
            DrawOp::CurveTo {
                to,
                control1,
                control2,
            } => DrawOp::CurveTo {
                to: transform.transform_point2(to),
                control1: transform.transform_point2(control1),
                control2: transform.transform_point2(control2),
            },
            DrawOp::Close => DrawOp::Close,
        }
    }

    /// Where the pen is after this operation, if the operation says.
    pub fn end_point(&self) -> Option<DVec2> {
        match self {
            DrawOp::MoveTo(to) | DrawOp::LineTo(to) | DrawOp::CurveTo { to, .. } => Some(*to),
            DrawOp::Close => None,
        }
    }

    /// Send this operation to another sink.
    pub fn replay(&self, sink: &mut dyn PathSink) {
        match *self {
            DrawOp::MoveTo(to) => sink.move_to(to),
            DrawOp::LineTo(to) => sink.line_to(to),
            DrawOp::CurveTo {
                to,
                control1,
                control2,
            } => sink.curve_to(to, control1, control2),
            DrawOp::Close => sink.close(),
        }
    }
}

impl PathSink for Vec<DrawOp> {
    fn move_to(&mut self, to: DVec2) {
        self.push(DrawOp::MoveTo(to));
    }

    fn line_to(&mut self, to: DVec2) {
        self.push(DrawOp::LineTo(to));
    }

    fn curve_to(&mut self, to: DVec2, control1: DVec2, control2: DVec2) {
        self.push(DrawOp::CurveTo {
            to,
            control1,
            control2,
        });
    }

    fn close(&mut self) {
        self.push(DrawOp::Close);
    }
}

/// Forwards to another sink after applying an affine transform.
pub struct TransformSink<'a> {
    inner: &'a mut dyn PathSink,
    transform: DAffine2,
}

impl<'a> TransformSink<'a> {
    pub fn new(inner: &'a mut dyn PathSink, transform: DAffine2) -> Self {
        TransformSink { inner, transform }
    }

    fn map(&self, p: DVec2) -> DVec2 {
        self.transform.transform_point2(p)
    }
}

impl PathSink for TransformSink<'_> {
    fn move_to(&mut self, to: DVec2) {
        let to = self.map(to);
        self.inner.move_to(to);
    }

    fn line_to(&mut self, to: DVec2) {
        let to = self.map(to);
        self.inner.line_to(to);
    }

    fn curve_to(&mut self, to: DVec2, control1: DVec2, control2: DVec2) {
        let (to, control1, control2) = (self.map(to), self.map(control1), self.map(control2));
        self.inner.curve_to(to, control1, control2);
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
