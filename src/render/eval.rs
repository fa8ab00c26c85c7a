//! Segment evaluation
//!
//! Each segment resolves its coordinates against the prior context in
//! document units, scales the result into target units and hands it to the
//! sink. The returned context stays in document units, so chains of relative
//! displacements are never scaled twice.

use glam::DVec2;

use crate::ast::*;
use crate::log::warn;
use crate::types::Scale;

use super::context::{CurveControl, CurveKind, PriorContext};
use super::geometry::{ArcShape, arc_to_cubics, elevate_quadratic};
use super::sink::PathSink;

/// Evaluate `segments` left to right, threading the context through each one.
///
/// Returns the context after the last segment.
pub fn evaluate(
    segments: &[PathSegment],
    initial: PriorContext,
    sink: &mut dyn PathSink,
    scale: Scale,
) -> PriorContext {
    let mut ctx = initial;
    for segment in segments {
        ctx = segment.evaluate(ctx, sink, scale);
    }
    ctx
}

impl Evaluate for MoveTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let to = self.mode.resolve(prior.point, self.to);
        sink.move_to(scale.apply(to));
        PriorContext::at(to)
    }
}

impl Evaluate for LineTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let to = self.mode.resolve(prior.point, self.to);
        sink.line_to(scale.apply(to));
        prior.line_to(to)
    }
}

impl Evaluate for HorizontalLineTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let mut to = prior.point;
        to.x = self.mode.resolve_scalar(prior.point.x, self.x);
        sink.line_to(scale.apply(to));
        prior.line_to(to)
    }
}

impl Evaluate for VerticalLineTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let mut to = prior.point;
        to.y = self.mode.resolve_scalar(prior.point.y, self.y);
        sink.line_to(scale.apply(to));
        prior.line_to(to)
    }
}

impl Evaluate for CubicTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        // All three points are relative to the segment's start
        let control1 = self.mode.resolve(prior.point, self.control1);
        let control2 = self.mode.resolve(prior.point, self.control2);
        let to = self.mode.resolve(prior.point, self.to);
        sink.curve_to(scale.apply(to), scale.apply(control1), scale.apply(control2));
        prior.curve_to(to, CurveControl::cubic(control2))
    }
}

impl Evaluate for SmoothCubicTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let control1 = prior.reflected_control(CurveKind::Cubic);
        let control2 = self.mode.resolve(prior.point, self.control2);
        let to = self.mode.resolve(prior.point, self.to);
        sink.curve_to(scale.apply(to), scale.apply(control1), scale.apply(control2));
        prior.curve_to(to, CurveControl::cubic(control2))
    }
}

fn emit_quadratic(
    prior: PriorContext,
    control: DVec2,
    to: DVec2,
    sink: &mut dyn PathSink,
    scale: Scale,
) -> PriorContext {
    let (control1, control2) = elevate_quadratic(prior.point, control, to);
    sink.curve_to(scale.apply(to), scale.apply(control1), scale.apply(control2));
    prior.curve_to(to, CurveControl::quadratic(control))
}

impl Evaluate for QuadraticTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let control = self.mode.resolve(prior.point, self.control);
        let to = self.mode.resolve(prior.point, self.to);
        emit_quadratic(prior, control, to, sink, scale)
    }
}

impl Evaluate for SmoothQuadraticTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let control = prior.reflected_control(CurveKind::Quadratic);
        let to = self.mode.resolve(prior.point, self.to);
        emit_quadratic(prior, control, to, sink, scale)
    }
}

impl Evaluate for ArcTo {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, scale: Scale) -> PriorContext {
        let to = self.mode.resolve(prior.point, self.to);
        // The arc is built in document space; an axis-aligned scale maps the
        // cubic pieces exactly.
        match arc_to_cubics(
            prior.point,
            to,
            self.radii,
            self.x_axis_rotation,
            self.large_arc,
            self.sweep,
        ) {
            ArcShape::Omitted => {
                warn!(point = %to, "arc endpoints coincide, arc omitted");
            }
            ArcShape::Line => {
                warn!(radii = %self.radii, "arc with zero radius drawn as a line");
                sink.line_to(scale.apply(to));
            }
            ArcShape::Curves(pieces) => {
                for piece in pieces {
                    sink.curve_to(
                        scale.apply(piece.to),
                        scale.apply(piece.control1),
                        scale.apply(piece.control2),
                    );
                }
            }
        }
        prior.line_to(to)
    }
}

impl Evaluate for ClosePath {
    fn evaluate(&self, prior: PriorContext, sink: &mut dyn PathSink, _scale: Scale) -> PriorContext {
        sink.close();
        prior.closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sink::DrawOp;
    use glam::dvec2;

    fn run(segments: &[PathSegment], scale: Scale) -> (Vec<DrawOp>, PriorContext) {
        let mut ops: Vec<DrawOp> = Vec::new();
        let ctx = evaluate(segments, PriorContext::ZERO, &mut ops, scale);
        (ops, ctx)
    }

    fn move_to(mode: Mode, x: f64, y: f64) -> PathSegment {
        PathSegment::from(MoveTo {
            mode,
            to: dvec2(x, y),
        })
    }

    fn line_to(mode: Mode, x: f64, y: f64) -> PathSegment {
        PathSegment::from(LineTo {
            mode,
            to: dvec2(x, y),
        })
    }

    #[test]
    fn relative_offsets_resolve_before_scaling() {
        let segments = [move_to(Mode::Absolute, 10.0, 10.0), line_to(Mode::Relative, 5.0, 0.0)];
        let scale = Scale::uniform(2.0).unwrap();
        let (ops, ctx) = run(&segments, scale);
        assert_eq!(
            ops,
            vec![DrawOp::MoveTo(dvec2(20.0, 20.0)), DrawOp::LineTo(dvec2(30.0, 20.0))]
        );
        // context stays in document units
        assert_eq!(ctx.point, dvec2(15.0, 10.0));
    }

    #[test]
    fn non_uniform_scale_applies_per_axis() {
        let segments = [
            move_to(Mode::Absolute, 10.0, 10.0),
            line_to(Mode::Relative, 5.0, 5.0),
            line_to(Mode::Relative, 5.0, 5.0),
        ];
        let (ops, _) = run(&segments, Scale::try_new(2.0, 0.5).unwrap());
        assert_eq!(ops[2], DrawOp::LineTo(dvec2(40.0, 10.0)));
    }

    #[test]
    fn line_back_to_start_then_close() {
        let segments = [
            move_to(Mode::Absolute, 3.0, 4.0),
            line_to(Mode::Absolute, 9.0, 4.0),
            line_to(Mode::Absolute, 3.0, 4.0),
            PathSegment::from(ClosePath),
        ];
        let (ops, ctx) = run(&segments, Scale::IDENTITY);
        assert_eq!(ops.first().and_then(DrawOp::end_point), Some(dvec2(3.0, 4.0)));
        assert_eq!(ops[2].end_point(), Some(dvec2(3.0, 4.0)));
        assert_eq!(ops[3], DrawOp::Close);
        assert_eq!(ctx, PriorContext::at(dvec2(3.0, 4.0)));
    }

    #[test]
    fn close_returns_current_point_to_subpath_start() {
        let segments = [
            move_to(Mode::Absolute, 1.0, 1.0),
            line_to(Mode::Relative, 10.0, 0.0),
            PathSegment::from(ClosePath),
            line_to(Mode::Relative, 0.0, 5.0),
        ];
        let (ops, _) = run(&segments, Scale::IDENTITY);
        assert_eq!(ops[3], DrawOp::LineTo(dvec2(1.0, 6.0)));
    }

    #[test]
    fn repeated_relative_lines_chain() {
        let segments = [
            line_to(Mode::Relative, 1.0, 0.0),
            line_to(Mode::Relative, 2.0, 1.0),
            line_to(Mode::Relative, 3.0, 4.0),
        ];
        let (ops, ctx) = run(&segments, Scale::IDENTITY);
        assert_eq!(
            ops,
            vec![
                DrawOp::LineTo(dvec2(1.0, 0.0)),
                DrawOp::LineTo(dvec2(3.0, 1.0)),
                DrawOp::LineTo(dvec2(6.0, 5.0)),
            ]
        );
        assert_eq!(ctx.point, dvec2(6.0, 5.0));
    }

    #[test]
    fn horizontal_and_vertical_keep_other_axis() {
        let segments = [
            move_to(Mode::Absolute, 2.0, 3.0),
            PathSegment::from(HorizontalLineTo {
                mode: Mode::Relative,
                x: 4.0,
            }),
            PathSegment::from(VerticalLineTo {
                mode: Mode::Absolute,
                y: -1.0,
            }),
        ];
        let (ops, _) = run(&segments, Scale::IDENTITY);
        assert_eq!(ops[1], DrawOp::LineTo(dvec2(6.0, 3.0)));
        assert_eq!(ops[2], DrawOp::LineTo(dvec2(6.0, -1.0)));
    }

    #[test]
    fn relative_cubic_points_share_the_start() {
        let prior = PriorContext::at(dvec2(6.0, 2.0));
        let segment = PathSegment::from(CubicTo {
            mode: Mode::Relative,
            control1: dvec2(2.0, 2.0),
            control2: dvec2(3.0, 2.0),
            to: dvec2(8.0, 2.0),
        });
        let mut ops: Vec<DrawOp> = Vec::new();
        let ctx = segment.evaluate(prior, &mut ops, Scale::IDENTITY);
        assert_eq!(
            ops,
            vec![DrawOp::CurveTo {
                to: dvec2(14.0, 4.0),
                control1: dvec2(8.0, 4.0),
                control2: dvec2(9.0, 4.0),
            }]
        );
        assert_eq!(ctx.point, dvec2(14.0, 4.0));
        assert_eq!(ctx.control, Some(CurveControl::cubic(dvec2(9.0, 4.0))));
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let segments = [
            move_to(Mode::Absolute, 0.0, 0.0),
            PathSegment::from(CubicTo {
                mode: Mode::Absolute,
                control1: dvec2(0.0, 5.0),
                control2: dvec2(8.0, 4.0),
                to: dvec2(10.0, 10.0),
            }),
            PathSegment::from(SmoothCubicTo {
                mode: Mode::Absolute,
                control2: dvec2(18.0, 10.0),
                to: dvec2(20.0, 20.0),
            }),
        ];
        let (ops, _) = run(&segments, Scale::IDENTITY);
        let DrawOp::CurveTo { control1, .. } = ops[2] else {
            panic!("expected a curve, got {:?}", ops[2]);
        };
        assert_eq!(control1, dvec2(12.0, 16.0));
    }

    #[test]
    fn smooth_cubic_after_line_starts_at_current_point() {
        let segments = [
            move_to(Mode::Absolute, 0.0, 0.0),
            line_to(Mode::Absolute, 4.0, 4.0),
            PathSegment::from(SmoothCubicTo {
                mode: Mode::Relative,
                control2: dvec2(1.0, 0.0),
                to: dvec2(2.0, 2.0),
            }),
        ];
        let (ops, _) = run(&segments, Scale::IDENTITY);
        assert_eq!(
            ops[2],
            DrawOp::CurveTo {
                to: dvec2(6.0, 6.0),
                control1: dvec2(4.0, 4.0),
                control2: dvec2(5.0, 4.0),
            }
        );
    }

    #[test]
    fn quadratics_are_elevated_and_reflected() {
        let segments = [
            move_to(Mode::Absolute, 0.0, 0.0),
            PathSegment::from(QuadraticTo {
                mode: Mode::Absolute,
                control: dvec2(3.0, 3.0),
                to: dvec2(6.0, 0.0),
            }),
            PathSegment::from(SmoothQuadraticTo {
                mode: Mode::Absolute,
                to: dvec2(12.0, 0.0),
            }),
        ];
        let (ops, ctx) = run(&segments, Scale::IDENTITY);
        assert_eq!(
            ops[1],
            DrawOp::CurveTo {
                to: dvec2(6.0, 0.0),
                control1: dvec2(2.0, 2.0),
                control2: dvec2(4.0, 2.0),
            }
        );
        // reflected control is (9, -3)
        assert_eq!(
            ops[2],
            DrawOp::CurveTo {
                to: dvec2(12.0, 0.0),
                control1: dvec2(8.0, -2.0),
                control2: dvec2(10.0, -2.0),
            }
        );
        assert_eq!(ctx.control, Some(CurveControl::quadratic(dvec2(9.0, -3.0))));
    }

    #[test]
    fn degenerate_arcs_fall_back() {
        let zero_radius = PathSegment::from(ArcTo {
            mode: Mode::Relative,
            radii: DVec2::ZERO,
            x_axis_rotation: 0.0,
            large_arc: false,
            sweep: true,
            to: dvec2(10.0, 0.0),
        });
        let same_point = PathSegment::from(ArcTo {
            mode: Mode::Relative,
            radii: dvec2(5.0, 5.0),
            x_axis_rotation: 0.0,
            large_arc: false,
            sweep: true,
            to: DVec2::ZERO,
        });
        let (ops, ctx) = run(&[zero_radius, same_point], Scale::IDENTITY);
        assert_eq!(ops, vec![DrawOp::LineTo(dvec2(10.0, 0.0))]);
        assert_eq!(ctx.point, dvec2(10.0, 0.0));
    }

    #[test]
    fn arc_ends_exactly_at_scaled_endpoint() {
        let segments = [
            move_to(Mode::Absolute, 0.0, 0.0),
            PathSegment::from(ArcTo {
                mode: Mode::Absolute,
                radii: dvec2(50.0, 50.0),
                x_axis_rotation: 0.0,
                large_arc: false,
                sweep: true,
                to: dvec2(100.0, 0.0),
            }),
        ];
        let (ops, ctx) = run(&segments, Scale::try_new(0.5, 2.0).unwrap());
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[2].end_point(), Some(dvec2(50.0, 0.0)));
        assert_eq!(ctx.control, None);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let segments = [
            move_to(Mode::Relative, 1.5, 2.5),
            line_to(Mode::Relative, 3.0, -1.0),
            PathSegment::from(ClosePath),
        ];
        assert_eq!(run(&segments, Scale::IDENTITY), run(&segments, Scale::IDENTITY));
    }
}
