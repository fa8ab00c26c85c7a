//! Geometry helpers: control-point reflection, quadratic elevation and
//! elliptical arcs as cubic Béziers.

use glam::{DVec2, dvec2};

use super::defaults;

/// Mirror `point` about `center`.
#[inline]
pub fn reflect(point: DVec2, center: DVec2) -> DVec2 {
    center * 2.0 - point
}

/// Control points of the cubic equal to the quadratic `from`, `control`, `to`.
pub fn elevate_quadratic(from: DVec2, control: DVec2, to: DVec2) -> (DVec2, DVec2) {
    let control1 = from + (control - from) * (2.0 / 3.0);
    let control2 = to + (control - to) * (2.0 / 3.0);
    (control1, control2)
}

/// One cubic Bézier piece, starting at the previous piece's end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPiece {
    pub control1: DVec2,
    pub control2: DVec2,
    pub to: DVec2,
}

/// How an endpoint-form arc should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcShape {
    /// Endpoints coincide: draw nothing
    Omitted,
    /// A radius is zero: draw a straight line to the endpoint
    Line,
    /// The arc as consecutive cubic pieces
    Curves(Vec<CubicPiece>),
}

/// Signed angle from `u` to `v`.
fn angle_between(u: DVec2, v: DVec2) -> f64 {
    u.perp_dot(v).atan2(u.dot(v))
}

/// Convert an endpoint-form elliptical arc to cubic Béziers.
///
/// Uses the endpoint-to-center conversion of SVG 1.1 appendix F.6.5, with
/// radii scaled up when they cannot span the endpoints (F.6.6). The sweep is
/// split into pieces of at most [`defaults::MAX_ARC_SWEEP`] radians, each
/// approximated with handle length `4/3 * tan(sweep / 4)`; for quarter turns
/// the curve stays within 2.8e-4 of the radius from the true ellipse.
///
/// `x_axis_rotation` is in degrees. Negative radii are treated as positive.
pub fn arc_to_cubics(
    from: DVec2,
    to: DVec2,
    radii: DVec2,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcShape {
    if from == to {
        return ArcShape::Omitted;
    }
    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();
    if rx == 0.0 || ry == 0.0 {
        return ArcShape::Line;
    }

    let (sin_phi, cos_phi) = x_axis_rotation.to_radians().sin_cos();
    let rotate = |v: DVec2| dvec2(cos_phi * v.x - sin_phi * v.y, sin_phi * v.x + cos_phi * v.y);

    // Step 1: midpoint in the ellipse's own frame
    let half = (from - to) / 2.0;
    let p = dvec2(
        cos_phi * half.x + sin_phi * half.y,
        -sin_phi * half.x + cos_phi * half.y,
    );

    // Radii too small to reach: grow them uniformly until they just fit
    let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
    if lambda > 1.0 {
        let grow = lambda.sqrt();
        rx *= grow;
        ry *= grow;
    }

    // Step 2: center in the ellipse frame
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let numerator = rx2 * ry2 - rx2 * p.y * p.y - ry2 * p.x * p.x;
    let denominator = rx2 * p.y * p.y + ry2 * p.x * p.x;
    let mut coefficient = (numerator / denominator).max(0.0).sqrt();
    if large_arc == sweep {
        coefficient = -coefficient;
    }
    let center_prime = dvec2(coefficient * rx * p.y / ry, -coefficient * ry * p.x / rx);

    // Step 3: center in user space
    let center = rotate(center_prime) + (from + to) / 2.0;

    // Step 4: start angle and sweep
    let u = dvec2((p.x - center_prime.x) / rx, (p.y - center_prime.y) / ry);
    let v = dvec2((-p.x - center_prime.x) / rx, (-p.y - center_prime.y) / ry);
    let start_angle = angle_between(DVec2::X, u);
    let mut sweep_angle = angle_between(u, v);
    if !sweep && sweep_angle > 0.0 {
        sweep_angle -= std::f64::consts::TAU;
    } else if sweep && sweep_angle < 0.0 {
        sweep_angle += std::f64::consts::TAU;
    }

    let pieces = ((sweep_angle.abs() / defaults::MAX_ARC_SWEEP) - 1e-9).ceil().max(1.0) as usize;
    let step = sweep_angle / pieces as f64;
    let handle = 4.0 / 3.0 * (step / 4.0).tan();

    let on_ellipse = |angle: f64| {
        let (sin, cos) = angle.sin_cos();
        center + rotate(dvec2(rx * cos, ry * sin))
    };
    let tangent = |angle: f64| {
        let (sin, cos) = angle.sin_cos();
        rotate(dvec2(-rx * sin, ry * cos))
    };

    let mut curves = Vec::with_capacity(pieces);
    let mut angle = start_angle;
    let mut current = from;
    for i in 0..pieces {
        let next_angle = angle + step;
        let end = if i + 1 == pieces { to } else { on_ellipse(next_angle) };
        curves.push(CubicPiece {
            control1: current + tangent(angle) * handle,
            control2: end - tangent(next_angle) * handle,
            to: end,
        });
        current = end;
        angle = next_angle;
    }

    ArcShape::Curves(curves)
}
