//! Default values and tunables for parsing and rendering

/// Largest sweep, in radians, approximated by a single cubic piece of an arc.
pub const MAX_ARC_SWEEP: f64 = std::f64::consts::FRAC_PI_2;

/// Significant digits written by the SVG path-data writer.
pub const SVG_PRECISION: i32 = 6;
/// Magnitudes below this are written as `0` by the SVG path-data writer.
pub const SVG_ZERO_EPSILON: f64 = 1e-9;

// Path attribute defaults, matching Android vector drawables
pub const STROKE_WIDTH: f64 = 0.0;
pub const FILL_ALPHA: f64 = 1.0;
pub const STROKE_ALPHA: f64 = 1.0;
pub const MITER_LIMIT: f64 = 4.0;
pub const DOCUMENT_ALPHA: f64 = 1.0;

// Group attribute defaults
pub const ROTATION: f64 = 0.0;
pub const SCALE: f64 = 1.0;
pub const PIVOT: f64 = 0.0;
pub const TRANSLATION: f64 = 0.0;
