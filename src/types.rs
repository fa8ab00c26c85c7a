//! Validated numeric primitives shared by parsing and rendering.
//!
//! Path data is authored in viewport units; everything handed to a path
//! sink is in target units. `Scale` is the only bridge between the two.

use std::fmt;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN, infinite, zero and negative values.
#[inline]
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }

    /// Both sides strictly positive and finite.
    pub fn is_positive(&self) -> bool {
        check_positive(self.w).is_ok() && check_positive(self.h).is_ok()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Unit suffix of an intrinsic dimension such as `64dp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Unit {
    Dp,
    Px,
    Sp,
    Pt,
    In,
    Mm,
    #[default]
    Unitless,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Dp => "dp",
            Unit::Px => "px",
            Unit::Sp => "sp",
            Unit::Pt => "pt",
            Unit::In => "in",
            Unit::Mm => "mm",
            Unit::Unitless => "",
        }
    }
}

/// A length with its unit, as written in a document attribute.
///
/// The unit is carried for the caller; this crate never converts between
/// units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Dimension { value, unit }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Per-axis ratio between the requested render size and the viewport.
///
/// Always finite and strictly positive on both axes, so it can be inverted
/// when conjugating group transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    factor: DVec2,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { factor: DVec2::ONE };

    /// Create a Scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(x: f64, y: f64) -> Result<Self, NumericError> {
        Ok(Scale {
            factor: dvec2(check_positive(x)?, check_positive(y)?),
        })
    }

    /// Same ratio on both axes.
    pub fn uniform(ratio: f64) -> Result<Self, NumericError> {
        Self::try_new(ratio, ratio)
    }

    /// Ratio that maps `viewport` onto `target`, component-wise.
    pub fn between(viewport: Size, target: Size) -> Result<Self, NumericError> {
        let w = check_positive(viewport.w)?;
        let h = check_positive(viewport.h)?;
        Self::try_new(target.w / w, target.h / h)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.factor.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.factor.y
    }

    /// Raw per-axis factors.
    #[inline]
    pub fn factor(&self) -> DVec2 {
        self.factor
    }

    /// Map a point from viewport units into target units.
    #[inline]
    pub fn apply(&self, p: DVec2) -> DVec2 {
        p * self.factor
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.factor.x == self.factor.y
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::IDENTITY
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.factor.x, self.factor.y)
    }
}
