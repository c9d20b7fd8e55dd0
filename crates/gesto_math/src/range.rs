use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An open interval `(min, max)` over a continuous signal.
///
/// The range is valid (non-empty) only when `min < max`. Containment is
/// strict on both ends, so a sample sitting exactly on a bound is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// The canonical empty range `(0, -1)`. Contains no point.
    pub const EMPTY: Range = Range { min: 0.0, max: -1.0 };

    /// The whole real line.
    pub const UNBOUNDED: Range = Range {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new range given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns [`Range::EMPTY`].
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// The half-line `(min, +inf)`.
    pub fn above(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// The half-line `(-inf, max)`.
    pub fn below(max: f64) -> Self {
        Self::new(f64::NEG_INFINITY, max)
    }

    /// Returns true if the range is non-empty (`min < max`).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Returns the size of the range (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `point` is strictly within (min, max).
    ///
    /// Comparisons follow IEEE-754, so NaN is never contained.
    pub fn contains(&self, point: f64) -> bool {
        self.min < point && point < self.max
    }

    /// Returns true if `inside` lies within this range.
    ///
    /// An empty `inside` is vacuously contained, even by an empty range.
    pub fn contains_range(&self, inside: &Range) -> bool {
        !inside.is_valid() || (self.min <= inside.min && inside.max <= self.max)
    }

    /// The overlap of two ranges. May be empty.
    pub fn intersection(a: &Range, b: &Range) -> Range {
        Range::new(a.min.max(b.min), a.max.min(b.max))
    }

    /// Creates a range that surrounds two other ranges.
    pub fn surrounding(a: &Range, b: &Range) -> Range {
        Range::new(a.min.min(b.min), a.max.max(b.max))
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::EMPTY
    }
}

// Displacement and rescaling move both bounds together. A negative scale
// factor is applied as-is, which leaves min > max.

impl AddAssign<f64> for Range {
    fn add_assign(&mut self, displacement: f64) {
        self.min += displacement;
        self.max += displacement;
    }
}

impl SubAssign<f64> for Range {
    fn sub_assign(&mut self, displacement: f64) {
        self.min -= displacement;
        self.max -= displacement;
    }
}

impl MulAssign<f64> for Range {
    fn mul_assign(&mut self, scale: f64) {
        self.min *= scale;
        self.max *= scale;
    }
}

impl DivAssign<f64> for Range {
    fn div_assign(&mut self, scale: f64) {
        self.min /= scale;
        self.max /= scale;
    }
}

impl Add<f64> for Range {
    type Output = Range;

    fn add(mut self, displacement: f64) -> Range {
        self += displacement;
        self
    }
}

impl Sub<f64> for Range {
    type Output = Range;

    fn sub(mut self, displacement: f64) -> Range {
        self -= displacement;
        self
    }
}

impl Mul<f64> for Range {
    type Output = Range;

    fn mul(mut self, scale: f64) -> Range {
        self *= scale;
        self
    }
}

impl Div<f64> for Range {
    type Output = Range;

    fn div(mut self, scale: f64) -> Range {
        self /= scale;
        self
    }
}

/// Mirrors the range about zero: `(-max, -min)`.
impl Neg for Range {
    type Output = Range;

    fn neg(self) -> Range {
        Range::new(-self.max, -self.min)
    }
}
