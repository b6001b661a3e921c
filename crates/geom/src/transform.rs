//! The linear map a stroke is drawn under.
//!
//! Coordinates given to the stroker are already transformed. The stroke width,
//! the pen and the miter limit are however expressed before the transform, so
//! the stroker needs to map offsets forward and distances backward through the
//! linear part of the transform.

use crate::fixed::{self, FRACTIONAL_BITS};
use crate::math::{Point, Transform, Vector, WideVector};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// The linear part of an affine transform in fixed point.
///
/// Follows the column vector convention:
///
/// ```text
/// x' = m00 * x + m01 * y
/// y' = m10 * x + m11 * y
/// ```
///
/// The coefficients are kept both as raw fixed point values, for the integer
/// code paths, and as the floating point value of that same fixed point
/// number, so that both paths agree on the transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedTransform {
    m00: i32,
    m01: i32,
    m10: i32,
    m11: i32,
    coefficients: [f64; 4],
    determinant: f64,
    uniform_scale: bool,
}

impl FixedTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self::from_raw(fixed::ONE, 0, 0, fixed::ONE)
    }

    /// Builds a transform from raw 16.16 coefficients.
    pub fn from_raw(m00: i32, m01: i32, m10: i32, m11: i32) -> Self {
        let coefficients = [
            fixed::to_f64(m00),
            fixed::to_f64(m01),
            fixed::to_f64(m10),
            fixed::to_f64(m11),
        ];
        let [a, b, c, d] = coefficients;

        FixedTransform {
            m00,
            m01,
            m10,
            m11,
            coefficients,
            determinant: a * d - b * c,
            uniform_scale: m00 > 0 && m00 == m11 && m01 == 0 && m10 == 0,
        }
    }

    /// Converts floating point coefficients, returns `None` if one of them is
    /// not finite or does not fit in 16.16 fixed point.
    pub fn from_coefficients(m00: f32, m01: f32, m10: f32, m11: f32) -> Option<Self> {
        Some(Self::from_raw(
            fixed::try_from_f64(f64::from(m00))?,
            fixed::try_from_f64(f64::from(m01))?,
            fixed::try_from_f64(f64::from(m10))?,
            fixed::try_from_f64(f64::from(m11))?,
        ))
    }

    /// Converts the linear part of a euclid transform, ignoring its translation.
    ///
    /// euclid uses the row vector convention, so its `m21` is our `m01`.
    pub fn from_transform(transform: &Transform) -> Option<Self> {
        Self::from_coefficients(transform.m11, transform.m21, transform.m12, transform.m22)
    }

    /// The raw fixed point coefficients `(m00, m01, m10, m11)`.
    pub fn raw(&self) -> (i32, i32, i32, i32) {
        (self.m00, self.m01, self.m10, self.m11)
    }

    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant != 0.0
    }

    /// True for a positive uniform scale without rotation or skew.
    pub fn is_uniform_scale(&self) -> bool {
        self.uniform_scale
    }

    /// Applies the transform to a floating point vector.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d] = self.coefficients;
        (a * x + b * y, c * x + d * y)
    }

    /// The largest length a unit vector along one of the axes is stretched to.
    pub fn max_axis_scale(&self) -> f64 {
        let [a, b, c, d] = self.coefficients;
        a.hypot(c).max(b.hypot(d))
    }

    /// Computes the displacement between a segment and its two stroke edges.
    ///
    /// The result is perpendicular to the segment before the transform is
    /// applied and its untransformed length is `half_width`, so that the
    /// stroke keeps a uniform width under any non-singular transform. The
    /// offset points to the right of the segment direction in a y-up
    /// coordinate system (`(0, -half_width)` for a segment going along +x).
    ///
    /// A zero length segment has a zero offset.
    pub fn offset(&self, from: Point, to: Point, half_width: i32) -> Vector {
        let d = fixed::delta(from, to);
        if d.x == 0 && d.y == 0 {
            return Vector::zero();
        }

        if self.uniform_scale {
            let len = fixed::hypot(d.x, d.y);
            if len == 0 {
                return Vector::zero();
            }
            let scaled_half_width = (i128::from(self.m00) * i128::from(half_width)) >> FRACTIONAL_BITS;
            let len = i128::from(len);
            return Vector::new(
                clamp_offset(i128::from(d.y) * scaled_half_width / len),
                clamp_offset(-(i128::from(d.x) * scaled_half_width / len)),
            );
        }

        // (a, b) is the untransformed normal scaled by the determinant. Mapping
        // it back keeps the offset on the same side of the segment whatever the
        // sign of the determinant.
        let [m00, m01, m10, m11] = self.coefficients;
        let (dx, dy) = (d.x as f64, d.y as f64);
        let a = dy * m00 - dx * m10;
        let b = dy * m01 - dx * m11;
        let len = a.hypot(b);
        if len == 0.0 || !len.is_finite() {
            return Vector::zero();
        }

        let half_width = f64::from(half_width);
        let (ox, oy) = self.apply(a, b);

        // Multiply before dividing, which keeps axis aligned cases exact.
        Vector::new(
            clamp_offset((ox * half_width / len) as i128),
            clamp_offset((oy * half_width / len) as i128),
        )
    }

    /// Squared length of `d` mapped back through the transform, rotated by 90
    /// degrees and multiplied by the determinant.
    ///
    /// The result has 32 fractional bits. Comparing it against
    /// `(limit * determinant)^2` avoids dividing by the determinant.
    pub fn untransformed_square_length_scaled(&self, d: WideVector) -> i128 {
        let (dx, dy) = (i128::from(d.x), i128::from(d.y));
        let a = (dy * i128::from(self.m00) - dx * i128::from(self.m10)) >> FRACTIONAL_BITS;
        let b = (dy * i128::from(self.m01) - dx * i128::from(self.m11)) >> FRACTIONAL_BITS;

        a * a + b * b
    }

    /// Length of `d` mapped back through the inverse transform, in raw fixed
    /// point units.
    ///
    /// Returns zero for a singular transform.
    pub fn untransformed_length(&self, d: WideVector) -> i64 {
        if !self.is_invertible() {
            return 0;
        }

        let [m00, m01, m10, m11] = self.coefficients;
        let (dx, dy) = (d.x as f64, d.y as f64);
        let a = (dy * m00 - dx * m10) / self.determinant;
        let b = (dy * m01 - dx * m11) / self.determinant;

        a.hypot(b).round() as i64
    }
}

impl Default for FixedTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Offsets are negated to reach the other side of a stroke, so they stay in
/// `-i32::MAX..=i32::MAX`.
#[inline]
fn clamp_offset(val: i128) -> i32 {
    fixed::saturate_wide(val.max(-i128::from(i32::MAX)))
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
const U: i32 = fixed::ONE;

#[test]
fn test_from_euclid_transform() {
    let t = Transform::new(2.0, 0.5, -1.0, 3.0, 100.0, 200.0);
    let f = FixedTransform::from_transform(&t).unwrap();

    assert_eq!(f.raw(), (2 * U, -U, U / 2, 3 * U));
    assert_eq!(f.determinant(), 6.5);
    assert_eq!(f.apply(1.0, 0.0), (2.0, 0.5));

    let nan = Transform::new(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0);
    assert!(FixedTransform::from_transform(&nan).is_none());
    let huge = Transform::new(1.0e6, 0.0, 0.0, 1.0, 0.0, 0.0);
    assert!(FixedTransform::from_transform(&huge).is_none());
}

#[test]
fn test_uniform_scale() {
    assert!(FixedTransform::identity().is_uniform_scale());
    assert!(FixedTransform::from_coefficients(2.0, 0.0, 0.0, 2.0).unwrap().is_uniform_scale());
    assert!(!FixedTransform::from_coefficients(-2.0, 0.0, 0.0, -2.0).unwrap().is_uniform_scale());
    assert!(!FixedTransform::from_coefficients(2.0, 0.0, 0.0, 1.0).unwrap().is_uniform_scale());
    assert!(!FixedTransform::from_coefficients(1.0, 0.1, 0.0, 1.0).unwrap().is_uniform_scale());
}

#[test]
fn test_offset_identity() {
    let t = FixedTransform::identity();

    assert_eq!(t.offset(point(0, 0), point(10 * U, 0), U), Vector::new(0, -U));
    assert_eq!(t.offset(point(0, 0), point(0, 10 * U), U), Vector::new(U, 0));
    assert_eq!(t.offset(point(10 * U, 0), point(0, 0), U), Vector::new(0, U));
    assert_eq!(t.offset(point(5, 5), point(5, 5), U), Vector::zero());
}

#[test]
fn test_offset_general_path_matches_fast_path() {
    // A tiny rotation forces the general path.
    let rotated = FixedTransform::from_raw(U, 1, 0, U);
    let fast = FixedTransform::identity();

    for &(x, y) in &[(10, 0), (0, 10), (-7, 3), (3, -9), (1, 1)] {
        let to = point(x * U, y * U);
        let a = fast.offset(point(0, 0), to, 3 * U);
        let b = rotated.offset(point(0, 0), to, 3 * U);
        assert!((a.x - b.x).abs() <= 8, "{:?} {:?}", a, b);
        assert!((a.y - b.y).abs() <= 8, "{:?} {:?}", a, b);
    }
}

#[test]
fn test_offset_anisotropic() {
    let t = FixedTransform::from_coefficients(2.0, 0.0, 0.0, 1.0).unwrap();

    // Horizontal segments are offset vertically, which the transform leaves alone.
    assert_eq!(t.offset(point(0, 0), point(10 * U, 0), U), Vector::new(0, -U));
    // Vertical segments are offset horizontally, which the transform stretches.
    assert_eq!(t.offset(point(0, 0), point(0, 10 * U), U), Vector::new(2 * U, 0));
}

#[test]
fn test_offset_side_under_reflection() {
    // Offsets stay right of the direction in output space when the transform
    // flips orientation.
    let flip_x = FixedTransform::from_coefficients(-1.0, 0.0, 0.0, 1.0).unwrap();
    let flip_y = FixedTransform::from_coefficients(1.0, 0.0, 0.0, -1.0).unwrap();
    let identity = FixedTransform::identity();

    for &(x, y) in &[(10, 0), (0, 10), (-7, 3), (3, -9)] {
        let to = point(x * U, y * U);
        let expected = identity.offset(point(0, 0), to, U);
        for t in &[flip_x, flip_y] {
            let o = t.offset(point(0, 0), to, U);
            assert!((o.x - expected.x).abs() <= 2, "{:?} {:?}", o, expected);
            assert!((o.y - expected.y).abs() <= 2, "{:?} {:?}", o, expected);
        }
    }

    assert_eq!(flip_x.offset(point(0, 0), point(10 * U, 0), U), Vector::new(0, -U));
}

#[test]
fn test_offset_saturates() {
    let t = FixedTransform::from_coefficients(20.0, 0.0, 0.0, 20.0).unwrap();
    assert!(t.is_uniform_scale());

    let o = t.offset(point(-(1 << 30), 0), point(1 << 30, 0), 10_000 * U);
    assert_eq!(o, Vector::new(0, -i32::MAX));
    let o = t.offset(point(1 << 30, 0), point(-(1 << 30), 0), 10_000 * U);
    assert_eq!(o, Vector::new(0, i32::MAX));
    let o = t.offset(point(0, i32::MIN), point(0, i32::MAX), 10_000 * U);
    assert_eq!(o, Vector::new(i32::MAX, 0));

    let skewed = FixedTransform::from_coefficients(20.0, 1.0, 0.0, 20.0).unwrap();
    let o = skewed.offset(point(-(1 << 30), 0), point(1 << 30, 0), 10_000 * U);
    assert!(o.y == -i32::MAX);
}

#[test]
fn test_offset_is_perpendicular_before_transform() {
    let t = FixedTransform::from_coefficients(1.5, 0.7, -0.3, 0.8).unwrap();
    let det = t.determinant();
    let inverse = |x: f64, y: f64| {
        let [a, b, c, d] = t.coefficients;
        ((d * x - b * y) / det, (-c * x + a * y) / det)
    };

    for &(x, y) in &[(10, 0), (0, 10), (-7, 3), (3, -9)] {
        let to = point(x * U, y * U);
        let o = t.offset(point(0, 0), to, 2 * U);

        let (ux, uy) = inverse(f64::from(to.x), f64::from(to.y));
        let (ox, oy) = inverse(f64::from(o.x), f64::from(o.y));

        let dot = (ux * ox + uy * oy) / ux.hypot(uy);
        assert!(dot.abs() < 4.0, "dot {}", dot);
        let len = ox.hypot(oy);
        assert!((len - f64::from(2 * U)).abs() < 4.0, "len {}", len);
    }
}

#[test]
fn test_untransformed_lengths() {
    let t = FixedTransform::from_coefficients(2.0, 0.0, 0.0, 4.0).unwrap();

    assert_eq!(t.untransformed_length(WideVector::new(10 * U as i64, 0)), 5 * U as i64);
    assert_eq!(t.untransformed_length(WideVector::new(0, 10 * U as i64)), (5 * U / 2) as i64);

    // The scaled variant is multiplied by the determinant (8).
    let sq = t.untransformed_square_length_scaled(WideVector::new(2 * U as i64, 0));
    let expected = i128::from(8 * U);
    assert_eq!(sq, expected * expected);

    let singular = FixedTransform::from_raw(U, U, U, U);
    assert!(!singular.is_invertible());
    assert_eq!(singular.untransformed_length(WideVector::new(U as i64, 0)), 0);
}
