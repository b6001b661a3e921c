//! 16.16 fixed point helpers.
//!
//! Positions are plain `i32` values where the low `FRACTIONAL_BITS` bits hold
//! the fractional part. Keeping the raw integer representation lets the
//! stroker do exact comparisons on positions (coincident points, zero length
//! segments) and move intermediate products into `i64` or `i128` only where
//! they are needed.

use crate::math::{Point, Vector, WideVector};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Number of bits of the fractional part.
pub const FRACTIONAL_BITS: u32 = 16;

/// `1.0` in fixed point.
pub const ONE: i32 = 1 << FRACTIONAL_BITS;

/// `0.5` in fixed point.
pub const HALF: i32 = ONE >> 1;

/// `ONE` as a float, to convert without rebuilding the constant.
const SCALE: f64 = ONE as f64;

/// Converts an integer to fixed point.
#[inline]
pub fn from_i32(val: i32) -> i32 {
    val << FRACTIONAL_BITS
}

/// Converts from a 32 bits floating point value, saturating at the bounds of `i32`.
#[inline]
pub fn from_f32(val: f32) -> i32 {
    from_f64(f64::from(val))
}

/// Converts from a 64 bits floating point value, saturating at the bounds of `i32`.
#[inline]
pub fn from_f64(val: f64) -> i32 {
    (val * SCALE) as i32
}

/// Converts from a 64 bits floating point value, if it is finite and representable.
pub fn try_from_f64(val: f64) -> Option<i32> {
    let raw = val * SCALE;
    if !raw.is_finite() || raw < i32::MIN as f64 || raw > i32::MAX as f64 {
        return None;
    }

    Some(raw as i32)
}

/// Converts to a 32 bits floating point value.
#[inline]
pub fn to_f32(val: i32) -> f32 {
    to_f64(val) as f32
}

/// Converts to a 64 bits floating point value.
#[inline]
pub fn to_f64(val: i32) -> f64 {
    f64::from(val) / SCALE
}

/// Convert to an integer, truncating the fractional part.
#[inline]
pub fn truncate_to_i32(val: i32) -> i32 {
    val >> FRACTIONAL_BITS
}

/// Fixed point multiplication with a 64 bits intermediate product.
#[inline]
pub fn mul(a: i32, b: i32) -> i32 {
    saturate((i64::from(a) * i64::from(b)) >> FRACTIONAL_BITS)
}

/// Computes `a * m / d` in one go, avoiding the precision loss from shifting bits back
/// and forth.
#[inline]
pub fn mul_div(a: i32, m: i32, d: i32) -> i32 {
    saturate(i64::from(a) * i64::from(m) / i64::from(d))
}

/// Clamps a wide integer to the range of `i32`.
#[inline]
pub fn saturate(val: i64) -> i32 {
    if val > i64::from(i32::MAX) {
        i32::MAX
    } else if val < i64::from(i32::MIN) {
        i32::MIN
    } else {
        val as i32
    }
}

/// Same as `saturate` for `i128` intermediate values.
#[inline]
pub fn saturate_wide(val: i128) -> i32 {
    if val > i128::from(i32::MAX) {
        i32::MAX
    } else if val < i128::from(i32::MIN) {
        i32::MIN
    } else {
        val as i32
    }
}

/// Offsets a point, saturating instead of overflowing.
#[inline]
pub fn translate(p: Point, v: Vector) -> Point {
    Point::new(p.x.saturating_add(v.x), p.y.saturating_add(v.y))
}

/// The vector from `from` to `to` without risk of overflow.
#[inline]
pub fn delta(from: Point, to: Point) -> WideVector {
    WideVector::new(
        i64::from(to.x) - i64::from(from.x),
        i64::from(to.y) - i64::from(from.y),
    )
}

/// Widens a vector.
#[inline]
pub fn wide(v: Vector) -> WideVector {
    WideVector::new(i64::from(v.x), i64::from(v.y))
}

/// Length of a vector, rounded towards zero.
///
/// Goes through `f64` which is exact for any coordinate that fits in 52 bits.
#[inline]
pub fn hypot(x: i64, y: i64) -> i64 {
    (x as f64).hypot(y as f64) as i64
}

#[test]
fn test_conversions() {
    assert_eq!(from_i32(1), ONE);
    assert_eq!(from_i32(-1), -ONE);
    assert_eq!(from_f32(0.5), HALF);
    assert_eq!(from_f32(-1.5), -ONE - HALF);
    assert_eq!(to_f32(from_i32(10)), 10.0);
    assert_eq!(to_f64(HALF), 0.5);
    assert_eq!(truncate_to_i32(from_f32(1.5)), 1);
    assert_eq!(truncate_to_i32(from_f32(-1.5)), -2);

    // Out of range values saturate.
    assert_eq!(from_f64(1.0e10), i32::MAX);
    assert_eq!(from_f64(-1.0e10), i32::MIN);

    assert_eq!(try_from_f64(2.0), Some(from_i32(2)));
    assert_eq!(try_from_f64(f64::NAN), None);
    assert_eq!(try_from_f64(f64::INFINITY), None);
    assert_eq!(try_from_f64(40000.0), None);
}

#[test]
fn test_arithmetic() {
    let a = from_f32(1.5);
    let ten = from_i32(10);

    assert_eq!(mul(a, ten), from_i32(15));
    assert_eq!(mul(-a, ten), from_i32(-15));
    assert_eq!(mul(HALF, HALF), ONE / 4);
    assert_eq!(mul_div(ten, ONE, from_i32(4)), from_f32(2.5));
    assert_eq!(mul(from_i32(30000), from_i32(30000)), i32::MAX);

    assert_eq!(hypot(from_i32(3) as i64, from_i32(4) as i64), from_i32(5) as i64);
    assert_eq!(hypot(0, 0), 0);
}

#[test]
fn test_translate_saturates() {
    use crate::math::{point, vector};

    assert_eq!(
        translate(point(ONE, -ONE), vector(ONE, ONE)),
        point(2 * ONE, 0)
    );
    assert_eq!(
        translate(point(i32::MAX - 1, i32::MIN + 1), vector(10, -10)),
        point(i32::MAX, i32::MIN)
    );

    let d = delta(point(i32::MIN, 0), point(i32::MAX, 0));
    assert_eq!(d.x, u32::MAX as i64);
}
