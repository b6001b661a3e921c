//! Orientation and intersection predicates on fixed point positions.
//!
//! Everything here is computed with wide integers and is exact.

use core::cmp::Ordering;

use crate::fixed::{self, delta};
use crate::math::{Point, WideVector};

#[inline]
fn cross(a: WideVector, b: WideVector) -> i128 {
    i128::from(a.x) * i128::from(b.y) - i128::from(a.y) * i128::from(b.x)
}

/// Returns true if `p0 -> p1 -> p2` turns counter-clockwise in a y-down
/// coordinate system (clockwise with y pointing up).
#[inline]
pub fn is_ccw(p0: Point, p1: Point, p2: Point) -> bool {
    let d0 = delta(p0, p1);
    let d1 = delta(p1, p2);

    i128::from(d0.x) * i128::from(d1.y) < i128::from(d0.y) * i128::from(d1.x)
}

/// Which side of the line going through `a` and `b` the point `p` is on.
///
/// `Greater` is the side where the cross product of `b - a` and `p - a` is
/// positive and `Equal` means `p` is on the line.
#[inline]
pub fn side(p: Point, a: Point, b: Point) -> Ordering {
    cross(delta(a, b), delta(a, p)).cmp(&0)
}

/// Squared distance between two points.
#[inline]
pub fn square_distance(a: Point, b: Point) -> i128 {
    let d = delta(a, b);
    i128::from(d.x) * i128::from(d.x) + i128::from(d.y) * i128::from(d.y)
}

/// Intersection of the infinite lines `(a0, a1)` and `(b0, b1)`.
///
/// Returns `None` if the lines are parallel or if one of them is degenerate.
pub fn line_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let v1 = delta(a0, a1);
    let v2 = delta(b0, b1);

    let v1_cross_v2 = cross(v1, v2);
    if v1_cross_v2 == 0 {
        return None;
    }

    // Keep the numerator exact and divide once at the end.
    let t = cross(delta(a0, b0), v2);

    Some(Point::new(
        fixed::saturate_wide(i128::from(a0.x) + i128::from(v1.x) * t / v1_cross_v2),
        fixed::saturate_wide(i128::from(a0.y) + i128::from(v1.y) * t / v1_cross_v2),
    ))
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
const U: i32 = fixed::ONE;

#[test]
fn test_is_ccw() {
    let a = point(0, 0);
    let b = point(10 * U, 0);

    assert!(!is_ccw(a, b, point(10 * U, 10 * U)));
    assert!(is_ccw(a, b, point(10 * U, -10 * U)));
    // Collinear points are not counter-clockwise.
    assert!(!is_ccw(a, b, point(20 * U, 0)));
    assert!(!is_ccw(a, b, point(-20 * U, 0)));
}

#[test]
fn test_side() {
    let a = point(0, 0);
    let b = point(0, 10 * U);

    assert_eq!(side(point(-U, 5 * U), a, b), Ordering::Greater);
    assert_eq!(side(point(U, 5 * U), a, b), Ordering::Less);
    assert_eq!(side(point(0, 5 * U), a, b), Ordering::Equal);
    assert_eq!(side(point(0, 20 * U), a, b), Ordering::Equal);
}

#[test]
fn test_line_intersection() {
    assert_eq!(
        line_intersection(
            point(0, -U),
            point(10 * U, -U),
            point(11 * U, 0),
            point(11 * U, 10 * U),
        ),
        Some(point(11 * U, -U)),
    );

    // The intersection does not need to lie on the segments.
    assert_eq!(
        line_intersection(point(0, 0), point(U, U), point(10 * U, 0), point(9 * U, U)),
        Some(point(5 * U, 5 * U)),
    );

    // Parallel.
    assert_eq!(
        line_intersection(point(0, 0), point(U, 0), point(0, U), point(3 * U, U)),
        None,
    );
    // Degenerate.
    assert_eq!(
        line_intersection(point(0, 0), point(0, 0), point(0, U), point(3 * U, U)),
        None,
    );
}

#[test]
fn test_square_distance() {
    assert_eq!(square_distance(point(0, 0), point(3 * U, 4 * U)), i128::from(25 * U) * i128::from(U));
    assert_eq!(square_distance(point(i32::MIN, 0), point(i32::MAX, 0)), i128::from(u32::MAX) * i128::from(u32::MAX));
}
