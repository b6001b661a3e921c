//! Polygonal approximation of a round pen.
//!
//! Round joins and caps are drawn by stamping a polygon approximating the
//! pen, a circle of the stroke's diameter before the transform and an ellipse
//! after it. The polygon only depends on the line width and the transform so
//! it is computed once per configuration and translated to each join.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::f64::consts::PI;

use crate::fixed::{self, translate};
use crate::math::{Point, Vector};
use crate::transform::FixedTransform;
use crate::utils::{side, square_distance};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Which pen vertices a wedge selects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Wedge {
    /// The vertices on the opposite side of the chord from the center.
    ///
    /// Used for joins where the center is strictly on one side of the chord
    /// joining the two offset points. If it is on the chord this behaves like
    /// `Cap`.
    Join,
    /// A half turn, the chord goes through the center.
    ///
    /// The vertices strictly on the negative side of the chord are selected.
    Cap,
}

/// A polygon approximating a round pen under a transform, centered on the origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PenPolygon {
    offsets: Vec<Vector>,
}

impl PenPolygon {
    /// Minimum number of vertices of the polygon.
    pub const MIN_SEGMENTS: usize = 3;

    /// Maximum number of vertices of the polygon.
    pub const MAX_SEGMENTS: usize = 1024;

    /// Creates an empty pen, see `rebuild`.
    pub fn new() -> Self {
        PenPolygon {
            offsets: Vec::new(),
        }
    }

    /// Creates a pen for a given line width (in fixed point) and transform.
    pub fn with_line_width(line_width: i32, transform: &FixedTransform) -> Self {
        let mut pen = PenPolygon::new();
        pen.rebuild(line_width, transform);

        pen
    }

    /// The number of vertices used to approximate a pen of a given width.
    ///
    /// Proportional to the perimeter of the pen after the transform, so that
    /// each edge of the polygon is about one unit long in output space.
    pub fn segment_count(line_width: i32, transform: &FixedTransform) -> usize {
        let perimeter = PI * fixed::to_f64(line_width) * transform.max_axis_scale();
        if !perimeter.is_finite() {
            return Self::MIN_SEGMENTS;
        }

        (perimeter.ceil().max(0.0) as usize).clamp(Self::MIN_SEGMENTS, Self::MAX_SEGMENTS)
    }

    /// Recomputes the polygon.
    ///
    /// The storage is resized to the exact number of vertices the new
    /// configuration needs.
    pub fn rebuild(&mut self, line_width: i32, transform: &FixedTransform) {
        let n = Self::segment_count(line_width, transform);
        let r = f64::from(line_width) * 0.5;

        self.offsets.clear();
        self.offsets.reserve_exact(n);
        for i in 0..n {
            let theta = i as f64 * 2.0 * PI / n as f64;
            let (x, y) = transform.apply(r * theta.cos(), r * theta.sin());
            self.offsets.push(Vector::new(x as i32, y as i32));
        }
        self.offsets.shrink_to_fit();
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The offsets of the polygon vertices relative to the pen's center.
    pub fn offsets(&self) -> &[Vector] {
        &self.offsets
    }

    /// Selects the pen vertices outside of the wedge between `a` and `b`.
    ///
    /// The pen is centered on `center` and `a`, `b` are the two points where
    /// the arc must connect, typically `center` plus the offsets of the two
    /// edges meeting there. The selected vertices form a contiguous arc which
    /// is returned in traversal order, starting with the end closest to `a`.
    pub fn arc(&self, center: Point, a: Point, b: Point, wedge: Wedge) -> PenArc {
        let empty = PenArc {
            pen: &self.offsets,
            center,
            next: 0,
            remaining: 0,
            reversed: false,
        };

        let n = self.offsets.len();
        if n == 0 {
            return empty;
        }

        // Vertices on the chord would duplicate `a` or `b`.
        let outside = match wedge {
            Wedge::Join if side(center, a, b) == Ordering::Less => Ordering::Greater,
            _ => Ordering::Less,
        };
        let included = |i: usize| side(translate(center, self.offsets[i % n]), a, b) == outside;

        let mut start = None;
        let mut end = None;
        for i in 0..n {
            if !included(i) {
                continue;
            }
            if !included(i + n - 1) {
                start = Some(i);
            }
            if !included(i + 1) {
                end = Some(i);
            }
        }

        let (start, mut end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return empty;
            }
        };

        if end < start {
            end += n;
        }

        let first = translate(center, self.offsets[start]);
        let reversed = square_distance(first, a) > square_distance(first, b);

        PenArc {
            pen: &self.offsets,
            center,
            next: if reversed { end } else { start },
            remaining: end - start + 1,
            reversed,
        }
    }
}

/// An iterator over a contiguous range of pen vertices placed around a center.
///
/// See `PenPolygon::arc`.
pub struct PenArc<'l> {
    pen: &'l [Vector],
    center: Point,
    next: usize,
    remaining: usize,
    reversed: bool,
}

impl<'l> Iterator for PenArc<'l> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }

        let p = translate(self.center, self.pen[self.next % self.pen.len()]);
        self.remaining -= 1;
        if self.remaining > 0 {
            if self.reversed {
                self.next -= 1;
            } else {
                self.next += 1;
            }
        }

        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'l> ExactSizeIterator for PenArc<'l> {}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
const U: i32 = fixed::ONE;

#[test]
fn test_segment_count() {
    let identity = FixedTransform::identity();

    assert_eq!(PenPolygon::segment_count(2 * U, &identity), 7);
    assert_eq!(PenPolygon::segment_count(4 * U, &identity), 13);
    assert_eq!(PenPolygon::segment_count(U / 10, &identity), PenPolygon::MIN_SEGMENTS);
    assert_eq!(PenPolygon::segment_count(0, &identity), PenPolygon::MIN_SEGMENTS);
    assert_eq!(PenPolygon::segment_count(10_000 * U, &identity), PenPolygon::MAX_SEGMENTS);

    let scaled = FixedTransform::from_coefficients(3.0, 0.0, 0.0, 1.0).unwrap();
    assert_eq!(PenPolygon::segment_count(2 * U, &scaled), 19);
}

#[test]
fn test_pen_is_centered_circle() {
    use approx::assert_abs_diff_eq;

    let pen = PenPolygon::with_line_width(4 * U, &FixedTransform::identity());
    assert_eq!(pen.len(), 13);
    assert_eq!(pen.offsets()[0], Vector::new(2 * U, 0));

    let mut sum = (0i64, 0i64);
    for v in pen.offsets() {
        let r = f64::from(v.x).hypot(f64::from(v.y));
        assert_abs_diff_eq!(r, f64::from(2 * U), epsilon = 2.0);
        sum.0 += i64::from(v.x);
        sum.1 += i64::from(v.y);
    }

    assert!(sum.0.abs() <= pen.len() as i64);
    assert!(sum.1.abs() <= pen.len() as i64);
}

#[test]
fn test_pen_follows_transform() {
    use approx::assert_abs_diff_eq;

    let t = FixedTransform::from_coefficients(2.0, 0.0, 0.5, 1.0).unwrap();
    let pen = PenPolygon::with_line_width(2 * U, &t);

    // The first vertex is the transformed (r, 0).
    assert_eq!(pen.offsets()[0], Vector::new(2 * U, U / 2));

    // Every vertex maps back onto the untransformed circle.
    for v in pen.offsets() {
        let (x, y) = (f64::from(v.x), f64::from(v.y));
        let ux = x / 2.0;
        let uy = y - 0.5 * ux;
        assert_abs_diff_eq!(ux.hypot(uy), f64::from(U), epsilon = 2.0);
    }
}

#[test]
fn test_rebuild_resizes() {
    let identity = FixedTransform::identity();
    let mut pen = PenPolygon::with_line_width(100 * U, &identity);
    assert_eq!(pen.len(), 315);

    pen.rebuild(2 * U, &identity);
    assert_eq!(pen.len(), 7);
    assert!(pen.offsets.capacity() < 315);
}

#[test]
fn test_join_arc() {
    let pen = PenPolygon::with_line_width(2 * U, &FixedTransform::identity());
    let center = point(10 * U, 0);
    let a = point(10 * U, -U);
    let b = point(11 * U, 0);

    let arc: Vec<Point> = pen.arc(center, a, b, Wedge::Join).collect();
    assert!(!arc.is_empty());

    // All points are strictly on the outer side of the corner, closest to `a`
    // first. The pen vertex at `b` is on the chord and left out.
    for p in &arc {
        assert!(p.x > 10 * U);
        assert!(p.y < 0);
        assert_ne!(*p, a);
        assert_ne!(*p, b);
    }
    for pair in arc.windows(2) {
        assert!(square_distance(pair[0], a) < square_distance(pair[1], a));
    }
}

#[test]
fn test_cap_arc() {
    let pen = PenPolygon::with_line_width(4 * U, &FixedTransform::identity());
    let center = point(10 * U, 0);
    let a = point(10 * U, -2 * U);
    let b = point(10 * U, 2 * U);

    let arc: Vec<Point> = pen.arc(center, a, b, Wedge::Cap).collect();
    assert!(arc.len() >= 6);

    for p in &arc {
        assert!(p.x >= 10 * U);
    }
    assert!(arc.iter().any(|p| *p == point(12 * U, 0)));
    assert!(arc.first().unwrap().y < 0);
    assert!(arc.last().unwrap().y > 0);
}

#[test]
fn test_empty_pen_arc() {
    let pen = PenPolygon::new();
    assert!(pen.is_empty());
    assert_eq!(pen.arc(point(0, 0), point(U, 0), point(0, U), Wedge::Join).count(), 0);
}
