//! Join and cap geometry.
//!
//! Joins are only drawn on the outer side of a turn. The inner side is left
//! to the two segment quads, which overlap there and are walked through the
//! join's vertex.

use crate::geom::fixed::{self, delta, translate, wide};
use crate::geom::utils::line_intersection;
use crate::geom::Wedge;
use crate::math::{Point, Vector};
use crate::reverse::ReverseStack;
use crate::sink::PolygonSink;
use crate::stroke::StrokeConfig;
use crate::{Color, LineCap, LineJoin};

/// Joins whose offsets differ by less than this (squared, in raw units) are
/// not drawn.
pub(crate) const ROUND_JOIN_THRESHOLD: i128 = 1000;

/// Same as `ROUND_JOIN_THRESHOLD` for the implicit round joins between
/// segments of a flattened curve, which are only drawn for noticeable turns.
pub(crate) const INTERIOR_JOIN_THRESHOLD: i128 = 1_000_000_000;

/// Writes one outline polygon: the near side goes straight to the sink while
/// the far side is stacked and walked back when the sub-path is finished.
pub(crate) struct OutlineWriter<'l> {
    pub output: &'l mut dyn PolygonSink,
    pub reverse: &'l mut ReverseStack,
}

impl<'l> OutlineWriter<'l> {
    pub fn begin(&mut self, at: Point, color: Color) {
        self.reverse.clear();
        self.output.move_to(at, color);
    }

    #[inline]
    pub fn near(&mut self, to: Point, color: Color) {
        self.output.line_to(to, color);
    }

    #[inline]
    pub fn far(&mut self, to: Point, color: Color) {
        self.reverse.push(to, color);
    }

    #[inline]
    pub fn add(&mut self, to: Point, color: Color, far: bool) {
        if far {
            self.far(to, color);
        } else {
            self.near(to, color);
        }
    }

    /// Emits the far side in reverse order.
    pub fn walk_back(&mut self) {
        for (position, color) in self.reverse.drain_reversed() {
            self.output.line_to(position, color);
        }
    }

    pub fn close(&mut self) {
        self.output.close();
    }

    pub fn end(&mut self) {
        self.output.end();
    }
}

/// Adds the pen vertices between `center + from` and `center + to`.
///
/// On the far side both offsets are negated and the vertices are stacked.
pub(crate) fn round_join(
    config: &StrokeConfig,
    out: &mut OutlineWriter,
    center: Point,
    mut from: Vector,
    mut to: Vector,
    wedge: Wedge,
    color: Color,
    far: bool,
    threshold: i128,
) {
    if from == Vector::zero() || to == Vector::zero() {
        return;
    }

    let d = wide(from) - wide(to);
    let square_length = i128::from(d.x) * i128::from(d.x) + i128::from(d.y) * i128::from(d.y);
    if square_length < threshold {
        return;
    }

    if far {
        from = -from;
        to = -to;
    }

    let a = translate(center, from);
    let b = translate(center, to);
    for p in config.pen.arc(center, a, b, wedge) {
        out.add(p, color, far);
    }
}

/// Adds the miter point of the join at `p1` between `p0 -> p1` and `p1 -> p2`
/// if it is within the miter limit.
pub(crate) fn miter_join(
    config: &StrokeConfig,
    out: &mut OutlineWriter,
    p0: Point,
    p1: Point,
    p2: Point,
    mut from: Vector,
    mut to: Vector,
    color: Color,
    far: bool,
) {
    if from == to || p0 == p1 || p1 == p2 {
        return;
    }

    if far {
        from = -from;
        to = -to;
    }

    let miter = line_intersection(
        translate(p0, from),
        translate(p1, from),
        translate(p1, to),
        translate(p2, to),
    )
    .unwrap_or(p1);

    if config.transform.untransformed_square_length_scaled(delta(p1, miter)) <= config.miter_limit_sq {
        out.add(miter, color, far);
    }
}

/// A join with the configured style.
pub(crate) fn configured_join(
    config: &StrokeConfig,
    out: &mut OutlineWriter,
    p0: Point,
    p1: Point,
    p2: Point,
    from: Vector,
    to: Vector,
    color: Color,
    far: bool,
) {
    match config.options.line_join {
        LineJoin::Miter => miter_join(config, out, p0, p1, p2, from, to, color, far),
        LineJoin::Round => round_join(
            config,
            out,
            p1,
            from,
            to,
            Wedge::Join,
            color,
            far,
            ROUND_JOIN_THRESHOLD,
        ),
        LineJoin::Bevel => {}
    }
}

/// Adds the cap at `at`, the end of the segment `from -> at`.
///
/// The cap goes from `at + offset` to `at - offset`. Pass the segment's
/// offset at the end of a sub-path and its opposite at the start.
pub(crate) fn cap(
    config: &StrokeConfig,
    out: &mut OutlineWriter,
    at: Point,
    from: Point,
    offset: Vector,
    color: Color,
) {
    match config.options.line_cap {
        LineCap::Butt => {}
        LineCap::Round => round_join(
            config,
            out,
            at,
            offset,
            -offset,
            Wedge::Cap,
            color,
            false,
            ROUND_JOIN_THRESHOLD,
        ),
        LineCap::Square => {
            // Extend by half of the width measured before the transform.
            let d = delta(at, from);
            let length = config.transform.untransformed_length(d);
            if length <= 0 {
                return;
            }

            let half_width = i128::from(config.half_width);
            let extension = Vector::new(
                fixed::saturate_wide(-(i128::from(d.x) * half_width / i128::from(length))),
                fixed::saturate_wide(-(i128::from(d.y) * half_width / i128::from(length))),
            );
            let corner = translate(at, extension);

            out.near(translate(corner, offset), color);
            out.near(translate(corner, -offset), color);
        }
    }
}
