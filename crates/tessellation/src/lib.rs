#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![no_std]

//! Tessellation of polyline strokes in fixed point.
//!
//! This crate is reexported in [strokepen](https://docs.rs/strokepen/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Converts polylines into the
//!   outline polygons of their stroke.
//! * [`PolygonSink`](sink/trait.PolygonSink.html) - The interface the tessellator writes
//!   its output to. See the [sink module](sink/index.html).
//!
//! ## The input: path commands
//!
//! The tessellator consumes `move_to`, `line_join`, `line_to`, `close` and `end`
//! commands in 16.16 fixed point, either through a [`StrokeBuilder`](struct.StrokeBuilder.html)
//! or as an iterator of [`StrokeEvent`](enum.StrokeEvent.html). Curves must be flattened
//! beforehand. Each position carries an opaque [`Color`](type.Color.html) which is
//! forwarded to the output vertices generated from it.
//!
//! The joins between consecutive segments are round unless `line_join` was
//! called before the second segment, in which case the configured
//! [`LineJoin`](enum.LineJoin.html) is used. Callers flattening curves
//! typically call `line_join` once per original path vertex, so that the
//! flattened curves stay smooth while corners get the requested join.
//!
//! ## The output: outline polygons
//!
//! For each sub-path the tessellator emits a single closed polygon that goes
//! along one side of the stroke and comes back along the other side. Each
//! polygon starts with a `move_to` and ends with a `close`, `end` is forwarded
//! when the caller ends the path. Filling these polygons with the non-zero
//! rule renders the stroke.
//!
//! ## Coordinates and transforms
//!
//! Positions are expected to already be transformed. The line width, the pen
//! used for round joins and caps and the miter limit are specified before the
//! transform, which is passed to [`StrokeTessellator::configure`](struct.StrokeTessellator.html#method.configure)
//! so that the stroke looks like it was drawn in the untransformed space.
//!
//! ## Examples
//!
//! - [Tessellating a polyline](struct.StrokeTessellator.html#examples).

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use strokepen_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod join;
mod reverse;
pub mod sink;
mod stroke;


pub use crate::geom::math;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::sink::{Outline, OutlineVertex, PolygonBuffers, PolygonSink};

#[doc(inline)]
pub use crate::stroke::*;

use crate::math::Point;

/// An opaque per-vertex tag, forwarded unchanged from the input positions to
/// the output vertices. Typically a packed RGBA color.
pub type Color = u32;

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width.
    Square,
    /// At each end of each sub-path, the shape representing the stroke will be extended
    /// by a half circle with a radius equal to half of the stroke width.
    Round,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments, unless the miter
    /// limit is exceeded in which case the join is beveled.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A beveled corner is to be used to join path segments.
    /// The bevel shape is a triangle that fills the area between the two stroked
    /// segments.
    Bevel,
}

/// Parameters for the tessellator.
///
/// The line width and miter limit are in untransformed units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Line width
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// What cap to use at both ends of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,

    /// See the SVG specification.
    ///
    /// Only applies to joins requested with `line_join`, other joins are round.
    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// See the SVG specification.
    ///
    /// Must be greater than or equal to 1.0.
    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,
}

impl StrokeOptions {
    /// Minimum miter limit as defined by the SVG specification.
    ///
    /// See [StrokeMiterLimitProperty](https://svgwg.org/specs/strokes/#StrokeMiterlimitProperty)
    pub const MINIMUM_MITER_LIMIT: f32 = 1.0;
    /// Default miter limit as defined by the SVG specification.
    ///
    /// See [StrokeMiterLimitProperty](https://svgwg.org/specs/strokes/#StrokeMiterlimitProperty)
    pub const DEFAULT_MITER_LIMIT: f32 = 4.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_cap: Self::DEFAULT_LINE_CAP,
        line_join: Self::DEFAULT_LINE_JOIN,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
    };

    #[inline]
    pub fn line_width(width: f32) -> Self {
        Self::DEFAULT.with_line_width(width)
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    /// The limit is validated by `StrokeTessellator::configure`.
    #[inline]
    pub const fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit;
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A stroke command, see the methods of the same name on `StrokeBuilder`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum StrokeEvent {
    MoveTo { at: Point, color: Color },
    Join,
    LineTo { to: Point, color: Color },
    Close,
    End,
}

#[test]
fn test_default_options() {
    let options = StrokeOptions::default();

    assert_eq!(options.miter_limit, 4.0);
    assert_eq!(options.line_width, 1.0);
    assert_eq!(options.line_cap, LineCap::Butt);
    assert_eq!(options.line_join, LineJoin::Miter);
}

#[test]
fn test_with_options() {
    let options = StrokeOptions::line_width(3.0)
        .with_line_cap(LineCap::Round)
        .with_line_join(LineJoin::Bevel)
        .with_miter_limit(2.0);

    assert_eq!(options.line_width, 3.0);
    assert_eq!(options.line_cap, LineCap::Round);
    assert_eq!(options.line_join, LineJoin::Bevel);
    assert_eq!(options.miter_limit, 2.0);
}
