//! Tools to help with consuming the output of the stroke tessellator.
//!
//! The tessellator does not build triangles itself. It describes the outline
//! of the stroke as a sequence of simple polygons and hands them to an
//! implementation of [`PolygonSink`](trait.PolygonSink.html), which is
//! typically a fill tessellator or a buffer to be uploaded later.
//!
//! Each outline is emitted as `move_to`, any number of `line_to` and one
//! `close`. `end` is forwarded once the caller ends the path. Positions are
//! in 16.16 fixed point and every vertex carries the `Color` of the input
//! position it was generated from.
//!
//! The sink is called synchronously from within the tessellator's methods
//! and has no way to call back into it.
//!
//! ## Collecting outlines
//!
//! [`PolygonBuffers`](struct.PolygonBuffers.html) stores each outline in its
//! own `Vec`:
//!
//! ```
//! use strokepen_tessellation::{PolygonBuffers, StrokeOptions, StrokeTessellator};
//! use strokepen_tessellation::geom::fixed;
//! use strokepen_tessellation::math::{point, Transform};
//!
//! let mut tessellator = StrokeTessellator::new();
//! tessellator.configure(&StrokeOptions::line_width(2.0), &Transform::identity()).unwrap();
//!
//! let mut output = PolygonBuffers::new();
//! let mut builder = tessellator.builder(&mut output).unwrap();
//! builder.move_to(point(0, 0), 0xff0000ff);
//! builder.line_to(point(fixed::from_i32(10), 0), 0xff0000ff);
//! builder.end();
//!
//! assert_eq!(output.outlines.len(), 1);
//! assert_eq!(output.outlines[0].vertices.len(), 4);
//! assert!(output.outlines[0].closed);
//! ```
//!
//! ## Custom output
//!
//! ```
//! use strokepen_tessellation::{Color, PolygonSink};
//! use strokepen_tessellation::math::Point;
//!
//! // A sink that only counts vertices.
//! #[derive(Default)]
//! struct VertexCounter {
//!     vertices: usize,
//!     polygons: usize,
//! }
//!
//! impl PolygonSink for VertexCounter {
//!     fn move_to(&mut self, _to: Point, _color: Color) {
//!         self.vertices += 1;
//!     }
//!     fn line_to(&mut self, _to: Point, _color: Color) {
//!         self.vertices += 1;
//!     }
//!     fn close(&mut self) {
//!         self.polygons += 1;
//!     }
//! }
//! ```

use alloc::vec::Vec;

use crate::math::Point;
use crate::Color;

/// The interface the stroke tessellator writes outline polygons to.
pub trait PolygonSink {
    /// Starts a new polygon.
    fn move_to(&mut self, to: Point, color: Color);

    /// Adds a vertex to the current polygon.
    fn line_to(&mut self, to: Point, color: Color);

    /// Closes the current polygon.
    fn close(&mut self);

    /// Called when the caller ends the path.
    fn end(&mut self) {}
}

/// A vertex of an outline polygon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutlineVertex {
    pub position: Point,
    pub color: Color,
}

/// An outline polygon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outline {
    pub vertices: Vec<OutlineVertex>,
    pub closed: bool,
}

impl Outline {
    /// Iterates over the positions of the vertices.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|v| v.position)
    }
}

/// A `PolygonSink` that collects every outline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonBuffers {
    pub outlines: Vec<Outline>,
    /// Number of times `end` was called.
    pub ends: u32,
}

impl PolygonBuffers {
    pub fn new() -> Self {
        PolygonBuffers {
            outlines: Vec::new(),
            ends: 0,
        }
    }

    pub fn with_capacity(num_outlines: usize) -> Self {
        PolygonBuffers {
            outlines: Vec::with_capacity(num_outlines),
            ends: 0,
        }
    }

    pub fn clear(&mut self) {
        self.outlines.clear();
        self.ends = 0;
    }

    /// Total number of vertices over all outlines.
    pub fn vertex_count(&self) -> usize {
        self.outlines.iter().map(|o| o.vertices.len()).sum()
    }
}

impl PolygonSink for PolygonBuffers {
    fn move_to(&mut self, to: Point, color: Color) {
        let mut outline = Outline::default();
        outline.vertices.push(OutlineVertex {
            position: to,
            color,
        });
        self.outlines.push(outline);
    }

    fn line_to(&mut self, to: Point, color: Color) {
        debug_assert!(!self.outlines.is_empty(), "line_to without move_to");
        if let Some(outline) = self.outlines.last_mut() {
            outline.vertices.push(OutlineVertex {
                position: to,
                color,
            });
        }
    }

    fn close(&mut self) {
        if let Some(outline) = self.outlines.last_mut() {
            outline.closed = true;
        }
    }

    fn end(&mut self) {
        self.ends += 1;
    }
}

#[test]
fn test_polygon_buffers() {
    use crate::math::point;

    let mut buffers = PolygonBuffers::new();
    buffers.move_to(point(0, 0), 1);
    buffers.line_to(point(1, 0), 2);
    buffers.line_to(point(1, 1), 3);
    buffers.close();
    buffers.move_to(point(5, 5), 4);
    buffers.end();

    assert_eq!(buffers.outlines.len(), 2);
    assert_eq!(buffers.vertex_count(), 4);
    assert!(buffers.outlines[0].closed);
    assert!(!buffers.outlines[1].closed);
    assert_eq!(buffers.outlines[0].vertices[2].color, 3);
    assert_eq!(
        buffers.outlines[0].positions().collect::<Vec<_>>(),
        [point(0, 0), point(1, 0), point(1, 1)]
    );
    assert_eq!(buffers.ends, 1);

    buffers.clear();
    assert!(buffers.outlines.is_empty());
    assert_eq!(buffers.ends, 0);
}
