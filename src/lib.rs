#![deny(bare_trait_objects)]
#![no_std]

//! Stroke tessellation of polylines in 16.16 fixed point.
//!
//! This meta-crate (`strokepen`) reexports the following sub-crates for convenience:
//!
//! * [![crate](https://img.shields.io/crates/v/strokepen_tessellation.svg)](https://crates.io/crates/strokepen_tessellation)
//!   [![doc](https://docs.rs/strokepen_tessellation/badge.svg)](https://docs.rs/strokepen_tessellation)
//!   **strokepen_tessellation** - Converts polylines into the outline polygons of their stroke.
//! * [![crate](https://img.shields.io/crates/v/strokepen_geom.svg)](https://crates.io/crates/strokepen_geom)
//!   [![doc](https://docs.rs/strokepen_geom/badge.svg)](https://docs.rs/strokepen_geom)
//!   **strokepen_geom** - Fixed point arithmetic, transforms and the polygonal pen.
//!
//! The output of the tessellator is a sequence of simple polygons meant to be
//! filled with the non-zero rule, typically by a scanline rasterizer or a fill
//! tessellator.
//!
//! # Feature flags
//!
//! * `std` (enabled by default) - Use the standard library. Without it the
//!   crates depend on `alloc` only.
//! * `serialization` - Serde support for the options and input types.
//!
//! # Example
//!
//! ```
//! use strokepen::{LineCap, PolygonBuffers, StrokeOptions, StrokeTessellator};
//! use strokepen::geom::fixed;
//! use strokepen::math::{point, Transform};
//!
//! let options = StrokeOptions::line_width(1.5).with_line_cap(LineCap::Round);
//! let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();
//!
//! let u = fixed::ONE;
//! let polyline = [
//!     (point(0, 0), 0xffffffff),
//!     (point(5 * u, 8 * u), 0xffffffff),
//!     (point(10 * u, 0), 0xff0000ff),
//! ];
//!
//! let mut output = PolygonBuffers::new();
//! tessellator.tessellate_polyline(&polyline, false, &mut output).unwrap();
//!
//! assert_eq!(output.outlines.len(), 1);
//! assert!(output.outlines[0].closed);
//! ```

pub extern crate strokepen_tessellation;

pub use strokepen_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::math;
pub use tessellation::sink;

#[doc(inline)]
pub use tessellation::{
    Color, LineCap, LineJoin, Outline, OutlineVertex, PolygonBuffers, PolygonSink, StrokeBuilder,
    StrokeError, StrokeEvent, StrokeOptions, StrokeResult, StrokeTessellator,
};
