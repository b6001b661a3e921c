#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Fixed point geometry primitives used by the strokepen tessellator.
//!
//! All positions are `i32` values in 16.16 fixed point stored in `euclid`
//! points and vectors (see the [`fixed`](fixed/index.html) module). The
//! only floating point inputs are the coefficients of the linear map the
//! stroke is drawn under, which are converted once into a
//! [`FixedTransform`](transform/struct.FixedTransform.html).
//!
//! # Overview
//!
//! * [`FixedTransform`] - the linear part of an affine transform, converted to fixed point,
//!   which knows how to compute stroke offsets and untransformed lengths.
//! * [`PenPolygon`] - a polygon approximating a round pen pushed through a `FixedTransform`.
//! * [`utils`](utils/index.html) - orientation and intersection predicates on fixed point points.
//!
//! # Safe coordinate range
//!
//! Intermediate products are computed with `i64` or `i128` integers. Input
//! coordinates within `±2^30` raw units (`±16384.0`) give exact results.
//! Points produced by offsetting coordinates outside of this range saturate
//! at the bounds of `i32` instead of wrapping around.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod fixed;
pub mod pen;
pub mod transform;
pub mod utils;

#[doc(inline)]
pub use crate::pen::{PenArc, PenPolygon, Wedge};
#[doc(inline)]
pub use crate::transform::FixedTransform;

/// Alias for the `euclid` types used throughout the strokepen crates.
pub mod math {
    /// A 16.16 fixed point position.
    pub type Point = euclid::default::Point2D<i32>;

    /// A 16.16 fixed point displacement.
    pub type Vector = euclid::default::Vector2D<i32>;

    /// A displacement with room for products of fixed point values.
    pub type WideVector = euclid::default::Vector2D<i64>;

    /// The floating point transform callers configure a stroke with.
    ///
    /// Only the linear part is used, translation has no effect on stroking.
    pub type Transform = euclid::default::Transform2D<f32>;

    /// Shorthand for `Point::new(x, y)`, in raw fixed point units.
    #[inline]
    pub fn point(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`, in raw fixed point units.
    #[inline]
    pub fn vector(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }
}
