//! Shared fixtures for the integration tests and benchmarks.

use strokepen::geom::fixed;
use strokepen::math::{point, Point};
use strokepen::{Color, PolygonSink};

pub const WHITE: Color = 0xffff_ffff;

/// A zigzag of `n` segments going right, alternating up and down by `height`.
pub fn zigzag(n: usize, step: f32, height: f32) -> Vec<(Point, Color)> {
    (0..=n)
        .map(|i| {
            let y = if i % 2 == 0 { 0.0 } else { height };
            (point(fixed::from_f32(i as f32 * step), fixed::from_f32(y)), WHITE)
        })
        .collect()
}

/// A star with `branches` tips, alternating between the two radii.
pub fn star(branches: usize, outer: f32, inner: f32) -> Vec<(Point, Color)> {
    let n = branches * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 * 2.0 * std::f32::consts::PI / n as f32;
            let color = (i as Color) << 8 | 0xff;
            (point(fixed::from_f32(r * angle.cos()), fixed::from_f32(r * angle.sin())), color)
        })
        .collect()
}

/// A circle approximated with `n` vertices, as a flattened curve would be.
pub fn circle(n: usize, radius: f32) -> Vec<(Point, Color)> {
    (0..n)
        .map(|i| {
            let angle = i as f32 * 2.0 * std::f32::consts::PI / n as f32;
            (point(fixed::from_f32(radius * angle.cos()), fixed::from_f32(radius * angle.sin())), WHITE)
        })
        .collect()
}

/// A sink that checks the structure of the output and counts what it sees.
#[derive(Default, Debug)]
pub struct CheckedSink {
    pub polygons: usize,
    pub vertices: usize,
    pub ends: usize,
    in_polygon: bool,
}

impl CheckedSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PolygonSink for CheckedSink {
    fn move_to(&mut self, _to: Point, _color: Color) {
        assert!(!self.in_polygon, "move_to inside of a polygon");
        self.in_polygon = true;
        self.vertices += 1;
    }

    fn line_to(&mut self, _to: Point, _color: Color) {
        assert!(self.in_polygon, "line_to outside of a polygon");
        self.vertices += 1;
    }

    fn close(&mut self) {
        assert!(self.in_polygon, "close outside of a polygon");
        self.in_polygon = false;
        self.polygons += 1;
    }

    fn end(&mut self) {
        assert!(!self.in_polygon, "end inside of a polygon");
        self.ends += 1;
    }
}

#[cfg(test)]
mod stroke;
