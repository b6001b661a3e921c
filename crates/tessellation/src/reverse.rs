use alloc::vec::Vec;

use crate::math::Point;
use crate::Color;

/// Vertices of the far side of a sub-path's outline.
///
/// The outline is emitted as one walk: forward along the near side while the
/// segments come in, then backward along the far side once the sub-path ends.
/// The far side vertices are pushed here in segment order and drained in
/// reverse.
pub(crate) struct ReverseStack {
    vertices: Vec<(Point, Color)>,
}

impl ReverseStack {
    const INITIAL_CAPACITY: usize = 32;

    pub fn new() -> Self {
        ReverseStack {
            vertices: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, position: Point, color: Color) {
        if self.vertices.len() == self.vertices.capacity() {
            self.grow();
        }
        self.vertices.push((position, color));
    }

    // Grow by 20% rather than doubling, long sub-paths are common and the
    // buffer lives as long as the tessellator.
    #[cold]
    fn grow(&mut self) {
        let capacity = self.vertices.capacity();
        let additional = (capacity / 5).max(Self::INITIAL_CAPACITY);
        self.vertices.reserve_exact(additional);
    }

    /// Removes all vertices, last pushed first.
    #[inline]
    pub fn drain_reversed(&mut self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.vertices.drain(..).rev()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[test]
fn test_drain_reversed() {
    use crate::math::point;

    let mut stack = ReverseStack::new();
    for i in 0..100 {
        stack.push(point(i, -i), i as Color);
    }
    assert_eq!(stack.len(), 100);

    let drained: Vec<(Point, Color)> = stack.drain_reversed().collect();
    assert_eq!(drained.len(), 100);
    assert_eq!(drained[0], (point(99, -99), 99));
    assert_eq!(drained[99], (point(0, 0), 0));
    assert!(stack.is_empty());

    // The allocation is kept for the next sub-path.
    assert!(stack.vertices.capacity() >= 100);
    stack.push(point(1, 1), 1);
    stack.clear();
    assert!(stack.is_empty());
}

#[test]
fn test_growth() {
    let mut stack = ReverseStack::new();
    stack.push(crate::math::point(0, 0), 0);
    assert!(stack.vertices.capacity() >= ReverseStack::INITIAL_CAPACITY);

    for _ in 0..1000 {
        stack.push(crate::math::point(0, 0), 0);
    }
    let capacity = stack.vertices.capacity();
    assert!(capacity >= 1001);
    assert!(capacity < 1001 * 3 / 2);
}
