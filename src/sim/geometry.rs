//! Axis-aligned rectangles in screen space (y grows downward)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle whose bottom edge is centered on `point`
    pub fn from_midbottom(point: Vec2, size: Vec2) -> Self {
        Self::new(point.x - size.x / 2.0, point.y - size.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Copy of this rectangle moved by `(dx, dy)`
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midbottom_anchor() {
        let r = Rect::from_midbottom(Vec2::new(50.0, 100.0), Vec2::new(20.0, 30.0));
        assert_eq!(r.left(), 40.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.top(), 70.0);
        assert_eq!(r.bottom(), 100.0);
        assert_eq!(r.center_x(), 50.0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let beside = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&beside));
        assert!(a.intersects(&below.offset(0.0, -0.5)));
    }
}
