//! Axis-aligned rectangles for hitboxes and lane strips
//!
//! Everything lives in pixel space with y pointing up:
//! - row 0 is the bottom of the world
//! - a rectangle is stored by its min (bottom-left) and max (top-right) corners

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its bottom-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Point containment (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Place a sprite-relative hitbox inside sprite bounds.
    ///
    /// `local` is measured from the sprite's bottom-left corner. A sprite drawn
    /// rotated by 180 degrees carries its hitbox mirrored on both axes.
    pub fn place_within(local: Rect, bounds: Rect, flipped: bool) -> Self {
        let size = local.size();
        let offset = if flipped {
            bounds.size() - local.max
        } else {
            local.min
        };
        Rect::new(bounds.min.x + offset.x, bounds.min.y + offset.y, size.x, size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 64.0, 64.0);
        assert!(r.contains(Vec2::new(32.0, 32.0)));
        assert!(r.contains(Vec2::new(0.0, 64.0)));
        assert!(!r.contains(Vec2::new(64.1, 10.0)));
        assert!(!r.contains(Vec2::new(10.0, -0.1)));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(64.0, 0.0, 64.0, 64.0);
        let c = Rect::new(0.0, 64.0, 64.0, 64.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&Rect::new(63.0, 63.0, 10.0, 10.0)));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(96.0, 32.0), Vec2::new(64.0, 64.0));
        assert_eq!(r.min, Vec2::new(64.0, 0.0));
        assert_eq!(r.max, Vec2::new(128.0, 64.0));
        assert_eq!(r.center(), Vec2::new(96.0, 32.0));
    }

    #[test]
    fn test_place_within_flipped() {
        let bounds = Rect::new(100.0, 0.0, 128.0, 64.0);
        let local = Rect::new(8.0, 4.0, 100.0, 50.0);

        let upright = Rect::place_within(local, bounds, false);
        assert_eq!(upright.min, Vec2::new(108.0, 4.0));
        assert_eq!(upright.size(), Vec2::new(100.0, 50.0));

        // Rotated half a turn: 8px gap moves to the right, 4px gap to the top
        let flipped = Rect::place_within(local, bounds, true);
        assert_eq!(flipped.min, Vec2::new(120.0, 10.0));
        assert_eq!(flipped.max, Vec2::new(220.0, 60.0));
    }
}
