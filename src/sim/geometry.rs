//! Axis-aligned rectangles and hazard hitboxes
//!
//! World objects store center points; collision math works on min-corner
//! rectangles. `Bounds::aabb` is the single conversion between the two.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SAW_RADIUS_FRACTION, SPIKE_HITBOX_HEIGHT, SPIKE_HITBOX_WIDTH};

/// Rectangle with `(x, y)` at the minimum (bottom-left) corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a center point and full extents
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything with a collision footprint
pub trait Bounds {
    /// Min-corner rectangle in world space
    fn aabb(&self) -> Rect;
}

/// True unless one rectangle lies entirely to one side of the other.
///
/// Shared edges do not count: `a.right() == b.left()` is not an intersection,
/// and zero-sized rectangles never intersect anything.
pub fn rectangles_intersect(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0.0 || a.height <= 0.0 || b.width <= 0.0 || b.height <= 0.0 {
        return false;
    }
    a.left() < b.right() && b.left() < a.right() && a.bottom() < b.top() && b.bottom() < a.top()
}

/// Euclidean distance between two centers
#[inline]
pub fn circle_distance(c1: Vec2, c2: Vec2) -> f32 {
    (c1 - c2).length()
}

/// Collision footprint of a hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardShape {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
    /// Portal pass-throughs never hurt
    Never,
}

impl HazardShape {
    /// Test the shape against the actor hitbox
    pub fn hits(&self, hitbox: &Rect) -> bool {
        match *self {
            HazardShape::Rect(rect) => rectangles_intersect(hitbox, &rect),
            HazardShape::Circle { center, radius } => {
                if radius <= 0.0 {
                    return false;
                }
                circle_distance(center, hitbox.center()) < radius + hitbox.width / 2.0
            }
            HazardShape::Never => false,
        }
    }
}

/// Shrunk spike box: 60% of the width, 70% of the height, x-centered and
/// rising from the spike's base.
pub fn spike_hitbox(bounds: &Rect) -> Rect {
    let width = bounds.width * SPIKE_HITBOX_WIDTH;
    Rect {
        x: bounds.center().x - width / 2.0,
        y: bounds.bottom(),
        width,
        height: bounds.height * SPIKE_HITBOX_HEIGHT,
    }
}

/// Saw blades collide as a circle of 40% of their width
pub fn saw_radius(width: f32) -> f32 {
    width * SAW_RADIUS_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(rectangles_intersect(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let right = Rect::new(1.0, 0.0, 1.0, 1.0);
        let above = Rect::new(0.0, 1.0, 1.0, 1.0);
        assert!(!rectangles_intersect(&a, &right));
        assert!(!rectangles_intersect(&a, &above));
    }

    #[test]
    fn test_zero_size_never_intersects() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let point = Rect::new(1.0, 1.0, 0.0, 0.0);
        assert!(!rectangles_intersect(&a, &point));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(5.0, 3.0), 4.0, 2.0);
        assert_eq!(r.left(), 3.0);
        assert_eq!(r.right(), 7.0);
        assert_eq!(r.bottom(), 2.0);
        assert_eq!(r.top(), 4.0);
        assert_eq!(r.center(), Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_spike_hitbox_is_shrunk_and_centered() {
        let spike = Rect::from_center(Vec2::new(10.0, 1.0), 1.0, 2.0);
        let hb = spike_hitbox(&spike);
        assert!((hb.width - 0.6).abs() < 1e-6);
        assert!((hb.height - 1.4).abs() < 1e-6);
        assert!((hb.center().x - 10.0).abs() < 1e-6);
        assert_eq!(hb.bottom(), spike.bottom());
    }

    #[test]
    fn test_saw_distance_threshold() {
        // Saw of size 2 at the origin: radius 0.8, plus half the actor width 0.5
        let saw = HazardShape::Circle {
            center: Vec2::ZERO,
            radius: saw_radius(2.0),
        };
        let near = Rect::from_center(Vec2::new(1.2, 0.0), 1.0, 1.0);
        let far = Rect::from_center(Vec2::new(1.4, 0.0), 1.0, 1.0);
        assert!(saw.hits(&near));
        assert!(!saw.hits(&far));
    }

    #[test]
    fn test_never_shape() {
        let hitbox = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(!HazardShape::Never.hits(&hitbox));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-50.0f32..50.0, -50.0f32..50.0, 0.0f32..20.0, 0.0f32..20.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(rectangles_intersect(&a, &b), rectangles_intersect(&b, &a));
        }

        #[test]
        fn shared_vertical_edge_never_intersects(a in rect_strategy(), dy in -5.0f32..5.0, w in 0.1f32..10.0) {
            let b = Rect::new(a.right(), a.y + dy, w, a.height.max(0.1));
            prop_assert!(!rectangles_intersect(&a, &b));
        }

        #[test]
        fn shared_horizontal_edge_never_intersects(a in rect_strategy(), dx in -5.0f32..5.0, h in 0.1f32..10.0) {
            let b = Rect::new(a.x + dx, a.top(), a.width.max(0.1), h);
            prop_assert!(!rectangles_intersect(&a, &b));
        }
    }
}
