//! Collision predicates
//!
//! Pure geometry, no side effects: circle vs. axis-aligned rectangle and
//! circle vs. screen boundary. The circle-rectangle test clamps the circle
//! center to the rectangle extents and compares squared distances, which is
//! exact for axis-aligned rectangles and avoids the square root.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ScreenBounds;

/// Axis-aligned rectangle, inclusive extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from a sprite's top-left corner and square side length.
    pub fn from_pos_size(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Closest point of the rectangle to `p` (per-axis clamp).
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Circle vs. axis-aligned rectangle.
///
/// Collision iff the squared distance from the circle center to the closest
/// point on the rectangle is strictly less than `radius²`. Exact tangency is
/// not a collision.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.distance_squared(rect.closest_point(center)) < radius * radius
}

/// Circle vs. screen boundary, for a sprite of side `size` whose top-left
/// corner is `pos`.
///
/// Contact at or beyond any edge counts; under the canonical policy this is a
/// life-losing collision, not a clamp.
#[inline]
pub fn boundary_contact(pos: Vec2, size: f32, bounds: &ScreenBounds) -> bool {
    pos.x <= 0.0
        || pos.x >= bounds.width - size
        || pos.y <= 0.0
        || pos.y >= bounds.height - size
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    #[test]
    fn overlap_when_center_inside() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        assert!(circle_rect_overlap(Vec2::new(15.0, 15.0), 1.0, &r));
    }

    #[test]
    fn overlap_near_edge() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        // Center 4 px left of the rectangle, radius 5
        assert!(circle_rect_overlap(Vec2::new(6.0, 20.0), 5.0, &r));
        // Center 6 px left, radius 5
        assert!(!circle_rect_overlap(Vec2::new(4.0, 20.0), 5.0, &r));
    }

    #[test]
    fn tangency_is_not_a_collision() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        // Center exactly radius away from the left edge
        assert!(!circle_rect_overlap(Vec2::new(5.0, 20.0), 5.0, &r));
        // Corner case: center exactly radius away from the corner diagonally
        let radius = 5.0;
        assert!(!circle_rect_overlap(Vec2::new(10.0 - radius, 10.0), radius, &r));
    }

    #[test]
    fn overlap_near_corner_uses_euclidean_distance() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        // 4 px on each axis past the corner: distance sqrt(32) ~ 5.66
        assert!(!circle_rect_overlap(Vec2::new(6.0, 6.0), 5.0, &r));
        assert!(circle_rect_overlap(Vec2::new(6.0, 6.0), 6.0, &r));
    }

    #[test]
    fn boundary_contact_edges() {
        let bounds = ScreenBounds::default();
        let size = bounds.ball_size;
        let inside = Vec2::new(50.0, 50.0);
        assert!(!boundary_contact(inside, size, &bounds));

        assert!(boundary_contact(Vec2::new(0.0, 50.0), size, &bounds));
        assert!(boundary_contact(Vec2::new(-3.0, 50.0), size, &bounds));
        assert!(boundary_contact(
            Vec2::new(bounds.width - size, 50.0),
            size,
            &bounds
        ));
        assert!(boundary_contact(Vec2::new(50.0, 0.0), size, &bounds));
        assert!(boundary_contact(
            Vec2::new(50.0, bounds.height - size),
            size,
            &bounds
        ));
    }

    proptest! {
        /// A center placed exactly `radius` outside an edge never collides
        /// (strict inequality), while halving the offset does. Integer-valued
        /// geometry keeps every sum exact in f32.
        #[test]
        fn tangency_strictness_on_edges(
            rx in 0u32..200,
            ry in 0u32..200,
            w in 1u32..100,
            h in 1u32..100,
            radius in 1u32..50,
            t in 0.0f32..1.0,
        ) {
            let (rx, ry, w, h) = (rx as f32, ry as f32, w as f32, h as f32);
            let radius = radius as f32;
            let r = rect(rx, ry, w, h);
            let on_edge = Vec2::new(r.max.x, r.min.y + t * h);
            let tangent = on_edge + Vec2::new(radius, 0.0);
            prop_assert!(!circle_rect_overlap(tangent, radius, &r));
            let inside = on_edge + Vec2::new(radius * 0.5, 0.0);
            prop_assert!(circle_rect_overlap(inside, radius, &r));
        }

        /// Any center strictly inside the rectangle collides for any radius.
        #[test]
        fn center_inside_always_overlaps(
            rx in 0.0f32..200.0,
            ry in 0.0f32..200.0,
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            radius in 0.001f32..50.0,
            tx in 0.01f32..0.99,
            ty in 0.01f32..0.99,
        ) {
            let r = rect(rx, ry, w, h);
            let center = Vec2::new(r.min.x + tx * w, r.min.y + ty * h);
            prop_assert!(circle_rect_overlap(center, radius, &r));
        }
    }
}
