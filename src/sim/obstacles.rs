//! Fixed-capacity pool of moving rectangular hazards
//!
//! A slot is free when `active == false`; slot index doubles as the render
//! entity index, so slots are never compacted. Spawns enter from just outside
//! a random edge with an axis-aligned inward velocity and bounce elastically
//! off the boundary on the axis they travel.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::ScreenBounds;
use crate::consts::OBSTACLE_CAP;

/// One moving hazard. Velocity is purely horizontal or vertical.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Obstacle {
    pub active: bool,
    /// Sprite top-left corner
    pub pos: Vec2,
    /// Displacement per movement tick
    pub vel: Vec2,
}

impl Obstacle {
    /// Collision rectangle for the current position
    pub fn rect(&self, bounds: &ScreenBounds) -> Rect {
        Rect::from_pos_size(self.pos, bounds.obstacle_size)
    }

    /// Advance one tick and bounce off the boundary on the axis of travel.
    /// Only the leading edge triggers the flip, so a freshly spawned obstacle
    /// still outside the screen keeps moving inward.
    fn advance(&mut self, bounds: &ScreenBounds) {
        self.pos += self.vel;
        let size = bounds.obstacle_size;
        if self.vel.x > 0.0 && self.pos.x + size >= bounds.width {
            self.vel.x = -self.vel.x;
        } else if self.vel.x < 0.0 && self.pos.x <= 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.vel.y > 0.0 && self.pos.y + size >= bounds.height {
            self.vel.y = -self.vel.y;
        } else if self.vel.y < 0.0 && self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
        }
    }
}

/// The four screen edges an obstacle can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    fn pick(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..4u8) {
            0 => Edge::Left,
            1 => Edge::Right,
            2 => Edge::Top,
            _ => Edge::Bottom,
        }
    }
}

/// Fixed pool of `OBSTACLE_CAP` slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    pub(crate) slots: Vec<Obstacle>,
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            slots: vec![Obstacle::default(); OBSTACLE_CAP],
        }
    }

    /// Spawn into the first free slot, entering from a random edge with the
    /// given inward speed. Returns the slot index, or `None` (silently, not
    /// an error) when the pool is full.
    pub fn spawn(
        &mut self,
        rng: &mut Pcg32,
        bounds: &ScreenBounds,
        speed: f32,
    ) -> Option<usize> {
        let slot = self.slots.iter().position(|o| !o.active)?;
        let size = bounds.obstacle_size;
        let along_x = rng.random_range(0.0..bounds.width - size);
        let along_y = rng.random_range(0.0..bounds.height - size);

        let (pos, vel) = match Edge::pick(rng) {
            Edge::Left => (Vec2::new(-size, along_y), Vec2::new(speed, 0.0)),
            Edge::Right => (Vec2::new(bounds.width, along_y), Vec2::new(-speed, 0.0)),
            Edge::Top => (Vec2::new(along_x, -size), Vec2::new(0.0, speed)),
            Edge::Bottom => (Vec2::new(along_x, bounds.height), Vec2::new(0.0, -speed)),
        };

        self.slots[slot] = Obstacle {
            active: true,
            pos,
            vel,
        };
        log::debug!("obstacle spawned in slot {slot} at {pos:?}");
        Some(slot)
    }

    /// Advance every active obstacle by one movement tick.
    pub fn advance(&mut self, bounds: &ScreenBounds) {
        for obstacle in self.slots.iter_mut().filter(|o| o.active) {
            obstacle.advance(bounds);
        }
    }

    /// Deactivate every slot at once (collision reset, GameOver, Menu).
    pub fn clear(&mut self) {
        for obstacle in &mut self.slots {
            obstacle.active = false;
        }
    }

    /// Active obstacles in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Obstacle)> {
        self.slots.iter().enumerate().filter(|(_, o)| o.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|o| o.active).count()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn spawn_fills_first_free_slot() {
        let bounds = ScreenBounds::default();
        let mut pool = ObstaclePool::new();
        let mut rng = rng();

        assert_eq!(pool.spawn(&mut rng, &bounds, 3.0), Some(0));
        assert_eq!(pool.spawn(&mut rng, &bounds, 3.0), Some(1));
        assert_eq!(pool.active_count(), 2);

        // Free slot 0, next spawn reuses it
        pool.slots[0].active = false;
        assert_eq!(pool.spawn(&mut rng, &bounds, 3.0), Some(0));
    }

    #[test]
    fn spawn_on_full_pool_is_dropped() {
        let bounds = ScreenBounds::default();
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        for _ in 0..OBSTACLE_CAP {
            assert!(pool.spawn(&mut rng, &bounds, 3.0).is_some());
        }
        assert_eq!(pool.active_count(), OBSTACLE_CAP);
        assert_eq!(pool.spawn(&mut rng, &bounds, 3.0), None);
        assert_eq!(pool.active_count(), OBSTACLE_CAP);
    }

    #[test]
    fn spawn_starts_outside_and_moves_inward() {
        let bounds = ScreenBounds::default();
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        let size = bounds.obstacle_size;

        for _ in 0..OBSTACLE_CAP {
            pool.spawn(&mut rng, &bounds, 3.0);
        }
        for (_, o) in pool.iter_active() {
            // Axis-aligned velocity, never diagonal
            assert!(o.vel.x == 0.0 || o.vel.y == 0.0);
            assert!(o.vel != Vec2::ZERO);
            // Just outside exactly one edge, headed back in
            if o.vel.x > 0.0 {
                assert_eq!(o.pos.x, -size);
            } else if o.vel.x < 0.0 {
                assert_eq!(o.pos.x, bounds.width);
            } else if o.vel.y > 0.0 {
                assert_eq!(o.pos.y, -size);
            } else {
                assert_eq!(o.pos.y, bounds.height);
            }
        }
    }

    #[test]
    fn bounce_flips_only_the_travel_axis() {
        let bounds = ScreenBounds::default();
        let size = bounds.obstacle_size;
        let mut o = Obstacle {
            active: true,
            pos: Vec2::new(bounds.width - size - 1.0, 80.0),
            vel: Vec2::new(3.0, 0.0),
        };
        o.advance(&bounds);
        assert_eq!(o.vel, Vec2::new(-3.0, 0.0));
        assert_eq!(o.pos.y, 80.0);

        let mut o = Obstacle {
            active: true,
            pos: Vec2::new(80.0, 2.0),
            vel: Vec2::new(0.0, -3.0),
        };
        o.advance(&bounds);
        assert_eq!(o.vel, Vec2::new(0.0, 3.0));
        assert_eq!(o.pos.x, 80.0);
    }

    #[test]
    fn fresh_spawn_does_not_bounce_off_its_own_edge() {
        let bounds = ScreenBounds::default();
        let mut o = Obstacle {
            active: true,
            pos: Vec2::new(bounds.width, 50.0),
            vel: Vec2::new(-3.0, 0.0),
        };
        // Still partially outside the right edge, keeps heading left
        o.advance(&bounds);
        assert_eq!(o.vel.x, -3.0);
    }

    #[test]
    fn clear_deactivates_everything() {
        let bounds = ScreenBounds::default();
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        for _ in 0..10 {
            pool.spawn(&mut rng, &bounds, 3.0);
        }
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        // Slots are reusable afterwards
        assert_eq!(pool.spawn(&mut rng, &bounds, 3.0), Some(0));
    }

    proptest! {
        /// The bounce leaves the orthogonal velocity component untouched and
        /// preserves speed on the travel axis, wherever the obstacle is.
        #[test]
        fn bounce_preserves_orthogonal_component(
            px in -20.0f32..340.0,
            py in -20.0f32..260.0,
            speed in 0.5f32..8.0,
            horizontal in proptest::bool::ANY,
            negative in proptest::bool::ANY,
        ) {
            let bounds = ScreenBounds::default();
            let sign = if negative { -1.0 } else { 1.0 };
            let vel = if horizontal {
                Vec2::new(sign * speed, 0.0)
            } else {
                Vec2::new(0.0, sign * speed)
            };
            let mut o = Obstacle { active: true, pos: Vec2::new(px, py), vel };
            o.advance(&bounds);
            if horizontal {
                prop_assert_eq!(o.vel.y, 0.0);
                prop_assert_eq!(o.vel.x.abs(), speed);
            } else {
                prop_assert_eq!(o.vel.x, 0.0);
                prop_assert_eq!(o.vel.y.abs(), speed);
            }
        }
    }
}
