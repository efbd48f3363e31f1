//! The single collectible bonus target
//!
//! One persistent instance per game: it is shown, hidden and repositioned,
//! never destroyed and recreated. Respawn scheduling is the state machine's
//! concern; this type only owns position and visibility.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::ScreenBounds;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bonus {
    pub visible: bool,
    /// Sprite top-left corner
    pub pos: Vec2,
}

impl Default for Bonus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bonus {
    pub fn new() -> Self {
        Self {
            visible: false,
            pos: Vec2::ZERO,
        }
    }

    /// Reposition uniformly within bounds and show.
    pub fn spawn(&mut self, rng: &mut Pcg32, bounds: &ScreenBounds) {
        let size = bounds.bonus_size;
        self.pos = Vec2::new(
            rng.random_range(0.0..bounds.width - size),
            rng.random_range(0.0..bounds.height - size),
        );
        self.visible = true;
        log::debug!("bonus spawned at {:?}", self.pos);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Collision rectangle for the current position
    pub fn rect(&self, bounds: &ScreenBounds) -> Rect {
        Rect::from_pos_size(self.pos, bounds.bonus_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn starts_hidden() {
        assert!(!Bonus::new().visible);
    }

    #[test]
    fn spawn_places_within_bounds() {
        let bounds = ScreenBounds::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut bonus = Bonus::new();
        for _ in 0..200 {
            bonus.spawn(&mut rng, &bounds);
            assert!(bonus.visible);
            assert!(bonus.pos.x >= 0.0 && bonus.pos.x < bounds.width - bounds.bonus_size);
            assert!(bonus.pos.y >= 0.0 && bonus.pos.y < bounds.height - bounds.bonus_size);
        }
    }

    #[test]
    fn hide_keeps_position() {
        let bounds = ScreenBounds::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut bonus = Bonus::new();
        bonus.spawn(&mut rng, &bounds);
        let pos = bonus.pos;
        bonus.hide();
        assert!(!bonus.visible);
        assert_eq!(bonus.pos, pos);
    }
}
