//! Screen bounds and gameplay tuning
//!
//! Read-only at runtime. The driver can override the defaults from a JSON
//! file; the core only ever borrows a finished `GameConfig`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Static screen geometry and sprite sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenBounds {
    /// Screen width in pixels
    pub width: f32,
    /// Screen height in pixels
    pub height: f32,
    /// Ball sprite side length
    pub ball_size: f32,
    /// Obstacle sprite side length
    pub obstacle_size: f32,
    /// Bonus sprite side length
    pub bonus_size: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            ball_size: BALL_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            bonus_size: BONUS_SIZE,
        }
    }
}

impl ScreenBounds {
    /// Ball collision radius
    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Top-left position that centers the ball sprite on screen
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            (self.width - self.ball_size) / 2.0,
            (self.height - self.ball_size) / 2.0,
        )
    }
}

/// Complete gameplay configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub bounds: ScreenBounds,
    /// Ball displacement per raw accelerometer count per movement tick
    pub sensitivity: f32,
    /// Obstacle speed in pixels per movement tick
    pub obstacle_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: ScreenBounds::default(),
            sensitivity: TILT_SENSITIVITY,
            obstacle_speed: OBSTACLE_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_playable() {
        let cfg = GameConfig::default();
        assert!(cfg.bounds.width > cfg.bounds.ball_size);
        assert!(cfg.bounds.height > cfg.bounds.ball_size);
        assert!(cfg.sensitivity > 0.0);
        assert!(cfg.obstacle_speed > 0.0);
    }

    #[test]
    fn ball_start_is_centered() {
        let bounds = ScreenBounds::default();
        let start = bounds.ball_start();
        let center = start + Vec2::splat(bounds.ball_radius());
        assert!((center.x - bounds.width / 2.0).abs() < 0.001);
        assert!((center.y - bounds.height / 2.0).abs() < 0.001);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = GameConfig::default();
        let json = cfg.to_json().unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(back.bounds.width, cfg.bounds.width);
        assert_eq!(back.sensitivity, cfg.sensitivity);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = GameConfig::from_json(r#"{"sensitivity": 0.001}"#).unwrap();
        assert_eq!(cfg.sensitivity, 0.001);
        assert_eq!(cfg.bounds.width, SCREEN_WIDTH);
    }
}
