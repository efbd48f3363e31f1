//! Tilt Ball - a tilt-controlled ball dodging game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `platform`: Seams for the external collaborators (renderer, scheduler, sensor)
//! - `game`: Top-level state machine wiring sim to platform
//! - `config`: Screen bounds and gameplay tuning

pub mod config;
pub mod game;
pub mod platform;
pub mod sim;

pub use config::{GameConfig, ScreenBounds};
pub use game::GameApp;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Movement tick period (ball/obstacle integration + collisions)
    pub const MOVE_TICK_MS: u32 = 20;
    /// Score accrual period
    pub const SCORE_TICK_MS: u32 = 1000;
    /// Obstacle spawn period
    pub const SPAWN_TICK_MS: u32 = 2000;
    /// Bonus respawn delay (one-shot, re-armed after each fire)
    pub const BONUS_RESPAWN_MS: u32 = 5000;
    /// GameOver -> Menu delay
    pub const GAME_OVER_MS: u32 = 3000;

    /// Lives per session
    pub const MAX_LIVES: u8 = 3;
    /// Score credited per score tick
    pub const SCORE_PER_TICK: u32 = 10;
    /// Score credited on bonus pickup
    pub const BONUS_SCORE: u32 = 100;

    /// Obstacle pool capacity
    pub const OBSTACLE_CAP: usize = 50;

    /// Ball sprite size (square side, pixels); collision radius is half of this
    pub const BALL_SIZE: f32 = 20.0;
    /// Obstacle sprite size (square side, pixels)
    pub const OBSTACLE_SIZE: f32 = 16.0;
    /// Bonus sprite size (square side, pixels)
    pub const BONUS_SIZE: f32 = 16.0;

    /// Ball displacement per raw accelerometer count per movement tick.
    /// Full-scale tilt (~16384 counts at 1 g) moves the ball 4 px per tick.
    pub const TILT_SENSITIVITY: f32 = 1.0 / 4096.0;
    /// Obstacle speed, pixels per movement tick
    pub const OBSTACLE_SPEED: f32 = 3.0;

    /// Default screen geometry (landscape TFT)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 240.0;

    /// Obstacle fill color (0xRRGGBB)
    pub const OBSTACLE_COLOR: u32 = 0x80_80_80;
    /// Bonus fill color
    pub const BONUS_COLOR: u32 = 0xFF_D7_00;
    /// HUD label color
    pub const LABEL_COLOR: u32 = 0xFF_FF_FF;
}

/// Round a continuous position to the integer pixel grid the renderer uses.
#[inline]
pub fn to_pixel(pos: Vec2) -> (i32, i32) {
    (pos.x as i32, pos.y as i32)
}
