//! Game state and core simulation types
//!
//! Everything a session needs lives in one `GameSession` aggregate; operations
//! take it by reference, never through ambient globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bonus::Bonus;
use super::obstacles::ObstaclePool;
use crate::config::ScreenBounds;
use crate::consts::MAX_LIVES;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Main menu, waiting for Play or Color
    #[default]
    Menu,
    /// Color swatches shown, ball previewed at center
    ColorSelect,
    /// Active session
    Playing,
    /// Run ended, waiting out the return-to-menu delay
    GameOver,
}

/// Ball colors offered by the color-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
}

impl BallColor {
    /// Fill color as 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            BallColor::Red => 0xE0_30_30,
            BallColor::Blue => 0x30_60_E0,
            BallColor::Green => 0x30_C0_50,
            BallColor::Yellow => 0xE0_C0_30,
        }
    }
}

/// One accelerometer reading, raw signed counts on two axes.
///
/// A zero sample is the stale/failed-read fallback and produces no movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    pub x: i16,
    pub y: i16,
}

/// Complete state of one game session.
///
/// Exactly one is live at a time. `reset_for_play` re-arms it on entering
/// Playing; `reset_to_menu` clears the transient fields on returning to Menu.
/// The chosen ball color persists across both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub mode: GameMode,
    pub score: u32,
    /// Lives lost so far, in [0, MAX_LIVES]
    pub lives_lost: u8,
    /// Ball sprite top-left corner; the collision circle center sits
    /// `ball_radius` further on both axes
    pub ball_pos: Vec2,
    pub ball_color: BallColor,
    pub obstacles: ObstaclePool,
    pub bonus: Bonus,
}

impl GameSession {
    pub fn new(bounds: &ScreenBounds) -> Self {
        Self {
            mode: GameMode::Menu,
            score: 0,
            lives_lost: 0,
            ball_pos: bounds.ball_start(),
            ball_color: BallColor::default(),
            obstacles: ObstaclePool::new(),
            bonus: Bonus::new(),
        }
    }

    /// Lives remaining, derived so it can never diverge from `lives_lost`
    #[inline]
    pub fn lives_left(&self) -> u8 {
        MAX_LIVES - self.lives_lost
    }

    /// Collision circle center for the current ball position
    #[inline]
    pub fn ball_center(&self, bounds: &ScreenBounds) -> Vec2 {
        self.ball_pos + Vec2::splat(bounds.ball_radius())
    }

    /// Entry effects of Menu -> Playing: fresh score and lives, ball at
    /// center, empty obstacle pool.
    pub fn reset_for_play(&mut self, bounds: &ScreenBounds) {
        self.mode = GameMode::Playing;
        self.score = 0;
        self.lives_lost = 0;
        self.ball_pos = bounds.ball_start();
        self.obstacles.clear();
        self.bonus.hide();
    }

    /// Entry effects of the return to Menu: transient fields cleared, ball
    /// recentered. The ball color is deliberately kept.
    pub fn reset_to_menu(&mut self, bounds: &ScreenBounds) {
        self.mode = GameMode::Menu;
        self.score = 0;
        self.lives_lost = 0;
        self.ball_pos = bounds.ball_start();
        self.obstacles.clear();
        self.bonus.hide();
    }
}
