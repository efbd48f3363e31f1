//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one movement tick = 20 ms of game time)
//! - Seeded RNG only
//! - Stable iteration order (obstacles by pool slot)
//! - No rendering or platform dependencies

pub mod bonus;
pub mod collision;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use bonus::Bonus;
pub use collision::{Rect, boundary_contact, circle_rect_overlap};
pub use obstacles::{Obstacle, ObstaclePool};
pub use state::{BallColor, GameMode, GameSession, TiltSample};
pub use tick::{TickOutcome, movement_tick, score_tick, spawn_bonus, spawn_tick};
