//! Fixed timestep simulation ticks
//!
//! The movement tick integrates the tilt sample, advances obstacles and runs
//! the collision cascade; the score and spawn ticks handle their own timers'
//! work. All of them no-op outside Playing, so a stale timer firing late can
//! never corrupt a session.

use rand_pcg::Pcg32;

use super::collision::{boundary_contact, circle_rect_overlap};
use super::state::{GameMode, GameSession, TiltSample};
use crate::config::GameConfig;
use crate::consts::{BONUS_SCORE, MAX_LIVES, SCORE_PER_TICK};

/// What a movement tick did, for the state machine to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing notable; positions moved
    Moved,
    /// Bonus picked up and hidden; score already credited
    BonusCollected,
    /// Life-losing collision; pool cleared, ball recentered
    LifeLost,
    /// The life lost was the last one; mode is now GameOver
    GameOver,
}

/// One 20 ms movement tick while Playing.
///
/// Pipeline: integrate tilt (axes cross-mapped to match the sensor mounting),
/// advance obstacles, then check boundary, bonus, and obstacles in slot
/// order. Exactly one collision is processed per tick; the first hit wins.
pub fn movement_tick(
    session: &mut GameSession,
    tilt: TiltSample,
    cfg: &GameConfig,
) -> TickOutcome {
    if session.mode != GameMode::Playing {
        return TickOutcome::Moved;
    }
    let bounds = &cfg.bounds;

    // Sensor Y drives horizontal motion and vice versa
    session.ball_pos.x += tilt.y as f32 * cfg.sensitivity;
    session.ball_pos.y += tilt.x as f32 * cfg.sensitivity;

    session.obstacles.advance(bounds);

    if boundary_contact(session.ball_pos, bounds.ball_size, bounds) {
        return lose_life(session, cfg);
    }

    let center = session.ball_center(bounds);
    let radius = bounds.ball_radius();

    if session.bonus.visible && circle_rect_overlap(center, radius, &session.bonus.rect(bounds)) {
        session.score += BONUS_SCORE;
        session.bonus.hide();
        log::info!("bonus collected, score {}", session.score);
        return TickOutcome::BonusCollected;
    }

    let hit = session
        .obstacles
        .iter_active()
        .any(|(_, o)| circle_rect_overlap(center, radius, &o.rect(bounds)));
    if hit {
        return lose_life(session, cfg);
    }

    TickOutcome::Moved
}

/// Shared life-loss path for boundary and obstacle collisions: count the
/// loss, wipe the pool, recenter the ball, and force GameOver within the same
/// tick when the last life went.
fn lose_life(session: &mut GameSession, cfg: &GameConfig) -> TickOutcome {
    session.lives_lost += 1;
    session.obstacles.clear();
    session.ball_pos = cfg.bounds.ball_start();
    log::info!("life lost ({}/{MAX_LIVES})", session.lives_lost);
    if session.lives_lost >= MAX_LIVES {
        session.mode = GameMode::GameOver;
        TickOutcome::GameOver
    } else {
        TickOutcome::LifeLost
    }
}

/// One 1000 ms score tick. Returns true when score was credited.
pub fn score_tick(session: &mut GameSession) -> bool {
    if session.mode != GameMode::Playing {
        return false;
    }
    session.score += SCORE_PER_TICK;
    true
}

/// One 2000 ms obstacle-spawn tick. Returns the spawned slot, `None` when
/// not Playing or the pool is full.
pub fn spawn_tick(
    session: &mut GameSession,
    rng: &mut Pcg32,
    cfg: &GameConfig,
) -> Option<usize> {
    if session.mode != GameMode::Playing {
        return None;
    }
    session
        .obstacles
        .spawn(rng, &cfg.bounds, cfg.obstacle_speed)
}

/// Show the bonus at a fresh random position. No-op unless Playing.
/// Returns true when the bonus was (re)spawned.
pub fn spawn_bonus(session: &mut GameSession, rng: &mut Pcg32, cfg: &GameConfig) -> bool {
    if session.mode != GameMode::Playing {
        return false;
    }
    session.bonus.spawn(rng, &cfg.bounds);
    true
}
