//! Top-level game state machine
//!
//! `GameApp` owns the session, the RNG and the scene/timer bookkeeping, and
//! turns button actions and timer events into sim calls and renderer updates.
//! Modes: Menu (initial) -> Playing or ColorSelect; Playing -> GameOver on
//! the third lost life; GameOver -> Menu after a fixed delay. Entering
//! GameOver or Menu always cancels every timer armed by the prior mode.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::*;
use crate::platform::{
    EntityHandle, EntityKind, Platform, Repeat, Scene, TimerEvent, TimerSlot,
};
use crate::sim::{self, BallColor, GameMode, GameSession, TickOutcome};
use crate::to_pixel;

/// Counters for the end-of-session report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub ticks: u64,
    pub obstacles_spawned: u32,
    pub bonuses_collected: u32,
}

/// The game, wired to a platform.
pub struct GameApp {
    cfg: GameConfig,
    session: GameSession,
    rng: Pcg32,
    stats: SessionStats,

    ball: EntityHandle,
    bonus: EntityHandle,
    /// Index == obstacle pool slot
    obstacle_entities: Vec<EntityHandle>,
    score_label: EntityHandle,
    lives_label: EntityHandle,
    banner: EntityHandle,

    movement_timer: TimerSlot,
    score_timer: TimerSlot,
    spawn_timer: TimerSlot,
    bonus_timer: TimerSlot,
    menu_timer: TimerSlot,
}

impl GameApp {
    /// Create the scene entities (all hidden) and an idle session in Menu.
    pub fn new(cfg: GameConfig, seed: u64, scene: &mut impl Scene) -> Self {
        let session = GameSession::new(&cfg.bounds);

        let ball = scene.create(
            EntityKind::Ball,
            cfg.bounds.ball_size as u32,
            session.ball_color.rgb(),
        );
        scene.set_visible(ball, false);

        let bonus = scene.create(EntityKind::Bonus, cfg.bounds.bonus_size as u32, BONUS_COLOR);
        scene.set_visible(bonus, false);

        let obstacle_entities: Vec<EntityHandle> = (0..OBSTACLE_CAP)
            .map(|_| {
                let handle = scene.create(
                    EntityKind::Obstacle,
                    cfg.bounds.obstacle_size as u32,
                    OBSTACLE_COLOR,
                );
                scene.set_visible(handle, false);
                handle
            })
            .collect();

        let score_label = scene.create(EntityKind::Label, 0, LABEL_COLOR);
        scene.set_visible(score_label, false);
        let lives_label = scene.create(EntityKind::Label, 0, LABEL_COLOR);
        scene.set_visible(lives_label, false);
        let banner = scene.create(EntityKind::Label, 0, LABEL_COLOR);
        scene.set_visible(banner, false);

        log::info!("game core ready (seed {seed})");

        Self {
            cfg,
            session,
            rng: Pcg32::seed_from_u64(seed),
            stats: SessionStats::default(),
            ball,
            bonus,
            obstacle_entities,
            score_label,
            lives_label,
            banner,
            movement_timer: TimerSlot::empty(),
            score_timer: TimerSlot::empty(),
            spawn_timer: TimerSlot::empty(),
            bonus_timer: TimerSlot::empty(),
            menu_timer: TimerSlot::empty(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// "Play" pressed on the menu: Menu -> Playing.
    pub fn on_play(&mut self, platform: &mut impl Platform) {
        if self.session.mode != GameMode::Menu {
            log::debug!("play ignored in {:?}", self.session.mode);
            return;
        }
        self.session.reset_for_play(&self.cfg.bounds);
        self.stats = SessionStats::default();

        self.sync_ball(platform);
        platform.set_visible(self.ball, true);
        self.hide_obstacle_entities(platform);
        platform.set_visible(self.banner, false);
        self.refresh_score(platform);
        self.refresh_lives(platform);
        platform.set_visible(self.score_label, true);
        platform.set_visible(self.lives_label, true);

        // Immediate first bonus, then the one-shot respawn cycle
        if sim::spawn_bonus(&mut self.session, &mut self.rng, &self.cfg) {
            self.sync_bonus(platform);
        }

        self.movement_timer
            .arm(platform, MOVE_TICK_MS, Repeat::Forever, TimerEvent::Movement);
        self.score_timer
            .arm(platform, SCORE_TICK_MS, Repeat::Forever, TimerEvent::Score);
        self.spawn_timer.arm(
            platform,
            SPAWN_TICK_MS,
            Repeat::Forever,
            TimerEvent::ObstacleSpawn,
        );
        self.bonus_timer.arm(
            platform,
            BONUS_RESPAWN_MS,
            Repeat::Once,
            TimerEvent::BonusRespawn,
        );

        log::info!("session started");
    }

    /// "Color" pressed on the menu: Menu -> ColorSelect, ball previewed.
    pub fn on_color_select(&mut self, scene: &mut impl Scene) {
        if self.session.mode != GameMode::Menu {
            return;
        }
        self.session.mode = GameMode::ColorSelect;
        self.session.ball_pos = self.cfg.bounds.ball_start();
        self.sync_ball(scene);
        scene.set_visible(self.ball, true);
    }

    /// A color swatch clicked while on the color-select screen.
    pub fn on_color_picked(&mut self, color: BallColor, scene: &mut impl Scene) {
        if self.session.mode != GameMode::ColorSelect {
            return;
        }
        self.session.ball_color = color;
        // The renderer has no recolor primitive; swap the entity
        scene.destroy(self.ball);
        self.ball = scene.create(EntityKind::Ball, self.cfg.bounds.ball_size as u32, color.rgb());
        self.sync_ball(scene);
        scene.set_visible(self.ball, true);
        log::debug!("ball color set to {color:?}");
    }

    /// "Back" pressed: ColorSelect -> Menu. The chosen color persists.
    pub fn on_back(&mut self, scene: &mut impl Scene) {
        if self.session.mode != GameMode::ColorSelect {
            return;
        }
        self.session.mode = GameMode::Menu;
        self.session.ball_pos = self.cfg.bounds.ball_start();
        self.sync_ball(scene);
        scene.set_visible(self.ball, false);
    }

    /// A registered timer came due.
    pub fn on_timer(&mut self, event: TimerEvent, platform: &mut impl Platform) {
        match event {
            TimerEvent::Movement => self.handle_movement(platform),
            TimerEvent::Score => {
                if sim::score_tick(&mut self.session) {
                    self.refresh_score(platform);
                }
            }
            TimerEvent::ObstacleSpawn => {
                if let Some(slot) = sim::spawn_tick(&mut self.session, &mut self.rng, &self.cfg) {
                    self.stats.obstacles_spawned += 1;
                    let handle = self.obstacle_entities[slot];
                    let (x, y) = to_pixel(self.session.obstacles.slots[slot].pos);
                    platform.set_position(handle, x, y);
                    platform.set_visible(handle, true);
                }
            }
            TimerEvent::BonusRespawn => {
                // One-shot already retired by the dispatcher
                self.bonus_timer.expire();
                if sim::spawn_bonus(&mut self.session, &mut self.rng, &self.cfg) {
                    self.sync_bonus(platform);
                    self.bonus_timer.arm(
                        platform,
                        BONUS_RESPAWN_MS,
                        Repeat::Once,
                        TimerEvent::BonusRespawn,
                    );
                }
            }
            TimerEvent::ReturnToMenu => {
                self.menu_timer.expire();
                self.enter_menu(platform);
            }
        }
    }

    fn handle_movement(&mut self, platform: &mut impl Platform) {
        let tilt = platform.read_tilt();
        let outcome = sim::movement_tick(&mut self.session, tilt, &self.cfg);
        self.stats.ticks += 1;

        match outcome {
            TickOutcome::Moved => {
                self.sync_ball(platform);
                self.sync_obstacles(platform);
            }
            TickOutcome::BonusCollected => {
                self.stats.bonuses_collected += 1;
                platform.set_visible(self.bonus, false);
                self.refresh_score(platform);
                self.bonus_timer.arm(
                    platform,
                    BONUS_RESPAWN_MS,
                    Repeat::Once,
                    TimerEvent::BonusRespawn,
                );
                self.sync_ball(platform);
                self.sync_obstacles(platform);
            }
            TickOutcome::LifeLost => {
                self.refresh_lives(platform);
                self.hide_obstacle_entities(platform);
                self.sync_ball(platform);
            }
            TickOutcome::GameOver => self.enter_game_over(platform),
        }
    }

    /// Entry effects of Playing -> GameOver. The sim already flipped the
    /// mode and cleared the pool; this side cancels every Playing timer and
    /// freezes the display on the final score.
    fn enter_game_over(&mut self, platform: &mut impl Platform) {
        self.movement_timer.cancel(platform);
        self.score_timer.cancel(platform);
        self.spawn_timer.cancel(platform);
        self.bonus_timer.cancel(platform);

        platform.set_visible(self.ball, false);
        self.hide_obstacle_entities(platform);
        self.session.bonus.hide();
        platform.set_visible(self.bonus, false);

        self.refresh_score(platform);
        self.refresh_lives(platform);
        platform.set_text(self.banner, "GAME OVER");
        platform.set_visible(self.banner, true);

        self.menu_timer
            .arm(platform, GAME_OVER_MS, Repeat::Once, TimerEvent::ReturnToMenu);

        log::info!(
            "game over: score {}, {} ticks, {} obstacles, {} bonuses",
            self.session.score,
            self.stats.ticks,
            self.stats.obstacles_spawned,
            self.stats.bonuses_collected
        );
    }

    /// Entry effects of the delayed GameOver -> Menu transition.
    fn enter_menu(&mut self, platform: &mut impl Platform) {
        self.session.reset_to_menu(&self.cfg.bounds);
        // Normally already cancelled on GameOver entry; no-op then
        self.bonus_timer.cancel(platform);

        platform.set_visible(self.banner, false);
        platform.set_visible(self.score_label, false);
        platform.set_visible(self.lives_label, false);
        platform.set_visible(self.ball, false);
        platform.set_visible(self.bonus, false);
        self.hide_obstacle_entities(platform);

        log::info!("returned to menu");
    }

    fn sync_ball(&self, scene: &mut impl Scene) {
        let (x, y) = to_pixel(self.session.ball_pos);
        scene.set_position(self.ball, x, y);
    }

    fn sync_bonus(&self, scene: &mut impl Scene) {
        let (x, y) = to_pixel(self.session.bonus.pos);
        scene.set_position(self.bonus, x, y);
        scene.set_visible(self.bonus, true);
    }

    fn sync_obstacles(&self, scene: &mut impl Scene) {
        for (slot, obstacle) in self.session.obstacles.iter_active() {
            let (x, y) = to_pixel(obstacle.pos);
            scene.set_position(self.obstacle_entities[slot], x, y);
        }
    }

    fn hide_obstacle_entities(&self, scene: &mut impl Scene) {
        for handle in &self.obstacle_entities {
            scene.set_visible(*handle, false);
        }
    }

    fn refresh_score(&self, scene: &mut impl Scene) {
        scene.set_text(self.score_label, &format!("Score : {}", self.session.score));
    }

    fn refresh_lives(&self, scene: &mut impl Scene) {
        scene.set_text(
            self.lives_label,
            &format!("Vies : {}", self.session.lives_left()),
        );
    }
}
