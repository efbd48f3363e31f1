//! Tilt Ball headless demo driver
//!
//! Runs one full session against the deterministic harness: a scripted tilt
//! sweep steers the ball until the three lives are gone, then the run report
//! is printed. Usage: `tiltball [seed] [config.json]`.

use tiltball::config::GameConfig;
use tiltball::game::GameApp;
use tiltball::platform::harness::Harness;
use tiltball::sim::{GameMode, TiltSample};

/// Upper bound on the simulated session, wall-clock milliseconds.
const MAX_RUN_MS: u64 = 120_000;

fn load_config(path: &str) -> Option<GameConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log::error!("cannot read config {path}: {err}");
            return None;
        }
    };
    match GameConfig::from_json(&text) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::error!("cannot parse config {path}: {err}");
            None
        }
    }
}

/// Scripted tilt: two slow out-of-phase sweeps, enough to wander the ball
/// into walls and the occasional bonus.
fn scripted_tilt(ms: u64) -> TiltSample {
    let t = ms as f32 / 1000.0;
    TiltSample {
        x: (5000.0 * (t * 0.9).sin()) as i16,
        y: (7000.0 * (t * 0.6).cos()) as i16,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB1_11E);
    let cfg = args
        .get(2)
        .and_then(|path| load_config(path))
        .unwrap_or_default();

    log::info!("starting demo run, seed {seed}");

    let mut harness = Harness::new();
    let mut app = GameApp::new(cfg, seed, &mut harness);
    app.on_play(&mut harness);

    let mut final_score = 0;
    let mut last_mode = app.mode();
    while harness.now() < MAX_RUN_MS {
        harness.advance(1);
        harness.set_tilt(scripted_tilt(harness.now()));
        while let Some(event) = harness.pop_due() {
            app.on_timer(event, &mut harness);
        }
        if app.mode() == GameMode::GameOver && last_mode == GameMode::Playing {
            final_score = app.session().score;
        }
        last_mode = app.mode();
        if last_mode == GameMode::Menu {
            // Back on the menu after the game-over delay: the run is done
            break;
        }
    }

    let stats = *app.stats();
    println!(
        "run over after {} ms: score {}, {} movement ticks, {} obstacles, {} bonuses",
        harness.now(),
        final_score,
        stats.ticks,
        stats.obstacles_spawned,
        stats.bonuses_collected
    );
}
