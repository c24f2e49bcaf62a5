//! Boxfall demo entry point
//!
//! Spawns a player and a scatter of debris boxes, replays a short scripted
//! input session through the headless display, and runs the engine loop
//! until the scripted quit. Run with `RUST_LOG=debug` to watch the engine.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use boxfall::sim::ShapeKind;
use boxfall::{EngineConfig, GameEngine, HeadlessDisplay, Key, KeyEvent};

const PLAYER_WIDTH: f64 = 30.0;
const PLAYER_HEIGHT: f64 = 30.0;
const PLAYER_MASS: f64 = 1.0;

const DEBRIS_COUNT: usize = 8;
const DEBRIS_SIZE: f64 = 12.0;
const DEBRIS_MASS: f64 = 0.5;

/// Demo RNG seed (deterministic debris layout)
const DEMO_SEED: u64 = 0xB0F_FA11;

fn main() {
    env_logger::init();

    let config = EngineConfig::default();

    // A short recorded session: walk right, jump, walk back, quit.
    let script = vec![
        (Duration::from_millis(200), KeyEvent::Pressed(Key::Right)),
        (Duration::from_millis(900), KeyEvent::Released(Key::Right)),
        (Duration::from_millis(1000), KeyEvent::Pressed(Key::Space)),
        (Duration::from_millis(1600), KeyEvent::Pressed(Key::Left)),
        (Duration::from_millis(2100), KeyEvent::Released(Key::Left)),
        (Duration::from_millis(3000), KeyEvent::Pressed(Key::Q)),
    ];
    let display = HeadlessDisplay::with_script(config.world_width, config.world_height, script);
    let mut engine = GameEngine::new(&config, display);

    engine.spawn_player(
        ShapeKind::Rectangle,
        0.0,
        10.0,
        PLAYER_WIDTH,
        PLAYER_HEIGHT,
        PLAYER_MASS,
    );

    let mut rng = Pcg32::seed_from_u64(DEMO_SEED);
    for _ in 0..DEBRIS_COUNT {
        let x = rng.random_range(0.0..config.world_width - DEBRIS_SIZE);
        let y = rng.random_range(0.0..config.world_height / 2.0);
        engine.spawn_object(ShapeKind::Rectangle, x, y, DEBRIS_SIZE, DEBRIS_SIZE, DEBRIS_MASS);
    }

    engine.on_key_pressed(KeyEvent::Pressed(Key::Q), |engine| engine.exit());
    engine.on_key_pressed(KeyEvent::Pressed(Key::Space), |engine| engine.player_jump());
    engine.on_key_pressed(KeyEvent::Pressed(Key::Left), |engine| {
        engine.player_set_walking_left()
    });
    engine.on_key_pressed(KeyEvent::Released(Key::Left), |engine| {
        engine.player_unset_walking_left()
    });
    engine.on_key_pressed(KeyEvent::Pressed(Key::Right), |engine| {
        engine.player_set_walking_right()
    });
    engine.on_key_pressed(KeyEvent::Released(Key::Right), |engine| {
        engine.player_unset_walking_right()
    });

    engine.run();

    if let Some(player) = engine.world().player() {
        log::info!(
            "player came to rest at ({:.1}, {:.1}) after {} frames",
            player.position.x,
            player.position.y,
            engine.display().draw_count()
        );
    }
}
