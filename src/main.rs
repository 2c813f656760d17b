//! Grid Arcade entry point
//!
//! Headless driver: owns the clock, feeds autopilot intents into the store and
//! logs whatever the store reports. Usage: `grid-arcade [mode] [settings.json]`.

use grid_arcade::Settings;
use grid_arcade::sim::{Autopilot, Game, GameEvent, GameMode, GameStatus};

fn main() {
    env_logger::init();
    log::info!("Grid Arcade (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mode_arg = args.next();
    let settings_path = args.next().unwrap_or_else(|| Settings::FILE_NAME.to_string());
    let settings = Settings::load(&settings_path);

    let mode = match mode_arg.as_deref() {
        Some(name) => GameMode::from_str(name).unwrap_or_else(|| {
            log::warn!("Unknown mode '{}', falling back to {}", name, settings.mode.as_str());
            settings.mode
        }),
        None => settings.mode,
    };

    let mut game = Game::new(settings.seed).with_power_up_effects(settings.power_up_effects);
    let mut pilot = Autopilot::new(settings.seed.wrapping_add(1));
    game.start(mode);

    let mut elapsed_ms: u64 = 0;
    for _ in 0..settings.demo_ticks {
        match game.status() {
            GameStatus::Playing => {
                if let Some(intent) = pilot.choose(&game) {
                    game.apply(intent);
                }
                elapsed_ms += u64::from(game.tick_interval_ms());
                game.tick();
            }
            GameStatus::PowerUpSelect => {
                if let Some(id) = pilot.pick_power_up(&game) {
                    log::info!("Autopilot picked power-up '{}'", id);
                    game.select_power_up(id);
                }
            }
            _ => break,
        }
        for event in game.drain_events() {
            match event {
                GameEvent::GameOver => log::info!("Game over after {} simulated ms", elapsed_ms),
                other => log::debug!("{:?}", other),
            }
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "{} finished: status {:?}, score {}, level {}",
        mode.as_str(),
        snapshot.status,
        snapshot.score,
        snapshot.level
    );
    println!("{}", snapshot.to_ascii());
    match serde_json::to_string(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}
