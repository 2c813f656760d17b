//! Scenario tests - whole runs through the public store API

use grid_arcade::consts::{GRID_HEIGHT, GRID_WIDTH};
use grid_arcade::sim::{Autopilot, CellKind, Game, GameEvent, GameMode, GameStatus, Intent};

fn run_with_autopilot(seed: u64, mode: GameMode, ticks: u32) -> Game {
    let mut game = Game::new(seed);
    let mut pilot = Autopilot::new(seed);
    game.start(mode);
    for _ in 0..ticks {
        match game.status() {
            GameStatus::Playing => {
                if let Some(intent) = pilot.choose(&game) {
                    game.apply(intent);
                }
                game.tick();
            }
            GameStatus::PowerUpSelect => {
                let id = pilot.pick_power_up(&game).expect("offered power-up");
                assert!(game.select_power_up(id));
            }
            _ => break,
        }
    }
    game
}

#[test]
fn test_puzzle_stacks_until_game_over() {
    let mut game = Game::new(11);
    assert!(game.start(GameMode::Puzzle));
    let mut drops = 0;
    while game.status() == GameStatus::Playing {
        game.hard_drop();
        drops += 1;
        assert!(drops < 200, "center column never topped out");
    }
    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(game.state().active.is_none());
    assert!(game.drain_events().contains(&GameEvent::GameOver));

    let score = game.score();
    let level = game.level();
    for _ in 0..10 {
        game.tick();
        game.hard_drop();
        game.act();
        assert!(!game.shift(-1, 0));
    }
    assert_eq!(game.score(), score);
    assert_eq!(game.level(), level);
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_puzzle_gravity_alone_tops_out() {
    let mut game = Game::new(12);
    game.start(GameMode::Puzzle);
    let mut ticks = 0;
    while game.status() == GameStatus::Playing {
        game.tick();
        ticks += 1;
        assert!(ticks < 10_000, "gravity never topped out");
    }
    assert_eq!(game.status(), GameStatus::GameOver);
    // Nothing but the spawn columns was ever filled, so no row cleared
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.state().time_ticks, ticks);
}

#[test]
fn test_same_seed_same_run() {
    for mode in GameMode::ALL {
        let a = run_with_autopilot(99, mode, 300);
        let b = run_with_autopilot(99, mode, 300);
        assert_eq!(a.snapshot().to_ascii(), b.snapshot().to_ascii(), "{}", mode.as_str());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.status(), b.status());
    }
}

#[test]
fn test_inputs_ignored_in_menu() {
    let mut game = Game::new(1);
    assert_eq!(game.status(), GameStatus::Menu);
    assert!(!game.apply(Intent::Move { dx: 1, dy: 0 }));
    assert!(!game.apply(Intent::Act));
    assert!(!game.apply(Intent::HardDrop));
    assert!(!game.apply(Intent::Pause));
    game.tick();
    assert_eq!(game.state().time_ticks, 0);
    assert_eq!(game.state().grid.occupied_count(), 0);
}

#[test]
fn test_non_unit_moves_rejected() {
    let mut game = Game::new(2);
    game.start(GameMode::Puzzle);
    let before = game.state().active;
    assert!(!game.shift(2, 0));
    assert!(!game.shift(1, 1));
    assert!(!game.shift(0, 0));
    assert_eq!(game.state().active, before);
}

#[test]
fn test_pause_freezes_run() {
    let mut game = Game::new(3);
    game.start(GameMode::Collector);
    assert!(game.apply(Intent::Pause));
    let head = game.state().active;
    game.tick();
    assert_eq!(game.state().active, head);
    assert!(!game.start(GameMode::Puzzle));
    assert!(game.apply(Intent::Pause));
    game.tick();
    assert_ne!(game.state().active, head);
}

#[test]
fn test_collector_reversal_rejected() {
    let mut game = Game::new(4);
    game.start(GameMode::Collector);
    assert!(!game.shift(0, 1));
    let head = game.state().active.expect("head");
    game.tick();
    let moved = game.state().active.expect("head");
    assert_eq!(moved.pos, head.pos + glam::IVec2::NEG_Y);
}

#[test]
fn test_restart_after_game_over_resets_everything() {
    let mut game = Game::new(5);
    game.start(GameMode::Puzzle);
    while game.status() == GameStatus::Playing {
        game.hard_drop();
    }
    assert!(game.start(GameMode::Tunneling));
    let state = game.state();
    assert_eq!(state.mode, GameMode::Tunneling);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.level, 1);
    assert_eq!(state.lines, 0);
    assert_eq!(state.time_ticks, 0);
    assert!(state.grid.positions_of(CellKind::I).is_empty());
    assert!(!state.grid.positions_of(CellKind::Dirt).is_empty());
    assert_eq!(game.tick_interval_ms(), 200);
}

#[test]
fn test_return_to_menu_from_pause() {
    let mut game = Game::new(6);
    game.start(GameMode::Defense);
    assert!(!game.return_to_menu());
    game.toggle_pause();
    assert!(game.return_to_menu());
    assert_eq!(game.status(), GameStatus::Menu);
    assert!(game.start(GameMode::Recipe));
}

#[test]
fn test_autopilot_keeps_entities_on_grid() {
    for mode in GameMode::ALL {
        let game = run_with_autopilot(21, mode, 500);
        let snap = game.snapshot();
        assert_eq!(snap.grid.len(), GRID_HEIGHT as usize);
        for cell in snap.body.iter().chain(snap.projectiles.iter().map(|p| &p.pos)) {
            assert!(cell.x >= 0 && cell.x < GRID_WIDTH);
            assert!(cell.y >= 0 && cell.y < GRID_HEIGHT);
        }
    }
}
