//! Tunneling rules: dig through dirt, dodge falling rocks, pump monsters

use glam::IVec2;
use rand::Rng;

use super::ModeRules;
use crate::consts::{DIRT_POINTS, GRID_HEIGHT, GRID_WIDTH, PUMP_POINTS, TUNNELING_TICK_MS};
use crate::sim::catalog::CellKind;
use crate::sim::state::{ActiveEntity, GameState};

/// Rows left open at the top for the digger to start in
const OPEN_ROWS: i32 = 4;
/// Cumulative per-cell odds when seeding the ground
const ROCK_CHANCE: f64 = 0.05;
const POOKA_CHANCE: f64 = 0.08;
const FYGAR_CHANCE: f64 = 0.10;
/// Per-tick odds that a monster tries to wander
const WANDER_CHANCE: f64 = 0.2;
const PUMP_BURST_COLOR: u32 = 0xff0000;

const DIRECTIONS: [IVec2; 4] = [IVec2::Y, IVec2::NEG_Y, IVec2::X, IVec2::NEG_X];

#[derive(Debug, Clone, Copy, Default)]
pub struct TunnelingRules;

impl TunnelingRules {
    fn seed_ground(state: &mut GameState) {
        for y in OPEN_ROWS..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let roll: f64 = state.rng.random();
                let kind = if roll < ROCK_CHANCE {
                    CellKind::Rock
                } else if roll < POOKA_CHANCE {
                    CellKind::Pooka
                } else if roll < FYGAR_CHANCE {
                    CellKind::Fygar
                } else {
                    CellKind::Dirt
                };
                state.grid.set(IVec2::new(x, y), Some(kind));
            }
        }
    }

    /// Rocks with empty space below drop one row; bottom-up so each falls once
    fn drop_rocks(state: &mut GameState) {
        for y in (0..GRID_HEIGHT - 1).rev() {
            for x in 0..GRID_WIDTH {
                let pos = IVec2::new(x, y);
                let below = pos + IVec2::Y;
                if state.grid.holds(pos, CellKind::Rock) && state.grid.is_empty_at(below) {
                    state.grid.set(below, Some(CellKind::Rock));
                    state.grid.set(pos, None);
                }
            }
        }
    }

    fn wander_monsters(state: &mut GameState) {
        let monsters: Vec<(IVec2, CellKind)> = state
            .grid
            .iter()
            .filter_map(|(pos, cell)| cell.filter(|k| k.is_monster()).map(|k| (pos, k)))
            .collect();
        for (pos, kind) in monsters {
            if !state.rng.random_bool(WANDER_CHANCE) {
                continue;
            }
            let target = pos + DIRECTIONS[state.rng.random_range(0..DIRECTIONS.len())];
            if state.grid.is_empty_at(target) {
                state.grid.set(target, Some(kind));
                state.grid.set(pos, None);
            }
        }
    }
}

impl ModeRules for TunnelingRules {
    fn spawn(&mut self, state: &mut GameState) {
        Self::seed_ground(state);
        let start = IVec2::new(GRID_WIDTH / 2, 2);
        state.active = Some(ActiveEntity::new(CellKind::Digger, start).facing(IVec2::Y));
    }

    fn shift(&mut self, state: &mut GameState, delta: IVec2) -> bool {
        let Some(digger) = state.active else {
            return false;
        };
        let target = digger.pos + delta;
        let Some(cell) = state.grid.get(target) else {
            return false;
        };
        match cell {
            Some(CellKind::Rock) => return false,
            Some(kind) if kind.is_monster() => {
                log::debug!("digger walked into {:?} at {}", kind, target);
                state.game_over();
                return false;
            }
            Some(CellKind::Dirt) => {
                state.grid.set(target, None);
                state.award(DIRT_POINTS);
            }
            _ => {}
        }
        state.active = Some(ActiveEntity {
            pos: target,
            facing: delta,
            ..digger
        });
        true
    }

    fn act(&mut self, state: &mut GameState) {
        let Some(digger) = state.active else {
            return;
        };
        let target = digger.pos + digger.facing;
        if let Some(Some(kind)) = state.grid.get(target) {
            if kind.is_monster() {
                state.grid.set(target, None);
                state.award(PUMP_POINTS);
                state.burst(target, PUMP_BURST_COLOR);
                log::debug!("pumped {:?} at {}", kind, target);
            }
        }
    }

    fn tick(&mut self, state: &mut GameState) {
        Self::drop_rocks(state);
        Self::wander_monsters(state);
        let Some(digger) = state.active else {
            return;
        };
        if let Some(Some(kind)) = state.grid.get(digger.pos) {
            if kind == CellKind::Rock || kind.is_monster() {
                log::debug!("digger crushed by {:?}", kind);
                state.game_over();
            }
        }
    }

    fn tick_interval_ms(&self, _state: &GameState) -> u32 {
        TUNNELING_TICK_MS
    }
}
