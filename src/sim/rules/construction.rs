//! Construction rules: fill the level's blueprint, then pick a power-up

use rand::seq::SliceRandom;

use super::falling::LockPolicy;
use super::puzzle::LineClear;
use crate::consts::{POWER_UP_BONUS, POWER_UP_POOL_SIZE};
use crate::sim::catalog::{blueprint_for, CellKind, POWER_UPS};
use crate::sim::collision::blueprint_satisfied;
use crate::sim::state::{GameState, GameStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct BlueprintBuild {
    /// Blueprints skipped by the `hack` power-up
    skipped: u32,
}

impl BlueprintBuild {
    fn apply_effect(&mut self, state: &mut GameState, id: &str) {
        let effects = &mut state.effects;
        match id {
            "master" => effects.long_pieces += 5,
            "warp" => effects.slow_percent += 50,
            "flip" => effects.slow_percent += 25,
            "hack" => self.skipped += 1,
            "glue" => effects.double_score_ms += 60_000,
            "pulse" => effects.score_pulse = true,
            "ghost" => effects.ghost = true,
            // Row wipes would erase the bottom-aligned blueprint; recorded only
            "hammer" | "nuke" | "switch" => log::debug!("power-up {} is recorded only", id),
            _ => log::warn!("power-up {} is not in the catalog", id),
        }
    }
}

impl LockPolicy for BlueprintBuild {
    fn draw(state: &mut GameState) -> CellKind {
        LineClear::draw(state)
    }

    fn on_start(&mut self, state: &mut GameState) {
        self.skipped = 0;
        state.blueprint = Some(blueprint_for(0));
    }

    fn resolve(&mut self, state: &mut GameState) -> bool {
        if !blueprint_satisfied(&state.grid, state.blueprint.as_ref()) {
            return true;
        }
        let mut pool = POWER_UPS.to_vec();
        pool.shuffle(&mut state.rng);
        pool.truncate(POWER_UP_POOL_SIZE);
        log::info!(
            "blueprint {} complete at level {}",
            state.blueprint.map(|b| b.name).unwrap_or("?"),
            state.level
        );
        state.power_up_pool = pool;
        state.status = GameStatus::PowerUpSelect;
        false
    }

    fn apply_power_up(&mut self, state: &mut GameState, id: &str) -> bool {
        let Some(choice) = state.power_up_pool.iter().copied().find(|p| p.id == id) else {
            return false;
        };
        log::info!("power-up selected: {}", choice.name);
        state.level += 1;
        state.grid.clear();
        state.active_power_ups.push(choice.id);
        state.award(POWER_UP_BONUS);
        if state.power_up_effects {
            self.apply_effect(state, choice.id);
        }
        state.blueprint = Some(blueprint_for(state.level + self.skipped));
        state.power_up_pool.clear();
        state.status = GameStatus::Playing;
        true
    }
}
