//! Recipe stacking: drop single ingredients, complete the four-layer stack
//! in any column

use glam::IVec2;
use rand::Rng;

use super::falling::LockPolicy;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH, RECIPES_PER_LEVEL, RECIPE_POINTS};
use crate::sim::catalog::{CellKind, RECIPE};
use crate::sim::grid::Grid;
use crate::sim::state::{GameEvent, GameState};

const BURST_COLOR: u32 = 0xffff00;

#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeStack;

/// Top cell of every column run that reads the recipe bottom-to-top
fn find_stacks(grid: &Grid) -> Vec<IVec2> {
    let len = RECIPE.len() as i32;
    let mut found = Vec::new();
    for x in 0..GRID_WIDTH {
        for y in 0..=GRID_HEIGHT - len {
            let top = IVec2::new(x, y);
            // Row y holds the last layer, row y + len - 1 the first
            let matches = RECIPE
                .iter()
                .rev()
                .enumerate()
                .all(|(i, &layer)| grid.holds(top + IVec2::new(0, i as i32), layer));
            if matches {
                found.push(top);
            }
        }
    }
    found
}

impl LockPolicy for RecipeStack {
    const ROTATES: bool = false;

    fn draw(state: &mut GameState) -> CellKind {
        RECIPE[state.rng.random_range(0..RECIPE.len())]
    }

    fn resolve(&mut self, state: &mut GameState) -> bool {
        let stacks = find_stacks(&state.grid);
        for &top in &stacks {
            for i in 0..RECIPE.len() as i32 {
                state.grid.set(top + IVec2::new(0, i), None);
            }
            state.award(RECIPE_POINTS);
            state.emit(GameEvent::RecipeCompleted);
            state.burst(top, BURST_COLOR);
        }
        if !stacks.is_empty() {
            state.recipes += stacks.len() as u32;
            state.level = state.recipes / RECIPES_PER_LEVEL + 1;
            log::debug!("{} recipes complete, total={}", stacks.len(), state.recipes);
        }
        true
    }
}
