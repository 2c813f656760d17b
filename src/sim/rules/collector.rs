//! Collector rules: steer a growing snake towards food

use glam::IVec2;
use rand::seq::IndexedRandom;

use super::ModeRules;
use crate::consts::FOOD_POINTS;
use crate::sim::catalog::CellKind;
use crate::sim::state::{ActiveEntity, GameState};
use crate::in_bounds;

const START_HEAD: IVec2 = IVec2::new(5, 10);

#[derive(Debug, Clone, Default)]
pub struct CollectorRules {
    /// Trailing segments, front = most recently vacated head cell
    body: Vec<IVec2>,
}

impl CollectorRules {
    /// Place food on a random cell free of grid content and of the snake.
    /// Does nothing once the snake fills the grid.
    fn spawn_food(&self, state: &mut GameState, head: IVec2) {
        let free: Vec<IVec2> = state
            .grid
            .empty_positions()
            .into_iter()
            .filter(|p| *p != head && !self.body.contains(p))
            .collect();
        match free.choose(&mut state.rng) {
            Some(&pos) => {
                state.grid.set(pos, Some(CellKind::Food));
            }
            None => log::debug!("no room left for food"),
        }
    }
}

impl ModeRules for CollectorRules {
    fn spawn(&mut self, state: &mut GameState) {
        self.body = vec![START_HEAD + IVec2::Y, START_HEAD + IVec2::new(0, 2)];
        state.active = Some(ActiveEntity::new(CellKind::SnakeHead, START_HEAD).facing(IVec2::NEG_Y));
        self.spawn_food(state, START_HEAD);
    }

    /// Only turns the head; the snake moves on the next tick
    fn shift(&mut self, state: &mut GameState, delta: IVec2) -> bool {
        let Some(head) = state.active.as_mut() else {
            return false;
        };
        if delta == -head.facing {
            return false;
        }
        head.facing = delta;
        true
    }

    fn act(&mut self, _state: &mut GameState) {}

    fn tick(&mut self, state: &mut GameState) {
        let Some(head) = state.active else {
            return;
        };
        let next = head.pos + head.facing;
        if !in_bounds(next) || self.body.contains(&next) {
            log::debug!("snake crashed at {} with length {}", next, self.body.len() + 1);
            state.game_over();
            return;
        }

        self.body.insert(0, head.pos);
        if state.grid.holds(next, CellKind::Food) {
            state.grid.set(next, None);
            state.award(FOOD_POINTS);
            self.spawn_food(state, next);
        } else {
            self.body.pop();
        }
        state.active = Some(ActiveEntity { pos: next, ..head });
    }

    fn body(&self) -> &[IVec2] {
        &self.body
    }
}
