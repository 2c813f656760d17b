//! Classic falling-block rules: full rows clear

use rand::Rng;

use super::falling::LockPolicy;
use crate::consts::{LINES_PER_LEVEL, LINE_CLEAR_POINTS};
use crate::sim::catalog::CellKind;
use crate::sim::state::{GameEvent, GameState};

#[derive(Debug, Clone, Copy, Default)]
pub struct LineClear;

impl LockPolicy for LineClear {
    fn draw(state: &mut GameState) -> CellKind {
        CellKind::TETROMINOES[state.rng.random_range(0..CellKind::TETROMINOES.len())]
    }

    fn resolve(&mut self, state: &mut GameState) -> bool {
        let cleared = state.grid.clear_full_rows();
        if cleared > 0 {
            // Scored at the level the rows were cleared on
            state.award(LINE_CLEAR_POINTS * cleared as u64 * state.level as u64);
            state.lines += cleared;
            state.level = state.lines / LINES_PER_LEVEL + 1;
            state.emit(GameEvent::LinesCleared(cleared));
            log::debug!("cleared {} rows, lines={} level={}", cleared, state.lines, state.level);
        }
        true
    }
}
