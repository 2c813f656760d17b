//! Shared behavior of the falling-piece modes
//!
//! Puzzle, Construction and Recipe all move, rotate, drop and lock pieces the
//! same way; they differ in which pieces they draw and in what happens after a
//! piece is merged into the grid. That difference is a [`LockPolicy`].

use glam::IVec2;

use super::ModeRules;
use crate::consts::GRID_WIDTH;
use crate::sim::catalog::CellKind;
use crate::sim::collision::fits;
use crate::sim::state::{ActiveEntity, GameState};

/// Where new pieces appear: top row, left of center
pub const SPAWN_ANCHOR: IVec2 = IVec2::new(GRID_WIDTH / 2 - 1, 0);

/// Mode-specific part of a falling-piece rule set
pub trait LockPolicy: Default {
    /// Whether `act` rotates the piece
    const ROTATES: bool = true;

    /// Pick the kind of a fresh piece
    fn draw(state: &mut GameState) -> CellKind;

    /// Extra setup at run start, before the first piece spawns
    fn on_start(&mut self, _state: &mut GameState) {}

    /// Settle the grid after a merge. Returns false when play should not
    /// continue with a new piece.
    fn resolve(&mut self, state: &mut GameState) -> bool;

    /// Apply a power-up selection. Returns false if it was not accepted.
    fn apply_power_up(&mut self, _state: &mut GameState, _id: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
pub struct FallingRules<P> {
    pub policy: P,
}

impl<P: LockPolicy> FallingRules<P> {
    fn draw(state: &mut GameState) -> CellKind {
        if state.effects.long_pieces > 0 {
            state.effects.long_pieces -= 1;
            return CellKind::I;
        }
        P::draw(state)
    }

    /// Promote the preview to the active piece. Ends the run if it does not fit.
    fn spawn_next(&mut self, state: &mut GameState) -> bool {
        let kind = match state.next_piece.take() {
            Some(kind) => kind,
            None => Self::draw(state),
        };
        let piece = ActiveEntity::new(kind, SPAWN_ANCHOR);
        if !fits(&piece.shape, piece.pos, &state.grid) {
            log::debug!("{:?} blocked at spawn", kind);
            state.game_over();
            return false;
        }
        state.active = Some(piece);
        state.next_piece = Some(Self::draw(state));
        true
    }
}

impl<P: LockPolicy> ModeRules for FallingRules<P> {
    fn spawn(&mut self, state: &mut GameState) {
        self.policy.on_start(state);
        self.spawn_next(state);
    }

    fn shift(&mut self, state: &mut GameState, delta: IVec2) -> bool {
        let Some(piece) = state.active.as_mut() else {
            return false;
        };
        let target = piece.pos + delta;
        if fits(&piece.shape, target, &state.grid) {
            piece.pos = target;
            return true;
        }
        if delta.y > 0 {
            self.resolve_lock(state);
        }
        false
    }

    fn act(&mut self, state: &mut GameState) {
        if !P::ROTATES {
            return;
        }
        let Some(piece) = state.active.as_mut() else {
            return;
        };
        let rotated = piece.shape.rotated();
        if fits(&rotated, piece.pos, &state.grid) {
            piece.shape = rotated;
        }
    }

    fn hard_drop(&mut self, state: &mut GameState) {
        while self.shift(state, IVec2::Y) {}
    }

    fn tick(&mut self, state: &mut GameState) {
        self.shift(state, IVec2::Y);
    }

    fn resolve_lock(&mut self, state: &mut GameState) {
        let Some(piece) = state.active.take() else {
            return;
        };
        for cell in piece.cells().filter(|c| c.y >= 0) {
            state.grid.set(cell, Some(piece.kind));
        }
        log::debug!("locked {:?} at {}", piece.kind, piece.pos);
        if self.policy.resolve(state) {
            self.spawn_next(state);
        }
    }

    fn apply_power_up(&mut self, state: &mut GameState, id: &str) -> bool {
        if !self.policy.apply_power_up(state, id) {
            return false;
        }
        if state.effects.long_pieces > 0 {
            // Redraw the preview so forced pieces start immediately
            state.next_piece = None;
        }
        self.spawn_next(state);
        true
    }
}
