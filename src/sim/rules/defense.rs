//! Defense rules: shoot down a centipede winding through a mushroom field

use glam::IVec2;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::ModeRules;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH, SEGMENT_POINTS};
use crate::sim::catalog::CellKind;
use crate::sim::state::{ActiveEntity, GameState};
use crate::in_bounds;

const MUSHROOM_COUNT: usize = 20;
/// Mushrooms spawn on rows 1..=MUSHROOM_MAX_ROW
const MUSHROOM_MAX_ROW: i32 = GRID_HEIGHT - 4;
const CENTIPEDE_LENGTH: i32 = 8;
const SEGMENT_BURST_COLOR: u32 = 0xff0055;

/// A bullet fired by the blaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: IVec2,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DefenseRules {
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl DefenseRules {
    fn spawn_centipede(state: &mut GameState) {
        for x in 0..CENTIPEDE_LENGTH.min(GRID_WIDTH) {
            state.grid.set(IVec2::new(x, 0), Some(CellKind::Segment));
        }
    }

    /// Distinct random cells on the mushroom rows
    fn spawn_mushrooms(state: &mut GameState) {
        let rows = MUSHROOM_MAX_ROW as usize;
        let cells = rows * GRID_WIDTH as usize;
        for i in index::sample(&mut state.rng, cells, MUSHROOM_COUNT.min(cells)) {
            let pos = IVec2::new((i % GRID_WIDTH as usize) as i32, (i / GRID_WIDTH as usize) as i32 + 1);
            state.grid.set(pos, Some(CellKind::Mushroom));
        }
    }

    /// Every segment steps once along its row (right on even rows, left on odd
    /// rows), dropping a row when a wall, mushroom or other segment is in the way.
    /// Rows are processed bottom-up and front-first, so no two segments ever
    /// share a cell. A drop crushes a mushroom below; a segment blocked both
    /// ways stays put.
    fn advance_centipede(state: &mut GameState) {
        let mut segments = state.grid.positions_of(CellKind::Segment);
        segments.sort_by_key(|p| (-p.y, if p.y % 2 == 0 { -p.x } else { p.x }));
        for pos in segments {
            let dir = if pos.y % 2 == 0 { IVec2::X } else { IVec2::NEG_X };
            let ahead = pos + dir;
            let below = pos + IVec2::Y;
            let next = if state.grid.is_empty_at(ahead) {
                ahead
            } else if in_bounds(below) && !state.grid.holds(below, CellKind::Segment) {
                below
            } else {
                pos
            };
            state.grid.set(pos, None);
            state.grid.set(next, Some(CellKind::Segment));
        }
    }

    fn resolve_hits(&mut self, state: &mut GameState) {
        for shot in &mut self.projectiles {
            match state.grid.get(shot.pos) {
                Some(Some(CellKind::Segment)) => {
                    state.grid.set(shot.pos, Some(CellKind::Mushroom));
                    state.award(SEGMENT_POINTS);
                    state.burst(shot.pos, SEGMENT_BURST_COLOR);
                    shot.active = false;
                }
                Some(Some(CellKind::Mushroom)) => {
                    state.grid.set(shot.pos, None);
                    shot.active = false;
                }
                _ => {}
            }
        }
        self.projectiles.retain(|p| p.active);
    }
}

impl ModeRules for DefenseRules {
    fn spawn(&mut self, state: &mut GameState) {
        self.projectiles.clear();
        self.next_id = 0;
        Self::spawn_mushrooms(state);
        Self::spawn_centipede(state);
        let start = IVec2::new(GRID_WIDTH / 2, GRID_HEIGHT - 1);
        state.active = Some(ActiveEntity::new(CellKind::Blaster, start));
    }

    /// Horizontal only; vertical deltas are rejected
    fn shift(&mut self, state: &mut GameState, delta: IVec2) -> bool {
        let Some(blaster) = state.active.as_mut() else {
            return false;
        };
        let x = blaster.pos.x + delta.x;
        if delta.x == 0 || !(0..GRID_WIDTH).contains(&x) {
            return false;
        }
        blaster.pos.x = x;
        true
    }

    fn act(&mut self, state: &mut GameState) {
        let Some(blaster) = state.active else {
            return;
        };
        self.projectiles.push(Projectile {
            id: self.next_id,
            pos: blaster.pos + IVec2::NEG_Y,
            active: true,
        });
        self.next_id += 1;
    }

    fn tick(&mut self, state: &mut GameState) {
        for shot in &mut self.projectiles {
            shot.pos.y -= 1;
        }
        self.projectiles.retain(|p| p.pos.y >= 0);

        Self::advance_centipede(state);
        self.resolve_hits(state);

        let Some(blaster) = state.active else {
            return;
        };
        if state.grid.holds(blaster.pos, CellKind::Segment) {
            log::debug!("centipede reached the blaster at {}", blaster.pos);
            state.game_over();
            return;
        }
        if state.grid.positions_of(CellKind::Segment).is_empty() {
            log::debug!("centipede destroyed, spawning a new one");
            Self::spawn_centipede(state);
        }
    }

    fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameEvent, GameMode, GameStatus};

    fn started() -> (DefenseRules, GameState) {
        let mut state = GameState::new(13);
        state.reset(GameMode::Defense);
        let mut rules = DefenseRules::default();
        rules.spawn(&mut state);
        (rules, state)
    }

    /// Started run with only a lone segment far from the action
    fn quiet() -> (DefenseRules, GameState) {
        let (rules, mut state) = started();
        state.grid.clear();
        state.grid.set(IVec2::new(0, 0), Some(CellKind::Segment));
        (rules, state)
    }

    fn blaster_x(state: &GameState) -> i32 {
        state.active.map(|b| b.pos.x).expect("blaster")
    }

    #[test]
    fn test_initial_field() {
        let (rules, state) = started();
        let mushrooms = state.grid.positions_of(CellKind::Mushroom);
        // Mushrooms never sit on the top row, so the centipede band is intact
        assert_eq!(mushrooms.len(), MUSHROOM_COUNT);
        assert!(mushrooms.iter().all(|p| (1..=MUSHROOM_MAX_ROW).contains(&p.y)));
        assert_eq!(
            state.grid.positions_of(CellKind::Segment),
            (0..8).map(|x| IVec2::new(x, 0)).collect::<Vec<_>>()
        );
        assert_eq!(state.active.map(|b| b.pos), Some(IVec2::new(5, GRID_HEIGHT - 1)));
        assert!(rules.projectiles().is_empty());
    }

    #[test]
    fn test_horizontal_move_clamped() {
        let (mut rules, mut state) = quiet();
        assert!(!rules.shift(&mut state, IVec2::NEG_Y));
        for _ in 0..4 {
            assert!(rules.shift(&mut state, IVec2::X));
        }
        assert_eq!(blaster_x(&state), GRID_WIDTH - 1);
        assert!(!rules.shift(&mut state, IVec2::X));
        assert_eq!(blaster_x(&state), GRID_WIDTH - 1);
    }

    #[test]
    fn test_fire_and_travel() {
        let (mut rules, mut state) = quiet();
        rules.act(&mut state);
        assert_eq!(rules.projectiles()[0].pos, IVec2::new(5, GRID_HEIGHT - 2));
        rules.tick(&mut state);
        assert_eq!(rules.projectiles()[0].pos, IVec2::new(5, GRID_HEIGHT - 3));
        assert_eq!(rules.projectiles()[0].id, 0);
    }

    #[test]
    fn test_projectile_leaves_top() {
        let (mut rules, mut state) = quiet();
        rules.projectiles.push(Projectile {
            id: 99,
            pos: IVec2::new(9, 0),
            active: true,
        });
        rules.tick(&mut state);
        assert!(rules.projectiles().is_empty());
    }

    #[test]
    fn test_hit_segment_becomes_mushroom() {
        let (mut rules, mut state) = quiet();
        // Segment at (3,4) on an even row steps right to (4,4); the shot rises into it
        state.grid.set(IVec2::new(3, 4), Some(CellKind::Segment));
        rules.projectiles.push(Projectile {
            id: 0,
            pos: IVec2::new(4, 5),
            active: true,
        });
        rules.tick(&mut state);
        assert!(state.grid.holds(IVec2::new(4, 4), CellKind::Mushroom));
        assert!(rules.projectiles().is_empty());
        assert_eq!(state.score, SEGMENT_POINTS);
        assert!(state.drain_events().contains(&GameEvent::Burst {
            pos: IVec2::new(4, 4),
            color: SEGMENT_BURST_COLOR
        }));
    }

    #[test]
    fn test_hit_mushroom_clears_without_score() {
        let (mut rules, mut state) = quiet();
        state.grid.set(IVec2::new(2, 7), Some(CellKind::Mushroom));
        rules.projectiles.push(Projectile {
            id: 0,
            pos: IVec2::new(2, 8),
            active: true,
        });
        rules.tick(&mut state);
        assert!(state.grid.is_empty_at(IVec2::new(2, 7)));
        assert!(rules.projectiles().is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_segment_turns_at_wall_and_mushroom() {
        let (mut rules, mut state) = quiet();
        state.grid.clear();
        // Even row heading right into the wall
        state.grid.set(IVec2::new(GRID_WIDTH - 1, 2), Some(CellKind::Segment));
        // Odd row heading left into a mushroom
        state.grid.set(IVec2::new(4, 5), Some(CellKind::Segment));
        state.grid.set(IVec2::new(3, 5), Some(CellKind::Mushroom));
        rules.tick(&mut state);
        assert!(state.grid.holds(IVec2::new(GRID_WIDTH - 1, 3), CellKind::Segment));
        assert!(state.grid.holds(IVec2::new(4, 6), CellKind::Segment));
        assert!(state.grid.holds(IVec2::new(3, 5), CellKind::Mushroom));
    }

    #[test]
    fn test_band_moves_as_a_train() {
        let (mut rules, mut state) = quiet();
        state.grid.clear();
        for x in 6..GRID_WIDTH {
            state.grid.set(IVec2::new(x, 0), Some(CellKind::Segment));
        }
        rules.tick(&mut state);
        // Front segment turns down at the wall, the rest close up behind it
        assert_eq!(
            state.grid.positions_of(CellKind::Segment),
            vec![
                IVec2::new(7, 0),
                IVec2::new(8, 0),
                IVec2::new(9, 0),
                IVec2::new(GRID_WIDTH - 1, 1),
            ]
        );
    }

    #[test]
    fn test_converging_segments_never_merge() {
        let (mut rules, mut state) = quiet();
        state.grid.clear();
        // (9,2) drops into (9,3) only after the segment there has moved off it
        state.grid.set(IVec2::new(GRID_WIDTH - 1, 2), Some(CellKind::Segment));
        state.grid.set(IVec2::new(GRID_WIDTH - 1, 3), Some(CellKind::Segment));
        state.grid.set(IVec2::new(0, 3), Some(CellKind::Mushroom));
        state.grid.set(IVec2::new(1, 3), Some(CellKind::Segment));
        for _ in 0..30 {
            rules.tick(&mut state);
            if state.status != GameStatus::Playing {
                break;
            }
            let count = state.grid.positions_of(CellKind::Segment).len();
            assert!(count == 3 || count == CENTIPEDE_LENGTH as usize, "segments merged: {}", count);
        }
    }

    #[test]
    fn test_drop_crushes_mushroom_below() {
        let (mut rules, mut state) = quiet();
        state.grid.clear();
        state.grid.set(IVec2::new(GRID_WIDTH - 1, 4), Some(CellKind::Segment));
        state.grid.set(IVec2::new(GRID_WIDTH - 1, 5), Some(CellKind::Mushroom));
        rules.tick(&mut state);
        assert!(state.grid.holds(IVec2::new(GRID_WIDTH - 1, 5), CellKind::Segment));
        assert!(state.grid.positions_of(CellKind::Mushroom).is_empty());
    }

    #[test]
    fn test_segment_reaching_blaster_ends_game() {
        let (mut rules, mut state) = quiet();
        // Bottom row is odd (19), so segments there walk left
        state.grid.set(IVec2::new(6, GRID_HEIGHT - 1), Some(CellKind::Segment));
        rules.tick(&mut state);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_new_centipede_after_last_segment() {
        let (mut rules, mut state) = quiet();
        state.grid.clear();
        state.grid.set(IVec2::new(1, 10), Some(CellKind::Segment));
        rules.projectiles.push(Projectile {
            id: 0,
            pos: IVec2::new(2, 11),
            active: true,
        });
        rules.tick(&mut state);
        assert!(state.grid.holds(IVec2::new(2, 10), CellKind::Mushroom));
        assert_eq!(state.grid.positions_of(CellKind::Segment).len(), CENTIPEDE_LENGTH as usize);
    }
}
