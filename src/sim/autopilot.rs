//! Idle/demo input source
//!
//! Produces plausible intents from the observable state so the headless
//! driver can exercise every mode without a control surface. It has its own
//! RNG and only ever reads the store.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::CellKind;
use super::game::{Game, Intent};
use super::state::{GameMode, GameStatus};
use crate::in_bounds;

const ORTHOGONAL: [IVec2; 4] = [IVec2::NEG_Y, IVec2::X, IVec2::Y, IVec2::NEG_X];

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

fn step(delta: IVec2) -> Intent {
    Intent::Move {
        dx: delta.x,
        dy: delta.y,
    }
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Intent to apply before the next tick, if any
    pub fn choose(&mut self, game: &Game) -> Option<Intent> {
        if game.status() != GameStatus::Playing {
            return None;
        }
        match game.mode() {
            GameMode::Puzzle | GameMode::Construction | GameMode::Recipe => self.falling(),
            GameMode::Tunneling => self.tunneling(game),
            GameMode::Collector => self.collector(game),
            GameMode::Defense => self.defense(game),
        }
    }

    /// Id to pick when the store offers power-ups
    pub fn pick_power_up(&mut self, game: &Game) -> Option<&'static str> {
        let pool = &game.state().power_up_pool;
        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.random_range(0..pool.len())].id)
    }

    fn falling(&mut self) -> Option<Intent> {
        match self.rng.random_range(0..6) {
            0 => Some(step(IVec2::NEG_X)),
            1 => Some(step(IVec2::X)),
            2 => Some(Intent::Act),
            _ => None,
        }
    }

    fn tunneling(&mut self, game: &Game) -> Option<Intent> {
        let digger = game.state().active?;
        let ahead = game.state().grid.get(digger.pos + digger.facing);
        if matches!(ahead, Some(Some(kind)) if kind.is_monster()) {
            return Some(Intent::Act);
        }
        let grid = &game.state().grid;
        let safe: Vec<IVec2> = ORTHOGONAL
            .into_iter()
            .filter(|&d| matches!(grid.get(digger.pos + d), Some(None | Some(CellKind::Dirt))))
            .collect();
        if safe.is_empty() {
            return None;
        }
        Some(step(safe[self.rng.random_range(0..safe.len())]))
    }

    fn collector(&mut self, game: &Game) -> Option<Intent> {
        let head = game.state().active?;
        let food = game.state().grid.positions_of(CellKind::Food).first().copied();
        let body = game.snake_body();
        let safe = |d: IVec2| {
            let next = head.pos + d;
            d != -head.facing && in_bounds(next) && !body.contains(&next)
        };
        let toward = food.map(|f| f - head.pos).unwrap_or(head.facing);
        let preferred = [IVec2::new(toward.x.signum(), 0), IVec2::new(0, toward.y.signum())];
        preferred
            .into_iter()
            .chain(std::iter::once(head.facing))
            .chain(ORTHOGONAL)
            .find(|&d| d != IVec2::ZERO && safe(d))
            .filter(|&d| d != head.facing)
            .map(step)
    }

    fn defense(&mut self, game: &Game) -> Option<Intent> {
        let blaster = game.state().active?;
        let target = game
            .state()
            .grid
            .positions_of(CellKind::Segment)
            .into_iter()
            .max_by_key(|p| p.y)
            .map(|p| p.x);
        match target {
            Some(x) if x != blaster.pos.x && self.rng.random_bool(0.7) => {
                Some(step(IVec2::new((x - blaster.pos.x).signum(), 0)))
            }
            _ => Some(Intent::Act),
        }
    }
}
