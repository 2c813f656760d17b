//! Mode rule sets
//!
//! Each mode implements [`ModeRules`]. [`Rules`] is the closed set of
//! implementations the store can hold; it is the only place that maps a
//! [`GameMode`] to behavior.

mod collector;
mod construction;
mod defense;
mod falling;
mod puzzle;
mod recipe;
mod tunneling;

pub use collector::CollectorRules;
pub use construction::BlueprintBuild;
pub use defense::{DefenseRules, Projectile};
pub use falling::{FallingRules, LockPolicy, SPAWN_ANCHOR};
pub use puzzle::LineClear;
pub use recipe::RecipeStack;
pub use tunneling::TunnelingRules;

use glam::IVec2;

use super::state::{GameMode, GameState};
use crate::gravity_interval_ms;

/// Uniform capability contract every mode satisfies.
///
/// All methods are only called while the state is `Playing`, except
/// [`ModeRules::apply_power_up`] which is called in `PowerUpSelect`.
pub trait ModeRules {
    /// Seed the grid, the active entity and any auxiliary entities for a fresh run
    fn spawn(&mut self, state: &mut GameState);

    /// Player move by a unit delta. Returns whether it was accepted.
    fn shift(&mut self, state: &mut GameState, delta: IVec2) -> bool;

    /// Rotate / fire / dig
    fn act(&mut self, state: &mut GameState);

    fn hard_drop(&mut self, _state: &mut GameState) {}

    /// One autonomous simulation step
    fn tick(&mut self, state: &mut GameState);

    /// Merge the active entity into the grid and settle the consequences
    fn resolve_lock(&mut self, _state: &mut GameState) {}

    /// Apply a chosen power-up and resume play. Returns false if the mode has none.
    fn apply_power_up(&mut self, _state: &mut GameState, _id: &str) -> bool {
        false
    }

    fn tick_interval_ms(&self, state: &GameState) -> u32 {
        state.effects.stretch_interval(gravity_interval_ms(state.level))
    }

    /// Trailing body segments, most recent first
    fn body(&self) -> &[IVec2] {
        &[]
    }

    fn projectiles(&self) -> &[Projectile] {
        &[]
    }
}

/// The active rule set
#[derive(Debug, Clone)]
pub enum Rules {
    Puzzle(FallingRules<LineClear>),
    Construction(FallingRules<BlueprintBuild>),
    Recipe(FallingRules<RecipeStack>),
    Tunneling(TunnelingRules),
    Collector(CollectorRules),
    Defense(DefenseRules),
}

impl Rules {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Puzzle => Rules::Puzzle(FallingRules::default()),
            GameMode::Construction => Rules::Construction(FallingRules::default()),
            GameMode::Recipe => Rules::Recipe(FallingRules::default()),
            GameMode::Tunneling => Rules::Tunneling(TunnelingRules),
            GameMode::Collector => Rules::Collector(CollectorRules::default()),
            GameMode::Defense => Rules::Defense(DefenseRules::default()),
        }
    }

    pub fn get(&self) -> &dyn ModeRules {
        match self {
            Rules::Puzzle(r) => r,
            Rules::Construction(r) => r,
            Rules::Recipe(r) => r,
            Rules::Tunneling(r) => r,
            Rules::Collector(r) => r,
            Rules::Defense(r) => r,
        }
    }

    pub fn get_mut(&mut self) -> &mut dyn ModeRules {
        match self {
            Rules::Puzzle(r) => r,
            Rules::Construction(r) => r,
            Rules::Recipe(r) => r,
            Rules::Tunneling(r) => r,
            Rules::Collector(r) => r,
            Rules::Defense(r) => r,
        }
    }
}
