//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only, the caller owns the clock
//! - Seeded RNG only
//! - Row-major scans so equal seeds replay identically
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod game;
pub mod grid;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use autopilot::Autopilot;
pub use catalog::{Blueprint, CellKind, POWER_UPS, PowerUp, RECIPE, ShapeMask, blueprint_for, power_up};
pub use collision::{blueprint_anchor, blueprint_satisfied, collides, fits, landing_anchor};
pub use game::{Game, Intent};
pub use grid::{Cell, Grid};
pub use rules::{ModeRules, Projectile, Rules};
pub use snapshot::{BlueprintView, GameSnapshot};
pub use state::{ActiveEffects, ActiveEntity, GameEvent, GameMode, GameState, GameStatus};
