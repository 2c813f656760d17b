//! Grid Arcade - six arcade rule sets over one shared 10x20 grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, rule sets, game-state store)
//! - `settings`: Serializable run configuration

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Game, GameMode, GameStatus};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (row 0 is the top)
    pub const GRID_WIDTH: i32 = 10;
    pub const GRID_HEIGHT: i32 = 20;

    /// Tick timing for the gravity-driven modes (ms)
    pub const BASE_TICK_MS: u32 = 800;
    pub const TICK_STEP_MS: u32 = 100;
    pub const MIN_TICK_MS: u32 = 100;
    /// Tunneling ticks at a fixed rate regardless of level
    pub const TUNNELING_TICK_MS: u32 = 200;

    /// Score awards
    pub const LINE_CLEAR_POINTS: u64 = 100;
    pub const RECIPE_POINTS: u64 = 500;
    pub const DIRT_POINTS: u64 = 10;
    pub const PUMP_POINTS: u64 = 200;
    pub const FOOD_POINTS: u64 = 50;
    pub const SEGMENT_POINTS: u64 = 100;
    pub const POWER_UP_BONUS: u64 = 1000;

    /// Level progression
    pub const LINES_PER_LEVEL: u32 = 10;
    pub const RECIPES_PER_LEVEL: u32 = 5;

    /// Power-ups offered after a finished blueprint
    pub const POWER_UP_POOL_SIZE: usize = 10;
}

/// True if `pos` lies inside the grid
#[inline]
pub fn in_bounds(pos: IVec2) -> bool {
    pos.x >= 0 && pos.x < consts::GRID_WIDTH && pos.y >= 0 && pos.y < consts::GRID_HEIGHT
}

/// Gravity interval for the level-driven modes: 800ms at level 1, 100ms faster per level, floored
#[inline]
pub fn gravity_interval_ms(level: u32) -> u32 {
    use consts::*;
    let speedup = level.saturating_sub(1).saturating_mul(TICK_STEP_MS);
    BASE_TICK_MS.saturating_sub(speedup).max(MIN_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_interval_floors() {
        assert_eq!(gravity_interval_ms(1), 800);
        assert_eq!(gravity_interval_ms(2), 700);
        assert_eq!(gravity_interval_ms(8), 100);
        assert_eq!(gravity_interval_ms(30), 100);
    }

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(IVec2::new(0, 0)));
        assert!(in_bounds(IVec2::new(9, 19)));
        assert!(!in_bounds(IVec2::new(-1, 0)));
        assert!(!in_bounds(IVec2::new(10, 0)));
        assert!(!in_bounds(IVec2::new(0, 20)));
    }
}
