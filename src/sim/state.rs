//! Game state and core simulation types
//!
//! Everything the rule sets share lives here: the grid, the active entity,
//! progression counters, power-up bookkeeping, the seeded RNG and the
//! outbound event queue. Mode-specific entities (snake body, projectiles)
//! belong to the rule set that moves them.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{Blueprint, CellKind, PowerUp, ShapeMask};
use super::grid::Grid;

/// Which rule set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Falling blocks, full rows clear
    #[default]
    Puzzle,
    /// Falling blocks built into a target blueprint
    Construction,
    /// Single-cell ingredients stacked into recipes
    Recipe,
    /// Dig through dirt, avoid rocks and monsters
    Tunneling,
    /// Snake
    Collector,
    /// Centipede-style shooter
    Defense,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Puzzle,
        GameMode::Construction,
        GameMode::Recipe,
        GameMode::Tunneling,
        GameMode::Collector,
        GameMode::Defense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Puzzle => "Puzzle",
            GameMode::Construction => "Construction",
            GameMode::Recipe => "Recipe",
            GameMode::Tunneling => "Tunneling",
            GameMode::Collector => "Collector",
            GameMode::Defense => "Defense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "puzzle" | "tetris" => Some(GameMode::Puzzle),
            "construction" | "lego" => Some(GameMode::Construction),
            "recipe" | "burger" | "burgertime" => Some(GameMode::Recipe),
            "tunneling" | "dig" | "digdug" => Some(GameMode::Tunneling),
            "collector" | "snake" => Some(GameMode::Collector),
            "defense" | "centipede" => Some(GameMode::Defense),
            _ => None,
        }
    }
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No run in progress
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run suspended, no action but unpause is accepted
    Paused,
    /// Run ended, counters frozen
    GameOver,
    /// Blueprint finished, waiting for a power-up choice
    PowerUpSelect,
}

/// The single player-controlled object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEntity {
    pub kind: CellKind,
    /// Top-left anchor of the shape, or the entity's cell for single-cell modes
    pub pos: IVec2,
    pub shape: ShapeMask,
    /// Unit direction (Tunneling, Collector); zero for falling pieces
    pub facing: IVec2,
}

impl ActiveEntity {
    pub fn new(kind: CellKind, pos: IVec2) -> Self {
        Self {
            kind,
            pos,
            shape: kind.shape(),
            facing: IVec2::ZERO,
        }
    }

    pub fn facing(mut self, facing: IVec2) -> Self {
        self.facing = facing;
        self
    }

    /// Absolute grid positions of every occupied shape cell
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.shape.cells().map(move |o| self.pos + o)
    }
}

/// Notification for the effects collaborator; never read by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Visual burst at a grid cell
    Burst { pos: IVec2, color: u32 },
    /// Full rows removed by a lock
    LinesCleared(u32),
    /// One recipe stack completed
    RecipeCompleted,
    /// Run ended
    GameOver,
}

/// Gameplay effects of selected power-ups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Remaining forced I pieces
    pub long_pieces: u32,
    /// Tick interval stretch in percent on top of 100
    pub slow_percent: u32,
    /// Play time left with doubled score (ms)
    pub double_score_ms: u32,
    /// Permanent score doubling
    pub score_pulse: bool,
    /// Landing preview enabled
    pub ghost: bool,
}

impl ActiveEffects {
    /// Multiplier applied to every score award
    pub fn score_multiplier(&self) -> u64 {
        let mut m = 1;
        if self.score_pulse {
            m *= 2;
        }
        if self.double_score_ms > 0 {
            m *= 2;
        }
        m
    }

    /// Stretch a tick interval by the active slow-motion effects
    pub fn stretch_interval(&self, ms: u32) -> u32 {
        ms.saturating_mul(100 + self.slow_percent) / 100
    }
}

/// Complete shared game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub status: GameStatus,
    pub grid: Grid,
    pub active: Option<ActiveEntity>,
    /// Preview of the next falling piece
    pub next_piece: Option<CellKind>,
    pub score: u64,
    pub level: u32,
    /// Rows cleared (Puzzle)
    pub lines: u32,
    /// Recipes completed (Recipe)
    pub recipes: u32,
    /// Current construction target
    pub blueprint: Option<Blueprint>,
    /// Offered choices while in `PowerUpSelect`
    pub power_up_pool: Vec<PowerUp>,
    /// Every selection made this run, oldest first
    pub active_power_ups: Vec<&'static str>,
    pub effects: ActiveEffects,
    /// When false selections are only recorded
    pub power_up_effects: bool,
    /// Ticks simulated this run
    pub time_ticks: u64,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            mode: GameMode::default(),
            status: GameStatus::Menu,
            grid: Grid::new(),
            active: None,
            next_piece: None,
            score: 0,
            level: 1,
            lines: 0,
            recipes: 0,
            blueprint: None,
            power_up_pool: Vec::new(),
            active_power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            power_up_effects: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset everything but the RNG stream and configuration for a fresh run
    pub fn reset(&mut self, mode: GameMode) {
        self.mode = mode;
        self.status = GameStatus::Playing;
        self.grid.clear();
        self.active = None;
        self.next_piece = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.recipes = 0;
        self.blueprint = None;
        self.power_up_pool.clear();
        self.active_power_ups.clear();
        self.effects = ActiveEffects::default();
        self.time_ticks = 0;
        self.events.clear();
    }

    /// Add points, scaled by active score effects
    pub fn award(&mut self, points: u64) {
        self.score += points * self.effects.score_multiplier();
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn burst(&mut self, pos: IVec2, color: u32) {
        self.emit(GameEvent::Burst { pos, color });
    }

    /// End the run; the active entity is dropped and counters stay as they are
    pub fn game_over(&mut self) {
        log::info!(
            "{} game over: score={} level={}",
            self.mode.as_str(),
            self.score,
            self.level
        );
        self.status = GameStatus::GameOver;
        self.active = None;
        self.emit(GameEvent::GameOver);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}
