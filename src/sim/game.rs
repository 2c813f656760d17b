//! Game-state store
//!
//! [`Game`] owns the shared [`GameState`] plus the active rule set and is the
//! only writer of either. Every input intent and every timer tick goes
//! through its methods; anything arriving in the wrong status is a no-op.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::landing_anchor;
use super::rules::{ModeRules, Projectile, Rules};
use super::snapshot::GameSnapshot;
use super::state::{GameEvent, GameMode, GameState, GameStatus};

/// Discrete input from the control collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move { dx: i32, dy: i32 },
    Act,
    HardDrop,
    Pause,
}

#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    rules: Rules,
}

impl Game {
    /// New store sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            rules: Rules::for_mode(GameMode::default()),
        }
    }

    /// Disable power-up gameplay effects (selections are still recorded)
    pub fn with_power_up_effects(mut self, enabled: bool) -> Self {
        self.state.power_up_effects = enabled;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    fn playing(&self) -> bool {
        self.state.status == GameStatus::Playing
    }

    /// Begin a fresh run of `mode`. Only allowed from the menu or after a game over.
    pub fn start(&mut self, mode: GameMode) -> bool {
        if !matches!(self.state.status, GameStatus::Menu | GameStatus::GameOver) {
            return false;
        }
        self.state.reset(mode);
        self.rules = Rules::for_mode(mode);
        self.rules.get_mut().spawn(&mut self.state);
        log::info!("started {} run", mode.as_str());
        true
    }

    /// Move the active entity by a unit delta (exactly one axis, magnitude 1)
    pub fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let unit = (dx.abs() == 1 && dy == 0) || (dx == 0 && dy.abs() == 1);
        if !unit || !self.playing() {
            return false;
        }
        self.rules.get_mut().shift(&mut self.state, IVec2::new(dx, dy))
    }

    /// Rotate, fire or pump depending on the mode
    pub fn act(&mut self) {
        if self.playing() {
            self.rules.get_mut().act(&mut self.state);
        }
    }

    pub fn hard_drop(&mut self) {
        if self.playing() {
            self.rules.get_mut().hard_drop(&mut self.state);
        }
    }

    /// One autonomous step, called every [`Game::tick_interval_ms`]
    pub fn tick(&mut self) {
        if !self.playing() {
            return;
        }
        let elapsed = self.tick_interval_ms();
        self.state.time_ticks += 1;
        self.rules.get_mut().tick(&mut self.state);
        let effects = &mut self.state.effects;
        effects.double_score_ms = effects.double_score_ms.saturating_sub(elapsed);
    }

    /// Choose one of the offered power-ups
    pub fn select_power_up(&mut self, id: &str) -> bool {
        if self.state.status != GameStatus::PowerUpSelect {
            return false;
        }
        self.rules.get_mut().apply_power_up(&mut self.state, id)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.status = match self.state.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            _ => return false,
        };
        true
    }

    /// Abandon a paused or finished run
    pub fn return_to_menu(&mut self) -> bool {
        if !matches!(self.state.status, GameStatus::Paused | GameStatus::GameOver) {
            return false;
        }
        self.state.status = GameStatus::Menu;
        self.state.active = None;
        true
    }

    /// Dispatch a discrete input intent. Returns whether it changed anything
    /// the caller could care about (moves report acceptance, others true if legal).
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Move { dx, dy } => self.shift(dx, dy),
            Intent::Act => {
                let legal = self.playing();
                self.act();
                legal
            }
            Intent::HardDrop => {
                let legal = self.playing();
                self.hard_drop();
                legal
            }
            Intent::Pause => self.toggle_pause(),
        }
    }

    /// Milliseconds the driver should wait between ticks
    pub fn tick_interval_ms(&self) -> u32 {
        self.rules.get().tick_interval_ms(&self.state)
    }

    pub fn snake_body(&self) -> &[IVec2] {
        self.rules.get().body()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        self.rules.get().projectiles()
    }

    /// Where the active piece would land, when the landing preview is unlocked
    pub fn ghost_anchor(&self) -> Option<IVec2> {
        if !self.state.effects.ghost {
            return None;
        }
        let piece = self.state.active?;
        Some(landing_anchor(&piece.shape, piece.pos, &self.state.grid))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
