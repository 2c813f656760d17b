//! Run settings
//!
//! Stored as JSON next to the binary. Missing or malformed files fall back to
//! defaults so a headless run always starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::GameMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the store and the autopilot
    pub seed: u64,
    /// Mode started by the headless driver
    pub mode: GameMode,
    /// Apply power-up gameplay effects (off = only score bonus and record)
    pub power_up_effects: bool,
    /// Upper bound on simulated ticks per run
    pub demo_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            mode: GameMode::Puzzle,
            power_up_effects: true,
            demo_ticks: 2000,
        }
    }
}

impl Settings {
    /// Default file name looked up by the driver
    pub const FILE_NAME: &'static str = "grid_arcade.json";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, using defaults when unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::info!("Using default settings ({}: {})", path.display(), err);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
