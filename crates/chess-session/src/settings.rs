//! Settings file loading.
//!
//! Settings live in a TOML file (`chess-play.toml` in the working directory
//! by default). Every section and key is optional:
//!
//! ```toml
//! [game]
//! difficulty = "master"
//! time_mode = "blitz"
//! human_color = "light"
//!
//! [search]
//! depth = 3
//! pruning = true
//!
//! [pacing]
//! think_time_scale = 1.0
//! ```

use crate::{ConfigError, GameConfig};
use chess_ai::{MoveSelector, DEFAULT_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Deepest search the settings file may ask for.
const MAX_DEPTH: u8 = 6;

/// Master-level search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Plies searched by minimax. Defaults to 3.
    pub depth: u8,
    /// Alpha-beta pruning. Defaults to on.
    pub pruning: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: DEFAULT_DEPTH,
            pruning: true,
        }
    }
}

/// Opponent pacing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingSettings {
    /// Multiplier on the thinking delay. 0 makes the opponent answer at once.
    pub think_time_scale: f64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        PacingSettings {
            think_time_scale: 1.0,
        }
    }
}

/// Everything the settings file can hold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub search: SearchSettings,
    pub pacing: PacingSettings,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be
    /// read, [`ConfigError::ParseError`] for invalid TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-play.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEPTH).contains(&self.search.depth) {
            return Err(ConfigError::Invalid(format!(
                "search depth must be between 1 and {}, got {}",
                MAX_DEPTH, self.search.depth
            )));
        }
        let scale = self.pacing.think_time_scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "think_time_scale must be a non-negative number, got {}",
                scale
            )));
        }
        Ok(())
    }

    /// Move selector for the configured search.
    pub fn selector(&self) -> MoveSelector {
        MoveSelector::new(self.search.depth).with_pruning(self.search.pruning)
    }
}
