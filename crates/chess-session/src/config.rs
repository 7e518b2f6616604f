//! Per-game configuration chosen at start.

use crate::SessionError;
use chess_ai::Difficulty;
use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

/// Pause before the opponent's very first move when it plays white.
pub const START_DELAY: Duration = Duration::from_millis(500);

/// Clock allowance per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Five minutes each.
    #[default]
    Blitz,
    /// Fifteen minutes each.
    Classic,
}

impl TimeMode {
    /// Starting time on each clock.
    pub const fn initial(self) -> Duration {
        match self {
            TimeMode::Blitz => Duration::from_secs(300),
            TimeMode::Classic => Duration::from_secs(900),
        }
    }
}

impl FromStr for TimeMode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blitz" => Ok(TimeMode::Blitz),
            "classic" => Ok(TimeMode::Classic),
            _ => Err(SessionError::InvalidConfiguration(format!(
                "unknown time mode '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeMode::Blitz => f.write_str("blitz"),
            TimeMode::Classic => f.write_str("classic"),
        }
    }
}

/// What the player picks before pressing start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub time_mode: TimeMode,
    /// Colour of the human's pieces; the opponent plays the other one.
    pub human_color: Color,
}

impl GameConfig {
    /// Builds a configuration from setup-screen values such as
    /// `("master", "blitz", "light")`.
    pub fn parse(difficulty: &str, time_mode: &str, human_color: &str) -> Result<Self, SessionError> {
        let difficulty = difficulty
            .parse()
            .map_err(|e: chess_ai::ParseDifficultyError| {
                SessionError::InvalidConfiguration(e.to_string())
            })?;
        let time_mode = time_mode.parse()?;
        let human_color = human_color
            .parse()
            .map_err(|e: chess_core::ParseError| SessionError::InvalidConfiguration(e.to_string()))?;
        Ok(GameConfig {
            difficulty,
            time_mode,
            human_color,
        })
    }

    /// Colour the computer plays.
    pub fn opponent_color(&self) -> Color {
        self.human_color.opposite()
    }
}

/// Range of the opponent's artificial thinking time, in milliseconds.
pub fn think_range(difficulty: Difficulty) -> RangeInclusive<u64> {
    match difficulty {
        Difficulty::Novice => 1_000..=3_000,
        Difficulty::Intermediate => 2_000..=5_000,
        Difficulty::Master => 3_000..=7_000,
    }
}
