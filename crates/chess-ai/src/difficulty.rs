//! Opponent strength levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Strength of the computer opponent, fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random legal moves.
    Novice,
    /// One-ply material greed.
    Intermediate,
    /// Minimax with alpha-beta pruning.
    #[default]
    Master,
}

/// Error returned when a difficulty name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected novice, intermediate or master)")]
pub struct ParseDifficultyError(pub String);

impl Difficulty {
    /// All levels, weakest first.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Novice,
        Difficulty::Intermediate,
        Difficulty::Master,
    ];

    /// Returns the lowercase name used in settings files.
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Master => "master",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "novice" | "1" => Ok(Difficulty::Novice),
            "intermediate" | "2" => Ok(Difficulty::Intermediate),
            "master" | "3" => Ok(Difficulty::Master),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_levels() {
        assert_eq!("novice".parse::<Difficulty>(), Ok(Difficulty::Novice));
        assert_eq!("Intermediate".parse::<Difficulty>(), Ok(Difficulty::Intermediate));
        assert_eq!("3".parse::<Difficulty>(), Ok(Difficulty::Master));
        assert!("grandmaster".parse::<Difficulty>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for level in Difficulty::ALL {
            assert_eq!(level.to_string().parse::<Difficulty>(), Ok(level));
        }
    }
}
