//! Player color representation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two colors a side can be bound to.
///
/// Configuration files and the game setup screen call them "light" and
/// "dark"; both spellings are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    #[serde(alias = "light", alias = "w")]
    White,
    #[serde(alias = "dark", alias = "b")]
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the rank index a pawn of this color promotes on.
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "light" | "w" => Ok(Color::White),
            "black" | "dark" | "b" => Ok(Color::Black),
            _ => Err(ParseError::InvalidColor(s.to_string())),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}
