//! Errors reported by rules engines.

use thiserror::Error;

/// Error type for rules-engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A position string could not be loaded.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
