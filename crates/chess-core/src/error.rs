//! Parse errors for textual input (squares, colours, pieces, moves).

use thiserror::Error;

/// Errors that can occur when parsing user or configuration text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid color: expected 'light', 'dark', 'white' or 'black', got '{0}'")]
    InvalidColor(String),

    #[error("invalid piece: '{0}'")]
    InvalidPiece(String),

    #[error("invalid move: '{0}'")]
    InvalidMove(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
}
