use chess_rules::RulesError;
use thiserror::Error;

/// Errors returned by [`GameSession`](crate::GameSession) operations.
///
/// None of these change the session state; a rejected move leaves the
/// position exactly as it was, so a UI can simply snap the piece back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The rules engine refused the human's move.
    #[error("rejected move: {0}")]
    RejectedMove(String),

    /// A configuration value could not be understood.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The action needs the human to be on move.
    #[error("it is not the human's turn")]
    NotHumanTurn,

    /// No game is in progress.
    #[error("no game in progress")]
    NotActive,

    /// There is no human/opponent move pair to take back.
    #[error("nothing to undo")]
    UndoUnavailable,

    /// The rules engine failed on a move it had itself listed.
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the settings file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
