//! Parsing of the commands typed at the prompt.

use chess_core::{MoveRequest, Square};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("invalid move '{0}', expected something like e2e4 or e7e8q")]
    InvalidMove(String),
}

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(MoveRequest),
    Click(Square),
    Hover(Square),
    Leave,
    Undo,
    Pause,
    Resume,
    /// Start a game. Empty fields keep the configured values.
    New {
        difficulty: Option<String>,
        time_mode: Option<String>,
        color: Option<String>,
    },
    Reset,
    Board,
    Moves,
    Legal,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  e2e4 | move e2e4     play a move (e7e8n to under-promote)
  click <sq>           select a piece, then click a target
  hover <sq> | leave   show or hide move hints (novice only)
  undo                 take back your last move and the reply
  pause | resume       stop or restart the clocks
  new [level] [mode] [color]
                       start a game, e.g. 'new novice classic dark'
  reset                abandon the game
  board | moves | legal
  help | quit";

fn square(arg: Option<&str>, name: &'static str) -> Result<Square, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidSquare(arg.to_string()))
}

fn uci_move(arg: &str) -> Result<MoveRequest, CommandError> {
    MoveRequest::from_uci(arg).map_err(|_| CommandError::InvalidMove(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = match words.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => return Err(CommandError::Unknown(String::new())),
        };
        let arg = words.next();

        let command = match head.as_str() {
            "move" | "m" => {
                let arg = arg.ok_or(CommandError::MissingArgument("move"))?;
                Command::Move(uci_move(arg)?)
            }
            "click" | "c" => Command::Click(square(arg, "click")?),
            "hover" => Command::Hover(square(arg, "hover")?),
            "leave" => Command::Leave,
            "undo" | "u" => Command::Undo,
            "pause" | "p" => Command::Pause,
            "resume" | "r" => Command::Resume,
            "new" | "start" => Command::New {
                difficulty: arg.map(str::to_string),
                time_mode: words.next().map(str::to_string),
                color: words.next().map(str::to_string),
            },
            "reset" => Command::Reset,
            "board" | "b" => Command::Board,
            "moves" => Command::Moves,
            "legal" => Command::Legal,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            // A bare move like "e2e4".
            other if other.len() >= 4 && other.len() <= 5 => match MoveRequest::from_uci(other) {
                Ok(request) => Command::Move(request),
                Err(_) => return Err(CommandError::Unknown(other.to_string())),
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
