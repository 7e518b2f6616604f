//! Game status derived from rules-engine queries.

use chess_core::Color;
use chess_rules::{DrawReason, RulesEngine};
use serde::Serialize;

/// The two participants of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Human,
    Opponent,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }

    /// Which side plays `color`, given the human's colour.
    pub fn playing(color: Color, human_color: Color) -> Side {
        if color == human_color {
            Side::Human
        } else {
            Side::Opponent
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndCause {
    Checkmate,
    Draw(DrawReason),
    Timeout,
}

/// Final result of a game. `winner` is `None` for draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub winner: Option<Side>,
    pub cause: EndCause,
}

impl Outcome {
    pub fn checkmate(winner: Side) -> Self {
        Outcome {
            winner: Some(winner),
            cause: EndCause::Checkmate,
        }
    }

    pub fn draw(reason: DrawReason) -> Self {
        Outcome {
            winner: None,
            cause: EndCause::Draw(reason),
        }
    }

    /// The side whose clock ran out loses.
    pub fn timeout(flagged: Side) -> Self {
        Outcome {
            winner: Some(flagged.opponent()),
            cause: EndCause::Timeout,
        }
    }

    pub fn message(&self) -> &'static str {
        match (self.cause, self.winner) {
            (EndCause::Checkmate, Some(Side::Human)) => "Game over: You win by checkmate!",
            (EndCause::Checkmate, _) => "Game over: AI wins by checkmate!",
            (EndCause::Timeout, Some(Side::Human)) => "Time's up! You win!",
            (EndCause::Timeout, _) => "Time's up! AI wins!",
            (EndCause::Draw(_), _) => "Game over: Draw",
        }
    }
}

/// What the status line should say about the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The game is over.
    Ended(Outcome),
    /// The given side is on move and in check.
    InCheck(Side),
    /// The given side is on move.
    ToMove(Side),
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Ended(outcome) => outcome.message(),
            Status::InCheck(Side::Human) => "You are in check!",
            Status::InCheck(Side::Opponent) => "AI is in check!",
            Status::ToMove(Side::Human) => "Your move",
            Status::ToMove(Side::Opponent) => "AI is thinking...",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Ended(_))
    }
}

/// Classifies the position: checkmate first, then draws of any kind, then
/// check, then an ordinary turn.
pub fn derive_status<R: RulesEngine + ?Sized>(rules: &R, human_color: Color) -> Status {
    let to_move = Side::playing(rules.side_to_move(), human_color);
    if rules.is_checkmate() {
        return Status::Ended(Outcome::checkmate(to_move.opponent()));
    }
    if let Some(reason) = rules.draw_reason() {
        return Status::Ended(Outcome::draw(reason));
    }
    if rules.is_check() {
        Status::InCheck(to_move)
    } else {
        Status::ToMove(to_move)
    }
}
