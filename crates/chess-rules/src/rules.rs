//! The rules-engine contract.
//!
//! A [`RulesEngine`] owns exactly one live position per game. Everything that
//! needs to know about legality or game termination (the session, the status
//! line, the move search) asks the engine instead of reasoning about the board.

use crate::RulesError;
use chess_core::{BoardSnapshot, Color, Move, MoveRequest, Piece, Square};
use serde::Serialize;

/// Reason a position is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// No legal moves and not in check.
    Stalemate,
    /// Neither side can force mate.
    InsufficientMaterial,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position has occurred three times.
    ThreefoldRepetition,
}

/// Contract between the game client and a chess rules implementation.
///
/// Moves enter the engine as [`MoveRequest`]s and leave it as [`Move`]s
/// labelled in standard algebraic notation. Every successful `apply` can be
/// reverted with `undo`, restoring the exact previous position including
/// castling rights, en passant target and move counters.
///
/// # Example
///
/// ```
/// use chess_rules::{RulesEngine, StandardRules};
///
/// fn mobility(rules: &impl RulesEngine) -> usize {
///     rules.legal_moves().len()
/// }
///
/// assert_eq!(mobility(&StandardRules::new()), 20);
/// ```
pub trait RulesEngine {
    /// Returns all legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Move>;

    /// Returns the legal moves of the piece standing on `square`.
    fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|m| m.from() == square)
            .collect()
    }

    /// Applies a move if it is legal, returning the labelled move.
    fn apply(&mut self, request: MoveRequest) -> Result<Move, RulesError>;

    /// Applies a move previously returned by [`legal_moves`](Self::legal_moves).
    fn apply_move(&mut self, m: &Move) -> Result<(), RulesError> {
        self.apply(m.request()).map(|_| ())
    }

    /// Reverts the most recent move. Returns `None` if there is no history.
    fn undo(&mut self) -> Option<Move>;

    /// Returns true if the side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Returns true if the side to move has no legal moves and is not in check.
    fn is_stalemate(&self) -> bool;

    /// Returns why the position is drawn, if it is.
    fn draw_reason(&self) -> Option<DrawReason>;

    /// Returns true if the position is drawn for any reason.
    fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self) -> bool;

    /// Returns true if the game has ended.
    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Returns the side to move.
    fn side_to_move(&self) -> Color;

    /// Serializes the current position as a FEN string.
    fn serialize(&self) -> String;

    /// Replaces the current position and clears the history.
    fn load(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Returns to the standard starting position and clears the history.
    fn reset(&mut self);

    /// Returns the piece on `square`, if any.
    fn piece_at(&self, square: Square) -> Option<(Piece, Color)>;

    /// Returns a read-only copy of the piece placement.
    fn snapshot(&self) -> BoardSnapshot {
        let mut board = BoardSnapshot::empty();
        for sq in Square::all() {
            board.set(sq, self.piece_at(sq));
        }
        board
    }

    /// Returns the number of moves applied since the last load or reset.
    fn ply_count(&self) -> usize;

    /// Returns the most recently applied move.
    fn last_move(&self) -> Option<&Move>;
}
