//! Standard chess rules with full undo history.

use crate::convert::{from_color, from_piece, request_of, to_chess_move, to_square};
use crate::san::move_to_san;
use crate::{DrawReason, RulesEngine, RulesError};
use chess::{BitBoard, Board, BoardStatus, ChessMove, MoveGen};
use chess_core::{Color, Move, MoveRequest, Piece, Square};
use std::str::FromStr;
use tracing::debug;

/// State needed to revert one applied move.
#[derive(Debug, Clone)]
struct Frame {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    mv: Move,
}

/// FIDE chess, backed by the `chess` crate's legal move generator.
///
/// On top of the single-position board this tracks the half-move clock,
/// the full-move number and the hash of every position reached since the
/// last load, which the fifty-move and threefold-repetition draws need.
#[derive(Debug, Clone)]
pub struct StandardRules {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    frames: Vec<Frame>,
    /// Hashes of every position since the last load, current one included.
    seen: Vec<u64>,
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardRules {
    /// FEN of the standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        let board = Board::default();
        StandardRules {
            board,
            halfmove_clock: 0,
            fullmove_number: 1,
            frames: Vec::new(),
            seen: vec![board.get_hash()],
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut rules = Self::new();
        rules.load(fen)?;
        Ok(rules)
    }

    /// Returns the moves applied since the last load, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Move> + '_ {
        self.frames.iter().map(|f| &f.mv)
    }

    /// Returns the half-move clock used by the fifty-move rule.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the current full-move number.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Counts how many times the current position has occurred.
    pub fn repetition_count(&self) -> usize {
        let current = self.board.get_hash();
        self.seen.iter().filter(|&&h| h == current).count()
    }

    /// Returns true if neither side has enough material to mate.
    ///
    /// Covers bare kings, a single minor piece, and any number of bishops
    /// all standing on squares of one colour.
    pub fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        let heavy = *board.pieces(chess::Piece::Pawn)
            | *board.pieces(chess::Piece::Rook)
            | *board.pieces(chess::Piece::Queen);
        if heavy.popcnt() > 0 {
            return false;
        }

        let knights = *board.pieces(chess::Piece::Knight);
        let bishops = *board.pieces(chess::Piece::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }
        knights.popcnt() == 0 && same_square_colour(bishops)
    }

    fn generate(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn label(&self, m: ChessMove, legal: &[ChessMove]) -> Move {
        let request = request_of(m);
        Move::new(
            request.from,
            request.to,
            request.promotion,
            move_to_san(&self.board, m, legal),
        )
    }

    fn clear_history(&mut self) {
        self.frames.clear();
        self.seen.clear();
        self.seen.push(self.board.get_hash());
    }
}

fn same_square_colour(pieces: BitBoard) -> bool {
    let mut dark = 0;
    let mut light = 0;
    for sq in pieces {
        if (sq.get_rank().to_index() + sq.get_file().to_index()) % 2 == 0 {
            dark += 1;
        } else {
            light += 1;
        }
    }
    dark == 0 || light == 0
}

impl RulesEngine for StandardRules {
    fn legal_moves(&self) -> Vec<Move> {
        let legal = self.generate();
        legal.iter().map(|&m| self.label(m, &legal)).collect()
    }

    fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        let legal = self.generate();
        let from = to_square(square);
        legal
            .iter()
            .filter(|m| m.get_source() == from)
            .map(|&m| self.label(m, &legal))
            .collect()
    }

    fn apply(&mut self, request: MoveRequest) -> Result<Move, RulesError> {
        let legal = self.generate();
        let m = to_chess_move(&request);
        if !legal.contains(&m) {
            return Err(RulesError::IllegalMove(request.to_uci()));
        }

        let labelled = self.label(m, &legal);
        let resets_clock = self.board.piece_on(m.get_source()) == Some(chess::Piece::Pawn)
            || self.board.piece_on(m.get_dest()).is_some();

        self.frames.push(Frame {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv: labelled.clone(),
        });

        if self.board.side_to_move() == chess::Color::Black {
            self.fullmove_number += 1;
        }
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.board = self.board.make_move_new(m);
        self.seen.push(self.board.get_hash());

        Ok(labelled)
    }

    fn undo(&mut self) -> Option<Move> {
        let frame = self.frames.pop()?;
        self.board = frame.board;
        self.halfmove_clock = frame.halfmove_clock;
        self.fullmove_number = frame.fullmove_number;
        self.seen.pop();
        Some(frame.mv)
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        match self.board.status() {
            BoardStatus::Checkmate => None,
            BoardStatus::Stalemate => Some(DrawReason::Stalemate),
            BoardStatus::Ongoing => {
                if self.is_insufficient_material() {
                    Some(DrawReason::InsufficientMaterial)
                } else if self.halfmove_clock >= 100 {
                    Some(DrawReason::FiftyMoveRule)
                } else if self.repetition_count() >= 3 {
                    Some(DrawReason::ThreefoldRepetition)
                } else {
                    None
                }
            }
        }
    }

    fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    fn side_to_move(&self) -> Color {
        from_color(self.board.side_to_move())
    }

    fn serialize(&self) -> String {
        // The board's own FEN output does not carry move counters.
        let fields: Vec<String> = self
            .board
            .to_string()
            .split_whitespace()
            .take(4)
            .map(str::to_string)
            .collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn load(&mut self, fen: &str) -> Result<(), RulesError> {
        let board =
            Board::from_str(fen).map_err(|e| RulesError::InvalidPosition(format!("{}: {}", fen, e)))?;
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let counter = |index: usize, default: u32| -> Result<u32, RulesError> {
            match fields.get(index) {
                Some(text) => text.parse().map_err(|_| {
                    RulesError::InvalidPosition(format!("invalid move counter '{}'", text))
                }),
                None => Ok(default),
            }
        };
        let halfmove_clock = counter(4, 0)?;
        let fullmove_number = counter(5, 1)?.max(1);

        self.board = board;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
        self.clear_history();
        debug!(fen, "position loaded");
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let sq = to_square(square);
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((from_piece(piece), from_color(color)))
    }

    fn ply_count(&self) -> usize {
        self.frames.len()
    }

    fn last_move(&self) -> Option<&Move> {
        self.frames.last().map(|f| &f.mv)
    }
}
