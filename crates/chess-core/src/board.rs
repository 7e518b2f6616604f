//! Read-only board snapshots.

use crate::{Color, File, ParseError, Piece, Rank, Square};
use std::fmt;

/// An 8×8 grid of optional pieces, detached from any rules engine.
///
/// Snapshots are what the evaluator scores and what text renderers draw.
/// They carry no side-to-move, castling or en passant information.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    squares: [Option<(Piece, Color)>; 64],
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardSnapshot {
    /// Piece placement of the standard starting position.
    pub const STARTPOS_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        BoardSnapshot {
            squares: [None; 64],
        }
    }

    /// Builds a snapshot from the piece placement field of a FEN string.
    ///
    /// A full FEN string is accepted too; everything after the first space
    /// is ignored.
    pub fn from_placement(fen: &str) -> Result<Self, ParseError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::InvalidPlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Self::empty();
        // FEN lists rank 8 first.
        for (row, text) in ranks.iter().enumerate() {
            let rank = Rank::ALL[7 - row];
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let (piece, color) = Piece::from_fen_char(c).ok_or_else(|| {
                        ParseError::InvalidPlacement(format!("invalid character '{}'", c))
                    })?;
                    let f = File::from_index(file).ok_or_else(|| {
                        ParseError::InvalidPlacement(format!("rank {} is too long", rank))
                    })?;
                    board.set(Square::new(f, rank), Some((piece, color)));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ParseError::InvalidPlacement(format!(
                    "rank {} has {} squares",
                    rank, file
                )));
            }
        }
        Ok(board)
    }

    /// Returns the piece on `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.squares[square.index() as usize]
    }

    /// Places or clears a piece.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<(Piece, Color)>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Iterates over occupied squares from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Returns the FEN piece placement field for this board.
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for rank in Rank::ALL.iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, *rank)) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if *rank != Rank::R1 {
                out.push('/');
            }
        }
        out
    }

    /// Returns the same placement with every piece's color swapped.
    pub fn with_colors_swapped(&self) -> Self {
        let mut board = *self;
        for slot in board.squares.iter_mut() {
            if let Some((piece, color)) = *slot {
                *slot = Some((piece, color.opposite()));
            }
        }
        board
    }

    /// Renders the board as text, seen from `orientation`'s side.
    pub fn to_ascii(&self, orientation: Color) -> String {
        let ranks: Vec<Rank> = match orientation {
            Color::White => Rank::ALL.iter().rev().copied().collect(),
            Color::Black => Rank::ALL.to_vec(),
        };
        let files: Vec<File> = match orientation {
            Color::White => File::ALL.to_vec(),
            Color::Black => File::ALL.iter().rev().copied().collect(),
        };

        let mut out = String::new();
        for rank in &ranks {
            out.push(rank.to_char());
            out.push(' ');
            for file in &files {
                let c = self
                    .piece_at(Square::new(*file, *rank))
                    .map(|(p, c)| p.to_fen_char(c))
                    .unwrap_or('.');
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("  ");
        for file in &files {
            out.push(' ');
            out.push(file.to_char());
        }
        out
    }
}

impl fmt::Debug for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardSnapshot({})", self.to_placement())
    }
}
