//! Material evaluation.

use chess_core::{BoardSnapshot, Color, Piece};

/// Position score in centipawns. Positive favours the perspective colour.
pub type Score = i32;

/// Score of a checkmate, far outside any material balance.
pub const MATE_SCORE: Score = 900_000;

const PAWN_VALUE: Score = 100;
const KNIGHT_VALUE: Score = 300;
const BISHOP_VALUE: Score = 320;
const ROOK_VALUE: Score = 500;
const QUEEN_VALUE: Score = 900;

/// Returns the material value of a piece in centipawns. Kings count zero.
pub const fn piece_value(piece: Piece) -> Score {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Scores a board by material from `perspective`'s point of view.
///
/// Friendly pieces add their value, enemy pieces subtract it, so
/// `evaluate(b, White) == -evaluate(b, Black)` for every board.
pub fn evaluate(board: &BoardSnapshot, perspective: Color) -> Score {
    board
        .pieces()
        .map(|(_, piece, color)| {
            let value = piece_value(piece);
            if color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}
