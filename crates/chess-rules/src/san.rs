//! Standard Algebraic Notation labels.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Qh4#"

use chess::{Board, BoardStatus, ChessMove, Piece};

/// Converts a move to SAN given the position before the move.
///
/// `legal` must hold every legal move of `board`; it is used for
/// disambiguation so the move list is generated only once per position.
pub(crate) fn move_to_san(board: &Board, m: ChessMove, legal: &[ChessMove]) -> String {
    let from = m.get_source();
    let to = m.get_dest();
    let piece = board.piece_on(from).unwrap_or(Piece::Pawn);

    let mut san = String::new();

    if piece == Piece::King && from.get_file().to_index().abs_diff(to.get_file().to_index()) == 2 {
        if to.get_file().to_index() > from.get_file().to_index() {
            san.push_str("O-O");
        } else {
            san.push_str("O-O-O");
        }
        return add_check_suffix(board, m, san);
    }

    if piece != Piece::Pawn {
        san.push(piece_letter(piece));
        san.push_str(&disambiguation(board, m, piece, legal));
    }

    // En passant lands on an empty square.
    let is_capture = board.piece_on(to).is_some()
        || (piece == Piece::Pawn && from.get_file() != to.get_file());
    if is_capture {
        if piece == Piece::Pawn {
            san.push(file_char(from));
        }
        san.push('x');
    }

    san.push(file_char(to));
    san.push(rank_char(to));

    if let Some(promotion) = m.get_promotion() {
        san.push('=');
        san.push(piece_letter(promotion));
    }

    add_check_suffix(board, m, san)
}

fn disambiguation(board: &Board, m: ChessMove, piece: Piece, legal: &[ChessMove]) -> String {
    let from = m.get_source();
    let rivals: Vec<&ChessMove> = legal
        .iter()
        .filter(|o| {
            o.get_dest() == m.get_dest()
                && o.get_source() != from
                && board.piece_on(o.get_source()) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|o| o.get_source().get_file() != from.get_file()) {
        return file_char(from).to_string();
    }
    if rivals.iter().all(|o| o.get_source().get_rank() != from.get_rank()) {
        return rank_char(from).to_string();
    }
    format!("{}{}", file_char(from), rank_char(from))
}

fn add_check_suffix(board: &Board, m: ChessMove, mut san: String) -> String {
    let after = board.make_move_new(m);
    if after.checkers().popcnt() > 0 {
        if after.status() == BoardStatus::Checkmate {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn file_char(sq: chess::Square) -> char {
    (b'a' + sq.get_file().to_index() as u8) as char
}

fn rank_char(sq: chess::Square) -> char {
    (b'1' + sq.get_rank().to_index() as u8) as char
}
