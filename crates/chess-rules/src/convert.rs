//! Conversions between `chess_core` values and the `chess` crate's types.

use chess_core::{Color, File, MoveRequest, Piece, Rank, Square};

pub(crate) fn to_square(sq: Square) -> chess::Square {
    chess::Square::make_square(
        chess::Rank::from_index(sq.rank().index() as usize),
        chess::File::from_index(sq.file().index() as usize),
    )
}

pub(crate) fn from_square(sq: chess::Square) -> Square {
    let file = File::ALL[sq.get_file().to_index() & 7];
    let rank = Rank::ALL[sq.get_rank().to_index() & 7];
    Square::new(file, rank)
}

pub(crate) fn to_piece(piece: Piece) -> chess::Piece {
    match piece {
        Piece::Pawn => chess::Piece::Pawn,
        Piece::Knight => chess::Piece::Knight,
        Piece::Bishop => chess::Piece::Bishop,
        Piece::Rook => chess::Piece::Rook,
        Piece::Queen => chess::Piece::Queen,
        Piece::King => chess::Piece::King,
    }
}

pub(crate) fn from_piece(piece: chess::Piece) -> Piece {
    match piece {
        chess::Piece::Pawn => Piece::Pawn,
        chess::Piece::Knight => Piece::Knight,
        chess::Piece::Bishop => Piece::Bishop,
        chess::Piece::Rook => Piece::Rook,
        chess::Piece::Queen => Piece::Queen,
        chess::Piece::King => Piece::King,
    }
}

pub(crate) fn from_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

pub(crate) fn to_chess_move(request: &MoveRequest) -> chess::ChessMove {
    chess::ChessMove::new(
        to_square(request.from),
        to_square(request.to),
        request.promotion.map(to_piece),
    )
}

pub(crate) fn request_of(m: chess::ChessMove) -> MoveRequest {
    MoveRequest {
        from: from_square(m.get_source()),
        to: from_square(m.get_dest()),
        promotion: m.get_promotion().map(from_piece),
    }
}
