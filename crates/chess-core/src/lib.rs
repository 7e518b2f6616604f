//! Core types for the chess game client.
//!
//! This crate provides the value types shared by the rules engine, the move
//! search and the game session:
//! - [`Color`] and [`Piece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`MoveRequest`] for unvalidated move input and [`Move`] for moves
//!   produced by a rules engine, labelled in standard algebraic notation
//! - [`BoardSnapshot`] for read-only 8×8 views of a position

mod board;
mod color;
mod error;
mod mov;
mod piece;
mod square;

pub use board::BoardSnapshot;
pub use color::Color;
pub use error::ParseError;
pub use mov::{Move, MoveRequest};
pub use piece::Piece;
pub use square::{File, Rank, Square};
