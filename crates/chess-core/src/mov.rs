//! Move representation.
//!
//! Two types cover the two directions moves travel in:
//! - [`MoveRequest`] is what a human (or a test) asks for: origin,
//!   destination and an optional promotion piece. It has not been checked
//!   against any position.
//! - [`Move`] is what a rules engine hands back: a legal move in a specific
//!   position together with its standard algebraic notation label.

use crate::{ParseError, Piece, Square};
use serde::Serialize;
use std::fmt;

/// An unvalidated request to move a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl MoveRequest {
    /// Creates a request without a promotion piece.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns a copy of this request promoting to `piece`.
    #[inline]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        MoveRequest {
            promotion: Some(piece),
            ..self
        }
    }

    /// Returns the UCI notation for this request (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a request from UCI notation.
    pub fn from_uci(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let invalid = || ParseError::InvalidMove(s.to_string());
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&s[0..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&s[2..4]).ok_or_else(invalid)?;
        let request = MoveRequest::new(from, to);
        match s[4..].chars().next() {
            Some(c) => Ok(request.with_promotion(Piece::promotion_from_char(c)?)),
            None => Ok(request),
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// A legal move in a specific position, as enumerated or applied by a rules
/// engine.
///
/// Equality compares the label as well as the coordinates, so two moves are
/// equal only if they came from the same position.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    san: String,
}

impl Move {
    /// Creates a move record. Intended for rules-engine implementations;
    /// sessions and searches only handle moves the engine produced.
    pub fn new(from: Square, to: Square, promotion: Option<Piece>, san: impl Into<String>) -> Self {
        Move {
            from,
            to,
            promotion,
            san: san.into(),
        }
    }

    /// Returns the source square.
    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub fn promotion(&self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the standard algebraic notation label (e.g., "Nf3", "exd5", "Qh4#").
    #[inline]
    pub fn san(&self) -> &str {
        &self.san
    }

    /// Returns the coordinates of this move as a request.
    #[inline]
    pub fn request(&self) -> MoveRequest {
        MoveRequest {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    /// Returns true if this move matches the coordinates of `request`.
    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.request() == *request
    }

    /// Returns the UCI notation for this move.
    pub fn to_uci(&self) -> String {
        self.request().to_uci()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {})", self.to_uci(), self.san)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)
    }
}
