//! Rules-engine contract for the chess game client.
//!
//! The game session and the move search never implement chess rules
//! themselves. They talk to a [`RulesEngine`], which owns the single live
//! position of a game and answers every legality and terminal-state question.
//!
//! This crate provides:
//! - [`RulesEngine`] - the contract (enumerate, apply, undo, status queries,
//!   serialization)
//! - [`StandardRules`] - FIDE chess with undo history, SAN labels and the
//!   usual draw rules, backed by the `chess` crate's move generator
//! - [`Speculation`] - a scoped apply/undo guard for tree searches
//!
//! # Example
//!
//! ```
//! use chess_rules::{RulesEngine, StandardRules};
//! use chess_core::MoveRequest;
//!
//! let mut rules = StandardRules::new();
//! assert_eq!(rules.legal_moves().len(), 20);
//!
//! let applied = rules.apply(MoveRequest::from_uci("e2e4").unwrap()).unwrap();
//! assert_eq!(applied.san(), "e4");
//!
//! rules.undo();
//! assert_eq!(rules.serialize(), StandardRules::STARTPOS);
//! ```

mod convert;
mod error;
mod rules;
mod san;
mod speculation;
mod standard;

pub use error::RulesError;
pub use rules::{DrawReason, RulesEngine};
pub use speculation::Speculation;
pub use standard::StandardRules;
