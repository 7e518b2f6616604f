//! Opponent move selection for the chess game client.
//!
//! The opponent plays through three strategies of increasing strength, picked
//! by [`Difficulty`]:
//! - **novice**: a uniformly random legal move
//! - **intermediate**: the move with the best material balance one ply ahead
//! - **master**: fixed-depth minimax with alpha-beta pruning
//!
//! All strategies explore the game's live position through a
//! [`RulesEngine`](chess_rules::RulesEngine) and leave it exactly as they
//! found it. [`filter`] then steers the chosen move away from the opponent's
//! own recent moves.
//!
//! # Example
//!
//! ```
//! use chess_ai::{Difficulty, MoveSelector};
//! use chess_core::Color;
//! use chess_rules::{RulesEngine, StandardRules};
//! use rand::SeedableRng;
//!
//! let mut rules = StandardRules::new();
//! let legal = rules.legal_moves();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let m = MoveSelector::default()
//!     .select_move(&mut rules, &legal, Difficulty::Intermediate, Color::White, &mut rng)
//!     .unwrap();
//! assert!(legal.contains(&m));
//! ```

mod difficulty;
mod evaluate;
mod repetition;
pub mod search;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use evaluate::{evaluate, piece_value, Score, MATE_SCORE};
pub use repetition::{filter, RepetitionWindow, REPETITION_WINDOW};
pub use search::{Minimax, MoveSelector, DEFAULT_DEPTH};
