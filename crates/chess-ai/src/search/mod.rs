//! Move selection strategies.
//!
//! [`MoveSelector`] dispatches on [`Difficulty`] to one of three strategies.
//! Each strategy receives the game's live rules engine and must return it in
//! the same position; speculative moves go through
//! [`Speculation`](chess_rules::Speculation) so this holds on every path.

mod greedy;
mod minimax;
mod random;

pub use minimax::Minimax;

use crate::Difficulty;
use chess_core::{Color, Move};
use chess_rules::RulesEngine;
use rand::Rng;
use tracing::warn;

/// Search depth used by the master strategy unless configured otherwise.
pub const DEFAULT_DEPTH: u8 = 3;

/// Chooses the opponent's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSelector {
    depth: u8,
    pruning: bool,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl MoveSelector {
    /// Creates a selector searching `depth` plies at master level, with
    /// alpha-beta pruning enabled.
    pub fn new(depth: u8) -> Self {
        MoveSelector {
            depth: depth.max(1),
            pruning: true,
        }
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Picks a move from `legal` for the side playing `friendly`.
    ///
    /// `legal` must be the legal moves of the current position of `rules`.
    /// Returns `None` only when `legal` is empty.
    pub fn select_move<R, G>(
        &self,
        rules: &mut R,
        legal: &[Move],
        difficulty: Difficulty,
        friendly: Color,
        rng: &mut G,
    ) -> Option<Move>
    where
        R: RulesEngine + ?Sized,
        G: Rng + ?Sized,
    {
        if legal.is_empty() {
            warn!(%difficulty, "no legal moves to choose from");
            return None;
        }

        match difficulty {
            Difficulty::Novice => random::choose(legal, rng),
            Difficulty::Intermediate => greedy::choose(rules, legal, friendly),
            Difficulty::Master => {
                Minimax::new(self.depth, self.pruning).best_move(rules, legal, friendly)
            }
        }
    }
}
