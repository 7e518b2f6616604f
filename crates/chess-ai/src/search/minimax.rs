//! Fixed-depth minimax with optional alpha-beta pruning.
//!
//! Scores are always from the friendly side's point of view: the root and
//! every node where the friendly side moves maximise, the others minimise.
//! Each root move is searched with a full window, so the per-move values in
//! [`Minimax::root_values`] are exact whether pruning is on or off.

use crate::{evaluate, Score, MATE_SCORE};
use chess_core::{Color, Move};
use chess_rules::{RulesEngine, Speculation};
use tracing::{debug, warn};

/// A single minimax search.
#[derive(Debug, Clone)]
pub struct Minimax {
    depth: u8,
    pruning: bool,
    nodes: u64,
}

impl Minimax {
    pub fn new(depth: u8, pruning: bool) -> Self {
        Minimax {
            depth: depth.max(1),
            pruning,
            nodes: 0,
        }
    }

    /// Number of positions visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns the best move for `friendly`, the first one on ties.
    pub fn best_move<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        legal: &[Move],
        friendly: Color,
    ) -> Option<Move> {
        let values = self.root_values(rules, legal, friendly);
        let mut best: Option<(usize, Score)> = None;
        for (i, value) in values.iter().enumerate() {
            if let Some(value) = *value {
                if best.map_or(true, |(_, top)| value > top) {
                    best = Some((i, value));
                }
            }
        }

        let chosen = match best {
            Some((i, value)) => {
                debug!(
                    mv = legal[i].san(),
                    value,
                    nodes = self.nodes,
                    depth = self.depth,
                    pruning = self.pruning,
                    "minimax search complete"
                );
                legal.get(i)
            }
            None => legal.first(),
        };
        chosen.cloned()
    }

    /// Returns the exact minimax value of each root move, in order.
    ///
    /// An entry is `None` if the rules engine refused to apply that move.
    pub fn root_values<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        legal: &[Move],
        friendly: Color,
    ) -> Vec<Option<Score>> {
        let child_depth = self.depth - 1;
        let mut values = Vec::with_capacity(legal.len());
        for m in legal {
            let value = match Speculation::new(rules, m) {
                Ok(mut after) => Some(self.search(
                    &mut *after,
                    child_depth,
                    -Score::MAX,
                    Score::MAX,
                    false,
                    friendly,
                )),
                Err(e) => {
                    warn!(mv = %m.to_uci(), error = %e, "root move refused");
                    None
                }
            };
            values.push(value);
        }
        values
    }

    fn search<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &mut R,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        friendly: Color,
    ) -> Score {
        self.nodes += 1;

        // Terminal positions take precedence over the depth limit.
        if rules.is_game_over() {
            if rules.is_checkmate() {
                return if rules.side_to_move() == friendly {
                    -MATE_SCORE
                } else {
                    MATE_SCORE
                };
            }
            return 0;
        }
        if depth == 0 {
            return evaluate(&rules.snapshot(), friendly);
        }

        let moves = rules.legal_moves();
        let mut best = if maximizing { -Score::MAX } else { Score::MAX };

        for m in &moves {
            let value = match Speculation::new(rules, m) {
                Ok(mut after) => {
                    self.search(&mut *after, depth - 1, alpha, beta, !maximizing, friendly)
                }
                Err(e) => {
                    warn!(mv = %m.to_uci(), error = %e, "move refused during search");
                    continue;
                }
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best
    }
}
