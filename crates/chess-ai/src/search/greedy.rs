use crate::{evaluate, Score};
use chess_core::{Color, Move};
use chess_rules::{RulesEngine, Speculation};
use tracing::warn;

/// One-ply material maximiser. The first move reaching the best score wins.
pub(super) fn choose<R: RulesEngine + ?Sized>(
    rules: &mut R,
    legal: &[Move],
    friendly: Color,
) -> Option<Move> {
    let mut best: Option<(&Move, Score)> = None;

    for m in legal {
        let score = match Speculation::new(rules, m) {
            Ok(after) => evaluate(&after.snapshot(), friendly),
            Err(e) => {
                warn!(mv = %m.to_uci(), error = %e, "skipping move the rules engine refused");
                continue;
            }
        };
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((m, score));
        }
    }

    best.map(|(m, _)| m.clone()).or_else(|| legal.first().cloned())
}
