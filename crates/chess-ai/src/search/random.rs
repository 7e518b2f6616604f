use chess_core::Move;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly random legal move.
pub(super) fn choose<G: Rng + ?Sized>(legal: &[Move], rng: &mut G) -> Option<Move> {
    legal.choose(rng).cloned()
}
