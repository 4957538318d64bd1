//! Random legal move selection, used to auto-play a side.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Move, Position};

/// Pick a legal move for the side to move uniformly at random.
///
/// Returns `None` when the side to move has no legal move or a promotion is
/// pending.
pub fn random_legal_move<R: Rng + ?Sized>(position: &Position, rng: &mut R) -> Option<Move> {
    position.legal_moves().choose(rng).copied()
}
