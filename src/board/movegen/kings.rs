use std::sync::LazyLock;

use super::{leaper_table, without_friends};
use crate::board::{Bitboard, Board, Color, Square};

static KING_TARGETS: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    leaper_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

/// Single-step king moves. Castling is added by the legality filter.
pub(super) fn destinations(board: &Board, color: Color, from: Square) -> Bitboard {
    without_friends(board, color, KING_TARGETS[from.as_index()])
}
