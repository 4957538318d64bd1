use std::sync::LazyLock;

use super::{leaper_table, without_friends};
use crate::board::{Bitboard, Board, Color, Square};

static KNIGHT_TARGETS: LazyLock<[Bitboard; 64]> = LazyLock::new(|| {
    leaper_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

pub(super) fn destinations(board: &Board, color: Color, from: Square) -> Bitboard {
    without_friends(board, color, KNIGHT_TARGETS[from.as_index()])
}
