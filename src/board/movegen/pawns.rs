use std::sync::LazyLock;

use crate::board::{Bitboard, Board, Color, PieceKind, Square};

/// Diagonal attack targets, indexed by color then square.
static PAWN_ATTACKS: LazyLock<[[Bitboard; 64]; 2]> = LazyLock::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let dir = color.pawn_direction();
        for (idx, slot) in table[color.index()].iter_mut().enumerate() {
            let from = Square::from_index(idx);
            *slot = [-1, 1]
                .into_iter()
                .filter_map(|df| from.offset(dir, df))
                .collect();
        }
    }
    table
});

pub(super) fn attacks(color: Color, from: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][from.as_index()]
}

pub(super) fn destinations(
    board: &Board,
    color: Color,
    from: Square,
    en_passant: Option<Square>,
) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
        targets.insert(one);
        if from.rank() == color.pawn_start_rank() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| board.is_empty(sq)) {
                targets.insert(two);
            }
        }
    }

    for to in attacks(color, from) {
        let enemy = board.color_on(to) == Some(color.opponent());
        if enemy || en_passant_capture(board, color, from, to, en_passant) {
            targets.insert(to);
        }
    }
    targets
}

/// `to` is the en-passant target, empty, with an enemy pawn beside `from`
/// on the target's file.
fn en_passant_capture(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    if en_passant != Some(to) || !board.is_empty(to) {
        return false;
    }
    let victim = board.piece_at(Square(from.rank(), to.file()));
    victim.is_kind(PieceKind::Pawn) && victim.is_color(color.opponent())
}
