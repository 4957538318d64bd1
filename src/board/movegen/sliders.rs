use crate::board::{Bitboard, Board, Color, Square};

pub(super) const ROOK_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(super) const QUEEN_DIRS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Walk each ray until the edge or the first occupied square, which is
/// included only when it holds an enemy piece.
pub(super) fn destinations(
    board: &Board,
    color: Color,
    from: Square,
    dirs: &[(isize, isize)],
) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dr, df) {
            match board.color_on(next) {
                None => targets.insert(next),
                Some(c) => {
                    if c != color {
                        targets.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    targets
}
