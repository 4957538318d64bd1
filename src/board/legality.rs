//! Legality filter: prune pseudo-legal destinations that leave the mover's
//! king attacked, and add castling.
//!
//! Each candidate is tried on a clone of the board, so no query ever sees
//! another query's speculative state.

#[cfg(feature = "logging")]
use log::trace;

use super::movegen::{attack_squares, pseudo_legal_destinations};
use super::state::{Board, GameState};
use super::{Bitboard, CastleSide, CastlingRights, Color, PieceCode, PieceKind, Square};

/// True when any piece of `by` threatens `sq`.
///
/// Pawns count only their diagonals. Squares holding a piece of `by` itself
/// are never reported as attacked.
#[must_use]
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(code, from)| attack_squares(board, code, from).contains(sq))
}

/// True when `color`'s king is attacked.
#[must_use]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.opponent())
}

/// Legal destinations of the piece `code` standing on `from`.
///
/// Does not consult `state.side_to_move`; callers decide whose turn it is.
#[must_use]
pub fn legal_destinations(
    board: &Board,
    code: PieceCode,
    from: Square,
    state: &GameState,
) -> Bitboard {
    let Some(color) = code.color() else {
        return Bitboard::EMPTY;
    };

    let mut legal: Bitboard = pseudo_legal_destinations(board, code, from, state.en_passant)
        .iter()
        .filter(|&to| {
            let scratch = simulate(board, code, from, to, state.en_passant);
            let exposed = is_in_check(&scratch, color);
            #[cfg(feature = "logging")]
            if exposed {
                trace!("{from}{to} rejected: leaves {color} king attacked");
            }
            !exposed
        })
        .collect();

    if code.is_kind(PieceKind::King) {
        legal |= castling_destinations(board, color, from, state.castling);
    }
    legal
}

/// Clone the board and play `from -> to` on the copy, without castling.
fn simulate(
    board: &Board,
    code: PieceCode,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Board {
    let mut scratch = board.clone();
    if !scratch.is_empty(to) {
        scratch.lift(to);
    } else if code.is_kind(PieceKind::Pawn) && en_passant == Some(to) && from.file() != to.file() {
        let victim = Square(from.rank(), to.file());
        if !scratch.is_empty(victim) {
            scratch.lift(victim);
        }
    }
    scratch.relocate(from, to);
    scratch
}

/// King destinations for each side still allowed to castle.
fn castling_destinations(
    board: &Board,
    color: Color,
    from: Square,
    rights: CastlingRights,
) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    if from != CastleSide::king_home(color) {
        return targets;
    }
    let enemy = color.opponent();

    for side in CastleSide::BOTH {
        if !rights.has(color, side) {
            continue;
        }
        let rook = PieceCode::new(PieceKind::Rook, color, side.rook_tag());
        if board.piece_at(side.rook_origin(color)) != rook {
            #[cfg(feature = "logging")]
            trace!("{color} {side}: castling rook not on its corner");
            continue;
        }
        if side.between(color).any(|sq| !board.is_empty(sq)) {
            #[cfg(feature = "logging")]
            trace!("{color} {side}: path blocked");
            continue;
        }
        let path_attacked = side.king_path(color).into_iter().any(|sq| {
            let attacked = is_square_attacked(board, sq, enemy);
            #[cfg(feature = "logging")]
            if attacked {
                trace!("{color} {side}: {sq} is attacked");
            }
            attacked
        });
        if path_attacked {
            continue;
        }
        targets.insert(side.king_destination(color));
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;

    fn legal(fen_str: &str, sq: &str) -> String {
        let (board, state) = fen::parse(fen_str).unwrap();
        let from: Square = sq.parse().unwrap();
        legal_destinations(&board, board.piece_at(from), from, &state).to_string()
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        // Bishop on e2 pinned by the rook on e8
        assert_eq!(legal("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1", "e2"), "");
        // Rook on e2 may slide along the pin and capture the pinner
        assert_eq!(
            legal("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1", "e2"),
            "e3 e4 e5 e6 e7 e8"
        );
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        // Rook on d8 covers the d-file
        assert_eq!(legal("3r2k1/8/8/8/8/8/8/4K3 w - - 0 1", "e1"), "f1 e2 f2");
    }

    #[test]
    fn test_check_must_be_answered() {
        // Knight on f2 is pinned by the queen on h4
        let fen_str = "6k1/8/8/8/7q/8/5N2/4K3 w - - 0 1";
        assert_eq!(legal(fen_str, "f2"), "");
        let (board, _) = fen::parse(fen_str).unwrap();
        assert!(!is_in_check(&board, Color::White));
        let fen_str = "6k1/8/8/8/7q/8/8/4K2N w - - 0 1";
        let (board, _) = fen::parse(fen_str).unwrap();
        assert!(is_in_check(&board, Color::White));
        // Only interpositions on f2 and g3 answer the check
        assert_eq!(legal(fen_str, "h1"), "f2 g3");
    }

    #[test]
    fn test_en_passant_that_exposes_king_is_illegal() {
        // Removing both pawns from rank 5 opens the rook onto the king
        assert_eq!(legal("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1", "e5"), "e6");
    }

    #[test]
    fn test_castling_both_sides() {
        let fen_str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(legal(fen_str, "e1"), "c1 d1 f1 g1 d2 e2 f2");
    }

    #[test]
    fn test_castling_requires_rights_and_empty_path() {
        assert_eq!(
            legal("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", "e1"),
            "c1 d1 f1 d2 e2 f2"
        );
        assert_eq!(
            legal("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", "e1"),
            "d1 f1 g1 d2 e2 f2"
        );
    }

    #[test]
    fn test_castling_blocked_by_attacked_squares() {
        // f1 attacked by the rook on f8: no kingside castle
        assert_eq!(
            legal("r3kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1"),
            "c1 d1 d2 e2"
        );
        // King in check: no castling at all
        assert_eq!(
            legal("r3k2r/8/8/8/4r3/8/8/R3K2R w KQ - 0 1", "e1"),
            "d1 f1 d2 f2"
        );
        // b1 may be attacked for queenside castling; only the king's path counts
        assert_eq!(
            legal("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1"),
            "c1 d1 f1 d2 e2 f2"
        );
    }

    #[test]
    fn test_square_attacked_by_pawn_diagonal_only() {
        let (board, _) = fen::parse("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&board, Square(2, 3), Color::White));
        assert!(is_square_attacked(&board, Square(2, 5), Color::White));
        assert!(!is_square_attacked(&board, Square(2, 4), Color::White));
    }
}
