//! Pseudo-legal move generation.
//!
//! One family of pure functions per piece kind. Nothing here looks at whose
//! turn it is or whether the mover's king ends up attacked; that is the
//! legality filter's job.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{Bitboard, Board, Color, PieceCode, PieceKind, Square};

/// Squares the piece `code` standing on `from` could move to, ignoring checks.
///
/// Friendly-occupied squares are never included. `en_passant` only matters
/// for pawns. Castling is not a pseudo-legal king move; see
/// [`legal_destinations`](super::legality::legal_destinations).
#[must_use]
pub fn pseudo_legal_destinations(
    board: &Board,
    code: PieceCode,
    from: Square,
    en_passant: Option<Square>,
) -> Bitboard {
    let (Some(kind), Some(color)) = (code.kind(), code.color()) else {
        return Bitboard::EMPTY;
    };
    match kind {
        PieceKind::Pawn => pawns::destinations(board, color, from, en_passant),
        PieceKind::Knight => knights::destinations(board, color, from),
        PieceKind::King => kings::destinations(board, color, from),
        PieceKind::Bishop => sliders::destinations(board, color, from, &sliders::BISHOP_DIRS),
        PieceKind::Rook => sliders::destinations(board, color, from, &sliders::ROOK_DIRS),
        PieceKind::Queen => sliders::destinations(board, color, from, &sliders::QUEEN_DIRS),
    }
}

/// Squares the piece on `from` threatens.
///
/// Same as [`pseudo_legal_destinations`] except for pawns, which threaten
/// their two forward diagonals and never the squares straight ahead.
#[must_use]
pub fn attack_squares(board: &Board, code: PieceCode, from: Square) -> Bitboard {
    match (code.kind(), code.color()) {
        (Some(PieceKind::Pawn), Some(color)) => pawns::attacks(color, from),
        _ => pseudo_legal_destinations(board, code, from, None),
    }
}

/// Table of on-board targets for a leaper with the given offsets.
fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (idx, slot) in table.iter_mut().enumerate() {
        let from = Square::from_index(idx);
        *slot = deltas
            .iter()
            .filter_map(|&(dr, df)| from.offset(dr, df))
            .collect();
    }
    table
}

/// Drop squares holding a piece of `color`.
fn without_friends(board: &Board, color: Color, targets: Bitboard) -> Bitboard {
    targets
        .iter()
        .filter(|&sq| board.color_on(sq) != Some(color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;

    fn dests(fen_str: &str, sq: &str) -> Vec<String> {
        let (board, state) = fen::parse(fen_str).unwrap();
        let from: Square = sq.parse().unwrap();
        let code = board.piece_at(from);
        pseudo_legal_destinations(&board, code, from, state.en_passant)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_knight_in_corner() {
        assert_eq!(dests("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", "a1"), ["c2", "b3"]);
    }

    #[test]
    fn test_knight_skips_friendly_squares() {
        assert_eq!(dests(fen::START_FEN, "b1"), ["a3", "c3"]);
    }

    #[test]
    fn test_rook_stops_at_blockers() {
        let d = dests("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1", "d4");
        assert_eq!(
            d,
            ["d1", "d2", "d3", "b4", "c4", "e4", "f4", "d5", "d6", "d7", "d8"]
        );
    }

    #[test]
    fn test_bishop_and_queen_rays() {
        let bishop = dests("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1", "c1");
        assert_eq!(bishop, ["b2", "d2", "a3", "e3", "f4", "g5", "h6"]);
        let queen = dests("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", "d1");
        assert_eq!(queen.len(), 17);
    }

    #[test]
    fn test_king_single_steps() {
        assert_eq!(dests(fen::START_FEN, "e1"), Vec::<String>::new());
        assert_eq!(
            dests("4k3/8/8/8/8/8/8/4K3 w - - 0 1", "e1"),
            ["d1", "f1", "d2", "e2", "f2"]
        );
    }

    #[test]
    fn test_pawn_single_and_double_step() {
        assert_eq!(dests(fen::START_FEN, "e2"), ["e3", "e4"]);
        assert_eq!(dests(fen::START_FEN, "d7"), ["d5", "d6"]);
        assert_eq!(
            dests("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2"),
            Vec::<String>::new()
        );
        assert_eq!(dests("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2"), ["e3"]);
    }

    #[test]
    fn test_pawn_captures_and_en_passant() {
        assert_eq!(
            dests("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3", "e5"),
            ["d6", "e6"]
        );
        assert_eq!(
            dests("4k3/8/8/8/8/3n1N2/4P3/4K3 w - - 0 1", "e2"),
            ["d3", "e3", "e4"]
        );
    }

    #[test]
    fn test_en_passant_needs_an_empty_target_and_enemy_pawn() {
        let pawn_dests = |fen_str: &str, target: Square| -> String {
            let (board, _) = fen::parse(fen_str).unwrap();
            let from = Square(4, 4);
            pseudo_legal_destinations(&board, board.piece_at(from), from, Some(target)).to_string()
        };
        // Own knight on the target
        assert_eq!(pawn_dests("4k3/8/3N4/3pP3/8/8/8/4K3 w - - 0 1", Square(5, 3)), "e6");
        // Own pawn beside the capturer
        assert_eq!(pawn_dests("4k3/8/8/3PP3/8/8/8/4K3 w - - 0 1", Square(5, 3)), "e6");
        // Nothing beside the capturer
        assert_eq!(pawn_dests("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1", Square(5, 3)), "e6");
        assert_eq!(pawn_dests("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1", Square(5, 3)), "d6 e6");
    }

    #[test]
    fn test_pawn_attacks_are_diagonals_only() {
        let (board, _) = fen::parse(fen::START_FEN).unwrap();
        let from = Square(1, 0);
        let attacks = attack_squares(&board, board.piece_at(from), from);
        assert_eq!(attacks.to_string(), "b3");
        let from = Square(6, 4);
        let attacks = attack_squares(&board, board.piece_at(from), from);
        assert_eq!(attacks.to_string(), "d6 f6");
    }

    #[test]
    fn test_empty_code_has_no_destinations() {
        let (board, _) = fen::parse(fen::START_FEN).unwrap();
        assert!(pseudo_legal_destinations(&board, PieceCode::EMPTY, Square(3, 3), None).is_empty());
    }
}
