//! Position codec: the six-field position string <-> `Board` + `GameState`.

use std::collections::BTreeSet;

use super::error::FenError;
use super::state::{Board, GameState};
use super::{CastleSide, CastlingRights, Color, InstanceTag, PieceCode, PieceKind, Square};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a position string into a board and its game state.
///
/// Instance tags are assigned in encounter order (rank 8 to rank 1, file a
/// to h), see [`tag_placements`].
pub fn parse(text: &str) -> Result<(Board, GameState), FenError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [placement, side, castling, en_passant, halfmove, fullmove] = parts[..] else {
        return Err(FenError::WrongFieldCount { found: parts.len() });
    };

    let placements = parse_placement(placement)?;
    validate_placements(&placements)?;

    let mut board = Board::empty();
    let codes = tag_placements(&placements)?;
    for (&(sq, _, _), code) in placements.iter().zip(codes) {
        board.place(sq, code);
    }

    let side_to_move = match side {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };

    let state = GameState {
        side_to_move,
        castling: parse_castling(castling)?,
        en_passant: parse_en_passant(en_passant)?,
        halfmove_clock: halfmove
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock {
                found: halfmove.to_string(),
            })?,
        fullmove_number: match fullmove.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(FenError::InvalidFullmoveNumber {
                    found: fullmove.to_string(),
                })
            }
        },
    };

    validate_en_passant(&board, &state)?;
    debug_assert!(board.is_consistent());
    Ok((board, state))
}

/// Convert a board and game state to the position string.
///
/// Inverse of [`parse`] for canonical strings.
#[must_use]
pub fn serialize(board: &Board, state: &GameState) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..8 {
            match board.piece_at(Square(rank, file)).to_fen_char() {
                Some(c) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(c);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }

    let active = match state.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let ep = state
        .en_passant
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        rows.join("/"),
        active,
        state.castling,
        ep,
        state.halfmove_clock,
        state.fullmove_number
    )
}

fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceKind, Color)>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut placements = Vec::new();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let mut file = 0;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiece { char: c });
                }
                file += skip as usize;
            } else {
                let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::RankOverflow { rank: rank_idx });
                }
                placements.push((Square(7 - rank_idx, file), kind, color));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankOverflow { rank: rank_idx });
            }
        }
        if file < 8 {
            return Err(FenError::RankUnderflow {
                rank: rank_idx,
                files: file,
            });
        }
    }
    Ok(placements)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let invalid = || FenError::InvalidCastling {
        found: field.to_string(),
    };
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, side) = match c {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(invalid()),
        };
        if rights.has(color, side) {
            return Err(invalid());
        }
        rights.set(color, side);
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant {
            found: field.to_string(),
        })
}

/// One king per color and no pawn on either back rank.
///
/// A pawn on its last rank only exists mid-move, while a promotion is
/// pending, so it never appears in a resting position.
pub(crate) fn validate_placements(
    placements: &[(Square, PieceKind, Color)],
) -> Result<(), FenError> {
    for color in Color::BOTH {
        let found = placements
            .iter()
            .filter(|(_, kind, c)| *kind == PieceKind::King && *c == color)
            .count();
        if found != 1 {
            return Err(FenError::KingCount { color, found });
        }
    }
    let stray = placements
        .iter()
        .find(|(sq, kind, _)| *kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7));
    if let Some(&(square, _, _)) = stray {
        return Err(FenError::PawnOnBackRank { square });
    }
    Ok(())
}

/// The target must be the square just skipped by a pawn of the side that
/// moved last: rank 6 when White is to move, rank 3 when Black is. The
/// target and the square the pawn left are empty, and the pawn stands one
/// rank further on.
pub(crate) fn validate_en_passant(board: &Board, state: &GameState) -> Result<(), FenError> {
    let Some(target) = state.en_passant else {
        return Ok(());
    };
    let invalid = || FenError::InvalidEnPassant {
        found: target.to_string(),
    };
    let mover = state.side_to_move;
    let expected_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    if target.rank() != expected_rank {
        return Err(invalid());
    }
    let dir = mover.pawn_direction();
    let (Some(origin), Some(landed)) = (target.offset(dir, 0), target.offset(-dir, 0)) else {
        return Err(invalid());
    };
    let pusher = board.piece_at(landed);
    let pushed_pawn = pusher.is_kind(PieceKind::Pawn) && pusher.is_color(mover.opponent());
    if !board.is_empty(target) || !board.is_empty(origin) || !pushed_pawn {
        return Err(invalid());
    }
    Ok(())
}

fn tag_slots(kind: PieceKind) -> &'static [InstanceTag] {
    const PAWN_SLOTS: [InstanceTag; 8] = [
        InstanceTag::File(0),
        InstanceTag::File(1),
        InstanceTag::File(2),
        InstanceTag::File(3),
        InstanceTag::File(4),
        InstanceTag::File(5),
        InstanceTag::File(6),
        InstanceTag::File(7),
    ];
    match kind {
        PieceKind::Pawn => &PAWN_SLOTS,
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook => {
            &[InstanceTag::Queenside, InstanceTag::Kingside]
        }
        PieceKind::Queen | PieceKind::King => &[InstanceTag::Sole],
    }
}

/// Give every placement a unique `PieceCode`.
///
/// Rooks on their own back-rank corners are tagged first (a-file queenside,
/// h-file kingside) so castling pairs with the right instance. The rest take
/// the first free slot of their kind in encounter order: rooks, knights and
/// bishops get queenside then kingside, pawns get file letters a..h, kings
/// and the first queen get `Sole`. Anything beyond that is numbered `Extra`
/// per color.
pub(crate) fn tag_placements(
    placements: &[(Square, PieceKind, Color)],
) -> Result<Vec<PieceCode>, FenError> {
    let mut codes = vec![PieceCode::EMPTY; placements.len()];
    let mut used = BTreeSet::new();

    for (slot, &(sq, kind, color)) in codes.iter_mut().zip(placements) {
        if kind != PieceKind::Rook || sq.rank() != color.back_rank() {
            continue;
        }
        let side = CastleSide::BOTH
            .into_iter()
            .find(|side| side.rook_origin(color) == sq);
        if let Some(side) = side {
            let code = PieceCode::new(kind, color, side.rook_tag());
            used.insert(code);
            *slot = code;
        }
    }

    let mut extra = [0u8; 2];
    for (slot, &(_, kind, color)) in codes.iter_mut().zip(placements) {
        if !slot.is_empty() {
            continue;
        }
        let free = tag_slots(kind)
            .iter()
            .map(|tag| PieceCode::new(kind, color, *tag))
            .find(|code| !used.contains(code));
        let code = match free {
            Some(code) => code,
            None => {
                let n = extra[color.index()];
                if n > InstanceTag::MAX_EXTRA {
                    return Err(FenError::TooManyPieces { color });
                }
                extra[color.index()] += 1;
                PieceCode::new(kind, color, InstanceTag::Extra(n))
            }
        };
        used.insert(code);
        *slot = code;
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_on(board: &Board, sq: &str) -> PieceCode {
        board.piece_at(sq.parse().unwrap())
    }

    #[test]
    fn test_start_position_round_trip() {
        let (board, state) = parse(START_FEN).unwrap();
        assert_eq!(state, GameState::initial());
        assert_eq!(board.piece_count(Color::White), 16);
        assert_eq!(board.piece_count(Color::Black), 16);
        assert_eq!(serialize(&board, &state), START_FEN);
    }

    #[test]
    fn test_round_trip_with_en_passant_and_clocks() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/pppbqppp/n2bpn2/3p4/3P4/2NBPN2/PPPBQPPP/R3K2R w KQkq - 0 1",
            "8/8/8/8/8/8/8/K1k5 w - - 42 77",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3",
            "r3k3/8/8/8/8/8/8/4K2R b Kq - 5 20",
        ] {
            let (board, state) = parse(fen).unwrap();
            assert_eq!(serialize(&board, &state), fen);
        }
    }

    #[test]
    fn test_starting_tags() {
        let (board, _) = parse(START_FEN).unwrap();
        assert_eq!(code_on(&board, "a1").tag(), Some(InstanceTag::Queenside));
        assert_eq!(code_on(&board, "h1").tag(), Some(InstanceTag::Kingside));
        assert_eq!(code_on(&board, "a8").tag(), Some(InstanceTag::Queenside));
        assert_eq!(code_on(&board, "h8").tag(), Some(InstanceTag::Kingside));
        assert_eq!(code_on(&board, "b1").tag(), Some(InstanceTag::Queenside));
        assert_eq!(code_on(&board, "g8").tag(), Some(InstanceTag::Kingside));
        assert_eq!(code_on(&board, "a2").tag(), Some(InstanceTag::File(0)));
        assert_eq!(code_on(&board, "h7").tag(), Some(InstanceTag::File(7)));
        assert_eq!(code_on(&board, "e1").tag(), Some(InstanceTag::Sole));
    }

    #[test]
    fn test_corner_rook_keeps_its_side_when_another_rook_comes_first() {
        let (board, _) = parse("4k3/8/8/8/8/8/7R/R3K3 w Q - 0 1").unwrap();
        assert_eq!(code_on(&board, "a1").tag(), Some(InstanceTag::Queenside));
        assert_eq!(code_on(&board, "h2").tag(), Some(InstanceTag::Kingside));
    }

    #[test]
    fn test_extra_pieces_get_unique_codes() {
        let (board, _) = parse("4k3/8/8/8/8/8/8/QQQ1K3 w - - 0 1").unwrap();
        let a = code_on(&board, "a1");
        let b = code_on(&board, "b1");
        let c = code_on(&board, "c1");
        assert_eq!(a.tag(), Some(InstanceTag::Sole));
        assert_eq!(b.tag(), Some(InstanceTag::Extra(0)));
        assert_eq!(c.tag(), Some(InstanceTag::Extra(1)));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_wrong_field_count() {
        let result = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 4 })));
        let result = parse(&format!("{START_FEN} extra"));
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 7 })));
    }

    #[test]
    fn test_invalid_piece() {
        let result = parse("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
        let result = parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: '9' })));
    }

    #[test]
    fn test_overrun_and_underrun() {
        let result = parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::RankOverflow { rank: 0 })));
        let result = parse("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBN1R w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::RankOverflow { rank: 7 })));
        let result = parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(
            result,
            Err(FenError::RankUnderflow { rank: 1, files: 7 })
        ));
        let result = parse("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::RankCount { found: 7 })));
    }

    #[test]
    fn test_king_count() {
        let result = parse("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::KingCount {
                color: Color::Black,
                found: 0
            })
        ));
    }

    #[test]
    fn test_side_castling_and_en_passant_validation() {
        let result = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
        let result = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { .. })));
        let result = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KKq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { .. })));
        let result = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_en_passant_target_must_match_the_board() {
        // Nothing stands behind the target
        let result = parse("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // The pawn behind the target belongs to the side to move
        let result = parse("4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // The target itself is occupied
        let result = parse("4k3/8/3N4/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // The square the pawn left is occupied
        let result = parse("4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // Black to move: the white pawn must be on rank 4
        let result = parse("4k3/8/8/8/8/8/4P3/4K3 b - e3 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        assert!(parse("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").is_ok());
    }

    #[test]
    fn test_pawn_on_back_rank_is_rejected() {
        let result = parse("P3k3/8/8/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(
            result.map(|_| ()),
            Err(FenError::PawnOnBackRank {
                square: Square(7, 0)
            })
        );
        let result = parse("4k3/8/8/8/8/8/8/4K2p w - - 0 1");
        assert_eq!(
            result.map(|_| ()),
            Err(FenError::PawnOnBackRank {
                square: Square(0, 7)
            })
        );
    }

    #[test]
    fn test_counter_validation() {
        let result = parse("8/8/8/8/8/8/8/K1k5 w - - -1 1");
        assert!(matches!(result, Err(FenError::InvalidHalfmoveClock { .. })));
        let result = parse("8/8/8/8/8/8/8/K1k5 w - - 0 0");
        assert!(matches!(result, Err(FenError::InvalidFullmoveNumber { .. })));
    }
}
