//! Move applier: commit a validated (start, end) pair to the board.

#[cfg(feature = "logging")]
use log::debug;

use super::error::RulesError;
use super::state::{Board, GameState};
use super::{CastleSide, Color, PieceCode, PieceKind, Square};

/// What [`apply`] did, for building move records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    pub piece: PieceCode,
    pub captured: Option<PieceCode>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    /// The moved pawn now stands on its last rank and awaits [`promote`].
    pub promotes: bool,
}

/// Commit `from -> to` to `board` and advance `state`.
///
/// The pair is assumed to be legal; only the checks needed to keep the board
/// consistent are made, and nothing is mutated when one fails.
///
/// # Errors
/// `EmptySquare` when `from` is vacant, `InvalidCastleSide` when a castling
/// king move has no matching rook on its corner.
pub fn apply(
    board: &mut Board,
    state: &mut GameState,
    from: Square,
    to: Square,
) -> Result<Applied, RulesError> {
    let piece = board.piece_at(from);
    let (Some(kind), Some(color)) = (piece.kind(), piece.color()) else {
        return Err(RulesError::EmptySquare { square: from });
    };

    let castle = match kind {
        PieceKind::King => CastleSide::from_king_move(color, from, to),
        _ => None,
    };
    if let Some(side) = castle {
        let rook = PieceCode::new(PieceKind::Rook, color, side.rook_tag());
        if board.piece_at(side.rook_origin(color)) != rook {
            return Err(RulesError::InvalidCastleSide { king: from, to });
        }
    }

    let en_passant = kind == PieceKind::Pawn
        && state.en_passant == Some(to)
        && from.file() != to.file()
        && board.is_empty(to);
    // The pawn taken en passant sits beside the capturer, behind the target.
    let captured_on = if en_passant {
        Square(from.rank(), to.file())
    } else {
        to
    };
    let captured = Some(board.piece_at(captured_on)).filter(|code| !code.is_empty());

    revoke_castling(state, piece, captured);

    if captured.is_some() {
        board.lift(captured_on);
    }
    board.relocate(from, to);
    if let Some(side) = castle {
        board.relocate(side.rook_origin(color), side.rook_destination(color));
    }

    state.en_passant = if kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
        Some(Square((from.rank() + to.rank()) / 2, from.file()))
    } else {
        None
    };
    if kind == PieceKind::Pawn || captured.is_some() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }
    state.side_to_move = color.opponent();

    debug_assert!(board.is_consistent(), "board out of sync after {from}{to}");
    #[cfg(feature = "logging")]
    debug!(
        "applied {from}{to} ({piece:?}){}{}",
        captured.map_or_else(String::new, |c| format!(" capturing {c:?}")),
        castle.map_or_else(String::new, |side| format!(" castling {side}"))
    );

    Ok(Applied {
        piece,
        captured,
        castle,
        en_passant,
        promotes: kind == PieceKind::Pawn && to.rank() == color.promotion_rank(),
    })
}

/// Clear rights for a moving king or castling rook, and for a castling rook
/// that is captured.
fn revoke_castling(state: &mut GameState, piece: PieceCode, captured: Option<PieceCode>) {
    let (Some(kind), Some(color)) = (piece.kind(), piece.color()) else {
        return;
    };
    match kind {
        PieceKind::King => state.castling.remove_color(color),
        PieceKind::Rook => {
            if let Some(side) = piece.tag().and_then(CastleSide::for_rook_tag) {
                state.castling.remove(color, side);
            }
        }
        _ => {}
    }

    if let Some(victim) = captured.filter(|c| c.is_kind(PieceKind::Rook)) {
        if let (Some(side), Some(owner)) = (
            victim.tag().and_then(CastleSide::for_rook_tag),
            victim.color(),
        ) {
            state.castling.remove(owner, side);
        }
    }
}

/// Turn the pawn on `sq` into `kind`, keeping its color and tag.
///
/// # Errors
/// `InvalidPromotion` for pawn or king, `NotPromotable` when `sq` does not
/// hold a pawn on its last rank.
pub fn promote(board: &mut Board, sq: Square, kind: PieceKind) -> Result<PieceCode, RulesError> {
    if !PieceKind::PROMOTIONS.contains(&kind) {
        return Err(RulesError::InvalidPromotion { kind });
    }
    let pawn = board.piece_at(sq);
    match pawn.color() {
        Some(color) if pawn.is_kind(PieceKind::Pawn) && sq.rank() == color.promotion_rank() => {}
        _ => return Err(RulesError::NotPromotable { square: sq }),
    }

    let promoted = board.lift(sq).with_kind(kind);
    board.place(sq, promoted);
    #[cfg(feature = "logging")]
    debug!("promoted {pawn:?} on {sq} to {kind:?}");
    Ok(promoted)
}
