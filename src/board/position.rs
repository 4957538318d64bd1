//! The collaborator-facing rules API.
//!
//! A [`Position`] owns a [`Board`] and its [`GameState`] and only ever
//! changes through validated moves and promotions. Renderers, the command
//! loop and the random picker talk to this type and nothing below it.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "logging")]
use log::trace;

use super::apply::{self, Applied};
use super::error::RulesError;
use super::fen::{self, START_FEN};
use super::legality;
use super::state::{Board, GameState};
use super::{Bitboard, Color, Move, MoveRecord, PieceCode, PieceKind, Square};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    state: GameState,
    /// Square of a pawn that reached its last rank and still awaits `promote`
    pending_promotion: Option<Square>,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        match Self::try_from_fen(START_FEN) {
            Ok(position) => position,
            Err(e) => unreachable!("start position rejected: {e}"),
        }
    }

    /// Parse a six-field position string.
    ///
    /// # Errors
    /// `MalformedPosition` wrapping the codec's complaint.
    pub fn try_from_fen(text: &str) -> Result<Self, RulesError> {
        let (board, state) = fen::parse(text)?;
        Ok(Position::from_parts(board, state))
    }

    pub(crate) fn from_parts(board: Board, state: GameState) -> Self {
        Position {
            board,
            state,
            pending_promotion: None,
        }
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        fen::serialize(&self.board, &self.state)
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Code on a square, `PieceCode::EMPTY` if vacant.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> PieceCode {
        self.board.piece_at(sq)
    }

    /// Legal destinations of the side-to-move piece on `sq`.
    ///
    /// # Errors
    /// `PromotionPending`, `EmptySquare`, or `WrongSide` when the piece is
    /// not the side to move's.
    pub fn legal_destinations(&self, sq: Square) -> Result<Bitboard, RulesError> {
        let code = self.movable_piece(sq)?;
        Ok(legality::legal_destinations(
            &self.board,
            code,
            sq,
            &self.state,
        ))
    }

    #[must_use]
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.legal_destinations(from)
            .is_ok_and(|dests| dests.contains(to))
    }

    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        legality::is_square_attacked(&self.board, sq, by)
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        legality::is_in_check(&self.board, self.state.side_to_move)
    }

    /// True when the piece on `from` is a pawn and `to` is its last rank.
    #[must_use]
    pub fn needs_promotion(&self, from: Square, to: Square) -> bool {
        let code = self.board.piece_at(from);
        match code.color() {
            Some(color) => code.is_kind(PieceKind::Pawn) && to.rank() == color.promotion_rank(),
            None => false,
        }
    }

    /// Play `from -> to` for the side to move.
    ///
    /// A pawn landing on its last rank leaves the position waiting for
    /// [`promote`](Self::promote); until then every move is refused. The
    /// returned record's `fen_after` shows the unpromoted pawn in that case,
    /// which [`fen::parse`] refuses as a pawn on a back rank.
    ///
    /// # Errors
    /// `PromotionPending`, `EmptySquare`, `WrongSide`, or `IllegalMove` when
    /// `to` is not a legal destination. The position is unchanged on error.
    pub fn apply(&mut self, from: Square, to: Square) -> Result<MoveRecord, RulesError> {
        self.check_legal(from, to)?;
        let fen_before = self.to_fen();
        let applied = apply::apply(&mut self.board, &mut self.state, from, to)?;
        if applied.promotes {
            self.pending_promotion = Some(to);
        }
        Ok(self.record(from, to, applied, None, fen_before))
    }

    /// Play a promoting pawn move and promote in one step.
    ///
    /// # Errors
    /// As [`apply`](Self::apply), plus `InvalidPromotion` when `kind` is not
    /// a promotion kind or the move does not promote.
    pub fn apply_promoting(
        &mut self,
        from: Square,
        to: Square,
        kind: PieceKind,
    ) -> Result<MoveRecord, RulesError> {
        if !PieceKind::PROMOTIONS.contains(&kind) || !self.needs_promotion(from, to) {
            return Err(RulesError::InvalidPromotion { kind });
        }
        self.check_legal(from, to)?;
        let fen_before = self.to_fen();
        let applied = apply::apply(&mut self.board, &mut self.state, from, to)?;
        apply::promote(&mut self.board, to, kind)?;
        Ok(self.record(from, to, applied, Some(kind), fen_before))
    }

    /// Play a [`Move`], promoting when it carries a promotion kind.
    ///
    /// # Errors
    /// See [`apply`](Self::apply) and [`apply_promoting`](Self::apply_promoting).
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveRecord, RulesError> {
        match mv.promotion {
            Some(kind) => self.apply_promoting(mv.from, mv.to, kind),
            None => self.apply(mv.from, mv.to),
        }
    }

    /// Resolve a pending promotion.
    ///
    /// # Errors
    /// `InvalidPromotion` for pawn or king, `NotPromotable` when `sq` is not
    /// the square awaiting promotion.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) -> Result<PieceCode, RulesError> {
        if self.pending_promotion != Some(sq) {
            return Err(RulesError::NotPromotable { square: sq });
        }
        let promoted = apply::promote(&mut self.board, sq, kind)?;
        self.pending_promotion = None;
        Ok(promoted)
    }

    /// Every legal move for the side to move, one per promotion kind for
    /// promoting pawn moves. Empty while a promotion is pending.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.pending_promotion.is_some() {
            return Vec::new();
        }
        let mut moves = Vec::new();
        for (code, from) in self.board.pieces_of(self.state.side_to_move) {
            let dests = legality::legal_destinations(&self.board, code, from, &self.state);
            for to in dests {
                if self.needs_promotion(from, to) {
                    moves.extend(
                        PieceKind::PROMOTIONS
                            .iter()
                            .map(|&kind| Move::promoting(from, to, kind)),
                    );
                } else {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Number of move paths of length `depth` from here.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|mv| {
                let mut next = self.clone();
                next.commit(mv);
                next.perft(depth - 1)
            })
            .sum()
    }

    /// Apply a move already known to be legal, skipping revalidation.
    fn commit(&mut self, mv: Move) {
        let applied = apply::apply(&mut self.board, &mut self.state, mv.from, mv.to);
        if let Err(e) = applied {
            unreachable!("generated move {mv} rejected: {e}");
        }
        if let Some(kind) = mv.promotion {
            if let Err(e) = apply::promote(&mut self.board, mv.to, kind) {
                unreachable!("generated promotion {mv} rejected: {e}");
            }
        }
    }

    /// The side-to-move piece on `sq`, if it may move at all.
    fn movable_piece(&self, sq: Square) -> Result<PieceCode, RulesError> {
        if let Some(square) = self.pending_promotion {
            return Err(RulesError::PromotionPending { square });
        }
        let code = self.board.piece_at(sq);
        match code.color() {
            None => Err(RulesError::EmptySquare { square: sq }),
            Some(color) if color != self.state.side_to_move => Err(RulesError::WrongSide {
                square: sq,
                to_move: self.state.side_to_move,
            }),
            Some(_) => Ok(code),
        }
    }

    fn check_legal(&self, from: Square, to: Square) -> Result<(), RulesError> {
        if self.legal_destinations(from)?.contains(to) {
            Ok(())
        } else {
            #[cfg(feature = "logging")]
            trace!("refusing {from}{to}: not a legal destination");
            Err(RulesError::IllegalMove { from, to })
        }
    }

    fn record(
        &self,
        from: Square,
        to: Square,
        applied: Applied,
        promotion: Option<PieceKind>,
        fen_before: String,
    ) -> MoveRecord {
        MoveRecord {
            from,
            to,
            piece: applied.piece,
            captured: applied.captured,
            castle: applied.castle,
            en_passant: applied.en_passant,
            promotion,
            fen_before,
            fen_after: self.to_fen(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Position {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Text diagram, rank 8 at the top, followed by the position string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.board.piece_at(Square(rank, file)).to_fen_char();
                write!(f, " {}", c.unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}
