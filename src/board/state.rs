//! Board state: the square grid with its piece index, and the game state
//! threaded alongside it.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CastlingRights, Color, PieceCode, PieceKind, Square};

/// Side to move, castling rights, en-passant target and move counters.
///
/// Threaded explicitly through codec, legality and move application rather
/// than living inside `Board`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square skipped by the previous ply's pawn double-step, if any
    pub en_passant: Option<Square>,
    /// Plies since the last capture or pawn move
    pub halfmove_clock: u32,
    /// Starts at 1, incremented after each Black move
    pub fullmove_number: u32,
}

impl GameState {
    #[must_use]
    pub const fn initial() -> Self {
        GameState {
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// The 8x8 grid plus, per color and kind, where each tagged piece stands.
///
/// The grid and the piece index always agree: every index entry points at a
/// square holding exactly that code, and every occupied square has an entry.
/// Mutation primitives are crate-private; only move application and the
/// position constructors use them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Board {
    grid: [[PieceCode; 8]; 8],
    index: [[BTreeMap<PieceCode, Square>; 6]; 2],
}

impl Board {
    pub(crate) fn empty() -> Self {
        Board::default()
    }

    /// Code on a square, `PieceCode::EMPTY` if vacant
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> PieceCode {
        self.grid[sq.0][sq.1]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_empty()
    }

    /// Color of the piece on a square
    #[inline]
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).color()
    }

    /// Current square of a tagged piece, `None` once captured or promoted away
    #[must_use]
    pub fn square_of(&self, code: PieceCode) -> Option<Square> {
        let (kind, color) = (code.kind()?, code.color()?);
        self.index[color.index()][kind.index()].get(&code).copied()
    }

    /// Pieces of one color and kind, ordered by code
    pub fn pieces(
        &self,
        color: Color,
        kind: PieceKind,
    ) -> impl Iterator<Item = (PieceCode, Square)> + '_ {
        self.index[color.index()][kind.index()]
            .iter()
            .map(|(code, sq)| (*code, *sq))
    }

    /// Every piece of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceCode, Square)> + '_ {
        self.index[color.index()]
            .iter()
            .flat_map(|by_kind| by_kind.iter().map(|(code, sq)| (*code, *sq)))
    }

    #[must_use]
    pub fn piece_count(&self, color: Color) -> usize {
        self.index[color.index()].iter().map(BTreeMap::len).sum()
    }

    /// Square of a color's king.
    ///
    /// # Panics
    /// Panics if the color has no king; positions are validated on entry and
    /// kings are never captured, so this is an engine bug.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color, PieceKind::King)
            .next()
            .map(|(_, sq)| sq)
            .expect("board without a king")
    }

    /// Put a piece on an empty square.
    pub(crate) fn place(&mut self, sq: Square, code: PieceCode) {
        let (Some(kind), Some(color)) = (code.kind(), code.color()) else {
            unreachable!("placing the empty code on {sq}");
        };
        assert!(self.is_empty(sq), "placing {code:?} on occupied {sq}");
        self.grid[sq.0][sq.1] = code;
        let previous = self.index[color.index()][kind.index()].insert(code, sq);
        assert!(previous.is_none(), "duplicate piece code {code:?}");
    }

    /// Take the piece off a square, returning its code.
    pub(crate) fn lift(&mut self, sq: Square) -> PieceCode {
        let code = self.piece_at(sq);
        let (Some(kind), Some(color)) = (code.kind(), code.color()) else {
            unreachable!("lifting from empty {sq}");
        };
        self.grid[sq.0][sq.1] = PieceCode::EMPTY;
        let removed = self.index[color.index()][kind.index()].remove(&code);
        assert_eq!(removed, Some(sq), "piece index out of sync for {code:?}");
        code
    }

    /// Relocate the piece on `from` to the empty square `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let code = self.lift(from);
        self.place(to, code);
    }

    /// True when grid and piece index agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let indexed = self.index.iter().flatten().flat_map(|m| m.iter());
        let mut entries = 0;
        for (code, sq) in indexed {
            if self.piece_at(*sq) != *code {
                return false;
            }
            entries += 1;
        }
        let occupied = Square::all().filter(|sq| !self.is_empty(*sq)).count();
        entries == occupied
    }
}
