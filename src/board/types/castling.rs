//! Castling rights and castling sides.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, InstanceTag};
use super::square::Square;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Which wing a king castles towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    Queenside,
    Kingside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Queenside, CastleSide::Kingside];

    /// Files of (king destination, rook origin, rook destination).
    const fn files(self) -> (usize, usize, usize) {
        match self {
            CastleSide::Queenside => (2, 0, 3),
            CastleSide::Kingside => (6, 7, 5),
        }
    }

    /// King's home square for a color.
    #[must_use]
    pub const fn king_home(color: Color) -> Square {
        Square(color.back_rank(), 4)
    }

    #[must_use]
    pub const fn king_destination(self, color: Color) -> Square {
        Square(color.back_rank(), self.files().0)
    }

    #[must_use]
    pub const fn rook_origin(self, color: Color) -> Square {
        Square(color.back_rank(), self.files().1)
    }

    #[must_use]
    pub const fn rook_destination(self, color: Color) -> Square {
        Square(color.back_rank(), self.files().2)
    }

    /// Instance tag of the rook that castles on this side.
    #[must_use]
    pub const fn rook_tag(self) -> InstanceTag {
        match self {
            CastleSide::Queenside => InstanceTag::Queenside,
            CastleSide::Kingside => InstanceTag::Kingside,
        }
    }

    /// The side a rook instance castles on, if it is one of the castling rooks.
    #[must_use]
    pub const fn for_rook_tag(tag: InstanceTag) -> Option<CastleSide> {
        match tag {
            InstanceTag::Queenside => Some(CastleSide::Queenside),
            InstanceTag::Kingside => Some(CastleSide::Kingside),
            _ => None,
        }
    }

    /// Recognize a king move from its home square as a castling move.
    #[must_use]
    pub fn from_king_move(color: Color, from: Square, to: Square) -> Option<CastleSide> {
        if from != Self::king_home(color) {
            return None;
        }
        Self::BOTH
            .into_iter()
            .find(|side| side.king_destination(color) == to)
    }

    /// Squares strictly between the king and the rook.
    pub fn between(self, color: Color) -> impl Iterator<Item = Square> {
        let rank = color.back_rank();
        let range = match self {
            CastleSide::Queenside => 1..4,
            CastleSide::Kingside => 5..7,
        };
        range.map(move |file| Square(rank, file))
    }

    /// Squares the king stands on or crosses: start, transit, destination.
    #[must_use]
    pub const fn king_path(self, color: Color) -> [Square; 3] {
        let rank = color.back_rank();
        match self {
            CastleSide::Queenside => [Square(rank, 4), Square(rank, 3), Square(rank, 2)],
            CastleSide::Kingside => [Square(rank, 4), Square(rank, 5), Square(rank, 6)],
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Queenside => write!(f, "O-O-O"),
            CastleSide::Kingside => write!(f, "O-O"),
        }
    }
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit_for(color, side) != 0
    }

    /// The (queenside, kingside) pair for one color.
    #[inline]
    #[must_use]
    pub const fn pair(self, color: Color) -> (bool, bool) {
        (
            self.has(color, CastleSide::Queenside),
            self.has(color, CastleSide::Kingside),
        )
    }

    /// Set a specific castling right. Only the codec and builders grant rights.
    #[inline]
    pub(crate) fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit_for(color, side);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit_for(color, side);
    }

    /// Remove both rights of a color
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        for side in CastleSide::BOTH {
            self.remove(color, side);
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw bitmask value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => CASTLE_WHITE_K,
            (Color::White, CastleSide::Queenside) => CASTLE_WHITE_Q,
            (Color::Black, CastleSide::Kingside) => CASTLE_BLACK_K,
            (Color::Black, CastleSide::Queenside) => CASTLE_BLACK_Q,
        }
    }
}

impl fmt::Display for CastlingRights {
    /// `KQkq` subset in that order, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
