//! Piece, color and packed piece-code types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in index order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, queen first
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Value stored in the kind bits of a `PieceCode` (0 is reserved for empty)
    #[inline]
    const fn bits(self) -> u16 {
        self.index() as u16 + 1
    }

    #[inline]
    const fn from_bits(bits: u16) -> Option<PieceKind> {
        match bits {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Parse a piece kind from a character, ignoring case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Convert piece kind to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Convert piece kind to character with case based on color (uppercase for White)
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let c = self.to_char();
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Pawn forward direction (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_direction(self) -> isize {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Pawn starting rank (1 for White, 6 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Pawn promotion rank (7 for White, 0 for Black)
    #[inline]
    #[must_use]
    pub const fn promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    const fn bits(self) -> u16 {
        match self {
            Color::White => 0b01,
            Color::Black => 0b10,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Disambiguates same-kind, same-color pieces.
///
/// Tags are handed out when a position is parsed or built and never change
/// afterwards; promotion keeps the pawn's tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InstanceTag {
    /// The only king, or the first queen.
    Sole,
    /// First rook/knight/bishop; for rooks, the one that castles queenside.
    Queenside,
    /// Second rook/knight/bishop; for rooks, the one that castles kingside.
    Kingside,
    /// Pawn tagged by file letter (0 = a .. 7 = h).
    File(u8),
    /// Any piece beyond the slots above, numbered per color.
    Extra(u8),
}

impl InstanceTag {
    /// Largest `Extra` index that fits in the tag bits.
    pub const MAX_EXTRA: u8 = 116;

    const fn bits(self) -> u16 {
        match self {
            InstanceTag::Sole => 0,
            InstanceTag::Queenside => 1,
            InstanceTag::Kingside => 2,
            InstanceTag::File(f) => 3 + f as u16,
            InstanceTag::Extra(n) => 11 + n as u16,
        }
    }

    const fn from_bits(bits: u16) -> InstanceTag {
        match bits {
            0 => InstanceTag::Sole,
            1 => InstanceTag::Queenside,
            2 => InstanceTag::Kingside,
            3..=10 => InstanceTag::File((bits - 3) as u8),
            _ => InstanceTag::Extra((bits - 11) as u8),
        }
    }
}

impl fmt::Display for InstanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceTag::Sole => write!(f, "sole"),
            InstanceTag::Queenside => write!(f, "queenside"),
            InstanceTag::Kingside => write!(f, "kingside"),
            InstanceTag::File(file) => write!(f, "{}-pawn", (b'a' + file) as char),
            InstanceTag::Extra(n) => write!(f, "extra#{n}"),
        }
    }
}

const KIND_MASK: u16 = 0b111;
const COLOR_SHIFT: u16 = 3;
const COLOR_MASK: u16 = 0b11 << COLOR_SHIFT;
const TAG_SHIFT: u16 = 5;
const TAG_MASK: u16 = 0b111_1111 << TAG_SHIFT;

/// Packed (kind, instance tag, color) value.
///
/// Layout:
/// - bits 0-2:  kind (0 = empty square)
/// - bits 3-4:  color (0b01 white, 0b10 black)
/// - bits 5-11: instance tag
///
/// `PieceCode::EMPTY` carries neither color nor tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceCode(u16);

impl PieceCode {
    pub const EMPTY: PieceCode = PieceCode(0);

    #[inline]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color, tag: InstanceTag) -> Self {
        PieceCode(kind.bits() | (color.bits() << COLOR_SHIFT) | (tag.bits() << TAG_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 & KIND_MASK == 0
    }

    /// Piece kind, `None` for the empty sentinel
    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_bits(self.0 & KIND_MASK)
    }

    /// Piece color, `None` for the empty sentinel
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match (self.0 & COLOR_MASK) >> COLOR_SHIFT {
            0b01 => Some(Color::White),
            0b10 => Some(Color::Black),
            _ => None,
        }
    }

    /// Instance tag, `None` for the empty sentinel
    #[inline]
    #[must_use]
    pub const fn tag(self) -> Option<InstanceTag> {
        if self.is_empty() {
            None
        } else {
            Some(InstanceTag::from_bits((self.0 & TAG_MASK) >> TAG_SHIFT))
        }
    }

    /// Same color and tag, different kind. Used for promotion.
    #[inline]
    #[must_use]
    pub const fn with_kind(self, kind: PieceKind) -> Self {
        PieceCode((self.0 & !KIND_MASK) | kind.bits())
    }

    #[inline]
    #[must_use]
    pub fn is_kind(self, kind: PieceKind) -> bool {
        self.kind() == Some(kind)
    }

    #[inline]
    #[must_use]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Raw packed value
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Position-string character (uppercase for White), `None` when empty
    #[must_use]
    pub fn to_fen_char(self) -> Option<char> {
        Some(self.kind()?.to_fen_char(self.color()?))
    }
}

impl fmt::Debug for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.color(), self.tag()) {
            (Some(kind), Some(color), Some(tag)) => {
                write!(f, "PieceCode({color} {kind:?} {tag})")
            }
            _ => write!(f, "PieceCode(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_fields() {
        let empty = PieceCode::EMPTY;
        assert!(empty.is_empty());
        assert_eq!(empty.kind(), None);
        assert_eq!(empty.color(), None);
        assert_eq!(empty.tag(), None);
        assert_eq!(empty.to_fen_char(), None);
    }

    #[test]
    fn test_fields_are_independent() {
        let code = PieceCode::new(PieceKind::Rook, Color::Black, InstanceTag::Kingside);
        assert_eq!(code.kind(), Some(PieceKind::Rook));
        assert_eq!(code.color(), Some(Color::Black));
        assert_eq!(code.tag(), Some(InstanceTag::Kingside));
        assert_eq!(code.to_fen_char(), Some('r'));
    }

    #[test]
    fn test_tags_unpack_at_their_limits() {
        for tag in [
            InstanceTag::Sole,
            InstanceTag::File(0),
            InstanceTag::File(7),
            InstanceTag::Extra(0),
            InstanceTag::Extra(InstanceTag::MAX_EXTRA),
        ] {
            let code = PieceCode::new(PieceKind::Pawn, Color::White, tag);
            assert_eq!(code.tag(), Some(tag));
            assert_eq!(code.color(), Some(Color::White));
        }
    }

    #[test]
    fn test_with_kind_keeps_color_and_tag() {
        let pawn = PieceCode::new(PieceKind::Pawn, Color::White, InstanceTag::File(4));
        let queen = pawn.with_kind(PieceKind::Queen);
        assert_eq!(queen.kind(), Some(PieceKind::Queen));
        assert_eq!(queen.color(), Some(Color::White));
        assert_eq!(queen.tag(), Some(InstanceTag::File(4)));
        assert_ne!(pawn, queen);
    }

    #[test]
    fn test_same_kind_different_tag_differs() {
        let a = PieceCode::new(PieceKind::Rook, Color::White, InstanceTag::Queenside);
        let h = PieceCode::new(PieceKind::Rook, Color::White, InstanceTag::Kingside);
        assert_ne!(a, h);
    }
}
