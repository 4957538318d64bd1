//! Move requests and move records.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::castling::CastleSide;
use super::piece::{PieceCode, PieceKind};
use super::square::Square;
use crate::board::error::MoveParseError;

/// A (start, end) pair plus the promotion choice, if any.
///
/// Written and parsed in coordinate notation: `e2e4`, `e7e8q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: s.chars().count(),
            });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: s.to_string(),
        };
        let from: Square = s[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// What one successful move application did.
///
/// Produced by the move applier, never mutated afterwards. The position
/// strings make records suitable for history display and undo-by-replay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece that moved, as it was before any promotion.
    pub piece: PieceCode,
    pub captured: Option<PieceCode>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    pub promotion: Option<PieceKind>,
    pub fen_before: String,
    /// After a move still awaiting promotion this holds the pawn on its last
    /// rank and does not parse back into a position.
    pub fen_after: String,
}

impl MoveRecord {
    #[must_use]
    pub fn as_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.castle {
            Some(side) => write!(f, "{side}"),
            None => write!(f, "{}", self.as_move()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_move() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv, Move::new(Square(1, 4), Square(3, 4)));
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_parse_promotion() {
        let mv: Move = "a7a8n".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(mv.to_string(), "a7a8n");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "e2".parse::<Move>(),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            "z9e4".parse::<Move>(),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            "e7e8k".parse::<Move>(),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        ));
        assert!(matches!(
            "e7e8x".parse::<Move>(),
            Err(MoveParseError::InvalidPromotion { char: 'x' })
        ));
    }
}
