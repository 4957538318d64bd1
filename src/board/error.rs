//! Error types for rules-engine operations.

use std::fmt;

use super::types::{Color, PieceKind, Square};

/// Structural or symbol problem in a position string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Position string does not have exactly six fields
    WrongFieldCount { found: usize },
    /// Unrecognized character in the placement field
    InvalidPiece { char: char },
    /// Placement does not describe exactly eight ranks
    RankCount { found: usize },
    /// A rank describes more than eight squares (rank index 0 = rank 8)
    RankOverflow { rank: usize },
    /// A rank describes fewer than eight squares
    RankUnderflow { rank: usize, files: usize },
    /// A color does not have exactly one king
    KingCount { color: Color, found: usize },
    /// A pawn stands on rank 1 or rank 8
    PawnOnBackRank { square: Square },
    /// Too many pieces of one color to tag uniquely
    TooManyPieces { color: Color },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid or repeated castling character
    InvalidCastling { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Half-move clock is not a non-negative integer
    InvalidHalfmoveClock { found: String },
    /// Full-move number is not a positive integer
    InvalidFullmoveNumber { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "position must have exactly 6 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in placement")
            }
            FenError::RankCount { found } => {
                write!(f, "placement must have 8 ranks, found {found}")
            }
            FenError::RankOverflow { rank } => {
                write!(f, "rank {} overruns the board", 8 - rank)
            }
            FenError::RankUnderflow { rank, files } => {
                write!(f, "rank {} describes only {files} squares", 8 - rank)
            }
            FenError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            FenError::PawnOnBackRank { square } => {
                write!(f, "pawn on {square} cannot stand on a back rank")
            }
            FenError::TooManyPieces { color } => {
                write!(f, "too many {color} pieces to tag")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { found } => {
                write!(f, "invalid castling field '{found}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "invalid half-move clock '{found}'")
            }
            FenError::InvalidFullmoveNumber { found } => {
                write!(f, "invalid full-move number '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for coordinate move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Failures surfaced by the collaborator-facing rules API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The position string failed structural or symbol validation
    MalformedPosition(FenError),
    /// The (start, end) pair is not among the piece's legal destinations
    IllegalMove { from: Square, to: Square },
    /// No piece stands on the queried square
    EmptySquare { square: Square },
    /// The piece on the square does not belong to the side to move
    WrongSide { square: Square, to_move: Color },
    /// A castling king could not be paired with its rook
    InvalidCastleSide { king: Square, to: Square },
    /// A pawn on its last rank still awaits its promotion choice
    PromotionPending { square: Square },
    /// The kind cannot be promoted to, or no promotion was due
    InvalidPromotion { kind: PieceKind },
    /// The square does not hold a pawn on its last rank
    NotPromotable { square: Square },
    /// A pawn move to the last rank was requested without a promotion kind
    MissingPromotion { from: Square, to: Square },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::MalformedPosition(e) => write!(f, "malformed position: {e}"),
            RulesError::IllegalMove { from, to } => write!(f, "illegal move {from}{to}"),
            RulesError::EmptySquare { square } => write!(f, "no piece on {square}"),
            RulesError::WrongSide { square, to_move } => {
                write!(f, "piece on {square} does not belong to {to_move}, who is to move")
            }
            RulesError::InvalidCastleSide { king, to } => {
                write!(f, "no castling rook pairs with king move {king}{to}")
            }
            RulesError::PromotionPending { square } => {
                write!(f, "pawn on {square} must be promoted first")
            }
            RulesError::InvalidPromotion { kind } => {
                write!(f, "cannot promote to {kind:?} here")
            }
            RulesError::NotPromotable { square } => {
                write!(f, "no pawn awaiting promotion on {square}")
            }
            RulesError::MissingPromotion { from, to } => {
                write!(f, "{from}{to} promotes; choose q, r, b or n")
            }
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RulesError::MalformedPosition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FenError> for RulesError {
    fn from(e: FenError) -> Self {
        RulesError::MalformedPosition(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_field_count() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('6'));
    }

    #[test]
    fn test_fen_error_rank_is_reported_as_board_rank() {
        let err = FenError::RankOverflow { rank: 0 };
        assert!(err.to_string().contains("rank 8"));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_rules_error_wraps_fen_error() {
        let err: RulesError = FenError::InvalidPiece { char: 'x' }.into();
        assert!(matches!(err, RulesError::MalformedPosition(_)));
        assert!(err.to_string().contains("'x'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rules_error_illegal_move() {
        let err = RulesError::IllegalMove {
            from: Square(1, 4),
            to: Square(4, 4),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_move_error_invalid_length() {
        let err = MoveParseError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
    }
}
