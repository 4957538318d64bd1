//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece rather than parsing position
//! strings. Instance tags are assigned exactly as the codec assigns them.
//!
//! # Example
//! ```
//! use chess_rules::board::{Color, PieceKind, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square(0, 4), Color::White, PieceKind::King)
//!     .piece(Square(7, 4), Color::Black, PieceKind::King)
//!     .piece(Square(1, 0), Color::White, PieceKind::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use super::error::{FenError, RulesError};
use super::fen::{tag_placements, validate_en_passant, validate_placements};
use super::state::{Board, GameState};
use super::{CastleSide, CastlingRights, Color, PieceKind, Position, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Color, PieceKind)>,
    state: GameState,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty builder: White to move, no castling rights.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            state: GameState {
                castling: CastlingRights::none(),
                ..GameState::initial()
            },
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            builder.pieces.push((Square(0, file), Color::White, kind));
            builder.pieces.push((Square(7, file), Color::Black, kind));
            builder.pieces.push((Square(1, file), Color::White, PieceKind::Pawn));
            builder.pieces.push((Square(6, file), Color::Black, PieceKind::Pawn));
        }

        builder.state.castling = CastlingRights::all();
        builder
    }

    /// Place a piece, replacing whatever stood on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self.pieces.push((square, color, kind));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.state.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.state.castling = rights;
        self
    }

    /// Grant one castling right.
    #[must_use]
    pub fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.state.castling.set(color, side);
        self
    }

    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.state.en_passant = Some(target);
        self
    }

    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.state.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.state.fullmove_number = number;
        self
    }

    /// Build the position.
    ///
    /// Pieces are tagged in the codec's encounter order (rank 8 to rank 1,
    /// file a to h), whatever order they were added in.
    ///
    /// # Errors
    /// `MalformedPosition` when a color does not have exactly one king, a
    /// pawn stands on a back rank, too many pieces share a color, the
    /// en-passant target does not follow a pawn double-step, or the full-move
    /// number is zero.
    pub fn build(mut self) -> Result<Position, RulesError> {
        if self.state.fullmove_number == 0 {
            return Err(FenError::InvalidFullmoveNumber {
                found: "0".to_string(),
            }
            .into());
        }

        self.pieces
            .sort_by_key(|(sq, _, _)| (std::cmp::Reverse(sq.rank()), sq.file()));
        let placements: Vec<(Square, PieceKind, Color)> = self
            .pieces
            .iter()
            .map(|&(sq, color, kind)| (sq, kind, color))
            .collect();
        validate_placements(&placements)?;
        let codes = tag_placements(&placements)?;

        let mut board = Board::empty();
        for (&(sq, _, _), code) in placements.iter().zip(codes) {
            board.place(sq, code);
        }
        validate_en_passant(&board, &self.state)?;
        Ok(Position::from_parts(board, self.state))
    }
}
