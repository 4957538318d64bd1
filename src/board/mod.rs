//! Board representation and the rules of chess.
//!
//! Positions are an 8x8 grid of tagged [`PieceCode`]s plus an index from
//! each code to its square. Move generation is pseudo-legal and pure; the
//! legality filter tries each candidate on a cloned board.
//!
//! # Example
//! ```
//! use chess_rules::board::{Position, Square};
//!
//! let mut position = Position::new();
//! let e2 = Square(1, 4);
//! assert_eq!(position.legal_destinations(e2).unwrap().to_string(), "e3 e4");
//! position.apply(e2, Square(3, 4)).unwrap();
//! assert_eq!(
//!     position.to_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

pub mod apply;
mod builder;
mod error;
pub mod fen;
pub mod legality;
pub mod movegen;
mod position;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, RulesError, SquareError};
pub use position::Position;
pub use state::{Board, GameState};
pub use types::{
    Bitboard, BitboardIter, CastleSide, CastlingRights, Color, InstanceTag, Move, MoveRecord,
    PieceCode, PieceKind, Square,
};
