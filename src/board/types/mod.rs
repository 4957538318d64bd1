//! Core chess types.
//!
//! This module contains the value types shared by every rules component:
//! - `PieceKind`, `Color`, `InstanceTag` and the packed `PieceCode`
//! - `Square` - (rank, file) board coordinate
//! - `Bitboard` - a set of squares
//! - `CastlingRights` and `CastleSide`
//! - `Move` and `MoveRecord`

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{CastleSide, CastlingRights};
pub use moves::{Move, MoveRecord};
pub use piece::{Color, InstanceTag, PieceCode, PieceKind};
pub use square::Square;
