//! Chess rules engine: position codec, legal move generation and move
//! application, plus the thin game, picker and command layers that sit on
//! top of it.

pub mod board;
pub mod cli;
pub mod game;
pub mod picker;
pub mod sync;

pub use board::{Color, Move, PieceKind, Position, RulesError, Square};
pub use game::Game;
pub use sync::SharedPosition;
