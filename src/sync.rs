//! Shared access to one position across threads.
//!
//! Any number of readers may query legality at once; applying a move takes
//! the write lock, so it never interleaves with an in-flight query on the
//! same position.

use std::sync::Arc;

#[cfg(feature = "logging")]
use log::warn;
use parking_lot::RwLock;

use crate::board::{Bitboard, Color, MoveRecord, PieceKind, Position, RulesError, Square};

/// A cloneable handle to a position guarded by a reader-writer lock.
#[derive(Clone, Debug, Default)]
pub struct SharedPosition(Arc<RwLock<Position>>);

impl SharedPosition {
    #[must_use]
    pub fn new(position: Position) -> Self {
        SharedPosition(Arc::new(RwLock::new(position)))
    }

    /// Copy of the current position.
    #[must_use]
    pub fn snapshot(&self) -> Position {
        self.0.read().clone()
    }

    /// Run a read-only query under the read lock.
    pub fn read<T>(&self, f: impl FnOnce(&Position) -> T) -> T {
        f(&self.0.read())
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        self.0.read().to_fen()
    }

    /// # Errors
    /// See [`Position::legal_destinations`].
    pub fn legal_destinations(&self, sq: Square) -> Result<Bitboard, RulesError> {
        self.0.read().legal_destinations(sq)
    }

    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.0.read().is_square_attacked(sq, by)
    }

    /// Apply a move under the write lock.
    ///
    /// # Errors
    /// See [`Position::apply`].
    pub fn apply(&self, from: Square, to: Square) -> Result<MoveRecord, RulesError> {
        let result = self.0.write().apply(from, to);
        #[cfg(feature = "logging")]
        if let Err(e) = &result {
            warn!("shared position refused {from}{to}: {e}");
        }
        result
    }

    /// # Errors
    /// See [`Position::promote`].
    pub fn promote(&self, sq: Square, kind: PieceKind) -> Result<(), RulesError> {
        let result = self.0.write().promote(sq, kind).map(|_| ());
        #[cfg(feature = "logging")]
        if let Err(e) = &result {
            warn!("shared position refused promotion on {sq}: {e}");
        }
        result
    }
}

impl From<Position> for SharedPosition {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedPosition::new(Position::new());
        let other = shared.clone();
        shared.apply(Square(1, 4), Square(3, 4)).unwrap();
        assert_eq!(other.read(Position::side_to_move), Color::Black);
    }

    #[test]
    fn test_concurrent_queries_see_consistent_state() {
        let shared = SharedPosition::new(Position::new());
        let handles: Vec<_> = (0..4)
            .map(|file| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .legal_destinations(Square(1, file))
                        .map(|dests| dests.popcount())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(2));
        }
        assert_eq!(shared.to_fen(), crate::board::fen::START_FEN);
    }

    #[test]
    fn test_refused_move_keeps_position() {
        let shared = SharedPosition::from(Position::new());
        let before = shared.snapshot();
        assert!(shared.apply(Square(0, 4), Square(1, 4)).is_err());
        assert_eq!(shared.snapshot(), before);
    }
}
