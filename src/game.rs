//! A game: the current position plus the records of every move played.

#[cfg(feature = "logging")]
use log::debug;

use crate::board::{Move, MoveRecord, Position, RulesError};

#[derive(Clone, Debug, Default)]
pub struct Game {
    position: Position,
    history: Vec<MoveRecord>,
}

impl Game {
    /// A new game from the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary position.
    ///
    /// # Errors
    /// `MalformedPosition` when the string fails to parse.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Ok(Self::from_position(Position::try_from_fen(fen)?))
    }

    #[must_use]
    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            history: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Records of the moves played so far, oldest first.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Play a move and remember it.
    ///
    /// Pawn moves to the last rank must name their promotion kind; the game
    /// never leaves a promotion pending.
    ///
    /// # Errors
    /// `MissingPromotion` when a promoting move has no kind, otherwise
    /// whatever [`Position::apply_move`] reports.
    pub fn play(&mut self, mv: Move) -> Result<&MoveRecord, RulesError> {
        if mv.promotion.is_none() && self.position.needs_promotion(mv.from, mv.to) {
            return Err(RulesError::MissingPromotion {
                from: mv.from,
                to: mv.to,
            });
        }
        let record = self.position.apply_move(mv)?;
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Take back the last move by restoring the position before it.
    ///
    /// Returns the undone record, or `None` when nothing has been played.
    /// Instance tags are re-derived from the restored position string.
    ///
    /// # Errors
    /// `MalformedPosition` if the recorded string no longer parses, which
    /// would mean the codec and serializer disagree.
    pub fn undo(&mut self) -> Result<Option<MoveRecord>, RulesError> {
        let Some(record) = self.history.pop() else {
            return Ok(None);
        };
        match Position::try_from_fen(&record.fen_before) {
            Ok(position) => {
                self.position = position;
                #[cfg(feature = "logging")]
                debug!("undid {record}");
                Ok(Some(record))
            }
            Err(e) => {
                self.history.push(record);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, Square};

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    #[test]
    fn test_play_and_undo() {
        let mut game = Game::new();
        let start = game.position().to_fen();
        game.play(mv("e2e4")).unwrap();
        game.play(mv("c7c5")).unwrap();
        assert_eq!(game.history().len(), 2);
        assert_eq!(
            game.position().to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );

        let undone = game.undo().unwrap().unwrap();
        assert_eq!(undone.as_move(), mv("c7c5"));
        game.undo().unwrap();
        assert_eq!(game.position().to_fen(), start);
        assert_eq!(game.undo().unwrap(), None);
    }

    #[test]
    fn test_failed_move_is_not_recorded() {
        let mut game = Game::new();
        assert!(game.play(mv("e2e5")).is_err());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_promotion_must_be_named() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            game.play(mv("a7a8")).cloned(),
            Err(RulesError::MissingPromotion {
                from: Square(6, 0),
                to: Square(7, 0)
            })
        );
        let record = game.play(mv("a7a8r")).unwrap();
        assert_eq!(record.promotion, Some(PieceKind::Rook));
        assert_eq!(game.position().pending_promotion(), None);
    }
}
