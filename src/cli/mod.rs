//! Text command loop support: parsing input lines and carrying them out
//! against a [`Game`].

use std::fmt;

use rand::Rng;

use crate::board::{MoveParseError, MoveRecord, RulesError, SquareError};
use crate::game::Game;
use crate::picker::random_legal_move;

pub mod command;

pub use command::{parse_command, Command};

pub const HELP: &str = "\
commands:
  <from><to>[q|r|b|n]   play a move, e.g. e2e4 or e7e8q
  moves [square]        list legal moves, optionally for one piece
  fen                   print the position string
  board                 print the board
  undo                  take back the last move
  random                play a random legal move
  attacked <sq> <w|b>   is the square attacked by that color
  help                  show this text
  quit                  leave";

/// Failures while reading or executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A command was given without a required argument
    MissingArgument { command: &'static str },
    InvalidSquare(SquareError),
    InvalidMove(MoveParseError),
    /// Color argument other than w/white/b/black
    InvalidColor { found: String },
    /// The rules engine refused the request
    Rules(RulesError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingArgument { command } => {
                write!(f, "'{command}' needs more arguments, try 'help'")
            }
            CliError::InvalidSquare(e) => write!(f, "{e}"),
            CliError::InvalidMove(e) => write!(f, "{e}"),
            CliError::InvalidColor { found } => {
                write!(f, "invalid color '{found}', expected w or b")
            }
            CliError::Rules(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidSquare(e) => Some(e),
            CliError::InvalidMove(e) => Some(e),
            CliError::Rules(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SquareError> for CliError {
    fn from(e: SquareError) -> Self {
        CliError::InvalidSquare(e)
    }
}

impl From<MoveParseError> for CliError {
    fn from(e: MoveParseError) -> Self {
        CliError::InvalidMove(e)
    }
}

impl From<RulesError> for CliError {
    fn from(e: RulesError) -> Self {
        CliError::Rules(e)
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// A game driven by text commands.
pub struct Session<R> {
    game: Game,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(game: Game, rng: R) -> Self {
        Session { game, rng }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Carry out one command.
    ///
    /// # Errors
    /// `CliError::Rules` when the engine refuses the move or query.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CliError> {
        let text = match command {
            Command::Play(mv) => {
                let record = self.game.play(mv)?;
                describe(record)
            }
            Command::Moves(Some(sq)) => {
                let dests = self.game.position().legal_destinations(sq)?;
                format!("{sq}: {dests}")
            }
            Command::Moves(None) => {
                let moves: Vec<String> = self
                    .game
                    .position()
                    .legal_moves()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                moves.join(" ")
            }
            Command::Fen => self.game.position().to_fen(),
            Command::Board => self.game.position().to_string(),
            Command::Undo => match self.game.undo()? {
                Some(record) => format!("took back {record}"),
                None => "nothing to undo".to_string(),
            },
            Command::Random => match self.play_random()? {
                Some(text) => text,
                None => format!("{} has no legal moves", self.game.position().side_to_move()),
            },
            Command::Attacked { square, by } => {
                let verdict = if self.game.position().is_square_attacked(square, by) {
                    "is"
                } else {
                    "is not"
                };
                format!("{square} {verdict} attacked by {by}")
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
            Command::Unknown(input) => format!("unknown command '{input}', try 'help'"),
        };
        Ok(Reply::Text(text))
    }

    /// Play a random legal move; `Ok(None)` when there is none.
    ///
    /// # Errors
    /// Only if the engine refuses a move it generated itself.
    pub fn play_random(&mut self) -> Result<Option<String>, CliError> {
        let Some(mv) = random_legal_move(self.game.position(), &mut self.rng) else {
            return Ok(None);
        };
        let record = self.game.play(mv)?;
        Ok(Some(describe(record)))
    }
}

fn describe(record: &MoveRecord) -> String {
    let mut text = format!("played {record}");
    if let Some(captured) = record.captured.and_then(|c| c.kind()) {
        text.push_str(&format!(" capturing {captured:?}"));
    }
    if record.en_passant {
        text.push_str(" en passant");
    }
    text
}
