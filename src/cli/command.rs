use crate::board::{Color, Move, Square};

use super::CliError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Coordinate move such as `e2e4` or `e7e8q`
    Play(Move),
    /// Legal moves of the side to move, or of the piece on one square
    Moves(Option<Square>),
    Fen,
    Board,
    Undo,
    Random,
    Attacked { square: Square, by: Color },
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. `Ok(None)` for a blank line.
///
/// # Errors
/// `CliError` when a known command has a missing or malformed argument, or
/// a move-shaped word fails to parse.
pub fn parse_command(line: &str) -> Result<Option<Command>, CliError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Ok(None);
    };
    let arg = |command: &'static str| {
        parts
            .get(1)
            .copied()
            .ok_or(CliError::MissingArgument { command })
    };

    let cmd = match head {
        "moves" => match parts.get(1) {
            Some(sq) => Command::Moves(Some(sq.parse()?)),
            None => Command::Moves(None),
        },
        "fen" => Command::Fen,
        "board" | "d" => Command::Board,
        "undo" => Command::Undo,
        "random" => Command::Random,
        "attacked" => {
            let square = arg("attacked")?.parse()?;
            let by = match parts.get(2).copied() {
                Some("w" | "white") => Color::White,
                Some("b" | "black") => Color::Black,
                Some(other) => {
                    return Err(CliError::InvalidColor {
                        found: other.to_string(),
                    })
                }
                None => return Err(CliError::MissingArgument { command: "attacked" }),
            };
            Command::Attacked { square, by }
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        word if looks_like_move(word) => Command::Play(word.parse()?),
        _ => Command::Unknown(line.trim().to_string()),
    };
    Ok(Some(cmd))
}

/// Starts with a square name and is move-length.
fn looks_like_move(word: &str) -> bool {
    let bytes = word.as_bytes();
    (4..=5).contains(&bytes.len())
        && (b'a'..=b'h').contains(&bytes[0])
        && bytes[1].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_moves_and_promotion() {
        assert_eq!(
            parse_command("e2e4"),
            Ok(Some(Command::Play(Move::new(Square(1, 4), Square(3, 4)))))
        );
        assert!(matches!(
            parse_command("e7e8x"),
            Err(CliError::InvalidMove(_))
        ));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_command("fen"), Ok(Some(Command::Fen)));
        assert_eq!(parse_command(" quit "), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_command("moves g1"),
            Ok(Some(Command::Moves(Some(Square(0, 6)))))
        );
        assert_eq!(parse_command("moves"), Ok(Some(Command::Moves(None))));
    }

    #[test]
    fn test_attacked_arguments() {
        assert_eq!(
            parse_command("attacked f3 b"),
            Ok(Some(Command::Attacked {
                square: Square(2, 5),
                by: Color::Black
            }))
        );
        assert_eq!(
            parse_command("attacked f3"),
            Err(CliError::MissingArgument { command: "attacked" })
        );
        assert!(matches!(
            parse_command("attacked f3 green"),
            Err(CliError::InvalidColor { .. })
        ));
        assert!(matches!(
            parse_command("attacked z3 w"),
            Err(CliError::InvalidSquare(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("castle please"),
            Ok(Some(Command::Unknown("castle please".to_string())))
        );
    }
}
