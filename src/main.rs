use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
#[cfg(feature = "logging")]
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_rules::cli::{parse_command, Reply, Session};
use chess_rules::{Color, Game};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AutoSide {
    White,
    Black,
    Both,
}

impl AutoSide {
    fn plays(self, color: Color) -> bool {
        matches!(
            (self, color),
            (AutoSide::Both, _) | (AutoSide::White, Color::White) | (AutoSide::Black, Color::Black)
        )
    }
}

#[derive(Parser)]
#[command(name = "chess_rules")]
#[command(about = "Play chess from the terminal with full rules checking")]
struct Args {
    /// Starting position string (defaults to the standard start)
    #[arg(short, long)]
    fen: Option<String>,

    /// Let the random picker play this side
    #[arg(short, long, value_enum)]
    auto: Option<AutoSide>,

    /// Seed for the random picker
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many plies have been played
    #[arg(short, long)]
    max_plies: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    env_logger::init();
    let args = Args::parse();

    let game = match args.fen.as_deref() {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(game, rng);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    println!("{}", session.game().position());

    loop {
        let plies = session.game().history().len();
        if args.max_plies.is_some_and(|max| plies >= max) {
            #[cfg(feature = "logging")]
            info!("stopping after {plies} plies");
            break;
        }

        let to_move = session.game().position().side_to_move();
        if args.auto.is_some_and(|side| side.plays(to_move)) {
            match session.play_random()? {
                Some(text) => {
                    println!("{text}");
                    println!("{}", session.game().position());
                }
                None => {
                    println!("{to_move} has no legal moves");
                    break;
                }
            }
            continue;
        }

        print!("{to_move}> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {e}");
                continue;
            }
        };
        match session.execute(command) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => println!("error: {e}"),
        }
    }
    Ok(())
}
