//! Command line harness for the rules engine.
//!
//! Usage: cargo run --release -- play e2e4 e7e5 g1f3
//!        cargo run --release -- moves --fen "r3k2r/8/8/8/8/8/8/R3K2R w KQkq" e1
//!        cargo run --release -- perft --depth 4 --parallel

use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use rust_chess_rules::board::STARTING_POSITION_FEN;
use rust_chess_rules::perft::{divide, run_perft_parallel, run_perft_test};
use rust_chess_rules::{Color, Game, Move, Position, Square};

#[derive(Parser, Debug)]
#[command(name = "rust_chess_rules")]
#[command(about = "Query and play positions with the chess rules engine")]
struct Args {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the legal destinations of the piece on a square
    Moves {
        /// Position to inspect
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Square in algebraic notation, e.g. e2
        square: String,
    },

    /// Show the side to move and whether it is in check, mated or stalemated
    Status {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },

    /// Play coordinate moves (e2e4) from the initial position
    Play {
        moves: Vec<String>,
    },

    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Split the root moves across threads
        #[arg(long)]
        parallel: bool,

        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Command::Moves { fen, square } => show_moves(&fen, &square),
        Command::Status { fen } => show_status(&fen),
        Command::Play { moves } => play(&moves),
        Command::Perft {
            depth,
            fen,
            parallel,
            divide,
        } => perft(&fen, depth, parallel, divide),
    }
}

fn parse_position(fen: &str) -> Result<Position> {
    Position::from_fen(fen).wrap_err_with(|| format!("could not read position `{fen}`"))
}

fn show_moves(fen: &str, square: &str) -> Result<()> {
    let position = parse_position(fen)?;
    let from = Square::from_algebraic(square)?;
    let piece = position
        .board()
        .piece_at(from)
        .ok_or_else(|| eyre!("no piece on {from}"))?;

    let mut moves: Vec<String> = position
        .legal_moves(from)
        .iter()
        .map(|s| s.to_algebraic())
        .collect();
    moves.sort();

    println!(
        "{} {} on {from}: {}",
        piece.color.to_human(),
        piece.piece_type.to_human(),
        if moves.is_empty() {
            "no legal moves".to_string()
        } else {
            moves.join(" ")
        }
    );
    Ok(())
}

fn show_status(fen: &str) -> Result<()> {
    let position = parse_position(fen)?;
    println!("{position}");
    println!("{}", position.evaluate().to_human());
    Ok(())
}

fn play(moves: &[String]) -> Result<()> {
    let mut game = Game::new();
    println!("{}\n", game.position());

    for text in moves {
        let mv = Move::from_coordinate(text)?;
        let report = game
            .play_move(mv)
            .wrap_err_with(|| format!("after {} moves", game.history().len()))?;

        let capture = report
            .captured
            .map(|pt| format!(" capturing a {}", pt.to_human()))
            .unwrap_or_default();
        println!("{} plays {}{}", report.mover.to_human(), report.mv, capture);
        println!("{}\n", game.position());
        println!(
            "score: white {} - black {} ({})\n",
            game.score(Color::White),
            game.score(Color::Black),
            report.verdict.to_human()
        );
    }

    if !game.history().is_empty() {
        println!("{}", game.to_move_list());
    }
    Ok(())
}

fn perft(fen: &str, depth: u8, parallel: bool, show_divide: bool) -> Result<()> {
    let position = parse_position(fen)?;
    let now = Instant::now();

    let nodes = if show_divide {
        let counts = divide(&position, depth);
        for (mv, count) in &counts {
            println!("{mv}: {count}");
        }
        counts.iter().map(|(_, count)| count).sum()
    } else if parallel {
        run_perft_parallel(&position, depth)
    } else {
        run_perft_test(&position, depth)
    };

    let elapsed = now.elapsed().as_secs_f32();
    println!("depth {depth}: {nodes} nodes ({elapsed:.3}s)");
    Ok(())
}
