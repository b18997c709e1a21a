//! Fillshape - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use fillshape::{GameConfig, GameRecord, GameState, PlayerKind, Session};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            game,
            player1,
            player2,
            save,
        } => run_play(game, player1, player2, save),
        Command::Simulate { game, games } => run_simulate(game, games),
        Command::Replay { path } => run_replay(path),
    }
}

/// Resolves the game configuration from a file or a built-in variant.
#[instrument]
fn load_config(game: &GameArgs) -> Result<GameConfig> {
    let config = match &game.config {
        Some(path) => GameConfig::from_file(path)?,
        None => game.variant.config(),
    };
    Ok(if game.misere { config.with_misere(true) } else { config })
}

/// Prints the final state and the cells of the deciding pattern.
fn print_outcome(engine: &fillshape::GameEngine) {
    println!("{}\n", engine.board());
    match engine.state() {
        GameState::InProgress => println!("Game abandoned"),
        GameState::Draw => println!("Draw!"),
        GameState::Won(player) => {
            println!("{player} wins!");
            if let Some(condition) = engine.terminating_condition() {
                let cells: Vec<String> =
                    condition.cells().iter().map(ToString::to_string).collect();
                println!("Pattern: {}", cells.join(" "));
            }
        }
    }
}

/// Run an interactive game on stdin/stdout
fn run_play(
    game: GameArgs,
    player1: PlayerKind,
    player2: PlayerKind,
    save: Option<std::path::PathBuf>,
) -> Result<()> {
    let config = load_config(&game)?;
    let mut session = Session::new(config, player1, player2, game.seed)?;
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.engine().state().is_terminal() {
        if session.ai_to_move() {
            if let Some(report) = session.step_ai()? {
                println!("AI plays {}", report.applied);
            }
            continue;
        }

        println!("{}\n", session.engine().board());
        print!("Player to move: {} > ", session.engine().piece_to_move());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line == "q" || line == "quit" {
            break;
        }

        let coords = match line
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(coords) => coords,
            Err(_) => {
                println!("Enter a move as \"row column\"");
                continue;
            }
        };
        let &[row, column] = coords.as_slice() else {
            println!("Enter a move as \"row column\"");
            continue;
        };
        if let Err(e) = session.play_human(row, column) {
            warn!(error = %e, "Move rejected");
            println!("{e}");
        }
    }

    print_outcome(session.engine());

    if let Some(path) = save {
        session.record().save(&path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Play AI against AI and tally the outcomes
fn run_simulate(game: GameArgs, games: u32) -> Result<()> {
    let config = load_config(&game)?;
    let mut tally: BTreeMap<String, u32> = BTreeMap::new();

    for i in 0..games {
        let seed = game.seed.map(|s| s.wrapping_add(u64::from(i)));
        let mut session = Session::new(config.clone(), PlayerKind::Ai, PlayerKind::Ai, seed)?;
        session.run_ai()?;
        let state = session.engine().state();
        if !state.is_terminal() {
            bail!("Simulated game {} stopped before the end", i + 1);
        }
        *tally.entry(state.to_string()).or_default() += 1;
    }

    info!(games, "Simulation complete");
    for (outcome, count) in &tally {
        println!("{outcome}: {count}");
    }
    Ok(())
}

/// Replay a saved record and show the result
fn run_replay(path: std::path::PathBuf) -> Result<()> {
    let record = GameRecord::load(&path)?;
    let engine = record
        .replay()
        .with_context(|| format!("Replaying {}", path.display()))?;
    for (turn, played) in engine.moves().iter().enumerate() {
        println!("{:>3}. {}", turn + 1, played);
    }
    print_outcome(&engine);
    Ok(())
}
