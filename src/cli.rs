//! Command-line interface for fillshape.

use clap::{Args, Parser, Subcommand};
use fillshape::{PlayerKind, Variant};
use std::path::PathBuf;

/// Fillshape - shape-driven placement games
#[derive(Parser, Debug)]
#[command(name = "fillshape")]
#[command(about = "Play and simulate shape-driven placement games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which game to play.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Built-in variant (ttt or ttt_4)
    #[arg(long, default_value = "ttt")]
    pub variant: Variant,

    /// TOML game config; overrides --variant
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Completing a pattern loses instead of wins
    #[arg(long)]
    pub misere: bool,

    /// Seed for the AI's random choices
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on the terminal, entering moves as "row column"
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Who plays first (human or ai)
        #[arg(long, default_value = "human")]
        player1: PlayerKind,

        /// Who plays second (human or ai)
        #[arg(long, default_value = "ai")]
        player2: PlayerKind,

        /// Write the finished game record (JSON) here
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Play AI against AI and report the outcomes
    Simulate {
        #[command(flatten)]
        game: GameArgs,

        /// Number of games
        #[arg(short = 'n', long, default_value = "100")]
        games: u32,
    },

    /// Replay a saved game record
    Replay {
        /// Path to the record
        path: PathBuf,
    },
}
