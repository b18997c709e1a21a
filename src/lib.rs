//! Fillshape - shape-driven placement games.
//!
//! The engine itself lives in [`fillshape_core`]; this crate adds what a
//! playable game needs around it.
//!
//! # Architecture
//!
//! - **Config**: board size, shapes and scoring mode, from TOML or a built-in variant
//! - **Opponent**: automated player driven by a pluggable position evaluator
//! - **Record**: JSON game records that replay into an equivalent engine
//! - **Session**: one engine with a human or AI in each seat
//!
//! # Example
//!
//! ```
//! use fillshape::{PlayerKind, Session, Variant};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Variant::TicTacToe.config();
//! let mut session = Session::new(config, PlayerKind::Ai, PlayerKind::Ai, Some(7))?;
//! session.run_ai()?;
//! assert!(session.engine().state().is_terminal());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod opponent;
mod record;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, ShapeSpec, Variant};

// Crate-level exports - Automated opponent
pub use opponent::{
    AiPlayer, DEFAULT_EPSILON, NeutralEvaluator, OpponentError, PositionEvaluator,
};

// Crate-level exports - Records
pub use record::{GameRecord, RecordError};

// Crate-level exports - Sessions
pub use session::{PlayerKind, Session, SessionError};

// Crate-level exports - Engine types
pub use fillshape_core::{
    Board, Coord, EndCondition, EndConditionId, GameEngine, GameState, Move, MoveError,
    MoveReport, Player, ShapeTemplate,
};
