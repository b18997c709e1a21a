//! Incremental, shape-driven win detection for two-player placement games.
//!
//! A game is a rectangular [`Board`] plus a list of [`ShapeTemplate`]s. The
//! [`GameEngine`] lays every template at every offset where it fits, producing
//! one [`EndCondition`] per placement, and cross-links each condition with the
//! cells it covers. A move then updates only the conditions on its own cell.
//!
//! # Example
//!
//! ```
//! use fillshape_core::{Board, GameEngine, GameState, Player, ShapeTemplate};
//!
//! let shapes = vec![
//!     ShapeTemplate::diagonal(3),
//!     ShapeTemplate::anti_diagonal(3),
//!     ShapeTemplate::horizontal(3),
//!     ShapeTemplate::vertical(3),
//! ];
//! let mut engine = GameEngine::new(Board::new(3, 3), shapes, false);
//! for (r, c) in [(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)] {
//!     engine.try_move(r, c)?;
//! }
//! assert_eq!(engine.state(), GameState::Won(Player::One));
//! # Ok::<(), fillshape_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod contracts;
mod end_condition;
mod engine;
pub mod invariants;
mod shape;
mod types;

pub use action::{Move, MoveError, MoveReport};
pub use board::{Board, BoardError, Cell};
pub use end_condition::{EndCondition, EndConditionId, FillOutcome};
pub use engine::GameEngine;
pub use shape::ShapeTemplate;
pub use types::{Coord, GameState, Player};
