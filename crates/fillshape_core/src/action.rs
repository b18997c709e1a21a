//! First-class move types.
//!
//! A move is a domain event: the player and the cell they took. Rejections
//! are explicit [`MoveError`] values rather than silent no-ops.

use crate::end_condition::EndConditionId;
use crate::types::{Coord, GameState, Player};
use serde::{Deserialize, Serialize};

/// A placement made by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player who moved.
    pub player: Player,
    /// The cell they took.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coord)
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has already ended.
    #[display("Game is already over ({})", _0)]
    GameOver(GameState),

    /// The coordinate lies outside the board.
    #[display("Cell ({}, {}) is off the {}x{} board", row, column, rows, columns)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Board rows.
        rows: usize,
        /// Board columns.
        columns: usize,
    },

    /// The cell already holds a piece.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The move that was applied.
    pub applied: Move,
    /// Conditions completed by this move, in the cell's stored order.
    pub completed: Vec<EndConditionId>,
    /// Game state after the move.
    pub state: GameState,
}

impl MoveReport {
    /// Returns true if this move ended the game.
    pub fn ended_game(&self) -> bool {
        self.state.is_terminal()
    }
}
