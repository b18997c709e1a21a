//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::MoveError;
use crate::engine::GameEngine;
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::types::{Coord, GameState};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after the action has been applied.
    fn post(state: &S, action: &A) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails with [`MoveError::GameOver`] once the game is terminal.
    pub fn check(engine: &GameEngine) -> Result<(), MoveError> {
        match engine.state() {
            GameState::InProgress => Ok(()),
            state => Err(MoveError::GameOver(state)),
        }
    }
}

/// Precondition: the coordinate lies on the board.
pub struct CellInBounds;

impl CellInBounds {
    /// Fails with [`MoveError::OutOfBounds`] for off-board cells.
    pub fn check(coord: &Coord, engine: &GameEngine) -> Result<(), MoveError> {
        let board = engine.board();
        if board.contains(coord.row, coord.column) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds {
                row: coord.row,
                column: coord.column,
                rows: board.rows(),
                columns: board.columns(),
            })
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveError::CellOccupied`] when someone holds the cell.
    pub fn check(coord: &Coord, engine: &GameEngine) -> Result<(), MoveError> {
        match engine.board().occupant(coord.row, coord.column) {
            Some(_) => Err(MoveError::CellOccupied(*coord)),
            None => Ok(()),
        }
    }
}

/// Composite precondition: a move is legal if the game is running and the
/// cell is on the board and empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move, in that order.
    pub fn check(coord: &Coord, engine: &GameEngine) -> Result<(), MoveError> {
        GameInProgress::check(engine)?;
        CellInBounds::check(coord, engine)?;
        CellIsEmpty::check(coord, engine)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game still in progress
/// - Cell on the board
/// - Cell empty
///
/// Postconditions:
/// - The last recorded move is this cell
/// - History matches the board
/// - Players still alternate
/// - End-condition counters match the board
pub struct MoveContract;

impl Contract<GameEngine, Coord> for MoveContract {
    fn pre(engine: &GameEngine, coord: &Coord) -> Result<(), MoveError> {
        LegalMove::check(coord, engine)
    }

    #[instrument(skip(engine))]
    fn post(engine: &GameEngine, coord: &Coord) -> Result<(), MoveError> {
        if engine.moves().last().map(|m| m.coord) != Some(*coord) {
            warn!(%coord, "Last move does not match applied cell");
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: last move is not {coord}"
            )));
        }

        EngineInvariants::check_all(engine).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Invariant violated after move");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player, ShapeTemplate};

    fn engine() -> GameEngine {
        GameEngine::new(
            Board::new(3, 3),
            vec![ShapeTemplate::horizontal(3), ShapeTemplate::vertical(3)],
            false,
        )
    }

    #[test]
    fn test_precondition_empty_cell() {
        let engine = engine();
        assert!(MoveContract::pre(&engine, &Coord::new(1, 1)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let mut engine = engine();
        engine.try_move(1, 1).expect("valid move");
        assert!(matches!(
            MoveContract::pre(&engine, &Coord::new(1, 1)),
            Err(MoveError::CellOccupied(_))
        ));
    }

    #[test]
    fn test_precondition_bounds_checked_before_occupancy() {
        let engine = engine();
        assert!(matches!(
            MoveContract::pre(&engine, &Coord::new(0, 7)),
            Err(MoveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_precondition_game_over_first() {
        let mut engine = engine();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            engine.try_move(r, c).expect("valid move");
        }
        assert_eq!(engine.state(), GameState::Won(Player::One));
        assert!(matches!(
            MoveContract::pre(&engine, &Coord::new(9, 9)),
            Err(MoveError::GameOver(_))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let mut engine = engine();
        engine.try_move(2, 1).expect("valid move");
        assert!(MoveContract::post(&engine, &Coord::new(2, 1)).is_ok());
    }

    #[test]
    fn test_postcondition_detects_wrong_cell() {
        let mut engine = engine();
        engine.try_move(2, 1).expect("valid move");
        assert!(MoveContract::post(&engine, &Coord::new(0, 0)).is_err());
    }
}
