//! History consistency: the move list and the board describe the same game.

use super::Invariant;
use crate::GameEngine;

/// Invariant: every recorded move is on the board with its player, and no
/// other cell is occupied.
pub struct HistoryConsistentInvariant;

impl Invariant<GameEngine> for HistoryConsistentInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let board = engine.board();
        let moves = engine.moves();

        if moves.len() > board.size() || board.occupied_count() != moves.len() {
            return false;
        }

        moves
            .iter()
            .all(|m| board.occupant(m.coord.row, m.coord.column) == Some(m.player))
    }

    fn description() -> &'static str {
        "Move history matches occupied cells"
    }
}
