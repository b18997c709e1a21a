//! End-condition counters agree with the board.

use super::Invariant;
use crate::GameEngine;

/// Invariant: for every end condition, `fill_count` equals the number of its
/// occupied cells (and never exceeds its size), `blocked` is set exactly when
/// both players hold one of its cells, and the first filler holds one of them.
pub struct FillConsistentInvariant;

impl Invariant<GameEngine> for FillConsistentInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let board = engine.board();
        engine.end_conditions().iter().all(|condition| {
            let occupants: Vec<_> = condition
                .cells()
                .iter()
                .filter_map(|coord| board.occupant(coord.row, coord.column))
                .collect();
            let mixed = occupants.windows(2).any(|w| w[0] != w[1]);
            let first_present = match condition.first_piece_to_fill() {
                Some(first) => occupants.contains(&first),
                None => occupants.is_empty(),
            };

            condition.fill_count() <= condition.cells().len()
                && condition.fill_count() == occupants.len()
                && condition.is_blocked() == mixed
                && first_present
        })
    }

    fn description() -> &'static str {
        "End-condition fill counts and blocks match the board"
    }
}
