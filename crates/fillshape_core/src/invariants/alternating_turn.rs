//! Alternating turn invariant: players alternate 1, 2, 1, 2, ...

use super::Invariant;
use crate::{GameEngine, Player};

/// Invariant: players alternate turns, starting with player 1.
///
/// The player to move is always the one after the last mover, including
/// after the final move of a game.
pub struct AlternatingTurnInvariant;

fn expected_mover(turn: usize) -> Player {
    if turn % 2 == 0 { Player::One } else { Player::Two }
}

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let moves = engine.moves();
        moves
            .iter()
            .enumerate()
            .all(|(turn, m)| m.player == expected_mover(turn))
            && engine.piece_to_move() == expected_mover(moves.len())
    }

    fn description() -> &'static str {
        "Players alternate turns (1, 2, 1, 2, ...)"
    }
}
