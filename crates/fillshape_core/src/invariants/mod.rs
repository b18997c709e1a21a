//! First-class invariants for the engine.
//!
//! Invariants are logical properties that must hold throughout a game.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for 2- and 3-tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

pub mod alternating_turn;
pub mod fill_consistent;
pub mod history_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use fill_consistent::FillConsistentInvariant;
pub use history_consistent::HistoryConsistentInvariant;

/// All engine invariants as a composable set.
pub type EngineInvariants = (
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
    FillConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, GameEngine, Player, ShapeTemplate};

    fn engine() -> GameEngine {
        GameEngine::new(
            Board::new(4, 4),
            vec![ShapeTemplate::horizontal(4), ShapeTemplate::square(2)],
            false,
        )
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(EngineInvariants::check_all(&engine()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut engine = engine();
        for (r, c) in [(0, 0), (1, 1), (3, 3), (0, 1)] {
            engine.try_move(r, c).expect("valid move");
        }
        assert!(EngineInvariants::check_all(&engine).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut engine = engine();
        engine.try_move(0, 0).expect("valid move");
        engine.board_mut().occupy(5, Player::Two);

        let violations = EngineInvariants::check_all(&engine).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (HistoryConsistentInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&engine()).is_ok());
    }
}
