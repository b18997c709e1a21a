//! Automated opponent.
//!
//! The opponent probes every valid cell, scores the resulting position with an
//! external [`PositionEvaluator`], and picks uniformly among the moves whose
//! score is within `epsilon` of the best one.

use derive_more::{Display, Error};
use fillshape_core::{Coord, GameEngine, GameState, Player};
use rand::Rng;
use tracing::{debug, instrument};

/// Default tolerance below the best score for a move to stay a candidate.
pub const DEFAULT_EPSILON: f32 = 0.25;

/// Scores a position from player 1's point of view.
///
/// `occupancy` is row-major with 0 for empty cells and 1 or 2 for the
/// occupying player. Higher is better for player 1.
pub trait PositionEvaluator {
    /// Evaluates a rows×columns position.
    fn evaluate(&self, occupancy: &[u8], rows: usize, columns: usize) -> f32;
}

impl<F> PositionEvaluator for F
where
    F: Fn(&[u8], usize, usize) -> f32,
{
    fn evaluate(&self, occupancy: &[u8], rows: usize, columns: usize) -> f32 {
        self(occupancy, rows, columns)
    }
}

/// Rates every position equally, which makes the opponent play uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralEvaluator;

impl PositionEvaluator for NeutralEvaluator {
    fn evaluate(&self, _occupancy: &[u8], _rows: usize, _columns: usize) -> f32 {
        0.0
    }
}

/// Why the opponent could not pick a move.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum OpponentError {
    /// The game has already ended.
    #[display("Game is not in progress ({})", _0)]
    NotInProgress(#[error(not(source))] GameState),

    /// The opponent was asked to move out of turn.
    #[display("Opponent plays {} but {} is to move", piece, to_move)]
    WrongPlayer {
        /// The opponent's piece.
        piece: Player,
        /// The engine's player to move.
        to_move: Player,
    },
}

/// An automated player for one side.
#[derive(Debug, Clone, Copy, PartialEq, derive_new::new)]
pub struct AiPlayer {
    /// Side this player moves for.
    piece: Player,
    /// Score tolerance for candidate moves.
    #[new(value = "DEFAULT_EPSILON")]
    epsilon: f32,
}

impl AiPlayer {
    /// Returns a copy with a different tolerance.
    ///
    /// Negative and NaN tolerances are clamped to zero, which keeps only the
    /// best-scoring moves.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        // f32::max ignores NaN.
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Side this player moves for.
    pub fn piece(&self) -> Player {
        self.piece
    }

    /// Score tolerance for candidate moves.
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Picks a move for the current position without changing the engine.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is not this player's turn.
    #[instrument(skip(engine, evaluator, rng), fields(piece = %self.piece))]
    pub fn choose_move<E, R>(
        &self,
        engine: &GameEngine,
        evaluator: &E,
        rng: &mut R,
    ) -> Result<Coord, OpponentError>
    where
        E: PositionEvaluator + ?Sized,
        R: Rng,
    {
        let state = engine.state();
        if state.is_terminal() {
            return Err(OpponentError::NotInProgress(state));
        }
        if engine.piece_to_move() != self.piece {
            return Err(OpponentError::WrongPlayer {
                piece: self.piece,
                to_move: engine.piece_to_move(),
            });
        }

        let board = engine.board();
        let mut occupancy = engine.occupancy();
        let mut scored = Vec::new();
        for r in 0..board.rows() {
            for c in 0..board.columns() {
                if !engine.valid_move(r, c) {
                    continue;
                }
                let i = board.columns() * r + c;
                occupancy[i] = self.piece.value();
                let mut evaluation = evaluator.evaluate(&occupancy, board.rows(), board.columns());
                occupancy[i] = 0;
                if self.piece == Player::Two {
                    evaluation = -evaluation;
                }
                scored.push((Coord::new(r, c), evaluation));
            }
        }

        let best = scored
            .iter()
            .map(|(_, evaluation)| *evaluation)
            .fold(f32::NEG_INFINITY, f32::max);
        let cutoff = best - self.epsilon;
        let mut candidates: Vec<Coord> = scored
            .iter()
            .filter(|(_, evaluation)| *evaluation >= cutoff)
            .map(|(coord, _)| *coord)
            .collect();
        if candidates.is_empty() {
            // Every score was NaN.
            candidates = scored.iter().map(|(coord, _)| *coord).collect();
        }

        let choice = candidates[rng.random_range(0..candidates.len())];
        debug!(best, candidates = candidates.len(), %choice, "Opponent chose move");
        Ok(choice)
    }
}
