//! Game records: persistence and replay.
//!
//! A record stores the configuration and the move list. That is enough to
//! rebuild an equivalent engine, so the final state and player to move are
//! kept only as a check against tampering or version drift.

use crate::config::GameConfig;
use derive_getters::Getters;
use derive_more::{Display, Error};
use fillshape_core::{Coord, GameEngine, GameState, Player};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Serializable snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game configuration, including the scoring mode.
    config: GameConfig,
    /// Cells taken, in order; players alternate starting with player 1.
    moves: Vec<Coord>,
    /// Row-major occupancy at the time of capture.
    occupancy: Vec<u8>,
    /// Player to move at the time of capture.
    piece_to_move: Player,
    /// State at the time of capture.
    state: GameState,
}

impl GameRecord {
    /// Captures the engine's current game.
    #[instrument(skip(config, engine), fields(moves = engine.moves().len()))]
    pub fn capture(config: &GameConfig, engine: &GameEngine) -> Self {
        Self {
            config: config.clone(),
            moves: engine.moves().iter().map(|m| m.coord).collect(),
            occupancy: engine.occupancy(),
            piece_to_move: engine.piece_to_move(),
            state: engine.state(),
        }
    }

    /// Rebuilds the engine by replaying every move.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, a move is rejected, or the
    /// replayed game disagrees with the stored snapshot.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn replay(&self) -> Result<GameEngine, RecordError> {
        let mut engine = self
            .config
            .build_engine()
            .map_err(|e| RecordError::new(format!("Invalid config: {}", e.message)))?;

        for (turn, coord) in self.moves.iter().enumerate() {
            engine.try_move(coord.row, coord.column).map_err(|e| {
                warn!(turn, %coord, error = %e, "Recorded move rejected");
                RecordError::new(format!("Move {} at {} rejected: {}", turn + 1, coord, e))
            })?;
        }

        if engine.state() != self.state
            || engine.piece_to_move() != self.piece_to_move
            || engine.occupancy() != self.occupancy
        {
            return Err(RecordError::new(format!(
                "Replay ended in {} with {} to move, record says {} with {} to move",
                engine.state(),
                engine.piece_to_move(),
                self.state,
                self.piece_to_move
            )));
        }

        debug!(state = %engine.state(), "Replay complete");
        Ok(engine)
    }

    /// Writes the record as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RecordError::new(format!("Failed to serialize record: {}", e)))?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| RecordError::new(format!("Failed to write record: {}", e)))?;
        info!("Record saved");
        Ok(())
    }

    /// Reads a record written by [`GameRecord::save`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RecordError::new(format!("Failed to read record: {}", e)))?;
        let record: Self = serde_json::from_str(&content)
            .map_err(|e| RecordError::new(format!("Failed to parse record: {}", e)))?;
        info!(moves = record.moves.len(), "Record loaded");
        Ok(record)
    }
}

/// Record error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Record error: {} at {}:{}", message, file, line)]
pub struct RecordError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RecordError {
    /// Creates a new record error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
