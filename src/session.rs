//! Game session: one engine, two seats, and whoever fills them.

use crate::config::{ConfigError, GameConfig};
use crate::opponent::{AiPlayer, NeutralEvaluator, OpponentError, PositionEvaluator};
use crate::record::GameRecord;
use derive_more::{Display, Error, From};
use fillshape_core::{GameEngine, MoveError, MoveReport, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who occupies a seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves come from the caller.
    Human,
    /// Moves come from an [`AiPlayer`].
    Ai,
}

/// Error raised by session operations.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum SessionError {
    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),

    /// The opponent could not move.
    #[display("{}", _0)]
    Opponent(OpponentError),

    /// A human tried to move on the AI's turn.
    #[display("It is {}'s turn and that seat is not human", _0)]
    #[from(ignore)]
    NotHumanTurn(#[error(not(source))] Player),
}

/// A single game between two seats.
///
/// Each session owns its engine and random source; nothing is shared between
/// sessions.
pub struct Session {
    config: GameConfig,
    engine: GameEngine,
    seats: [PlayerKind; 2],
    ai_epsilon: f32,
    evaluator: Box<dyn PositionEvaluator + Send>,
    rng: StdRng,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("seats", &self.seats)
            .field("state", &self.engine.state())
            .field("moves", &self.engine.moves().len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session with a fresh engine.
    ///
    /// With a `seed` the AI's choices are reproducible.
    #[instrument(skip(config))]
    pub fn new(
        config: GameConfig,
        player1: PlayerKind,
        player2: PlayerKind,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let engine = config.build_engine()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(%player1, %player2, "Session started");
        Ok(Self {
            config,
            engine,
            seats: [player1, player2],
            ai_epsilon: crate::opponent::DEFAULT_EPSILON,
            evaluator: Box::new(NeutralEvaluator),
            rng,
        })
    }

    /// Replaces the evaluator used by AI seats.
    pub fn with_evaluator(mut self, evaluator: impl PositionEvaluator + Send + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Replaces the AI's score tolerance (see [`AiPlayer::with_epsilon`]).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.ai_epsilon = epsilon;
        self
    }

    /// The engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The configuration this session plays.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Who sits in `player`'s seat.
    pub fn seat(&self, player: Player) -> PlayerKind {
        match player {
            Player::One => self.seats[0],
            Player::Two => self.seats[1],
        }
    }

    /// Returns true if the game is running and an AI is to move.
    pub fn ai_to_move(&self) -> bool {
        !self.engine.state().is_terminal()
            && self.seat(self.engine.piece_to_move()) == PlayerKind::Ai
    }

    /// Plays a human move.
    #[instrument(skip(self))]
    pub fn play_human(&mut self, row: usize, column: usize) -> Result<MoveReport, SessionError> {
        let to_move = self.engine.piece_to_move();
        if !self.engine.state().is_terminal() && self.seat(to_move) != PlayerKind::Human {
            return Err(SessionError::NotHumanTurn(to_move));
        }
        Ok(self.engine.try_move(row, column)?)
    }

    /// Plays one AI move, if an AI is to move.
    #[instrument(skip(self))]
    pub fn step_ai(&mut self) -> Result<Option<MoveReport>, SessionError> {
        if !self.ai_to_move() {
            return Ok(None);
        }
        let ai = AiPlayer::new(self.engine.piece_to_move()).with_epsilon(self.ai_epsilon);
        let choice = ai.choose_move(&self.engine, self.evaluator.as_ref(), &mut self.rng)?;
        let report = self.engine.try_move(choice.row, choice.column)?;
        debug!(applied = %report.applied, "AI moved");
        Ok(Some(report))
    }

    /// Plays AI moves until a human is to move or the game ends.
    pub fn run_ai(&mut self) -> Result<Vec<MoveReport>, SessionError> {
        let mut reports = Vec::new();
        while let Some(report) = self.step_ai()? {
            reports.push(report);
        }
        Ok(reports)
    }

    /// Starts a new game with the same configuration and seats.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.engine = self.config.build_engine()?;
        info!("Session restarted");
        Ok(())
    }

    /// Captures the game so far.
    pub fn record(&self) -> GameRecord {
        GameRecord::capture(&self.config, &self.engine)
    }
}
