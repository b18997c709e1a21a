//! Core domain types shared by the board and the engine.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Player {
    /// Player 1 (moves first, shown as X).
    #[display("X")]
    One,
    /// Player 2 (shown as O).
    #[display("O")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric value used in dense board arrays (1 or 2).
    pub fn value(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parses a dense-array value back into a player.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

/// A board coordinate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {column})")]
pub struct Coord {
    /// Row index, from the top.
    pub row: usize,
    /// Column index, from the left.
    pub column: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

/// Where the game stands.
///
/// Moves only ever go from `InProgress` to one of the terminal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameState {
    /// Moves are still accepted.
    #[display("in progress")]
    InProgress,
    /// The board filled up without a decisive pattern.
    #[display("draw")]
    Draw,
    /// A player won.
    #[display("{_0} wins")]
    Won(Player),
}

impl GameState {
    /// Returns true once the game can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::Won(player) => Some(*player),
            GameState::InProgress | GameState::Draw => None,
        }
    }
}
