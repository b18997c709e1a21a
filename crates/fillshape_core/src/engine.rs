//! The game engine: end-condition bookkeeping and the per-move update.
//!
//! Construction lays every shape at every offset where it fits and links the
//! resulting end conditions to the cells they cover. A move then touches only
//! the conditions listed on its own cell, so detecting a win or a dead line
//! never requires rescanning the board.

use crate::action::{Move, MoveError, MoveReport};
use crate::board::Board;
use crate::contracts::{Contract, MoveContract};
use crate::end_condition::{EndCondition, EndConditionId, FillOutcome};
use crate::shape::ShapeTemplate;
use crate::types::{Coord, GameState, Player};
use tracing::{debug, info, instrument, warn};

/// Owns the board and every end condition for a single game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    shapes: Vec<ShapeTemplate>,
    end_conditions: Vec<EndCondition>,
    moves: Vec<Move>,
    piece_to_move: Player,
    misere: bool,
    state: GameState,
    terminating: Option<EndConditionId>,
}

impl GameEngine {
    /// Builds the engine, materializing one end condition per shape placement.
    ///
    /// Shapes are laid out in list order, offsets in row-major order, and
    /// covered cells in row-major shape order. Shapes wider or taller than the
    /// board contribute nothing.
    #[instrument(
        skip(board, shapes),
        fields(rows = board.rows(), columns = board.columns(), shapes = shapes.len())
    )]
    pub fn new(mut board: Board, shapes: Vec<ShapeTemplate>, misere: bool) -> Self {
        let mut end_conditions = Vec::new();

        for (shape_index, shape) in shapes.iter().enumerate() {
            let (Some(max_r), Some(max_c)) = (
                board.rows().checked_sub(shape.rows()),
                board.columns().checked_sub(shape.columns()),
            ) else {
                debug!(shape_index, "Shape does not fit on board");
                continue;
            };

            for r in 0..=max_r {
                for c in 0..=max_c {
                    let id = EndConditionId(end_conditions.len());
                    let mut condition = EndCondition::new(id, shape_index, Coord::new(r, c));
                    for (rs, cs) in shape.active_cells() {
                        let coord = Coord::new(r + rs, c + cs);
                        if let Some(index) = board.index_of(coord.row, coord.column) {
                            board.link(index, id);
                            condition.push_cell(coord);
                        }
                    }
                    end_conditions.push(condition);
                }
            }
        }

        info!(end_conditions = end_conditions.len(), misere, "Engine ready");

        Self {
            board,
            shapes,
            end_conditions,
            moves: Vec::new(),
            piece_to_move: Player::One,
            misere,
            state: GameState::InProgress,
            terminating: None,
        }
    }

    /// Checks whether a move at (`row`, `column`) would be accepted.
    pub fn valid_move(&self, row: usize, column: usize) -> bool {
        MoveContract::pre(self, &Coord::new(row, column)).is_ok()
    }

    /// Applies a move for the player to move.
    ///
    /// A rejected move leaves the engine untouched. In debug builds the engine
    /// invariants are checked after an accepted move; a breach is logged as an
    /// error but the move still stands.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game has ended.
    /// - [`MoveError::OutOfBounds`] if the cell is off the board.
    /// - [`MoveError::CellOccupied`] if the cell already holds a piece.
    #[instrument(skip(self), fields(player = %self.piece_to_move))]
    pub fn try_move(&mut self, row: usize, column: usize) -> Result<MoveReport, MoveError> {
        let coord = Coord::new(row, column);
        MoveContract::pre(self, &coord)?;
        let index = self
            .board
            .index_of(row, column)
            .ok_or(MoveError::OutOfBounds {
                row,
                column,
                rows: self.board.rows(),
                columns: self.board.columns(),
            })?;

        let mover = self.piece_to_move;
        let applied = Move::new(mover, coord);
        self.board.occupy(index, mover);
        self.moves.push(applied);

        let mut completed = Vec::new();
        for &id in self.board.cell_at(index).end_conditions() {
            let condition = &mut self.end_conditions[id.index()];
            if condition.record_fill(mover) == FillOutcome::Completed {
                debug!(%id, origin = %condition.origin(), "End condition completed");
                completed.push(id);
            }
        }

        if let Some(&last) = completed.last() {
            self.terminating = Some(last);
            let winner = if self.misere { mover.opponent() } else { mover };
            self.state = GameState::Won(winner);
            info!(%winner, condition = %last, "Game won");
        } else if self.moves.len() == self.board.size() {
            self.state = GameState::Draw;
            info!("Game drawn");
        }

        self.piece_to_move = mover.opponent();

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(self, &coord) {
            tracing::error!(%coord, error = %e, "Engine inconsistent after move");
        }

        Ok(MoveReport {
            applied,
            completed,
            state: self.state,
        })
    }

    /// Applies a move, silently ignoring rejected ones.
    ///
    /// Returns whether the move was applied. Prefer [`GameEngine::try_move`]
    /// when the reason for a rejection matters.
    pub fn move_piece(&mut self, row: usize, column: usize) -> bool {
        match self.try_move(row, column) {
            Ok(_) => true,
            Err(e) => {
                warn!(row, column, error = %e, "Move ignored");
                false
            }
        }
    }

    /// Every currently valid coordinate, in row-major order.
    pub fn valid_moves(&self) -> Vec<Coord> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        self.board
            .cells()
            .iter()
            .filter(|cell| cell.is_empty())
            .map(|cell| cell.coord())
            .collect()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shapes the engine was built from.
    pub fn shapes(&self) -> &[ShapeTemplate] {
        &self.shapes
    }

    /// Every end condition, indexed by [`EndConditionId::index`].
    pub fn end_conditions(&self) -> &[EndCondition] {
        &self.end_conditions
    }

    /// Looks up one end condition.
    pub fn end_condition(&self, id: EndConditionId) -> Option<&EndCondition> {
        self.end_conditions.get(id.index())
    }

    /// The condition that ended the game, when it ended decisively.
    pub fn terminating_condition(&self) -> Option<&EndCondition> {
        self.terminating.and_then(|id| self.end_condition(id))
    }

    /// Moves played so far.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Player whose turn it is.
    ///
    /// This keeps alternating on the final move, so after a game ends it names
    /// the player who would have moved next.
    pub fn piece_to_move(&self) -> Player {
        self.piece_to_move
    }

    /// Whether completing a pattern loses instead of wins.
    pub fn is_misere(&self) -> bool {
        self.misere
    }

    /// Current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Dense row-major occupancy (0 empty, 1 or 2 player).
    pub fn occupancy(&self) -> Vec<u8> {
        self.board.occupancy()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
