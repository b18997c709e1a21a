//! Rectangular board of cells.

use crate::end_condition::EndConditionId;
use crate::types::{Coord, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Error raised when a board cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// One of the dimensions is zero.
    #[display("Board dimensions must be positive, got {rows}x{columns}")]
    EmptyDimension {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        columns: usize,
    },
}

impl std::error::Error for BoardError {}

/// One board cell.
///
/// Besides its occupant, a cell lists every end condition that covers it, in
/// the order the conditions were created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    occupant: Option<Player>,
    end_conditions: Vec<EndConditionId>,
}

impl Cell {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            occupant: None,
            end_conditions: Vec::new(),
        }
    }

    /// Position of this cell.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Player holding this cell, if any.
    pub fn occupant(&self) -> Option<Player> {
        self.occupant
    }

    /// Returns true if nobody holds this cell.
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// End conditions this cell participates in.
    pub fn end_conditions(&self) -> &[EndConditionId] {
        &self.end_conditions
    }
}

/// A rows×columns grid of cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Use [`Board::try_new`] to handle
    /// that case as an error.
    #[instrument]
    pub fn new(rows: usize, columns: usize) -> Self {
        match Self::try_new(rows, columns) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an empty board, rejecting zero dimensions.
    #[instrument]
    pub fn try_new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::EmptyDimension { rows, columns });
        }
        let cells = (0..rows)
            .flat_map(|r| (0..columns).map(move |c| Cell::new(Coord::new(r, c))))
            .collect();
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells, which is also the longest possible game.
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Returns true if (`row`, `column`) lies on the board.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns
    }

    /// Row-major index of a coordinate, if it lies on the board.
    pub fn index_of(&self, row: usize, column: usize) -> Option<usize> {
        self.contains(row, column).then(|| row * self.columns + column)
    }

    /// Gets the cell at (`row`, `column`).
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.index_of(row, column).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Player at (`row`, `column`); `None` for empty or off-board cells.
    pub fn occupant(&self, row: usize, column: usize) -> Option<Player> {
        self.cell(row, column).and_then(Cell::occupant)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Dense row-major snapshot: 0 for empty, 1 or 2 for the occupying player.
    pub fn occupancy(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|cell| cell.occupant.map_or(0, Player::value))
            .collect()
    }

    pub(crate) fn link(&mut self, index: usize, id: EndConditionId) {
        self.cells[index].end_conditions.push(id);
    }

    pub(crate) fn occupy(&mut self, index: usize, player: Player) {
        self.cells[index].occupant = Some(player);
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.chunks(self.columns).enumerate() {
            if r > 0 {
                writeln!(f)?;
                let rule = vec!["-"; self.columns].join("+");
                writeln!(f, "{rule}")?;
            }
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| cell.occupant.map_or_else(|| ".".to_string(), |p| p.to_string()))
                .collect();
            write!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}
