//! End conditions: concrete placements of a shape on the board.

use crate::types::{Coord, Player};
use serde::{Deserialize, Serialize};

/// Index of an end condition in the engine's arena.
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
#[display("#{_0}")]
pub struct EndConditionId(pub(crate) usize);

impl EndConditionId {
    /// Position in [`crate::GameEngine::end_conditions`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a single placement did to an end condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The condition now belongs to the mover and is still open.
    Progressed,
    /// Every cell is held by the mover.
    Completed,
    /// The condition is (or already was) held by both players.
    Blocked,
}

/// One placement of one shape template at one board offset.
///
/// Progress is monotonic: `fill_count` only grows, `blocked` never resets,
/// and the first filler never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndCondition {
    id: EndConditionId,
    shape_index: usize,
    origin: Coord,
    cells: Vec<Coord>,
    first_piece_to_fill: Option<Player>,
    blocked: bool,
    fill_count: usize,
}

impl EndCondition {
    pub(crate) fn new(id: EndConditionId, shape_index: usize, origin: Coord) -> Self {
        Self {
            id,
            shape_index,
            origin,
            cells: Vec::new(),
            first_piece_to_fill: None,
            blocked: false,
            fill_count: 0,
        }
    }

    pub(crate) fn push_cell(&mut self, coord: Coord) {
        self.cells.push(coord);
    }

    /// Records a placement on one of this condition's cells.
    ///
    /// Every placement counts toward `fill_count`; a placement by anyone other
    /// than the first filler blocks the condition for good. The first placement
    /// only claims the condition, so completion is checked from the second on.
    pub(crate) fn record_fill(&mut self, mover: Player) -> FillOutcome {
        self.fill_count += 1;
        let Some(owner) = self.first_piece_to_fill else {
            self.first_piece_to_fill = Some(mover);
            return FillOutcome::Progressed;
        };
        if owner != mover {
            self.blocked = true;
        }
        if self.blocked {
            FillOutcome::Blocked
        } else if self.fill_count == self.cells.len() {
            FillOutcome::Completed
        } else {
            FillOutcome::Progressed
        }
    }

    /// Arena index of this condition.
    pub fn id(&self) -> EndConditionId {
        self.id
    }

    /// Index of the shape (in the list given to the engine) this came from.
    pub fn shape_index(&self) -> usize {
        self.shape_index
    }

    /// Board offset of the shape's top-left corner.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Cells covered, in row-major shape order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Returns true if `coord` is one of the covered cells.
    pub fn covers(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Player who first placed a piece on any covered cell.
    pub fn first_piece_to_fill(&self) -> Option<Player> {
        self.first_piece_to_fill
    }

    /// True once both players hold a covered cell.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Number of covered cells that are occupied.
    pub fn fill_count(&self) -> usize {
        self.fill_count
    }

    /// True if one player holds every covered cell.
    ///
    /// Conditions of fewer than two cells never complete.
    pub fn is_complete(&self) -> bool {
        !self.blocked && self.cells.len() > 1 && self.fill_count == self.cells.len()
    }

    /// Player this condition favors when complete.
    pub fn owner(&self) -> Option<Player> {
        if self.blocked {
            None
        } else {
            self.first_piece_to_fill
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(len: usize) -> EndCondition {
        let mut condition = EndCondition::new(EndConditionId(0), 0, Coord::new(0, 0));
        for c in 0..len {
            condition.push_cell(Coord::new(0, c));
        }
        condition
    }

    #[test]
    fn test_first_filler_recorded_once() {
        let mut condition = line(3);
        assert_eq!(condition.record_fill(Player::Two), FillOutcome::Progressed);
        assert_eq!(condition.first_piece_to_fill(), Some(Player::Two));
        condition.record_fill(Player::One);
        assert_eq!(condition.first_piece_to_fill(), Some(Player::Two));
    }

    #[test]
    fn test_same_player_completes() {
        let mut condition = line(3);
        condition.record_fill(Player::One);
        condition.record_fill(Player::One);
        assert_eq!(condition.record_fill(Player::One), FillOutcome::Completed);
        assert!(condition.is_complete());
        assert_eq!(condition.owner(), Some(Player::One));
    }

    #[test]
    fn test_opponent_blocks_permanently() {
        let mut condition = line(3);
        condition.record_fill(Player::One);
        assert_eq!(condition.record_fill(Player::Two), FillOutcome::Blocked);
        assert_eq!(condition.record_fill(Player::One), FillOutcome::Blocked);
        assert!(condition.is_blocked());
        assert!(!condition.is_complete());
        assert_eq!(condition.fill_count(), 3);
        assert_eq!(condition.owner(), None);
    }

    #[test]
    fn test_single_cell_never_completes() {
        let mut condition = line(1);
        assert_eq!(condition.record_fill(Player::One), FillOutcome::Progressed);
        assert_eq!(condition.fill_count(), 1);
        assert_eq!(condition.first_piece_to_fill(), Some(Player::One));
        assert!(!condition.is_complete());
    }

    #[test]
    fn test_two_cell_completes_on_second_fill() {
        let mut condition = line(2);
        assert_eq!(condition.record_fill(Player::Two), FillOutcome::Progressed);
        assert_eq!(condition.record_fill(Player::Two), FillOutcome::Completed);
    }

    #[test]
    fn test_empty_condition_never_complete() {
        let condition = line(0);
        assert!(!condition.is_complete());
    }
}
