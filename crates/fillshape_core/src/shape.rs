//! Shape templates: reusable stencils for winning patterns.
//!
//! A template is a small boolean mask. Every active cell must be held by the
//! same player for a placement of the template to count as completed. The
//! standard line, diagonal and block shapes are plain constructors; anything
//! else goes through [`ShapeTemplate::from_fn`] or [`ShapeTemplate::from_rows`].

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A rows×columns stencil marking which relative cells form a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeTemplate {
    rows: usize,
    columns: usize,
    /// Row-major activity mask.
    mask: Vec<bool>,
}

impl ShapeTemplate {
    /// Builds a template by asking `active` about every cell.
    pub fn from_fn(
        rows: usize,
        columns: usize,
        mut active: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut mask = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                mask.push(active(r, c));
            }
        }
        Self { rows, columns, mask }
    }

    /// Builds a template from explicit mask rows.
    ///
    /// The width is the longest row; shorter rows are padded with inactive cells.
    #[instrument(skip(rows))]
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let columns = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
        Self::from_fn(rows.len(), columns, |r, c| {
            rows[r].as_ref().get(c).copied().unwrap_or(false)
        })
    }

    /// Diagonal line running top-left to bottom-right (`\`).
    pub fn diagonal(length: usize) -> Self {
        Self::from_fn(length, length, |r, c| r == c)
    }

    /// Diagonal line running bottom-left to top-right (`/`).
    pub fn anti_diagonal(length: usize) -> Self {
        Self::from_fn(length, length, |r, c| r + c + 1 == length)
    }

    /// Full horizontal line.
    pub fn horizontal(length: usize) -> Self {
        Self::from_fn(1, length, |_, _| true)
    }

    /// Full vertical line.
    pub fn vertical(length: usize) -> Self {
        Self::from_fn(length, 1, |_, _| true)
    }

    /// Filled length×length block.
    pub fn square(length: usize) -> Self {
        Self::from_fn(length, length, |_, _| true)
    }

    /// Number of template rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of template columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the cell at (`row`, `column`) is part of the pattern.
    ///
    /// Out-of-range cells are inactive.
    pub fn is_active(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.mask[row * self.columns + column]
    }

    /// Active cells in row-major order, relative to the template origin.
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| (i / self.columns, i % self.columns))
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.mask.iter().filter(|active| **active).count()
    }

    /// True when no cell is active; such a template can never be completed.
    pub fn is_degenerate(&self) -> bool {
        self.active_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_mask() {
        let shape = ShapeTemplate::diagonal(3);
        assert_eq!((shape.rows(), shape.columns()), (3, 3));
        let cells: Vec<_> = shape.active_cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_anti_diagonal_mask() {
        let shape = ShapeTemplate::anti_diagonal(3);
        let cells: Vec<_> = shape.active_cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_lines_and_square() {
        let horizontal = ShapeTemplate::horizontal(4);
        assert_eq!((horizontal.rows(), horizontal.columns()), (1, 4));
        assert_eq!(horizontal.active_count(), 4);

        let vertical = ShapeTemplate::vertical(4);
        assert_eq!((vertical.rows(), vertical.columns()), (4, 1));
        assert_eq!(vertical.active_count(), 4);

        let square = ShapeTemplate::square(2);
        assert_eq!(square.active_count(), 4);
        assert!(square.is_active(1, 1));
        assert!(!square.is_active(2, 0));
    }

    #[test]
    fn test_zero_length_is_degenerate() {
        assert!(ShapeTemplate::diagonal(0).is_degenerate());
        assert!(ShapeTemplate::horizontal(0).is_degenerate());
        assert!(!ShapeTemplate::square(1).is_degenerate());
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let shape = ShapeTemplate::from_rows(&[vec![true, false, true], vec![true]]);
        assert_eq!((shape.rows(), shape.columns()), (2, 3));
        let cells: Vec<_> = shape.active_cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 2), (1, 0)]);
    }
}
