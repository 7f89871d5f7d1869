//! Dense two-dimensional grids.

use std::{
    fmt::{self, Debug, Formatter},
    ops::{Index, IndexMut},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed.
pub type Coord = (usize, usize);

/// A dense `rows × columns` grid, stored row by row.
///
/// The size is fixed when the grid is created. There is no wraparound:
/// [`get`](Grid::get) returns `None` outside the grid, and indexing panics.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(rows: usize, columns: usize, fill: T) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![fill; rows * columns],
        }
    }
}

impl<T> Grid<T> {
    /// Creates a grid by calling `f` on every coordinate, row by row.
    pub fn from_fn<F: FnMut(Coord) -> T>(rows: usize, columns: usize, mut f: F) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                cells.push(f((row, col)));
            }
        }
        Grid {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn offset(&self, (row, col): Coord) -> Option<usize> {
        if row < self.rows && col < self.columns {
            Some(row * self.columns + col)
        } else {
            None
        }
    }

    /// Gets a cell. Returns `None` if there is no such cell.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset((row, col)).map(|i| &self.cells[i])
    }

    /// Gets a mutable reference to a cell.
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.offset((row, col)).map(move |i| &mut self.cells[i])
    }

    /// A whole row.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// A whole row, mutably.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.columns;
        &mut self.cells[start..start + self.columns]
    }

    /// Whether the cell lies on the outermost row or column.
    #[inline]
    pub fn is_border(&self, (row, col): Coord) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.columns
    }

    /// Coordinates of the cells that are not on the border, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Coord> {
        let rows = self.rows;
        let columns = self.columns;
        (1..rows.saturating_sub(1))
            .flat_map(move |row| (1..columns.saturating_sub(1)).map(move |col| (row, col)))
    }

    /// Swaps two cells.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let a = self.offset(a).expect("coordinate out of the grid");
        let b = self.offset(b).expect("coordinate out of the grid");
        self.cells.swap(a, b);
    }

    /// Iterates over all cells, row by row.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Iterates over all cells mutably, row by row.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Iterates over all cells together with their coordinates.
    pub fn enumerate(&self) -> impl Iterator<Item = (Coord, &T)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / columns, i % columns), cell))
    }

    /// Builds a grid of the same size by mapping every cell.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, coord: Coord) -> &Self::Output {
        let i = self.offset(coord).expect("coordinate out of the grid");
        &self.cells[i]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let i = self.offset(coord).expect("coordinate out of the grid");
        &mut self.cells[i]
    }
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_and_interior() {
        let grid = Grid::new(4, 5, 0u8);
        assert!(grid.is_border((0, 2)));
        assert!(grid.is_border((3, 2)));
        assert!(grid.is_border((2, 0)));
        assert!(grid.is_border((2, 4)));
        assert!(!grid.is_border((1, 1)));
        let interior: Vec<_> = grid.interior().collect();
        assert_eq!(
            interior,
            vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn rows_are_contiguous() {
        let grid = Grid::from_fn(3, 4, |(row, col)| row * 10 + col);
        assert_eq!(grid.row(1), &[10, 11, 12, 13]);
        assert_eq!(grid[(2, 3)], 23);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn swap_cells() {
        let mut grid = Grid::from_fn(2, 2, |(row, col)| row * 2 + col);
        grid.swap((0, 0), (1, 1));
        assert_eq!(grid[(0, 0)], 3);
        assert_eq!(grid[(1, 1)], 0);
    }
}
