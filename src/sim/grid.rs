//! The shared playfield
//!
//! 10 columns x 20 rows stored as a flat row-major array. Coordinates are
//! `IVec2 { x, y }` with x growing right and y growing down (row 0 is the top).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::catalog::CellKind;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::in_bounds;

/// A single grid cell: empty or one catalog identifier
pub type Cell = Option<CellKind>;

const GRID_SIZE: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID_SIZE],
        }
    }

    #[inline]
    fn index(pos: IVec2) -> Option<usize> {
        in_bounds(pos).then(|| (pos.y * GRID_WIDTH + pos.x) as usize)
    }

    /// Cell at `pos`, `None` when out of bounds
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        Self::index(pos).map(|i| self.cells[i])
    }

    /// Write a cell. Returns false (and does nothing) when out of bounds.
    pub fn set(&mut self, pos: IVec2, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and holding something
    pub fn is_occupied(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// In bounds and empty
    pub fn is_empty_at(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// True if the cell holds exactly `kind`
    pub fn holds(&self, pos: IVec2, kind: CellKind) -> bool {
        self.get(pos) == Some(Some(kind))
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Cells of row `y`, `None` when out of bounds
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if !(0..GRID_HEIGHT).contains(&y) {
            return None;
        }
        let start = (y * GRID_WIDTH) as usize;
        Some(&self.cells[start..start + GRID_WIDTH as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_WIDTH as usize)
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|c| c.is_some()))
    }

    /// Remove every full row, compact the rest downward and refill the top with
    /// empty rows. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = GRID_WIDTH as usize;
        let kept: Vec<Cell> = (0..GRID_HEIGHT)
            .filter(|&y| !self.is_row_full(y))
            .filter_map(|y| self.row(y))
            .flatten()
            .copied()
            .collect();
        let cleared = (GRID_SIZE - kept.len()) / width;
        if cleared > 0 {
            let mut cells = vec![None; cleared * width];
            cells.extend(kept);
            self.cells = cells;
        }
        cleared as u32
    }

    /// All positions holding `kind`, in row-major order
    pub fn positions_of(&self, kind: CellKind) -> Vec<IVec2> {
        self.iter()
            .filter(|&(_, cell)| cell == Some(kind))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// All empty positions, in row-major order
    pub fn empty_positions(&self) -> Vec<IVec2> {
        self.iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every cell with its position, row-major
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let i = i as i32;
            (IVec2::new(i % GRID_WIDTH, i / GRID_WIDTH), cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_empty() {
        let grid = Grid::new();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.rows().count(), GRID_HEIGHT as usize);
        assert!(grid.rows().all(|r| r.len() == GRID_WIDTH as usize));
    }

    #[test]
    fn test_set_out_of_bounds_rejected() {
        let mut grid = Grid::new();
        assert!(!grid.set(IVec2::new(-1, 0), Some(CellKind::T)));
        assert!(!grid.set(IVec2::new(0, GRID_HEIGHT), Some(CellKind::T)));
        assert_eq!(grid.get(IVec2::new(GRID_WIDTH, 0)), None);
        assert!(grid.set(IVec2::new(3, 4), Some(CellKind::T)));
        assert!(grid.holds(IVec2::new(3, 4), CellKind::T));
    }

    #[test]
    fn test_clear_full_bottom_row() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH {
            grid.set(IVec2::new(x, GRID_HEIGHT - 1), Some(CellKind::I));
        }
        grid.set(IVec2::new(2, GRID_HEIGHT - 2), Some(CellKind::O));
        grid.set(IVec2::new(0, 0), Some(CellKind::Z));

        assert_eq!(grid.clear_full_rows(), 1);
        // Row above shifted into the bottom row
        assert!(grid.holds(IVec2::new(2, GRID_HEIGHT - 1), CellKind::O));
        assert!(grid.holds(IVec2::new(0, 1), CellKind::Z));
        // Fresh empty row on top
        assert_eq!(grid.row(0), Some(&[None; GRID_WIDTH as usize][..]));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH {
            grid.set(IVec2::new(x, 19), Some(CellKind::I));
            grid.set(IVec2::new(x, 17), Some(CellKind::J));
        }
        grid.set(IVec2::new(5, 18), Some(CellKind::S));
        assert_eq!(grid.clear_full_rows(), 2);
        assert!(grid.holds(IVec2::new(5, 19), CellKind::S));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_row_bounds_and_fullness() {
        let mut grid = Grid::new();
        assert!(grid.row(-1).is_none());
        assert!(grid.row(GRID_HEIGHT).is_none());
        assert!(!grid.is_row_full(GRID_HEIGHT));
        for x in 0..GRID_WIDTH - 1 {
            grid.set(IVec2::new(x, 7), Some(CellKind::L));
        }
        assert!(!grid.is_row_full(7));
        grid.set(IVec2::new(GRID_WIDTH - 1, 7), Some(CellKind::L));
        assert!(grid.is_row_full(7));
        assert_eq!(grid.row(7).map(|r| r.len()), Some(GRID_WIDTH as usize));
    }

    #[test]
    fn test_no_full_rows_no_change() {
        let mut grid = Grid::new();
        grid.set(IVec2::new(1, 19), Some(CellKind::L));
        let before = grid.clone();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }
}
