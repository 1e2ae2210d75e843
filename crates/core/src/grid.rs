//! Grid module - holds the tile values
//!
//! The grid is a 4x4 array where each cell is empty (`0`) or holds a power of two.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..3 (top to bottom), col ranges 0..3 (left to right)
//!
//! Positions outside the grid and values that are not powers of two are
//! programmer errors and panic.
//!
//! # Line order
//!
//! Lines are walked from the edge tiles move towards (slot 0) back to the far
//! edge. Moving `Right`, row slots run col 3, 2, 1, 0; moving `Down`, column
//! slots run row 3, 2, 1, 0. The resolver packs and merges in that order, so
//! the tile nearest the destination edge settles first.

use arrayvec::ArrayVec;

use crate::types::{is_tile_value, Axis, Direction, Position, Tile, CELL_COUNT, GRID_SIZE};

/// Cells in one row or column
pub const LINE_LEN: usize = GRID_SIZE as usize;

/// Row-major 2D copy of the grid values
pub type GridValues = [[u32; LINE_LEN]; LINE_LEN];

/// The game grid - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of values, row-major order (row * SIZE + col)
    cells: [u32; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Calculate flat index, failing fast on out-of-range positions
    #[inline(always)]
    fn index(position: Position) -> usize {
        assert!(
            position.in_bounds(),
            "position ({}, {}) is outside the {}x{} grid",
            position.row,
            position.col,
            GRID_SIZE,
            GRID_SIZE
        );
        position.index()
    }

    /// Get size of the grid (cells per line)
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get value at position (0 = empty)
    pub fn get(&self, position: Position) -> u32 {
        self.cells[Self::index(position)]
    }

    /// Set value at position (0 clears the cell)
    pub fn set(&mut self, position: Position, value: u32) {
        assert!(is_tile_value(value), "{value} is not a valid tile value");
        self.cells[Self::index(position)] = value;
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get(position) == 0
    }

    /// All positions whose value is 0, in row-major order
    pub fn empty_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// All occupied cells, in row-major order
    pub fn tiles(&self) -> ArrayVec<Tile, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| Tile::new(Position::from_index(i), v))
            .collect()
    }

    /// Positions of one line, starting at the edge tiles move towards.
    ///
    /// `index` selects the row (Left/Right) or the column (Up/Down). Slot 0 is the
    /// cell tiles pack against, slot `LINE_LEN - 1` the cell furthest from it.
    pub fn line(direction: Direction, index: u8) -> [Position; LINE_LEN] {
        assert!(index < GRID_SIZE, "line {index} is outside the grid");
        let mut out = [Position::new(0, 0); LINE_LEN];
        for (slot, pos) in out.iter_mut().enumerate() {
            let along = if direction.towards_high_index() {
                GRID_SIZE - 1 - slot as u8
            } else {
                slot as u8
            };
            *pos = match direction.axis() {
                Axis::Row => Position::new(index, along),
                Axis::Column => Position::new(along, index),
            };
        }
        out
    }

    /// Non-empty tiles of one line in line order (see the module docs).
    pub fn tiles_in_line(
        &self,
        axis: Axis,
        index: u8,
        direction: Direction,
    ) -> ArrayVec<Tile, LINE_LEN> {
        assert_eq!(axis, direction.axis(), "{direction:?} does not move along {axis:?}");
        Self::line(direction, index)
            .into_iter()
            .filter_map(|pos| {
                let value = self.get(pos);
                (value != 0).then_some(Tile::new(pos, value))
            })
            .collect()
    }

    /// Check if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Largest tile value (0 on an empty grid)
    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }

    /// Create from row-major 2D values
    ///
    /// Panics if any value is not a valid tile value.
    pub fn from_rows(rows: GridValues) -> Self {
        let mut grid = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                grid.set(Position::new(row as u8, col as u8), value);
            }
        }
        grid
    }

    /// Create from tiles, leaving every other cell empty
    ///
    /// Returns None if a tile is out of range, has an invalid value, or two tiles
    /// share a position.
    pub fn try_from_tiles(tiles: &[Tile]) -> Option<Self> {
        let mut grid = Self::new();
        let mut seen = [false; CELL_COUNT];
        for tile in tiles {
            if !tile.position.in_bounds() || !is_tile_value(tile.value) {
                return None;
            }
            let idx = tile.position.index();
            if seen[idx] {
                return None;
            }
            seen[idx] = true;
            grid.cells[idx] = tile.value;
        }
        Some(grid)
    }

    /// Write the values into a row-major 2D array (renderer-facing copy)
    pub fn write_rows(&self, out: &mut GridValues) {
        for (i, &value) in self.cells.iter().enumerate() {
            out[i / LINE_LEN][i % LINE_LEN] = value;
        }
    }

    pub fn rows(&self) -> GridValues {
        let mut out = [[0; LINE_LEN]; LINE_LEN];
        self.write_rows(&mut out);
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
