//! Grid module - the persistent playfield
//!
//! The grid is a fixed `width x height` array of cells where each cell is empty
//! or holds a colour tag. Uses a flat array for cache locality.
//! Coordinates: (col, row) where col grows left to right and row grows top to
//! bottom; row 0 is the top row, whose occupancy ends the game.

use blockshot_types::{BlockColor, Cell};

use crate::error::GridError;

/// The playfield - `width` columns x `height` rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; use [`Grid::try_new`] for
    /// unvalidated input.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Parse a grid from text rows: `.` is empty, `R`/`B`/`G`/`Y` are colours.
    /// Whitespace inside a row is ignored.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, GridError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let width = parsed.first().map_or(0, |r| r.len());
        let mut grid = Self::try_new(width, parsed.len())?;
        for (row, chars) in parsed.iter().enumerate() {
            if chars.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(BlockColor::from_char(other).ok_or(GridError::BadCell {
                        col,
                        row,
                        found: other,
                    })?),
                };
                grid.cells[row * width + col] = cell;
            }
        }
        Ok(grid)
    }

    /// Text form, one line per row (inverse of [`Grid::from_ascii`])
    pub fn to_ascii(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', BlockColor::as_char))
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from signed coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    #[inline(always)]
    fn checked_index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width && row < self.height,
            "grid access ({col}, {row}) outside {}x{}",
            self.width,
            self.height
        );
        row * self.width + col
    }

    /// Get cell at (col, row)
    ///
    /// # Panics
    ///
    /// Panics when the coordinate is outside the grid. Callers converting
    /// world coordinates should use [`Grid::try_get`].
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[self.checked_index(col, row)]
    }

    /// Set cell at (col, row)
    ///
    /// # Panics
    ///
    /// Panics when the coordinate is outside the grid.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        let idx = self.checked_index(col, row);
        self.cells[idx] = cell;
    }

    /// Bounds-checked read; `None` if out of range
    pub fn try_get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, col: i32, row: i32) -> bool {
        matches!(self.try_get(col, row), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.try_get(col, row), Some(Some(_)))
    }

    fn row_slice(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled; out-of-range rows are never full
    pub fn row_is_full(&self, row: usize) -> bool {
        row < self.height && self.row_slice(row).iter().all(|cell| cell.is_some())
    }

    /// Check if a row is full and every cell carries the same colour
    pub fn row_is_uniform(&self, row: usize) -> bool {
        if !self.row_is_full(row) {
            return false;
        }
        let cells = self.row_slice(row);
        cells.iter().all(|cell| *cell == cells[0])
    }

    /// Remove a row; every row above shifts down one and the top row becomes
    /// empty. Dimensions never change. Returns the removed cells.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn remove_row(&mut self, row: usize) -> Vec<Cell> {
        assert!(row < self.height, "row {row} outside grid of height {}", self.height);
        let width = self.width;
        let removed = self.row_slice(row).to_vec();

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..row * width, width);
        self.insert_top_empty();
        removed
    }

    /// Insert an empty row at `row`; that row and every row below shift down
    /// one. The bottom row falls off and is returned.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn insert_empty_row_at(&mut self, row: usize) -> Vec<Cell> {
        assert!(row < self.height, "row {row} outside grid of height {}", self.height);
        let width = self.width;
        let dropped = self.row_slice(self.height - 1).to_vec();

        let start = row * width;
        let end = (self.height - 1) * width;
        self.cells.copy_within(start..end, start + width);
        for cell in &mut self.cells[start..start + width] {
            *cell = None;
        }
        dropped
    }

    fn insert_top_empty(&mut self) {
        for cell in &mut self.cells[..self.width] {
            *cell = None;
        }
    }

    /// Compress one column downward: occupied cells keep their relative order
    /// and settle into the lowest free slots. Returns how many cells moved.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of range.
    pub fn compact_column_gravity(&mut self, col: usize) -> usize {
        assert!(col < self.width, "column {col} outside grid of width {}", self.width);
        let width = self.width;
        let mut moved = 0;
        let mut write_row = self.height;

        // Two-pointer scan from the bottom
        for read_row in (0..self.height).rev() {
            let cell = self.cells[read_row * width + col];
            if cell.is_none() {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row * width + col] = cell;
                self.cells[read_row * width + col] = None;
                moved += 1;
            }
        }
        moved
    }

    /// Compact every column; returns the total number of cells moved
    pub fn apply_gravity(&mut self) -> usize {
        (0..self.width).map(|col| self.compact_column_gravity(col)).sum()
    }

    /// Whether anything sits in row 0 (the game-over line)
    pub fn top_row_occupied(&self) -> bool {
        self.row_slice(0).iter().any(|cell| cell.is_some())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
