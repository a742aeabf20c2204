//! Shape module - polyomino masks and the seven-shape catalog
//!
//! A [`ShapeMask`] is a rectangular boolean matrix. Its dimensions never change
//! after construction; individual cells may only flip from occupied to empty
//! (a projectile knocking a cell out). Catalog shapes are compile-time data and
//! every falling piece gets its own copy.

use blockshot_types::ShapeKind;

use crate::error::ShapeError;
use crate::rng::SimpleRng;

/// Catalog row storage: `1` = occupied
type CatalogRows = &'static [&'static [u8]];

const I_ROWS: CatalogRows = &[&[1, 1, 1, 1]];
const O_ROWS: CatalogRows = &[&[1, 1], &[1, 1]];
const T_ROWS: CatalogRows = &[&[1, 1, 1], &[0, 1, 0]];
const L_ROWS: CatalogRows = &[&[1, 1, 1], &[1, 0, 0]];
const J_ROWS: CatalogRows = &[&[1, 1, 1], &[0, 0, 1]];
const S_ROWS: CatalogRows = &[&[0, 1, 1], &[1, 1, 0]];
const Z_ROWS: CatalogRows = &[&[1, 1, 0], &[0, 1, 1]];

/// Get the catalog rows for a shape kind
pub fn catalog_rows(kind: ShapeKind) -> CatalogRows {
    match kind {
        ShapeKind::I => I_ROWS,
        ShapeKind::O => O_ROWS,
        ShapeKind::T => T_ROWS,
        ShapeKind::L => L_ROWS,
        ShapeKind::J => J_ROWS,
        ShapeKind::S => S_ROWS,
        ShapeKind::Z => Z_ROWS,
    }
}

/// A cell coordinate inside a shape's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalCell {
    pub col: usize,
    pub row: usize,
}

/// Rectangular occupancy matrix of a polyomino
///
/// Equality is structural: two masks are equal iff they have the same
/// dimensions and every cell matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    width: usize,
    height: usize,
    /// Row-major occupancy (row * width + col)
    cells: Vec<bool>,
}

impl ShapeMask {
    /// Fresh copy of a catalog shape
    pub fn from_kind(kind: ShapeKind) -> Self {
        let rows = catalog_rows(kind);
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let cells = rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Uniformly random catalog shape; returns the kind alongside the mask
    pub fn random(rng: &mut SimpleRng) -> (ShapeKind, Self) {
        let kind = rng.next_shape();
        (kind, Self::from_kind(kind))
    }

    /// The 1x1 single-cell payload
    pub fn unit() -> Self {
        Self {
            width: 1,
            height: 1,
            cells: vec![true],
        }
    }

    /// Build from explicit rows; every row must have the same length.
    ///
    /// Zero rows (or zero-length rows) produce a degenerate zero-area mask.
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut cells = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        // A mask with zero columns has no area regardless of row count.
        let height = if width == 0 { 0 } else { height };
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Occupancy at (col, row); `None` when outside the bounding box
    pub fn cell_at(&self, col: usize, row: usize) -> Option<bool> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Knock out a cell. Returns whether anything changed (false if the cell
    /// was already empty or the coordinate is out of range).
    pub fn remove_cell(&mut self, col: usize, row: usize) -> bool {
        match self.index(col, row) {
            Some(idx) if self.cells[idx] => {
                self.cells[idx] = false;
                true
            }
            _ => false,
        }
    }

    /// True iff no cell is occupied
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = LocalCell> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(move |(idx, _)| LocalCell {
                col: idx % width,
                row: idx / width,
            })
    }

    /// First occupied cell scanning row-major from the top-left
    pub fn first_occupied(&self) -> Option<LocalCell> {
        self.occupied_cells().next()
    }

    /// Index of the lowest row holding at least one occupied cell
    pub fn bottom_occupied_row(&self) -> Option<usize> {
        self.occupied_cells().map(|c| c.row).max()
    }

    /// Bounding corners (top-left, bottom-right) of the occupied cells
    pub fn occupied_bounds(&self) -> Option<(LocalCell, LocalCell)> {
        let mut cells = self.occupied_cells();
        let first = cells.next()?;
        let (mut min, mut max) = (first, first);
        for cell in cells {
            min.col = min.col.min(cell.col);
            min.row = min.row.min(cell.row);
            max.col = max.col.max(cell.col);
            max.row = max.row.max(cell.row);
        }
        Some((min, max))
    }

    /// Rows as booleans (for snapshots and debugging)
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // chunks() panics on 0; a zero-width mask has no rows anyway.
        self.cells.chunks(self.width.max(1))
    }
}
