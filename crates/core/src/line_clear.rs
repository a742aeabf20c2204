//! Line clearing - removes full rows and lets the rows above drop in
//!
//! Rows are scanned bottom to top. After a row is removed the row above has
//! shifted into the same index, so that index is examined again before the
//! scan moves up.

use tracing::debug;

use crate::grid::Grid;

fn clearable(grid: &Grid, row: usize, require_uniform_color: bool) -> bool {
    if require_uniform_color {
        grid.row_is_uniform(row)
    } else {
        grid.row_is_full(row)
    }
}

/// Clear every full row (optionally only single-colour rows).
/// Returns the number of rows cleared.
pub fn clear_full_lines(grid: &mut Grid, require_uniform_color: bool) -> u32 {
    clear_full_lines_with_rows(grid, require_uniform_color).len() as u32
}

/// Like [`clear_full_lines`] but reports which rows were cleared, numbered as
/// they were before the clear, sorted bottom to top.
pub fn clear_full_lines_with_rows(grid: &mut Grid, require_uniform_color: bool) -> Vec<usize> {
    let mut cleared = Vec::new();
    let mut row = grid.height() as isize - 1;

    while row >= 0 {
        let y = row as usize;
        if clearable(grid, y, require_uniform_color) {
            grid.remove_row(y);
            // Every earlier removal shifted this row down by one.
            cleared.push(y - cleared.len());
        } else {
            row -= 1;
        }
    }

    if !cleared.is_empty() {
        debug!(lines = cleared.len(), uniform = require_uniform_color, "cleared lines");
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_full_rows_clear_in_one_pass() {
        let mut grid = Grid::from_ascii(&[
            "R...", //
            "RRRR", //
            "BBBB", //
        ])
        .unwrap();
        assert_eq!(clear_full_lines(&mut grid, false), 2);
        assert_eq!(grid.to_ascii(), vec!["....", "....", "R..."]);
    }

    #[test]
    fn reported_rows_use_original_numbering() {
        let mut grid = Grid::from_ascii(&[
            "RRRR", //
            "R...", //
            "RRRR", //
            "GGGG", //
        ])
        .unwrap();
        let rows = clear_full_lines_with_rows(&mut grid, false);
        assert_eq!(rows, vec![3, 2, 0]);
        assert_eq!(grid.to_ascii(), vec!["....", "....", "....", "R..."]);
    }

    #[test]
    fn mixed_colours_survive_uniform_mode() {
        let mut grid = Grid::from_ascii(&[
            "RRBR", //
            "YYYY", //
        ])
        .unwrap();
        assert_eq!(clear_full_lines(&mut grid, true), 1);
        assert_eq!(grid.to_ascii(), vec!["....", "RRBR"]);
        assert_eq!(clear_full_lines(&mut grid, true), 0);
        assert_eq!(clear_full_lines(&mut grid, false), 1);
    }

    #[test]
    fn entirely_full_grid_clears_completely() {
        let mut grid = Grid::from_ascii(&["RR", "BB", "GG"]).unwrap();
        assert_eq!(clear_full_lines(&mut grid, false), 3);
        assert_eq!(grid.occupied_count(), 0);
    }
}
