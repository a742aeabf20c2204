//! Collision probe - world-space hit testing against shape masks
//!
//! Called every frame for every projectile/piece pair and for the player,
//! so nothing here can fail: degenerate input (zero-area shapes, non-positive
//! or non-finite cell sizes, NaN coordinates) is simply a miss.

use blockshot_types::{Point, Rect};

use crate::shape::{LocalCell, ShapeMask};

fn usable_cell_size(cell_size: f32) -> bool {
    cell_size.is_finite() && cell_size > 0.0
}

/// Map a world point into the shape's local cell and report whether it lands
/// on an occupied cell.
///
/// `origin` is the world position of the shape's top-left corner.
pub fn hit_test(
    point: Point,
    origin: Point,
    shape: &ShapeMask,
    cell_size: f32,
) -> Option<LocalCell> {
    if !usable_cell_size(cell_size) || shape.width() == 0 || shape.height() == 0 {
        return None;
    }

    let local_x = ((point.x - origin.x) / cell_size).floor();
    let local_y = ((point.y - origin.y) / cell_size).floor();
    if !local_x.is_finite() || !local_y.is_finite() || local_x < 0.0 || local_y < 0.0 {
        return None;
    }

    let cell = LocalCell {
        col: local_x as usize,
        row: local_y as usize,
    };
    match shape.cell_at(cell.col, cell.row) {
        Some(true) => Some(cell),
        _ => None,
    }
}

/// World-space square covered by a shape cell
pub fn cell_rect(origin: Point, cell: LocalCell, cell_size: f32) -> Rect {
    Rect::new(
        origin.x + cell.col as f32 * cell_size,
        origin.y + cell.row as f32 * cell_size,
        cell_size,
        cell_size,
    )
}

/// Whether any occupied cell of the shape overlaps `rect`
pub fn overlaps_rect(rect: &Rect, origin: Point, shape: &ShapeMask, cell_size: f32) -> bool {
    if !usable_cell_size(cell_size) {
        return false;
    }
    shape
        .occupied_cells()
        .any(|cell| cell_rect(origin, cell, cell_size).intersects(rect))
}

/// Grid cell containing a world point; `None` for negative or non-finite input
pub fn world_to_grid(point: Point, cell_size: f32) -> Option<(i32, i32)> {
    if !usable_cell_size(cell_size) {
        return None;
    }
    let col = (point.x / cell_size).floor();
    let row = (point.y / cell_size).floor();
    if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
        return None;
    }
    Some((col as i32, row as i32))
}
