use blockshot_types::PolicyKind;

use super::{check_fit, shape_payload, stamp, Payload, Placement, PlacementPolicy};
use crate::error::PlaceError;
use crate::grid::Grid;

/// Whole shapes go to the first free position found scanning anchor rows
/// from the bottom of the grid upward and, within a row, columns left to
/// right. A shape that fits nowhere ends the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn kind(&self) -> PolicyKind {
        PolicyKind::FirstFit
    }

    fn try_place(
        &mut self,
        payload: Payload<'_>,
        grid: &mut Grid,
    ) -> Result<Placement, PlaceError> {
        let (mask, color) = shape_payload(payload)?;
        let Some((min, max)) = mask.occupied_bounds() else {
            return Err(PlaceError::EmptyPayload);
        };

        // Anchor ranges keep every occupied cell inside the grid; empty
        // margins of a damaged shape may hang over the edge.
        let first_row = grid.height() as i32 - 1 - max.row as i32;
        let last_row = -(min.row as i32);
        let first_col = -(min.col as i32);
        let last_col = grid.width() as i32 - 1 - max.col as i32;

        let mut row = first_row;
        while row >= last_row {
            for col in first_col..=last_col {
                if check_fit(grid, mask, (col, row)).is_ok() {
                    let cells = stamp(grid, mask, (col, row), color);
                    return Ok(Placement {
                        origin: (col, row),
                        cells,
                        pattern_matched: false,
                    });
                }
            }
            row -= 1;
        }

        Err(PlaceError::NoRoom)
    }
}
