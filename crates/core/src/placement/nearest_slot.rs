use blockshot_types::PolicyKind;

use super::{Payload, Placement, PlacementPolicy};
use crate::error::PlaceError;
use crate::grid::Grid;

/// Single cells land where they were shot, then get pushed one column
/// sideways if the neighbouring slot in the push direction is free.
///
/// The push is a single step; it never cascades into further cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestSlot;

impl PlacementPolicy for NearestSlot {
    fn kind(&self) -> PolicyKind {
        PolicyKind::NearestSlot
    }

    fn try_place(
        &mut self,
        payload: Payload<'_>,
        grid: &mut Grid,
    ) -> Result<Placement, PlaceError> {
        let Payload::Cell(cell) = payload else {
            return Err(PlaceError::UnsupportedPayload);
        };

        match grid.try_get(cell.col, cell.row) {
            None => return Err(PlaceError::OutOfBounds),
            Some(Some(_)) => return Err(PlaceError::Occupied),
            Some(None) => {}
        }

        let mut col = cell.col;
        if let Some(push) = cell.push {
            let shifted = cell.col + push.dx();
            if grid.is_vacant(shifted, cell.row) {
                col = shifted;
            }
        }
        grid.set(col as usize, cell.row as usize, Some(cell.color));

        Ok(Placement {
            origin: (col, cell.row),
            cells: 1,
            pattern_matched: false,
        })
    }
}
