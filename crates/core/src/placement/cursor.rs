use blockshot_types::PolicyKind;
use tracing::debug;

use super::{commit_shape, shape_payload, Payload, Placement, PlacementPolicy, TargetPattern};
use crate::error::PlaceError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shape::ShapeMask;

/// Shapes are laid left to right along the bottom row, one empty column
/// between neighbours. Once the cursor runs past the right edge nothing more
/// fits and the game ends.
///
/// The policy also publishes an advisory preview of a shape sitting at the
/// next cursor slot; it never constrains what is accepted.
#[derive(Debug, Clone)]
pub struct SequentialCursor {
    cursor: usize,
    grid_width: usize,
    grid_height: usize,
    preview: Option<TargetPattern>,
    rng: SimpleRng,
}

impl SequentialCursor {
    pub fn new(grid_width: usize, grid_height: usize, seed: u32) -> Self {
        let mut policy = Self {
            cursor: 0,
            grid_width,
            grid_height,
            preview: None,
            rng: SimpleRng::new(seed ^ 0x85EB_CA6B),
        };
        policy.refresh_preview();
        policy
    }

    /// Column where the next shape's left edge will go
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn refresh_preview(&mut self) {
        let kind = self.rng.next_shape();
        let height = ShapeMask::from_kind(kind).height();
        self.preview = self
            .grid_height
            .checked_sub(height)
            .and_then(|row| {
                TargetPattern::new(kind, (self.cursor, row), self.grid_width, self.grid_height)
            });
    }
}

impl PlacementPolicy for SequentialCursor {
    fn kind(&self) -> PolicyKind {
        PolicyKind::SequentialCursor
    }

    fn try_place(
        &mut self,
        payload: Payload<'_>,
        grid: &mut Grid,
    ) -> Result<Placement, PlaceError> {
        let (mask, color) = shape_payload(payload)?;
        if self.cursor + mask.width() > self.grid_width {
            return Err(PlaceError::NoRoom);
        }
        let Some(bottom) = mask.bottom_occupied_row() else {
            return Err(PlaceError::EmptyPayload);
        };

        // Lowest occupied row rests on the bottom grid row.
        let origin = (
            self.cursor as i32,
            (self.grid_height as i32 - 1) - bottom as i32,
        );
        let placement = commit_shape(grid, mask, origin, color)?;

        self.cursor += mask.width() + 1;
        debug!(cursor = self.cursor, "cursor advanced");
        self.refresh_preview();
        Ok(placement)
    }

    fn targets(&self) -> &[TargetPattern] {
        self.preview.as_slice()
    }
}
