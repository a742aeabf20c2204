//! Placement policies - deciding whether and where a payload lands on the grid
//!
//! Four strategies share one contract ([`PlacementPolicy::try_place`]): on
//! `Ok` the grid has been written, on `Err` it is untouched.
//!
//! | Policy | Payload | Search | Fatal rejection |
//! |--------|---------|--------|-----------------|
//! | [`NearestSlot`] | single cell | none, one-step lateral push | never |
//! | [`FirstFit`] | shape | bottom row up, leftmost column first | no fit anywhere |
//! | [`SequentialCursor`] | shape | none, next cursor column | cursor overflow |
//! | [`TargetMatch`] | shape | the matching target's anchor | never |
//!
//! Payloads with no occupied cells are refused before the grid is examined.

mod cursor;
mod first_fit;
mod nearest_slot;
mod target;

pub use cursor::SequentialCursor;
pub use first_fit::FirstFit;
pub use nearest_slot::NearestSlot;
pub use target::{TargetMatch, TargetPattern};

use blockshot_types::{BlockColor, PolicyKind};

use crate::error::PlaceError;
use crate::grid::Grid;
use crate::shape::ShapeMask;

/// Lateral direction for the nearest-slot push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Push {
    Left,
    Right,
}

impl Push {
    pub fn dx(self) -> i32 {
        match self {
            Push::Left => -1,
            Push::Right => 1,
        }
    }

    /// Left when the impact was left of the piece centre, else right
    pub fn from_impact(impact_x: f32, center_x: f32) -> Self {
        if impact_x < center_x {
            Push::Left
        } else {
            Push::Right
        }
    }
}

/// A single cell aimed at a grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDrop {
    pub col: i32,
    pub row: i32,
    pub color: BlockColor,
    pub push: Option<Push>,
}

/// What is being committed
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Cell(CellDrop),
    Shape {
        mask: &'a ShapeMask,
        color: BlockColor,
    },
}

/// A committed placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Grid position of the payload's top-left corner (the cell itself for
    /// single-cell payloads, after any push)
    pub origin: (i32, i32),
    /// Number of grid cells written
    pub cells: usize,
    /// Set when the payload fulfilled a target pattern
    pub pattern_matched: bool,
}

/// Strategy seam shared by the four placement variants
pub trait PlacementPolicy {
    fn kind(&self) -> PolicyKind;

    /// Commit `payload` into `grid`, or refuse without touching it.
    fn try_place(&mut self, payload: Payload<'_>, grid: &mut Grid)
        -> Result<Placement, PlaceError>;

    /// Active target patterns, if the strategy keeps any
    fn targets(&self) -> &[TargetPattern] {
        &[]
    }
}

/// Closed set of strategies, selected per session
#[derive(Debug, Clone)]
pub enum Policy {
    NearestSlot(NearestSlot),
    FirstFit(FirstFit),
    SequentialCursor(SequentialCursor),
    TargetMatch(TargetMatch),
}

impl Policy {
    /// Build the strategy for `kind` on a grid of the given size.
    ///
    /// `target_count` is only read by the target-match strategy; `seed` drives
    /// target generation.
    pub fn new(
        kind: PolicyKind,
        grid_width: usize,
        grid_height: usize,
        target_count: u8,
        seed: u32,
    ) -> Self {
        match kind {
            PolicyKind::NearestSlot => Policy::NearestSlot(NearestSlot),
            PolicyKind::FirstFit => Policy::FirstFit(FirstFit),
            PolicyKind::SequentialCursor => {
                Policy::SequentialCursor(SequentialCursor::new(grid_width, grid_height, seed))
            }
            PolicyKind::TargetMatch => Policy::TargetMatch(TargetMatch::new(
                grid_width,
                grid_height,
                target_count,
                seed,
            )),
        }
    }

    fn inner(&self) -> &dyn PlacementPolicy {
        match self {
            Policy::NearestSlot(p) => p,
            Policy::FirstFit(p) => p,
            Policy::SequentialCursor(p) => p,
            Policy::TargetMatch(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PlacementPolicy {
        match self {
            Policy::NearestSlot(p) => p,
            Policy::FirstFit(p) => p,
            Policy::SequentialCursor(p) => p,
            Policy::TargetMatch(p) => p,
        }
    }
}

impl PlacementPolicy for Policy {
    fn kind(&self) -> PolicyKind {
        self.inner().kind()
    }

    fn try_place(
        &mut self,
        payload: Payload<'_>,
        grid: &mut Grid,
    ) -> Result<Placement, PlaceError> {
        self.inner_mut().try_place(payload, grid)
    }

    fn targets(&self) -> &[TargetPattern] {
        self.inner().targets()
    }
}

/// Unpack a shape payload, refusing single cells and depleted shapes
fn shape_payload<'a>(payload: Payload<'a>) -> Result<(&'a ShapeMask, BlockColor), PlaceError> {
    match payload {
        Payload::Shape { mask, .. } if mask.is_empty() => Err(PlaceError::EmptyPayload),
        Payload::Shape { mask, color } => Ok((mask, color)),
        Payload::Cell(_) => Err(PlaceError::UnsupportedPayload),
    }
}

/// Check that every occupied cell of `mask`, with its top-left at `origin`,
/// lands on a vacant grid cell.
fn check_fit(grid: &Grid, mask: &ShapeMask, origin: (i32, i32)) -> Result<(), PlaceError> {
    for cell in mask.occupied_cells() {
        let col = origin.0 + cell.col as i32;
        let row = origin.1 + cell.row as i32;
        match grid.try_get(col, row) {
            None => return Err(PlaceError::OutOfBounds),
            Some(Some(_)) => return Err(PlaceError::Occupied),
            Some(None) => {}
        }
    }
    Ok(())
}

/// Write the occupied cells of `mask`; the fit must already be checked.
fn stamp(grid: &mut Grid, mask: &ShapeMask, origin: (i32, i32), color: BlockColor) -> usize {
    let mut written = 0;
    for cell in mask.occupied_cells() {
        let col = (origin.0 + cell.col as i32) as usize;
        let row = (origin.1 + cell.row as i32) as usize;
        grid.set(col, row, Some(color));
        written += 1;
    }
    written
}

/// Check then write; the grid is unchanged on error
fn commit_shape(
    grid: &mut Grid,
    mask: &ShapeMask,
    origin: (i32, i32),
    color: BlockColor,
) -> Result<Placement, PlaceError> {
    check_fit(grid, mask, origin)?;
    let cells = stamp(grid, mask, origin, color);
    Ok(Placement {
        origin,
        cells,
        pattern_matched: false,
    })
}
