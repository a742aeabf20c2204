use arrayvec::ArrayVec;
use blockshot_types::{PolicyKind, ShapeKind};
use tracing::{debug, warn};

use super::{commit_shape, shape_payload, Payload, Placement, PlacementPolicy};
use crate::error::PlaceError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shape::ShapeMask;

/// Random placements tried before falling back to an exhaustive scan
const RANDOM_ATTEMPTS: usize = 16;

/// A goal shape at a fixed spot on the grid
///
/// Holds the source shape plus a grid-sized mask of the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPattern {
    kind: ShapeKind,
    shape: ShapeMask,
    origin: (usize, usize),
    grid_width: usize,
    /// Grid-shaped coverage, row-major
    mask: Vec<bool>,
}

impl TargetPattern {
    /// Place `kind` with its top-left at `origin`; `None` if it would not fit
    /// inside a `grid_width x grid_height` grid.
    pub fn new(
        kind: ShapeKind,
        origin: (usize, usize),
        grid_width: usize,
        grid_height: usize,
    ) -> Option<Self> {
        let shape = ShapeMask::from_kind(kind);
        if origin.0 + shape.width() > grid_width || origin.1 + shape.height() > grid_height {
            return None;
        }
        let mut mask = vec![false; grid_width * grid_height];
        for cell in shape.occupied_cells() {
            mask[(origin.1 + cell.row) * grid_width + origin.0 + cell.col] = true;
        }
        Some(Self {
            kind,
            shape,
            origin,
            grid_width,
            mask,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The shape a delivery has to equal
    pub fn shape(&self) -> &ShapeMask {
        &self.shape
    }

    /// Grid position of the shape's top-left corner
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    /// Whether the pattern covers grid cell (col, row)
    pub fn covers(&self, col: usize, row: usize) -> bool {
        col < self.grid_width
            && self
                .mask
                .get(row * self.grid_width + col)
                .copied()
                .unwrap_or(false)
    }

    /// First covered cell scanning the mask row-major from the top-left
    pub fn anchor(&self) -> Option<(usize, usize)> {
        self.mask
            .iter()
            .position(|&covered| covered)
            .map(|idx| (idx % self.grid_width, idx / self.grid_width))
    }

    /// Covered grid cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.grid_width;
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &covered)| covered)
            .map(move |(idx, _)| (idx % width, idx / width))
    }

    pub fn overlaps(&self, other: &TargetPattern) -> bool {
        self.mask
            .iter()
            .zip(other.mask.iter())
            .any(|(&a, &b)| a && b)
    }
}

/// Row range for target origins: the upper quarter of the grid, below the
/// game-over row.
fn origin_rows(shape_height: usize, grid_height: usize) -> std::ops::RangeInclusive<usize> {
    let last = (grid_height / 4).saturating_sub(shape_height).max(1);
    1..=last
}

/// Pick a random target position for a random catalog shape, avoiding `avoid`.
fn generate_target(
    rng: &mut SimpleRng,
    grid_width: usize,
    grid_height: usize,
    avoid: Option<&TargetPattern>,
) -> Option<TargetPattern> {
    let kind = rng.next_shape();
    let shape = ShapeMask::from_kind(kind);
    if shape.width() > grid_width {
        return None;
    }
    let cols = (grid_width - shape.width() + 1) as u32;
    let rows = origin_rows(shape.height(), grid_height);
    let row_span = (rows.end() - rows.start() + 1) as u32;

    let clear = |t: &TargetPattern| avoid.map_or(true, |other| !t.overlaps(other));

    for _ in 0..RANDOM_ATTEMPTS {
        let col = rng.next_range(cols) as usize;
        let row = rows.start() + rng.next_range(row_span) as usize;
        if let Some(t) = TargetPattern::new(kind, (col, row), grid_width, grid_height) {
            if clear(&t) {
                return Some(t);
            }
        }
    }

    rows.flat_map(|row| (0..cols as usize).map(move |col| (col, row)))
        .filter_map(|origin| TargetPattern::new(kind, origin, grid_width, grid_height))
        .find(|t| clear(t))
}

/// Shapes are accepted only when they equal an active target's shape; they
/// are then copied onto that target's cells.
#[derive(Debug, Clone)]
pub struct TargetMatch {
    targets: ArrayVec<TargetPattern, 2>,
    grid_width: usize,
    grid_height: usize,
    rng: SimpleRng,
}

impl TargetMatch {
    /// `target_count` is clamped to 1..=2
    pub fn new(grid_width: usize, grid_height: usize, target_count: u8, seed: u32) -> Self {
        let mut policy = Self {
            targets: ArrayVec::new(),
            grid_width,
            grid_height,
            // Derived stream so targets don't perturb the session's spawns
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
        };
        for _ in 0..target_count.clamp(1, 2) {
            let avoid = policy.targets.first().cloned();
            match generate_target(&mut policy.rng, grid_width, grid_height, avoid.as_ref()) {
                Some(t) => policy.targets.push(t),
                None => warn!(grid_width, grid_height, "no room for another target"),
            }
        }
        policy
    }

    /// Build with explicit targets (tests, replays)
    pub fn with_targets(
        grid_width: usize,
        grid_height: usize,
        targets: impl IntoIterator<Item = TargetPattern>,
        seed: u32,
    ) -> Self {
        Self {
            targets: targets.into_iter().take(2).collect(),
            grid_width,
            grid_height,
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
        }
    }

    fn regenerate(&mut self, index: usize) {
        let other = self
            .targets
            .iter()
            .enumerate()
            .find(|(i, _)| *i != index)
            .map(|(_, t)| t.clone());
        match generate_target(
            &mut self.rng,
            self.grid_width,
            self.grid_height,
            other.as_ref(),
        ) {
            Some(next) => {
                debug!(kind = next.kind().as_str(), origin = ?next.origin(), "new target");
                self.targets[index] = next;
            }
            None => {
                warn!("no room for a replacement target; dropping it");
                self.targets.remove(index);
            }
        }
    }
}

impl PlacementPolicy for TargetMatch {
    fn kind(&self) -> PolicyKind {
        PolicyKind::TargetMatch
    }

    fn try_place(
        &mut self,
        payload: Payload<'_>,
        grid: &mut Grid,
    ) -> Result<Placement, PlaceError> {
        let (mask, color) = shape_payload(payload)?;
        let index = self
            .targets
            .iter()
            .position(|t| t.shape() == mask)
            .ok_or(PlaceError::PatternMismatch)?;

        let target = &self.targets[index];
        let (anchor, first) = match (target.anchor(), mask.first_occupied()) {
            (Some(anchor), Some(first)) => (anchor, first),
            _ => return Err(PlaceError::EmptyPayload),
        };
        // The shape's first occupied cell lands on the anchor.
        let origin = (
            anchor.0 as i32 - first.col as i32,
            anchor.1 as i32 - first.row as i32,
        );

        let mut placement = commit_shape(grid, mask, origin, color)?;
        placement.pattern_matched = true;
        self.regenerate(index);
        Ok(placement)
    }

    fn targets(&self) -> &[TargetPattern] {
        &self.targets
    }
}
