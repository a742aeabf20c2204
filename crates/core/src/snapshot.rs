use blockshot_types::{BlockColor, Cell, PolicyKind, Rect, ShapeKind};

use crate::entities::FallingPiece;
use crate::placement::TargetPattern;

#[derive(Debug, Clone, PartialEq)]
pub struct PieceSnapshot {
    pub id: u32,
    pub kind: Option<ShapeKind>,
    pub color: BlockColor,
    pub x: f32,
    pub y: f32,
    /// Current (possibly damaged) mask, row by row
    pub mask: Vec<Vec<bool>>,
}

impl From<&FallingPiece> for PieceSnapshot {
    fn from(value: &FallingPiece) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            color: value.color,
            x: value.pos.x,
            y: value.pos.y,
            mask: value.mask.rows().map(<[bool]>::to_vec).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSnapshot {
    pub kind: ShapeKind,
    pub origin: (usize, usize),
    /// Covered grid cells as (col, row)
    pub cells: Vec<(usize, usize)>,
}

impl From<&TargetPattern> for TargetSnapshot {
    fn from(value: &TargetPattern) -> Self {
        Self {
            kind: value.kind(),
            origin: value.origin(),
            cells: value.cells().collect(),
        }
    }
}

/// Read-only view of a session at the end of a frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Row-major, `grid_width * grid_height` entries
    pub cells: Vec<Cell>,
    pub pieces: Vec<PieceSnapshot>,
    pub projectiles: Vec<Rect>,
    pub player: Rect,
    pub targets: Vec<TargetSnapshot>,
    pub policy: PolicyKind,
    pub score: u32,
    pub lines: u32,
    pub frame: u64,
    pub episode_id: u32,
    pub seed: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Rows of the grid, top first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.grid_width.max(1))
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
