//! Error types for the core crate.
//!
//! Per-frame probes never produce errors: a coordinate that falls outside a
//! shape or the grid is a miss (`None`/`false`). The enums below cover the
//! cases a caller has to branch on.

use thiserror::Error;

/// Shape construction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape rows must all have the same length (row {row} has {found}, expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl ShapeError {
    pub fn code(self) -> &'static str {
        match self {
            ShapeError::Ragged { .. } => "ragged_shape",
        }
    }
}

/// Grid construction / text parsing failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroSized { width: usize, height: usize },
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell character {found:?} at column {col}, row {row}")]
    BadCell { col: usize, row: usize, found: char },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::ZeroSized { .. } => "zero_sized_grid",
            GridError::RaggedRow { .. } => "ragged_grid",
            GridError::BadCell { .. } => "bad_cell",
        }
    }
}

/// Reasons a placement policy refused a payload
///
/// On every variant the grid is left untouched. Only [`PlaceError::NoRoom`]
/// ends the session; the others leave the piece falling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("payload has no occupied cells")]
    EmptyPayload,
    #[error("payload kind is not handled by this policy")]
    UnsupportedPayload,
    #[error("target cell is outside the grid")]
    OutOfBounds,
    #[error("target cell is already occupied")]
    Occupied,
    #[error("shape does not match any active target pattern")]
    PatternMismatch,
    #[error("no room left on the grid for this shape")]
    NoRoom,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::EmptyPayload => "empty_payload",
            PlaceError::UnsupportedPayload => "unsupported_payload",
            PlaceError::OutOfBounds => "out_of_bounds",
            PlaceError::Occupied => "occupied",
            PlaceError::PatternMismatch => "pattern_mismatch",
            PlaceError::NoRoom => "no_room",
        }
    }

    /// Whether this rejection ends the game rather than being a silent no-op
    pub fn is_session_fatal(self) -> bool {
        matches!(self, PlaceError::NoRoom)
    }
}

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be zero or a positive, finite number (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("grid of {grid_width}x{grid_height} cells does not fit a {screen_width}x{screen_height} screen")]
    GridExceedsScreen {
        grid_width: u16,
        grid_height: u16,
        screen_width: f32,
        screen_height: f32,
    },
    #[error("grid must be at least {min}x{min} cells to hold every catalog shape")]
    GridTooSmall { min: u16 },
    #[error("target_count must be 1 or 2 (got {0})")]
    TargetCount(u8),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NotPositive { .. }
            | ConfigError::Negative { .. }
            | ConfigError::Zero { .. } => "invalid_value",
            ConfigError::GridExceedsScreen { .. } | ConfigError::GridTooSmall { .. } => {
                "invalid_grid"
            }
            ConfigError::TargetCount(_) => "invalid_target_count",
            ConfigError::Io { .. } => "io",
            ConfigError::Parse(_) => "parse",
        }
    }
}
