//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core engine, the JSON adapter
//! and the simulator alike.
//!
//! # Playfield Dimensions
//!
//! The default playfield is a 400x600 pixel screen split into 30 pixel cells:
//!
//! - **Width**: 13 columns (indexed 0-12)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Frame Constants
//!
//! All motion is expressed per frame; the host loop runs at ~60 FPS.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Fixed frame interval |
//! | `PLAYER_SPEED` | 5 | Player lane speed (px/frame) |
//! | `PROJECTILE_SPEED` | 7 | Projectile rise speed (px/frame) |
//! | `FALL_SPEED` | 2 | Falling piece speed (px/frame) |
//! | `SPAWN_INTERVAL_FRAMES` | 45 | Frames between piece spawns |
//!
//! # Examples
//!
//! ```
//! use blockshot_types::{GameIntent, PolicyKind, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(GameIntent::from_str("moveLeft"), Some(GameIntent::MoveLeft));
//! assert_eq!(PolicyKind::from_str("first-fit"), Some(PolicyKind::FirstFit));
//!
//! assert_eq!(GRID_WIDTH, 13);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Screen width in pixels
pub const SCREEN_WIDTH: f32 = 400.0;

/// Screen height in pixels
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Edge length of one grid cell in pixels
pub const CELL_SIZE: f32 = 30.0;

/// Grid width in cells (screen width / cell size)
pub const GRID_WIDTH: u16 = 13;

/// Grid height in cells (screen height / cell size)
pub const GRID_HEIGHT: u16 = 20;

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
pub const PLAYER_SPEED: f32 = 5.0;

/// Gap between the player's bottom edge and the bottom of the screen
pub const PLAYER_MARGIN: f32 = 10.0;

pub const PROJECTILE_WIDTH: f32 = 4.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
pub const PROJECTILE_SPEED: f32 = 7.0;

/// Falling piece speed in pixels per frame
pub const FALL_SPEED: f32 = 2.0;

/// Frames between two piece spawns
pub const SPAWN_INTERVAL_FRAMES: u32 = 45;

/// Horizontal sway of single-cell pieces (px/frame peak)
pub const DRIFT_AMPLITUDE: f32 = 2.0;

/// The seven polyomino shapes of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// Catalog order; random selection indexes into this.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockshot_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Colour tag carried by every occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl BlockColor {
    pub const ALL: [BlockColor; 4] = [
        BlockColor::Red,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Yellow,
    ];

    /// Numeric code used in observations (0 is reserved for an empty cell)
    pub fn code(self) -> u8 {
        match self {
            BlockColor::Red => 1,
            BlockColor::Blue => 2,
            BlockColor::Green => 3,
            BlockColor::Yellow => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BlockColor::Red),
            2 => Some(BlockColor::Blue),
            3 => Some(BlockColor::Green),
            4 => Some(BlockColor::Yellow),
            _ => None,
        }
    }

    /// Single-letter form used by the ASCII grid dump
    pub fn as_char(self) -> char {
        match self {
            BlockColor::Red => 'R',
            BlockColor::Blue => 'B',
            BlockColor::Green => 'G',
            BlockColor::Yellow => 'Y',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(BlockColor::Red),
            'B' => Some(BlockColor::Blue),
            'G' => Some(BlockColor::Green),
            'Y' => Some(BlockColor::Yellow),
            _ => None,
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Occupied, tagged with its colour
pub type Cell = Option<BlockColor>;

/// Encode a cell as its observation code (0 = empty)
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, BlockColor::code)
}

/// Player intents delivered by the input layer
///
/// The input collaborator polls and debounces keys; the core only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameIntent {
    /// Move the player one step left (repeat every frame while held)
    MoveLeft,
    /// Move the player one step right
    MoveRight,
    /// Fire a projectile from the player's position
    Fire,
    /// Re-initialize the whole session
    Restart,
}

impl GameIntent {
    /// Parse intent from string (for the JSON protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockshot_types::GameIntent;
    ///
    /// assert_eq!(GameIntent::from_str("fire"), Some(GameIntent::Fire));
    /// assert_eq!(GameIntent::from_str("MOVERIGHT"), Some(GameIntent::MoveRight));
    /// assert_eq!(GameIntent::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameIntent::MoveLeft),
            "moveright" => Some(GameIntent::MoveRight),
            "fire" => Some(GameIntent::Fire),
            "restart" => Some(GameIntent::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string for the JSON protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameIntent::MoveLeft => "moveLeft",
            GameIntent::MoveRight => "moveRight",
            GameIntent::Fire => "fire",
            GameIntent::Restart => "restart",
        }
    }
}

/// Which placement strategy a session runs
///
/// - **NearestSlot**: single cells, committed where they were shot, with a one-step push
/// - **FirstFit**: whole shapes, bottom-up / left-to-right search
/// - **SequentialCursor**: whole shapes, side by side along the bottom row
/// - **TargetMatch**: whole shapes, accepted only when they match a target pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    NearestSlot,
    FirstFit,
    SequentialCursor,
    TargetMatch,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::NearestSlot,
        PolicyKind::FirstFit,
        PolicyKind::SequentialCursor,
        PolicyKind::TargetMatch,
    ];

    /// Parse policy from string; accepts kebab-case and snake_case
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "nearest-slot" => Some(PolicyKind::NearestSlot),
            "first-fit" => Some(PolicyKind::FirstFit),
            "sequential-cursor" | "cursor" => Some(PolicyKind::SequentialCursor),
            "target-match" | "target" => Some(PolicyKind::TargetMatch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::NearestSlot => "nearest-slot",
            PolicyKind::FirstFit => "first-fit",
            PolicyKind::SequentialCursor => "sequential-cursor",
            PolicyKind::TargetMatch => "target-match",
        }
    }

    /// Whether falling pieces are single cells rather than catalog shapes
    pub fn uses_single_cells(&self) -> bool {
        matches!(self, PolicyKind::NearestSlot)
    }

    /// Whether line clears require a single colour across the row by default
    pub fn default_uniform_clears(&self) -> bool {
        matches!(self, PolicyKind::NearestSlot)
    }
}

/// Events that award points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreEvent {
    ProjectileHit,
    Placement,
    /// Awarded once per cleared line
    LineClear,
    PatternMatch,
}

impl ScoreEvent {
    pub fn points(self) -> u32 {
        match self {
            ScoreEvent::ProjectileHit => 50,
            ScoreEvent::Placement => 100,
            ScoreEvent::LineClear => 1000,
            ScoreEvent::PatternMatch => 500,
        }
    }
}

/// A position in world (screen pixel) space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in world space; (x, y) is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
