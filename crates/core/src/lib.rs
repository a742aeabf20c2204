//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the shooting/stacking game: shape masks,
//! the settled-cell grid, collision probes, placement strategies, line
//! clearing and the per-frame session state machine. It has no dependency on
//! rendering, audio or input devices.
//!
//! - **Deterministic**: same seed and intents produce identical sessions
//! - **Testable**: every rule is exercised in isolation
//! - **Headless**: the host owns the frame loop and presentation
//!
//! # Module Structure
//!
//! - [`shape`]: polyomino masks and the seven-shape catalog
//! - [`grid`]: fixed-size grid of settled cells, row removal and column gravity
//! - [`collision`]: world-space hit tests against shape masks
//! - [`placement`]: the four placement strategies behind one trait
//! - [`line_clear`]: bottom-up full-row clearing
//! - [`session`]: entities, spawning, scoring and game over
//! - [`config`]: TOML-backed session configuration
//!
//! # Example
//!
//! ```
//! use blockshot_core::{GameConfig, GameSession};
//! use blockshot_core::types::{GameIntent, PolicyKind};
//!
//! let config = GameConfig::for_policy(PolicyKind::FirstFit);
//! let mut session = GameSession::new(config, 12345).unwrap();
//!
//! session.apply_intent(GameIntent::MoveRight);
//! session.apply_intent(GameIntent::Fire);
//! for _ in 0..60 {
//!     session.tick();
//! }
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.frame, 60);
//! assert!(!snapshot.pieces.is_empty());
//! ```

pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod grid;
pub mod line_clear;
pub mod placement;
pub mod rng;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use blockshot_types as types;

pub use collision::{hit_test, overlaps_rect, world_to_grid};
pub use config::GameConfig;
pub use entities::{FallingPiece, Player, Projectile};
pub use error::{ConfigError, GridError, PlaceError, ShapeError};
pub use grid::Grid;
pub use line_clear::{clear_full_lines, clear_full_lines_with_rows};
pub use placement::{
    CellDrop, Payload, Placement, PlacementPolicy, Policy, Push, TargetPattern,
};
pub use rng::SimpleRng;
pub use session::{FrameEvents, GameSession};
pub use shape::{LocalCell, ShapeMask};
pub use snapshot::{GameSnapshot, PieceSnapshot, TargetSnapshot};
