//! World entities: the player, its projectiles and the falling pieces
//!
//! All positions are in screen pixels, `y` growing downward.

use blockshot_types::{BlockColor, Point, Rect, ShapeKind, FRAME_MS};

use crate::config::GameConfig;
use crate::shape::ShapeMask;

/// Phase advance of the sideways sway per millisecond
const DRIFT_RATE_PER_MS: f32 = 0.002;

/// The shooter at the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    /// Horizontally centred, `player_margin` above the bottom edge
    pub fn new(config: &GameConfig) -> Self {
        let x = (config.screen_width - config.player_width) / 2.0;
        let y = config.screen_height - config.player_height - config.player_margin;
        Self {
            rect: Rect::new(x, y, config.player_width, config.player_height),
        }
    }

    /// Shift by `dx`, clamped to the lane. Returns whether the player moved.
    pub fn shift(&mut self, dx: f32, lane: (f32, f32)) -> bool {
        let x = (self.rect.x + dx).clamp(lane.0, lane.1);
        let moved = x != self.rect.x;
        self.rect.x = x;
        moved
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
}

impl Projectile {
    /// Centred on the player's top edge
    pub fn fired_from(player: &Player, config: &GameConfig) -> Self {
        let center = player.rect.center();
        Self {
            rect: Rect::new(
                center.x - config.projectile_width / 2.0,
                player.rect.y - config.projectile_height,
                config.projectile_width,
                config.projectile_height,
            ),
        }
    }

    pub fn rise(&mut self, speed: f32) {
        self.rect.y -= speed;
    }

    /// Fully above the top of the screen
    pub fn is_gone(&self) -> bool {
        self.rect.bottom() <= 0.0
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// A shape (or single cell) falling from the top
#[derive(Debug, Clone, PartialEq)]
pub struct FallingPiece {
    /// Monotonic per episode
    pub id: u32,
    /// `None` for single-cell pieces
    pub kind: Option<ShapeKind>,
    pub mask: ShapeMask,
    pub color: BlockColor,
    /// Top-left corner of the mask's bounding box
    pub pos: Point,
    /// Downward speed in px/frame
    pub velocity: f32,
    /// Sway phase in radians
    pub phase: f32,
}

impl FallingPiece {
    /// Bounding box in world space
    pub fn bounds(&self, cell_size: f32) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            self.mask.width() as f32 * cell_size,
            self.mask.height() as f32 * cell_size,
        )
    }

    /// Advance one frame: fall, then sway by up to `amplitude` px, keeping the
    /// piece between x = 0 and `right_edge`.
    pub fn step(&mut self, frame: u64, amplitude: f32, cell_size: f32, right_edge: f32) {
        if amplitude > 0.0 {
            let t = frame as f32 * FRAME_MS as f32 * DRIFT_RATE_PER_MS;
            let max_x = (right_edge - self.mask.width() as f32 * cell_size).max(0.0);
            self.pos.x = (self.pos.x + (t + self.phase).sin() * amplitude).clamp(0.0, max_x);
        }
        self.pos.y += self.velocity;
    }

    pub fn is_depleted(&self) -> bool {
        self.mask.is_empty()
    }
}
