//! Game session - the per-frame state machine
//!
//! A [`GameSession`] owns everything one episode needs: the grid, the
//! placement strategy, the RNG, the player, projectiles and falling pieces.
//! The host feeds it intents between frames and calls [`GameSession::tick`]
//! once per frame.
//!
//! # Frame order
//!
//! | Step | What happens |
//! |------|--------------|
//! | 1 | Projectiles rise, pieces fall (single cells also sway) |
//! | 2 | Spawn timer advances; a new piece appears when it wraps |
//! | 3 | Projectile vs piece |
//! | 4 | Player vs piece (shape policies only) |
//! | 5 | Pieces reaching the floor |
//! | 6 | Line clear, then column gravity when enabled |
//! | 7 | Game over if the top row holds a cell |

use std::f32::consts::TAU;

use blockshot_types::{BlockColor, GameIntent, Point, ScoreEvent, ShapeKind};
use tracing::{debug, info, trace};

use crate::collision::{hit_test, overlaps_rect, world_to_grid};
use crate::config::GameConfig;
use crate::entities::{FallingPiece, Player, Projectile};
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::line_clear::clear_full_lines;
use crate::placement::{CellDrop, Payload, Policy, PlacementPolicy, Push};
use crate::rng::SimpleRng;
use crate::shape::ShapeMask;
use crate::snapshot::{GameSnapshot, PieceSnapshot, TargetSnapshot};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Projectile hits that scored
    pub hits: u32,
    /// Payloads committed to the grid (catches, shot cells, landed cells)
    pub placements: u32,
    pub patterns_matched: u32,
    /// Shape pieces shot down to nothing
    pub depleted: u32,
    pub lines_cleared: u32,
    pub spawned: bool,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    policy: Policy,
    rng: SimpleRng,
    player: Player,
    projectiles: Vec<Projectile>,
    pieces: Vec<FallingPiece>,
    spawn_timer: u32,
    /// Id handed to the next spawned piece
    next_piece_id: u32,
    score: u32,
    lines: u32,
    frame: u64,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Seed this episode started from
    seed: u32,
    game_over: bool,
}

impl GameSession {
    /// Validate `config` and start episode 0
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed, 0))
    }

    fn build(config: GameConfig, seed: u32, episode_id: u32) -> Self {
        let width = usize::from(config.grid_width);
        let height = usize::from(config.grid_height);
        let policy = Policy::new(config.policy, width, height, config.target_count, seed);
        debug!(
            policy = config.policy.as_str(),
            width, height, seed, episode_id, "session started"
        );
        Self {
            grid: Grid::new(width, height),
            policy,
            rng: SimpleRng::new(seed),
            player: Player::new(&config),
            projectiles: Vec::new(),
            pieces: Vec::new(),
            spawn_timer: 0,
            next_piece_id: 1,
            score: 0,
            lines: 0,
            frame: 0,
            episode_id,
            seed,
            game_over: false,
            config,
        }
    }

    /// Replace the whole session with a fresh episode.
    ///
    /// The new episode's seed continues from the current RNG state, so a
    /// chain of restarts is still reproducible from the first seed.
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        let episode_id = self.episode_id.wrapping_add(1);
        *self = Self::build(self.config.clone(), seed, episode_id);
        info!(episode_id, seed, "session restarted");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pieces(&self) -> &[FallingPiece] {
        &self.pieces
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Apply one player intent. Returns whether it changed anything.
    ///
    /// Once the game is over only [`GameIntent::Restart`] is honoured.
    pub fn apply_intent(&mut self, intent: GameIntent) -> bool {
        if self.game_over && intent != GameIntent::Restart {
            return false;
        }
        match intent {
            GameIntent::MoveLeft => self
                .player
                .shift(-self.config.player_speed, self.config.player_lane()),
            GameIntent::MoveRight => self
                .player
                .shift(self.config.player_speed, self.config.player_lane()),
            GameIntent::Fire => {
                self.projectiles
                    .push(Projectile::fired_from(&self.player, &self.config));
                true
            }
            GameIntent::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Spawn a random piece just above the screen, in a column where it fits.
    pub fn spawn_piece(&mut self) -> u32 {
        let (kind, mask) = if self.config.policy.uses_single_cells() {
            (None, ShapeMask::unit())
        } else {
            let (kind, mask) = ShapeMask::random(&mut self.rng);
            (Some(kind), mask)
        };
        let color = self.rng.next_color();
        let columns = self.grid.width().saturating_sub(mask.width()) + 1;
        let col = self.rng.next_range(columns as u32);
        let cell = self.config.cell_size;
        let pos = Point::new(col as f32 * cell, -(mask.height() as f32) * cell);
        let id = self.spawn_piece_at(kind, mask, color, pos);
        if let Some(piece) = self.pieces.last_mut() {
            piece.phase = self.rng.next_f32() * TAU;
        }
        id
    }

    /// Spawn a specific piece with its top-left corner at `pos`.
    pub fn spawn_piece_at(
        &mut self,
        kind: Option<ShapeKind>,
        mask: ShapeMask,
        color: BlockColor,
        pos: Point,
    ) -> u32 {
        let id = self.next_piece_id;
        self.next_piece_id = self.next_piece_id.wrapping_add(1);
        debug!(
            id,
            kind = kind.map_or("cell", |k| k.as_str()),
            x = pos.x,
            "piece spawned"
        );
        self.pieces.push(FallingPiece {
            id,
            kind,
            mask,
            color,
            pos,
            velocity: self.config.fall_speed,
            phase: 0.0,
        });
        id
    }

    /// Advance one frame. Does nothing once the game is over.
    pub fn tick(&mut self) -> FrameEvents {
        let mut events = FrameEvents::default();
        if self.game_over {
            events.game_over = true;
            return events;
        }
        self.frame += 1;
        trace!(
            frame = self.frame,
            pieces = self.pieces.len(),
            projectiles = self.projectiles.len(),
            "tick"
        );

        self.advance_entities();

        self.spawn_timer += 1;
        if self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer = 0;
            self.spawn_piece();
            events.spawned = true;
        }

        self.resolve_projectile_hits(&mut events);
        if !self.config.policy.uses_single_cells() {
            self.resolve_catches(&mut events);
        }
        if !self.game_over {
            self.resolve_floor(&mut events);
        }
        if !self.game_over {
            self.settle_grid(&mut events);
            if self.grid.top_row_occupied() {
                self.end_game("top row occupied");
            }
        }

        events.game_over = self.game_over;
        events
    }

    fn advance_entities(&mut self) {
        let speed = self.config.projectile_speed;
        for projectile in &mut self.projectiles {
            projectile.rise(speed);
        }
        self.projectiles.retain(|p| !p.is_gone());

        let amplitude = if self.config.policy.uses_single_cells() {
            self.config.drift_amplitude
        } else {
            0.0
        };
        let (frame, cell, width) = (self.frame, self.config.cell_size, self.config.play_width());
        for piece in &mut self.pieces {
            piece.step(frame, amplitude, cell, width);
        }
    }

    fn resolve_projectile_hits(&mut self, events: &mut FrameEvents) {
        let cell = self.config.cell_size;
        let single_cells = self.config.policy.uses_single_cells();

        let mut i = 0;
        while i < self.projectiles.len() {
            let center = self.projectiles[i].center();
            let hit = self.pieces.iter().enumerate().find_map(|(idx, piece)| {
                hit_test(center, piece.pos, &piece.mask, cell).map(|local| (idx, local))
            });
            let Some((idx, local)) = hit else {
                i += 1;
                continue;
            };
            self.projectiles.remove(i);

            if single_cells {
                let piece = &self.pieces[idx];
                let Some((col, row)) = world_to_grid(piece.pos, cell) else {
                    debug!(id = piece.id, "shot cell is above the grid");
                    continue;
                };
                let drop = CellDrop {
                    col,
                    row,
                    color: piece.color,
                    push: Some(Push::from_impact(center.x, piece.bounds(cell).center().x)),
                };
                match self.policy.try_place(Payload::Cell(drop), &mut self.grid) {
                    Ok(placed) => {
                        let piece = self.pieces.remove(idx);
                        debug!(id = piece.id, origin = ?placed.origin, "cell shot into place");
                        self.award(ScoreEvent::ProjectileHit, 1);
                        events.hits += 1;
                        events.placements += 1;
                    }
                    Err(err) if err.is_session_fatal() => {
                        self.end_game(err.code());
                        return;
                    }
                    Err(err) => {
                        debug!(id = piece.id, reason = err.code(), "shot cell rejected");
                    }
                }
            } else {
                let piece = &mut self.pieces[idx];
                piece.mask.remove_cell(local.col, local.row);
                self.award(ScoreEvent::ProjectileHit, 1);
                events.hits += 1;
                if self.pieces[idx].is_depleted() {
                    let piece = self.pieces.remove(idx);
                    debug!(id = piece.id, "piece depleted");
                    events.depleted += 1;
                }
            }
        }
    }

    fn resolve_catches(&mut self, events: &mut FrameEvents) {
        let cell = self.config.cell_size;
        let player = self.player.rect;

        let mut idx = 0;
        while idx < self.pieces.len() {
            let piece = &self.pieces[idx];
            if !overlaps_rect(&player, piece.pos, &piece.mask, cell) {
                idx += 1;
                continue;
            }
            let payload = Payload::Shape {
                mask: &piece.mask,
                color: piece.color,
            };
            match self.policy.try_place(payload, &mut self.grid) {
                Ok(placed) => {
                    let piece = self.pieces.remove(idx);
                    debug!(
                        id = piece.id,
                        origin = ?placed.origin,
                        cells = placed.cells,
                        matched = placed.pattern_matched,
                        "piece placed"
                    );
                    self.award(ScoreEvent::Placement, 1);
                    events.placements += 1;
                    if placed.pattern_matched {
                        self.award(ScoreEvent::PatternMatch, 1);
                        events.patterns_matched += 1;
                    }
                }
                Err(err) if err.is_session_fatal() => {
                    self.end_game(err.code());
                    return;
                }
                Err(err) => {
                    trace!(id = piece.id, reason = err.code(), "catch rejected");
                    idx += 1;
                }
            }
        }
    }

    fn resolve_floor(&mut self, events: &mut FrameEvents) {
        let cell = self.config.cell_size;
        let floor = self.config.screen_height - cell;
        let single_cells = self.config.policy.uses_single_cells();

        let mut idx = 0;
        while idx < self.pieces.len() {
            if self.pieces[idx].bounds(cell).bottom() < floor {
                idx += 1;
                continue;
            }
            let piece = self.pieces.remove(idx);
            if single_cells {
                // Row the cell's top edge rounds up into, less one.
                let top = Point::new(piece.pos.x, piece.pos.y + cell - 1.0);
                let Some((col, row)) = world_to_grid(top, cell) else {
                    debug!(id = piece.id, "landed cell is off the grid");
                    continue;
                };
                let drop = CellDrop {
                    col,
                    row: row - 1,
                    color: piece.color,
                    push: None,
                };
                match self.policy.try_place(Payload::Cell(drop), &mut self.grid) {
                    Ok(_) => events.placements += 1,
                    Err(err) => debug!(id = piece.id, reason = err.code(), "landed cell dropped"),
                }
            } else if !piece.is_depleted() {
                debug!(id = piece.id, "piece reached the floor");
                self.end_game("floor_reached");
                return;
            }
        }
    }

    fn settle_grid(&mut self, events: &mut FrameEvents) {
        let cleared = clear_full_lines(&mut self.grid, self.config.uniform_clears());
        if cleared > 0 {
            self.lines += cleared;
            self.award(ScoreEvent::LineClear, cleared);
            events.lines_cleared = cleared;
        }
        if self.config.gravity {
            self.grid.apply_gravity();
        }
    }

    fn award(&mut self, event: ScoreEvent, times: u32) {
        self.score = self
            .score
            .saturating_add(event.points().saturating_mul(times));
    }

    fn end_game(&mut self, reason: &str) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        info!(
            episode_id = self.episode_id,
            score = self.score,
            lines = self.lines,
            frame = self.frame,
            reason,
            "game over"
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            pieces: self.pieces.iter().map(PieceSnapshot::from).collect(),
            projectiles: self.projectiles.iter().map(|p| p.rect).collect(),
            player: self.player.rect,
            targets: self
                .policy
                .targets()
                .iter()
                .map(TargetSnapshot::from)
                .collect(),
            policy: self.policy.kind(),
            score: self.score,
            lines: self.lines,
            frame: self.frame,
            episode_id: self.episode_id,
            seed: self.seed,
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockshot_types::{PolicyKind, Rect};

    fn quiet_config(policy: PolicyKind) -> GameConfig {
        GameConfig {
            spawn_interval: 100_000,
            drift_amplitude: 0.0,
            ..GameConfig::for_policy(policy)
        }
    }

    fn session(policy: PolicyKind) -> GameSession {
        GameSession::new(quiet_config(policy), 42).unwrap()
    }

    fn shot_at(x: f32, y: f32) -> Projectile {
        Projectile {
            rect: Rect::new(x, y, 4.0, 10.0),
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = GameConfig {
            cell_size: 0.0,
            ..GameConfig::default()
        };
        assert!(GameSession::new(config, 1).is_err());
    }

    #[test]
    fn spawns_on_the_interval() {
        let config = GameConfig {
            spawn_interval: 45,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, 7).unwrap();
        for _ in 0..44 {
            assert!(!session.tick().spawned);
        }
        assert!(session.tick().spawned);
        let piece = &session.pieces()[0];
        assert_eq!(piece.kind, None);
        assert_eq!(piece.mask, ShapeMask::unit());
        assert!(piece.pos.x >= 0.0 && piece.pos.x <= 370.0);
        assert!(piece.pos.y < 0.0);
    }

    #[test]
    fn shape_spawns_fit_the_grid() {
        let config = GameConfig {
            spawn_interval: 1,
            ..GameConfig::for_policy(PolicyKind::FirstFit)
        };
        let mut session = GameSession::new(config, 3).unwrap();
        for _ in 0..50 {
            session.tick();
        }
        for piece in session.pieces() {
            assert!(piece.kind.is_some());
            let right = piece.pos.x + piece.mask.width() as f32 * 30.0;
            assert!(right <= 13.0 * 30.0);
        }
    }

    #[test]
    fn projectile_knocks_out_a_shape_cell() {
        let mut s = session(PolicyKind::FirstFit);
        let o = ShapeMask::from_kind(ShapeKind::O);
        s.spawn_piece_at(Some(ShapeKind::O), o, BlockColor::Red, Point::new(60.0, 100.0));
        s.projectiles.push(shot_at(68.0, 130.0));

        let events = s.tick();
        assert_eq!(events.hits, 1);
        assert_eq!(s.score(), 50);
        assert!(s.projectiles().is_empty());
        assert_eq!(s.pieces()[0].mask.cell_at(0, 0), Some(false));
        assert_eq!(s.pieces()[0].mask.occupied_count(), 3);
    }

    #[test]
    fn last_cell_shot_depletes_the_piece() {
        let mut s = session(PolicyKind::FirstFit);
        let mut i = ShapeMask::from_kind(ShapeKind::I);
        for col in 1..4 {
            i.remove_cell(col, 0);
        }
        s.spawn_piece_at(Some(ShapeKind::I), i, BlockColor::Red, Point::new(60.0, 100.0));
        s.projectiles.push(shot_at(68.0, 110.0));

        let events = s.tick();
        assert_eq!(events.depleted, 1);
        assert!(s.pieces().is_empty());
        assert_eq!(s.grid().occupied_count(), 0);
    }

    #[test]
    fn shot_cell_is_pushed_away_from_the_impact() {
        let mut config = quiet_config(PolicyKind::NearestSlot);
        config.gravity = false;
        let mut s = GameSession::new(config, 42).unwrap();
        s.spawn_piece_at(None, ShapeMask::unit(), BlockColor::Blue, Point::new(60.0, 300.0));
        // centre x 65, left of the piece centre at 75
        s.projectiles.push(shot_at(63.0, 320.0));

        let events = s.tick();
        assert_eq!(events.hits, 1);
        assert_eq!(s.grid().get(1, 10), Some(BlockColor::Blue));
        assert_eq!(s.grid().occupied_count(), 1);
        assert!(s.pieces().is_empty());
        assert_eq!(s.score(), 50);
    }

    #[test]
    fn rejected_shot_cell_keeps_falling() {
        let mut config = quiet_config(PolicyKind::NearestSlot);
        config.gravity = false;
        let mut s = GameSession::new(config, 42).unwrap();
        s.grid_mut().set(2, 10, Some(BlockColor::Red));
        s.spawn_piece_at(None, ShapeMask::unit(), BlockColor::Blue, Point::new(60.0, 300.0));
        s.projectiles.push(shot_at(63.0, 320.0));

        s.tick();
        assert!(s.projectiles().is_empty());
        assert_eq!(s.pieces().len(), 1);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn drifting_cells_stay_over_a_narrow_grid() {
        let config = GameConfig {
            grid_width: 10,
            spawn_interval: 5,
            ..GameConfig::default()
        };
        for seed in 1..20 {
            let mut s = GameSession::new(config.clone(), seed).unwrap();
            for _ in 0..600 {
                s.tick();
                for piece in s.pieces() {
                    assert!(piece.bounds(30.0).right() <= 300.0, "x {}", piece.pos.x);
                }
            }
            // every landed cell made it onto the grid
            assert!(s.grid().occupied_count() > 0);
        }
    }

    #[test]
    fn cell_shot_above_the_grid_keeps_falling() {
        let mut s = session(PolicyKind::NearestSlot);
        s.spawn_piece_at(None, ShapeMask::unit(), BlockColor::Red, Point::new(60.0, -20.0));
        // after rising, the shot's centre is at y = -3, inside the cell
        s.projectiles.push(shot_at(63.0, -1.0));

        let events = s.tick();
        assert_eq!(events.hits, 0);
        assert!(s.projectiles().is_empty());
        assert_eq!(s.pieces().len(), 1);
        assert_eq!(s.grid().occupied_count(), 0);
    }

    #[test]
    fn single_cell_lands_on_the_floor() {
        let mut s = session(PolicyKind::NearestSlot);
        s.spawn_piece_at(None, ShapeMask::unit(), BlockColor::Green, Point::new(90.0, 538.0));

        let events = s.tick();
        assert_eq!(events.placements, 1);
        assert!(s.pieces().is_empty());
        // lands on row 17, then gravity settles it on the bottom row
        assert_eq!(s.grid().get(3, 19), Some(BlockColor::Green));
        assert_eq!(s.grid().occupied_count(), 1);
        assert!(!s.game_over());
    }

    #[test]
    fn shape_reaching_the_floor_ends_the_game() {
        let mut s = session(PolicyKind::FirstFit);
        let o = ShapeMask::from_kind(ShapeKind::O);
        s.spawn_piece_at(Some(ShapeKind::O), o, BlockColor::Red, Point::new(0.0, 508.0));

        assert!(s.tick().game_over);
        assert!(s.game_over());
        assert!(!s.apply_intent(GameIntent::Fire));
        assert!(!s.apply_intent(GameIntent::MoveLeft));
        let frame = s.frame();
        s.tick();
        assert_eq!(s.frame(), frame);
    }

    #[test]
    fn caught_shape_is_placed_first_fit() {
        let mut s = session(PolicyKind::FirstFit);
        let o = ShapeMask::from_kind(ShapeKind::O);
        s.spawn_piece_at(Some(ShapeKind::O), o, BlockColor::Yellow, Point::new(180.0, 500.0));

        let events = s.tick();
        assert_eq!(events.placements, 1);
        assert_eq!(s.score(), 100);
        for (col, row) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
            assert_eq!(s.grid().get(col, row), Some(BlockColor::Yellow));
        }
    }

    #[test]
    fn catch_with_no_room_ends_the_game() {
        let mut s = session(PolicyKind::FirstFit);
        let (w, h) = (s.grid().width(), s.grid().height());
        for row in 1..h {
            for col in 0..w {
                if (col + row) % 2 == 0 {
                    s.grid_mut().set(col, row, Some(BlockColor::Red));
                }
            }
        }
        let before = s.grid().clone();
        let o = ShapeMask::from_kind(ShapeKind::O);
        s.spawn_piece_at(Some(ShapeKind::O), o, BlockColor::Blue, Point::new(180.0, 500.0));

        assert!(s.tick().game_over);
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn full_row_clears_and_scores() {
        let mut config = quiet_config(PolicyKind::FirstFit);
        config.gravity = false;
        let mut s = GameSession::new(config, 42).unwrap();
        for col in 2..13 {
            s.grid_mut().set(col, 19, Some(BlockColor::Green));
        }
        let o = ShapeMask::from_kind(ShapeKind::O);
        s.spawn_piece_at(Some(ShapeKind::O), o, BlockColor::Red, Point::new(180.0, 500.0));

        let events = s.tick();
        assert_eq!(events.lines_cleared, 1);
        assert_eq!(s.lines(), 1);
        assert_eq!(s.score(), 1100);
        assert_eq!(s.grid().get(0, 19), Some(BlockColor::Red));
        assert_eq!(s.grid().get(2, 19), None);
        assert_eq!(s.grid().occupied_count(), 2);
    }

    #[test]
    fn matching_a_target_awards_the_bonus() {
        let mut s = session(PolicyKind::TargetMatch);
        let kind = s.policy().targets()[0].kind();
        s.spawn_piece_at(
            Some(kind),
            ShapeMask::from_kind(kind),
            BlockColor::Blue,
            Point::new(180.0, 535.0),
        );

        let events = s.tick();
        assert_eq!(events.patterns_matched, 1);
        assert_eq!(s.score(), 600);
        assert_eq!(s.grid().occupied_count(), 4);
        assert_eq!(s.snapshot().targets.len(), 1);
    }

    #[test]
    fn player_stays_in_lane() {
        let mut s = session(PolicyKind::NearestSlot);
        for _ in 0..100 {
            s.apply_intent(GameIntent::MoveLeft);
        }
        assert_eq!(s.player().rect.x, 0.0);
        assert!(!s.apply_intent(GameIntent::MoveLeft));
        for _ in 0..100 {
            s.apply_intent(GameIntent::MoveRight);
        }
        assert_eq!(s.player().rect.x, 370.0);
    }

    #[test]
    fn restart_replaces_everything() {
        let mut s = session(PolicyKind::FirstFit);
        s.apply_intent(GameIntent::Fire);
        s.spawn_piece();
        s.grid_mut().set(0, 19, Some(BlockColor::Red));
        s.tick();
        let rng_state = s.rng.state();

        assert!(s.apply_intent(GameIntent::Restart));
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.seed(), rng_state);
        assert_eq!(s.frame(), 0);
        assert_eq!(s.score(), 0);
        assert!(s.pieces().is_empty());
        assert!(s.projectiles().is_empty());
        assert_eq!(s.grid().occupied_count(), 0);
        assert_eq!(s.config().spawn_interval, 100_000);
    }

    #[test]
    fn restart_works_after_game_over() {
        let mut s = session(PolicyKind::FirstFit);
        // a full column survives gravity and reaches the top row
        for row in 0..20 {
            s.grid_mut().set(5, row, Some(BlockColor::Red));
        }
        assert!(s.tick().game_over);
        assert!(s.apply_intent(GameIntent::Restart));
        assert!(!s.game_over());
    }

    #[test]
    fn same_seed_same_game() {
        let config = GameConfig {
            spawn_interval: 20,
            ..GameConfig::default()
        };
        let mut a = GameSession::new(config.clone(), 99).unwrap();
        let mut b = GameSession::new(config, 99).unwrap();
        for frame in 0..600 {
            if frame % 7 == 0 {
                a.apply_intent(GameIntent::Fire);
                b.apply_intent(GameIntent::Fire);
            }
            a.tick();
            b.tick();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
