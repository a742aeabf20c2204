//! Property tests for the grid, line clearing, shape damage and whole sessions.
//!
//! Invariants covered:
//! - a row is full iff every cell in it is occupied
//! - column gravity is idempotent and keeps each column's colour order
//! - clearing keeps the grid's dimensions, removes exactly `width` cells per
//!   cleared row and leaves no clearable row behind
//! - knocking cells out of a shape never adds cells
//! - sessions keep the grid size fixed and the score monotonic

use proptest::prelude::*;

use blockshot::core::{
    clear_full_lines_with_rows, hit_test, GameConfig, GameSession, Grid, ShapeMask,
};
use blockshot::types::{BlockColor, Cell, GameIntent, Point, PolicyKind, ShapeKind};

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..8, 1usize..10).prop_flat_map(|(width, height)| {
        prop::collection::vec(0u8..=4, width * height).prop_map(move |codes| {
            let mut grid = Grid::new(width, height);
            for (idx, code) in codes.into_iter().enumerate() {
                grid.set(idx % width, idx / width, BlockColor::from_code(code));
            }
            grid
        })
    })
}

fn column(grid: &Grid, col: usize) -> Vec<BlockColor> {
    (0..grid.height()).filter_map(|row| grid.get(col, row)).collect()
}

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    prop::sample::select(ShapeKind::ALL.to_vec())
}

fn policy_kind() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn row_full_iff_every_cell_occupied(grid in grid_strategy()) {
        for row in 0..grid.height() {
            let all = (0..grid.width()).all(|col| grid.get(col, row).is_some());
            prop_assert_eq!(grid.row_is_full(row), all);
            if grid.row_is_uniform(row) {
                prop_assert!(grid.row_is_full(row));
            }
        }
    }

    #[test]
    fn gravity_is_idempotent_and_order_preserving(mut grid in grid_strategy()) {
        let before: Vec<Vec<BlockColor>> = (0..grid.width()).map(|c| column(&grid, c)).collect();
        let occupied = grid.occupied_count();

        grid.apply_gravity();
        let settled = grid.clone();
        prop_assert_eq!(grid.apply_gravity(), 0);
        prop_assert_eq!(&grid, &settled);
        prop_assert_eq!(grid.occupied_count(), occupied);

        for col in 0..grid.width() {
            prop_assert_eq!(&column(&grid, col), &before[col]);
            // no hole below an occupied cell
            let cells: Vec<Cell> = (0..grid.height()).map(|row| grid.get(col, row)).collect();
            let first = cells.iter().position(|c| c.is_some()).unwrap_or(cells.len());
            prop_assert!(cells[first..].iter().all(|c| c.is_some()));
        }
    }

    #[test]
    fn clearing_is_exact(mut grid in grid_strategy(), uniform in any::<bool>()) {
        let (width, height) = (grid.width(), grid.height());
        let occupied = grid.occupied_count();

        let cleared = clear_full_lines_with_rows(&mut grid, uniform);
        prop_assert_eq!((grid.width(), grid.height()), (width, height));
        prop_assert_eq!(grid.occupied_count(), occupied - cleared.len() * width);
        prop_assert!(cleared.windows(2).all(|w| w[0] >= w[1]));
        for row in 0..height {
            if uniform {
                prop_assert!(!grid.row_is_uniform(row));
            } else {
                prop_assert!(!grid.row_is_full(row));
            }
        }
    }

    #[test]
    fn shape_damage_only_removes(
        kind in shape_kind(),
        hits in prop::collection::vec((0usize..5, 0usize..5), 0..12),
    ) {
        let mut mask = ShapeMask::from_kind(kind);
        let (width, height) = (mask.width(), mask.height());
        for (col, row) in hits {
            let before = mask.occupied_count();
            let was = mask.cell_at(col, row) == Some(true);
            prop_assert_eq!(mask.remove_cell(col, row), was);
            prop_assert_eq!(mask.occupied_count(), before - usize::from(was));
            prop_assert_eq!((mask.width(), mask.height()), (width, height));
        }
        prop_assert_eq!(mask.is_empty(), mask.occupied_count() == 0);
    }

    #[test]
    fn hits_land_on_occupied_cells(
        kind in shape_kind(),
        x in -50.0f32..200.0,
        y in -50.0f32..200.0,
    ) {
        let mask = ShapeMask::from_kind(kind);
        if let Some(cell) = hit_test(Point::new(x, y), Point::new(30.0, 30.0), &mask, 30.0) {
            prop_assert_eq!(mask.cell_at(cell.col, cell.row), Some(true));
        }
    }

    #[test]
    fn sessions_respect_core_invariants(
        seed in any::<u32>(),
        policy in policy_kind(),
        intents in prop::collection::vec(0u8..4, 50..400),
    ) {
        let config = GameConfig {
            spawn_interval: 8,
            ..GameConfig::for_policy(policy)
        };
        let mut session = GameSession::new(config, seed).unwrap();
        let mut last_score = 0;
        for code in intents {
            let intent = match code {
                0 => GameIntent::MoveLeft,
                1 => GameIntent::MoveRight,
                _ => GameIntent::Fire,
            };
            session.apply_intent(intent);
            session.tick();

            prop_assert_eq!((session.grid().width(), session.grid().height()), (13, 20));
            prop_assert!(session.score() >= last_score);
            last_score = session.score();
            let (lo, hi) = session.config().player_lane();
            let x = session.player().rect.x;
            prop_assert!(x >= lo && x <= hi);
            if session.game_over() {
                break;
            }
        }
    }
}
