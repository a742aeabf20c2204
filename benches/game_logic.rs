use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockshot::core::placement::FirstFit;
use blockshot::core::{
    clear_full_lines, hit_test, GameConfig, GameSession, Grid, Payload, PlacementPolicy,
    ShapeMask,
};
use blockshot::types::{BlockColor, GameIntent, Point, PolicyKind, ShapeKind};

fn bench_tick(c: &mut Criterion) {
    let config = GameConfig {
        spawn_interval: 10,
        ..GameConfig::for_policy(PolicyKind::FirstFit)
    };
    let mut session = GameSession::new(config, 12345).unwrap();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if session.game_over() {
                session.apply_intent(GameIntent::Restart);
            }
            session.apply_intent(GameIntent::Fire);
            black_box(session.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(13, 20);
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..13 {
                    grid.set(col, row, Some(BlockColor::Red));
                }
            }
            clear_full_lines(&mut grid, black_box(false))
        })
    });
}

fn bench_first_fit(c: &mut Criterion) {
    let mut grid = Grid::new(13, 20);
    // Checkerboard lower half so the scan has to work for a fit
    for row in 10..20 {
        for col in 0..13 {
            if (col + row) % 2 == 0 {
                grid.set(col, row, Some(BlockColor::Blue));
            }
        }
    }
    let t = ShapeMask::from_kind(ShapeKind::T);

    c.bench_function("first_fit_place", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            let payload = Payload::Shape {
                mask: &t,
                color: BlockColor::Green,
            };
            black_box(FirstFit.try_place(payload, &mut grid).ok())
        })
    });
}

fn bench_gravity(c: &mut Criterion) {
    let mut grid = Grid::new(13, 20);
    for row in (0..20).step_by(3) {
        for col in 0..13 {
            grid.set(col, row, Some(BlockColor::Yellow));
        }
    }

    c.bench_function("apply_gravity", |b| {
        b.iter(|| {
            let mut grid = grid.clone();
            black_box(grid.apply_gravity())
        })
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let mask = ShapeMask::from_kind(ShapeKind::L);
    let origin = Point::new(90.0, 120.0);

    c.bench_function("hit_test", |b| {
        b.iter(|| hit_test(black_box(Point::new(125.0, 155.0)), origin, &mask, 30.0))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_first_fit,
    bench_gravity,
    bench_hit_test
);
criterion_main!(benches);
