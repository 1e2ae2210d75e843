use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_2048::core::{has_legal_move, resolve, GameSession, Grid, SessionConfig};
use tui_2048::types::{Direction, WIN_VALUE};

fn busy_grid() -> Grid {
    Grid::from_rows([
        [2, 2, 4, 8],
        [4, 0, 4, 16],
        [8, 8, 8, 0],
        [0, 2, 2, 2],
    ])
}

fn full_grid_no_moves() -> Grid {
    Grid::from_rows([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ])
}

fn bench_resolve(c: &mut Criterion) {
    let grid = busy_grid();
    c.bench_function("resolve_all_directions", |b| {
        b.iter(|| {
            for dir in Direction::ALL {
                black_box(resolve(black_box(&grid), dir, WIN_VALUE));
            }
        })
    });
}

fn bench_game_over_check(c: &mut Criterion) {
    let grid = full_grid_no_moves();
    c.bench_function("has_legal_move_full_grid", |b| {
        b.iter(|| black_box(has_legal_move(black_box(&grid))))
    });
}

fn bench_turn(c: &mut Criterion) {
    c.bench_function("apply_move_until_over", |b| {
        b.iter(|| {
            let mut game = GameSession::new(12345, SessionConfig::default());
            game.start();
            let mut i = 0;
            while !game.is_over() && i < 2_000 {
                game.apply_move(Direction::ALL[i % 4]);
                i += 1;
            }
            black_box(game.score())
        })
    });
}

fn bench_replay(c: &mut Criterion) {
    let mut game = GameSession::new(777, SessionConfig::default());
    game.start();
    for i in 0..200 {
        if game.is_over() {
            break;
        }
        game.apply_move(Direction::ALL[i % 4]);
    }

    c.bench_function("replay_full_log", |b| {
        b.iter(|| {
            let mut g = game.clone();
            g.start_replay();
            while g.replay_step().is_some() {}
            black_box(g.score())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_game_over_check,
    bench_turn,
    bench_replay
);
criterion_main!(benches);
