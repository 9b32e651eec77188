use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameSession, GameSnapshot, PieceCatalog};
use blockfall::observe::build_observation;
use blockfall::types::{GameAction, PieceKind, Rotation, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if session.game_over() {
                session.restart();
            }
            session.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, PieceKind::I.cell());
                }
            }
            board.sweep()
        })
    });
}

fn bench_collide(c: &mut Criterion) {
    let catalog = PieceCatalog::standard();
    let board = Board::new();
    let shape = catalog.shape(PieceKind::T, Rotation::East);

    c.bench_function("collide", |b| {
        b.iter(|| board.collide(black_box(shape), black_box(4), black_box(10)))
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| session.spawn(black_box(PieceKind::T)))
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("move_rotate", |b| {
        b.iter(|| {
            session.apply_action(GameAction::MoveRight);
            session.apply_action(GameAction::Rotate);
            session.apply_action(GameAction::MoveLeft);
        })
    });
}

fn bench_hard_drop_rollout(c: &mut Criterion) {
    c.bench_function("hard_drop_rollout_100", |b| {
        b.iter(|| {
            let mut session = GameSession::new(black_box(7));
            session.start();
            for i in 0..100 {
                if session.game_over() {
                    break;
                }
                if i % 3 == 0 {
                    session.rotate();
                }
                session.hard_drop();
            }
            session.score()
        })
    });
}

fn bench_observation(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();
    let mut snap = GameSnapshot::default();
    let mut buf = Vec::with_capacity(4096);

    c.bench_function("observation_json", |b| {
        b.iter(|| {
            session.snapshot_into(&mut snap);
            let obs = build_observation(1, session.clock_ms(), &snap, None);
            buf.clear();
            serde_json::to_writer(&mut buf, &obs).unwrap();
            buf.len()
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_collide,
    bench_spawn,
    bench_move_and_rotate,
    bench_hard_drop_rollout,
    bench_observation
);
criterion_main!(benches);
