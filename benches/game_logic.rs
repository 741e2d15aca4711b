use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_tetris::core::{Board, GameState, PieceBag};
use mini_tetris::driver::{encode, parse_line, OutboundMessage};
use mini_tetris::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("apply_tick", |b| {
        b.iter(|| {
            if state.game_over() {
                state.apply_action(GameAction::Restart);
            }
            state.apply_action(black_box(GameAction::Tick));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            if state.game_over() {
                state.apply_action(GameAction::Restart);
            }
            state.apply_action(GameAction::HardDrop);
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let actions = [GameAction::MoveRight, GameAction::Rotate, GameAction::MoveLeft];

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            for action in actions {
                state.apply_action(black_box(action));
            }
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = PieceBag::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| black_box(bag.draw())));
}

fn bench_protocol(c: &mut Criterion) {
    let snapshot = GameState::new(12345).snapshot();

    c.bench_function("encode_snapshot", |b| {
        b.iter(|| encode(black_box(&OutboundMessage::Snapshot(snapshot))))
    });
    c.bench_function("parse_action_line", |b| {
        b.iter(|| parse_line(black_box(r#"{"type":"action","action":"moveLeft"}"#)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move_and_rotate,
    bench_bag_draw,
    bench_protocol
);
criterion_main!(benches);
