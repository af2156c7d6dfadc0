use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bulling::core::{calculate_all_scores, Frame, GameSnapshot, GameState};
use bulling::input::{pins_for_hit, PinRack};
use bulling::types::{DartHit, FRAME_COUNT};

fn started_game(players: usize) -> GameState {
    let mut state = GameState::new();
    for i in 0..players {
        state.add_player(&format!("P{}", i + 1)).unwrap();
    }
    state.start_game().unwrap();
    state
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("perfect_game_4_players", |b| {
        b.iter(|| {
            let mut state = started_game(4);
            while !state.game_over() {
                state.submit_throw(black_box(10)).unwrap();
            }
            black_box(state.winners().len());
        })
    });
}

fn bench_score_recalculation(c: &mut Criterion) {
    let mut state = started_game(1);
    for pins in [10, 7, 3, 9, 0, 10, 10, 2, 8, 6, 1, 10, 10, 10, 4, 6] {
        state.submit_throw(pins).unwrap();
    }
    let frames: [Frame; FRAME_COUNT] = state.player(0).unwrap().frames().clone();

    c.bench_function("calculate_all_scores", |b| {
        b.iter(|| {
            black_box(calculate_all_scores(black_box(&frames)));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let mut state = started_game(6);
    for _ in 0..30 {
        state.submit_throw(4).unwrap();
    }
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into_6_players", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.current_player);
        })
    });
}

fn bench_rack_dart(c: &mut Criterion) {
    let mut rack = PinRack::new();

    c.bench_function("rack_dart_and_take", |b| {
        b.iter(|| {
            rack.knock_down_all(pins_for_hit(black_box(DartHit::OuterBull)))
                .unwrap();
            black_box(rack.take_throw());
            rack.reset();
        })
    });
}

criterion_group!(
    benches,
    bench_full_game,
    bench_score_recalculation,
    bench_snapshot_into,
    bench_rack_dart
);
criterion_main!(benches);
