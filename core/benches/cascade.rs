use buscaminas_core::{Board, GameConfig};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game 16x16 40 mines", |b| {
        let mut board = Board::with_seed(GameConfig::default(), 0xDECAF).unwrap();
        b.iter(|| board.new_game());
    });
}

fn bench_cascade(c: &mut Criterion) {
    // sparse board, so the first reveal opens a large connected region
    c.bench_function("cascade 64x64 16 mines", |b| {
        let board = Board::with_seed(GameConfig::new(64, 64, 16), 0xDECAF).unwrap();
        b.iter_batched(
            || board.clone(),
            |mut board| board.reveal((32, 32)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_new_game, bench_cascade);
criterion_main!(benches);
