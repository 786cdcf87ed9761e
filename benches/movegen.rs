//! Criterion benchmarks measure time of move generation and move making.

use chessington::chess::board::Board;
use chessington::chess::core::{Promotion, Square};
use criterion::{criterion_group, criterion_main, Criterion};

fn generate_all_moves(board: &Board) -> usize {
    Square::iter()
        .map(|square| board.available_moves(square).len())
        .sum()
}

// Scholar's mate. Checkmate is not detected, so Black keeps playing.
const GAME: [(&str, &str); 8] = [
    ("e2", "e4"),
    ("e7", "e5"),
    ("f1", "c4"),
    ("b8", "c6"),
    ("d1", "h5"),
    ("g8", "f6"),
    ("h5", "f7"),
    ("e8", "e7"),
];

fn play(mut board: Board) -> Board {
    for (from, to) in GAME {
        let (from, to) = (
            Square::try_from(from).unwrap(),
            Square::try_from(to).unwrap(),
        );
        let _ = board.move_piece(from, to, &mut Promotion::Queen).unwrap();
    }
    board
}

fn movegen_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Move generation");
    let starting = Board::starting();
    let midgame = play(Board::starting());
    let _ = group.bench_function("starting position", |b| {
        b.iter(|| generate_all_moves(std::hint::black_box(&starting)));
    });
    let _ = group.bench_function("after scholar's mate", |b| {
        b.iter(|| generate_all_moves(std::hint::black_box(&midgame)));
    });
    group.finish();
}

fn make_moves_bench(c: &mut Criterion) {
    let _ = c.bench_function("play short game", |b| {
        b.iter_batched(
            Board::starting,
            play,
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = movegen_bench, make_moves_bench
}
criterion_main!(benches);
