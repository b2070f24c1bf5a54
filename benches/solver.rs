//! Benchmarks for the cross and F2L searches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cfop_astar::{extract, parse_moves, solve, Cube, PairSlot, SearchOptions, Solver, Stage};

const SCRAMBLE: &str = "L2 R' U2 D2 B L B2 F R D R' L' D2 B' F2 R2 F U L' R2";

fn scrambled() -> Cube {
    let mut cube = Cube::solved();
    cube.apply_all(&parse_moves(SCRAMBLE).unwrap());
    cube
}

/// Benchmark the cross search on the reference scramble.
fn bench_cross(c: &mut Criterion) {
    let subgoal = extract(&scrambled(), Stage::Cross, &[]).unwrap();

    c.bench_function("solve_cross", |b| {
        b.iter(|| solve(black_box(&subgoal), SearchOptions::default()))
    });
}

/// Benchmark the first F2L pair after solving the cross.
fn bench_first_pair(c: &mut Criterion) {
    let mut cube = scrambled();
    Solver::default().solve_cross(&mut cube).unwrap();
    let [first, ..] = cfop_astar::goal::default_pair_order(&cube).unwrap();
    let subgoal = extract(&cube, Stage::Pair(first), &[]).unwrap();

    let mut group = c.benchmark_group("f2l");
    group.sample_size(10);
    group.bench_function("solve_first_pair", |b| {
        b.iter(|| solve(black_box(&subgoal), SearchOptions::for_pairs()))
    });
    group.finish();
}

/// Benchmark the six-face cross comparison.
fn bench_cross_per_face(c: &mut Criterion) {
    let cube = scrambled();
    let solver = Solver::default();

    let mut group = c.benchmark_group("cross_per_face");
    group.sample_size(10);
    group.bench_function("six_faces", |b| {
        b.iter(|| solver.cross_per_face(black_box(&cube)))
    });
    group.finish();
}

/// Benchmark applying the scramble to a full cube.
fn bench_apply_moves(c: &mut Criterion) {
    let moves = parse_moves(SCRAMBLE).unwrap();

    c.bench_function("apply_scramble", |b| {
        b.iter(|| {
            let mut cube = Cube::solved();
            cube.apply_all(black_box(&moves));
            cube
        })
    });
}

/// Benchmark fingerprinting the largest sub-state an F2L search sees.
fn bench_fingerprint(c: &mut Criterion) {
    let cube = scrambled();
    let order = cfop_astar::goal::default_pair_order(&cube).unwrap();
    let solved: Vec<PairSlot> = order[..3].to_vec();
    let subgoal = extract(&cube, Stage::Pair(order[3]), &solved).unwrap();

    c.bench_function("fingerprint", |b| {
        b.iter(|| black_box(&subgoal.initial).fingerprint())
    });
}

criterion_group!(
    benches,
    bench_cross,
    bench_first_pair,
    bench_cross_per_face,
    bench_apply_moves,
    bench_fingerprint
);
criterion_main!(benches);
