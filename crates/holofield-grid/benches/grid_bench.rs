// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Grid Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the grid hot path.
//!
//! Covers:
//!   - Single-cell Laplacian
//!   - Delta pass (rayon vs sequential) at the reference 100×100 size
//!   - Full step (delta + integration)
//!   - Driver signal generation for the reference 10 000-step run

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use holofield_grid::{laplacian_at, GridEvolver, Parallelism, PhenomenalGrid};
use holofield_signal::{expand, generate_driver_signal};
use holofield_types::Constant;

const N: usize = 100;

// ── Helpers ───────────────────────────────────────────────────────────

fn make_grid() -> PhenomenalGrid {
    let digits = expand(Constant::Pi, N * N);
    PhenomenalGrid::from_digits(&digits, N).expect("enough digits")
}

// ── Laplacian ────────────────────────────────────────────────────────

fn bench_laplacian_cell(c: &mut Criterion) {
    let grid = make_grid();
    c.bench_function("laplacian_at_corner_100", |b| {
        b.iter(|| laplacian_at(black_box(&grid), 0, 0))
    });
}

// ── Delta pass ───────────────────────────────────────────────────────

fn bench_delta_rayon(c: &mut Criterion) {
    let grid = make_grid();
    let evolver = GridEvolver::with_parallelism(N, Parallelism::Rayon);
    let mut out = vec![0.0; N * N];
    c.bench_function("delta_rayon_100x100", |b| {
        b.iter(|| evolver.delta_into(black_box(&grid), black_box(0.07), &mut out))
    });
}

fn bench_delta_sequential(c: &mut Criterion) {
    let grid = make_grid();
    let evolver = GridEvolver::with_parallelism(N, Parallelism::Sequential);
    let mut out = vec![0.0; N * N];
    c.bench_function("delta_sequential_100x100", |b| {
        b.iter(|| evolver.delta_into(black_box(&grid), black_box(0.07), &mut out))
    });
}

// ── Full step ────────────────────────────────────────────────────────

fn bench_step(c: &mut Criterion) {
    let mut grid = make_grid();
    let mut evolver = GridEvolver::new(N);
    c.bench_function("step_100x100", |b| {
        // Small driver keeps the field bounded over many iterations.
        b.iter(|| evolver.step(black_box(&mut grid), black_box(0.01), 0.1))
    });
}

// ── Signal ───────────────────────────────────────────────────────────

fn bench_driver_signal(c: &mut Criterion) {
    let digits = expand(Constant::Pi, 10_100);
    c.bench_function("driver_signal_10000_w100", |b| {
        b.iter(|| generate_driver_signal(black_box(&digits), 10_000, 100))
    });
}

criterion_group!(
    benches,
    bench_laplacian_cell,
    bench_delta_rayon,
    bench_delta_sequential,
    bench_step,
    bench_driver_signal,
);
criterion_main!(benches);
