use criterion::{criterion_group, criterion_main, Criterion};
use grid_mazes::{
    generators,
    units::{ColumnsCount, RowsCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_prim_maze_31(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(31);
    c.bench_function("prim_maze_31", move |b| {
        b.iter(|| generators::prim(RowsCount(31), ColumnsCount(31), &mut rng))
    });
}

fn bench_prim_maze_99(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(99);
    c.bench_function("prim_maze_99", move |b| {
        b.iter(|| generators::prim(RowsCount(99), ColumnsCount(99), &mut rng))
    });
}

criterion_group!(benches, bench_prim_maze_31, bench_prim_maze_99);
criterion_main!(benches);
