use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gcol_core::rng::RngHandle;
use gcol_graph::{bridges, is_connected, is_planar, jittered_triangulation};

fn predicates_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let embedding = jittered_triangulation(60, 60, 0.1, &mut rng).unwrap();
    c.bench_function("bridges_triangulation_3600", |b| {
        b.iter(|| black_box(bridges(&embedding.graph)));
    });
    c.bench_function("connected_triangulation_3600", |b| {
        b.iter(|| black_box(is_connected(&embedding.graph)));
    });
    let small = jittered_triangulation(20, 20, 0.1, &mut rng).unwrap();
    c.bench_function("planarity_triangulation_400", |b| {
        b.iter(|| black_box(is_planar(&small.graph)));
    });
}

criterion_group!(benches, predicates_bench);
criterion_main!(benches);
