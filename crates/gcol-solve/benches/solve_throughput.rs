use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gcol_core::rng::RngHandle;
use gcol_graph::gnp_random;
use gcol_solve::{coloring, OptMode, SolveConfig, Strategy};

fn construction_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(3);
    let graph = gnp_random(250, 0.5, &mut rng).unwrap();
    for strategy in [Strategy::WelshPowell, Strategy::Dsatur, Strategy::Rlf] {
        let config = SolveConfig::new(strategy, OptMode::None, 0);
        c.bench_function(&format!("construct_{strategy}_g250"), |b| {
            b.iter(|| black_box(coloring(&graph, &config).unwrap()));
        });
    }
}

fn tabucol_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(4);
    let graph = gnp_random(125, 0.5, &mut rng).unwrap();
    let config = SolveConfig::new(Strategy::Dsatur, OptMode::Tabucol, 20_000);
    c.bench_function("tabucol_g125_20k", |b| {
        b.iter(|| black_box(coloring(&graph, &config).unwrap()));
    });
}

criterion_group!(benches, construction_bench, tabucol_bench);
criterion_main!(benches);
