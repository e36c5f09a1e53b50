use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use symclump::cluster::{graph, Clustering, Kmeans, SymNmf};

fn synthetic(n: usize, d: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let offset = (i % 4) as f64 * 3.0;
            (0..d).map(|_| offset + rng.random::<f64>()).collect()
        })
        .collect()
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    let data = synthetic(500, 8, 42);

    group.bench_function("normalized_similarity_n500_d8", |b| {
        b.iter(|| graph::normalized_similarity(black_box(&data)).unwrap())
    });

    group.finish();
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");
    let data = synthetic(300, 8, 42);
    let k = 4;

    group.bench_function("symnmf_fit_predict_n300_d8_k4", |b| {
        b.iter(|| {
            let model = SymNmf::new(k).with_max_iter(50).with_seed(42);
            model.fit_predict(black_box(&data)).unwrap();
        })
    });

    group.bench_function("kmeans_fit_predict_n300_d8_k4", |b| {
        b.iter(|| {
            let model = Kmeans::new(k).with_max_iter(50);
            model.fit_predict(black_box(&data)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_graph, bench_clustering);
criterion_main!(benches);
