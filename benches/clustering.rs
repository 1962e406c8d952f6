use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use symnmf::cluster::{factorize, init_h, normalized_affinity, Kmeans};

fn synthetic(n: usize, d: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..d).map(|_| rng.random::<f64>() * 4.0).collect())
        .collect()
}

fn bench_symnmf(c: &mut Criterion) {
    let mut group = c.benchmark_group("symnmf");

    let data = synthetic(200, 4, 42);
    let k = 5;

    group.bench_function("normalized_affinity_n200_d4", |b| {
        b.iter(|| normalized_affinity(black_box(&data)).unwrap())
    });

    let w = normalized_affinity(&data).unwrap();
    group.bench_function("factorize_n200_k5_iter50", |b| {
        b.iter(|| {
            let h0 = init_h(&w, k, &mut StdRng::seed_from_u64(1234)).unwrap();
            factorize(black_box(&w), h0, 50, 0.0).unwrap()
        })
    });

    group.finish();
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    let data = synthetic(1000, 16, 42);
    let k = 10;

    group.bench_function("fit_n1000_d16_k10", |b| {
        b.iter(|| {
            let model = Kmeans::new(k).with_max_iter(10).with_seed(42);
            model.fit(black_box(&data)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_symnmf, bench_kmeans);
criterion_main!(benches);
