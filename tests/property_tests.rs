use proptest::prelude::*;
use symnmf::cluster::{
    affinity, degree, factorize, init_h, metrics, normalize, normalized_affinity, run_kmeans,
    Clustering, Kmeans, Matrix, SymNmf,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn points(min_n: usize, max_n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), min_n..max_n)
}

proptest! {
    #[test]
    fn prop_affinity_symmetric_zero_diagonal(data in points(1, 20)) {
        let a = affinity(&data).unwrap();
        prop_assert_eq!(a.shape(), (data.len(), data.len()));
        prop_assert!(a.is_symmetric());
        for i in 0..data.len() {
            prop_assert_eq!(a[(i, i)], 0.0);
        }
        prop_assert!(a.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn prop_normalized_affinity_in_unit_interval(data in points(2, 20)) {
        let a = affinity(&data).unwrap();
        let d = degree(&a).unwrap();
        let w = normalize(&a, &d).unwrap();
        for &v in w.iter() {
            prop_assert!(v >= 0.0 && v <= 1.0 + 1e-12, "entry {} out of range", v);
        }
    }

    #[test]
    fn prop_normalize_idempotent(data in points(2, 15)) {
        let a = affinity(&data).unwrap();
        let d = degree(&a).unwrap();
        prop_assert_eq!(normalize(&a, &d).unwrap(), normalize(&a, &d).unwrap());
    }

    #[test]
    fn prop_factorize_non_negative(
        data in points(4, 16),
        k in 2usize..4,
        iters in 0usize..40,
        seed in any::<u64>(),
    ) {
        init_logging();
        let w = normalized_affinity(&data).unwrap();
        let h0 = init_h(&w, k, &mut StdRng::seed_from_u64(seed)).unwrap();
        let h = factorize(&w, h0, iters, 0.0).unwrap();
        prop_assert_eq!(h.shape(), (data.len(), k));
        prop_assert!(h.iter().all(|&v| v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn prop_kmeans_all_assigned(
        data in points(3, 25),
        k in 2usize..5,
        seed in any::<u64>(),
    ) {
        // Skip unless 1 < k < n
        prop_assume!(k < data.len());
        // k-means++ needs k distinct locations
        let mut distinct: Vec<&Vec<f64>> = Vec::new();
        for p in &data {
            if !distinct.contains(&p) {
                distinct.push(p);
            }
        }
        prop_assume!(distinct.len() >= k);

        let fit = Kmeans::new(k).with_seed(seed).fit(&data).unwrap();
        prop_assert_eq!(fit.labels.len(), data.len());
        let mut counts = vec![0usize; k];
        for &l in &fit.labels {
            prop_assert!(l < k);
            counts[l] += 1;
        }
        prop_assert_eq!(counts.iter().sum::<usize>(), data.len());
    }

    #[test]
    fn prop_kmeans_inertia_non_increasing(
        data in points(5, 25),
        k in 2usize..4,
    ) {
        init_logging();
        let seeds = data[..k].to_vec();
        let mut previous = f64::INFINITY;
        for max_iter in 0..8 {
            let fit = run_kmeans(&data, k, seeds.clone(), max_iter, 0.0).unwrap();
            prop_assert!(
                fit.inertia <= previous * (1.0 + 1e-9) + 1e-9,
                "inertia rose from {} to {} at iteration {}",
                previous,
                fit.inertia,
                max_iter
            );
            previous = fit.inertia;
        }
    }
}

#[test]
fn routes_agree_on_separated_blobs() {
    init_logging();
    let mut data = Vec::new();
    for &(cx, cy) in &[(0.0, 0.0), (6.0, 0.0), (3.0, 6.0)] {
        for i in 0..5 {
            let t = i as f64 * 0.1;
            data.push(vec![cx + t, cy + 0.5 * t]);
        }
    }

    let nmf = SymNmf::new(3)
        .with_tol(1e-8)
        .with_max_iter(1000)
        .with_seed(1234)
        .fit_predict(&data)
        .unwrap();
    let km = Kmeans::new(3).with_seed(1234).fit_predict(&data).unwrap();

    for labels in [&nmf, &km] {
        for b in 0..3 {
            let blob = &labels[b * 5..b * 5 + 5];
            assert!(blob.iter().all(|&l| l == blob[0]), "blob split: {labels:?}");
        }
        assert_ne!(labels[0], labels[5]);
        assert_ne!(labels[0], labels[10]);
        assert_ne!(labels[5], labels[10]);
        let s = metrics::silhouette_score(&data, labels).unwrap();
        assert!(s > 0.8, "silhouette {s}");
    }
}

#[test]
fn isolated_outlier_is_rejected() {
    let data = vec![
        vec![0.0, 0.0],
        vec![0.5, 0.5],
        vec![1.0, 0.0],
        vec![500.0, 500.0],
    ];
    let err = SymNmf::new(2).with_seed(1).fit(&data).unwrap_err();
    assert_eq!(err, symnmf::Error::SingularDegree { index: 3 });
}

#[test]
fn factorize_bad_k_fails_fast() {
    let w = normalized_affinity(&[vec![0.0], vec![1.0], vec![2.0]]).unwrap();
    let err = factorize(&w, Matrix::zeros(3, 4), 300, 1e-4).unwrap_err();
    assert!(matches!(
        err,
        symnmf::Error::InvalidClusterCount {
            requested: 4,
            n_items: 3
        }
    ));
}
