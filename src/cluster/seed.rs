//! Initial centroid selection for k-means.
//!
//! Two interchangeable [`Seeder`]s:
//!
//! - [`FirstK`]: the first `k` points, in input order. Needs no randomness.
//! - [`KmeansPlusPlus`]: k-means++ (Arthur & Vassilvitskii, 2007). The first
//!   centroid is uniform over the points; each following one is drawn with
//!   probability proportional to `D(x)²`, the squared distance from `x` to its
//!   nearest already-chosen centroid. Points that coincide with a chosen
//!   centroid have weight zero and are never picked again.
//!
//! [`Init`] selects between them by configuration.

use super::linalg::squared_euclidean_unchecked;
use super::traits::Seeder;
use super::util;
use crate::error::{Error, Result};
use rand::prelude::*;

/// Use the first `k` points as centroids.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstK;

impl Seeder for FirstK {
    fn seed(&self, data: &[Vec<f64>], k: usize, _rng: &mut dyn RngCore) -> Result<Vec<Vec<f64>>> {
        let (n, _) = util::validate_points(data)?;
        util::validate_k(k, n)?;
        Ok(data[..k].to_vec())
    }
}

/// k-means++ seeding.
#[derive(Debug, Clone, Copy, Default)]
pub struct KmeansPlusPlus;

impl KmeansPlusPlus {
    /// Row indices of the chosen centroids, in selection order.
    pub fn seed_indices<R: Rng + ?Sized>(
        &self,
        data: &[Vec<f64>],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        let (n, _) = util::validate_points(data)?;
        util::validate_k(k, n)?;

        let mut chosen = Vec::with_capacity(k);
        chosen.push(rng.random_range(0..n));

        // min_dist[i]: squared distance from point i to its nearest chosen centroid.
        let mut min_dist: Vec<f64> = data
            .iter()
            .map(|p| squared_euclidean_unchecked(p, &data[chosen[0]]))
            .collect();

        while chosen.len() < k {
            let total: f64 = min_dist.iter().sum();
            if total <= 0.0 {
                return Err(Error::InvalidParameter {
                    name: "k",
                    message: "exceeds the number of distinct points",
                });
            }

            let next = sample_weighted(&min_dist, total, rng);
            chosen.push(next);

            for (d, p) in min_dist.iter_mut().zip(data) {
                let dist = squared_euclidean_unchecked(p, &data[next]);
                if dist < *d {
                    *d = dist;
                }
            }
        }

        Ok(chosen)
    }
}

impl Seeder for KmeansPlusPlus {
    fn seed(&self, data: &[Vec<f64>], k: usize, rng: &mut dyn RngCore) -> Result<Vec<Vec<f64>>> {
        let indices = self.seed_indices(data, k, rng)?;
        Ok(indices.into_iter().map(|i| data[i].clone()).collect())
    }
}

/// Draw an index with probability `weights[i] / total`.
///
/// Zero-weight entries are never returned.
fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let threshold = rng.random::<f64>() * total;
    let mut cumsum = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumsum += w;
        last_positive = i;
        if cumsum > threshold {
            return i;
        }
    }
    // Rounding can leave cumsum a hair below threshold.
    last_positive
}

/// Initialization strategy for [`Kmeans`](super::Kmeans).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Init {
    /// First `k` points.
    FirstK,
    /// k-means++.
    #[default]
    KmeansPlusPlus,
}

impl Seeder for Init {
    fn seed(&self, data: &[Vec<f64>], k: usize, rng: &mut dyn RngCore) -> Result<Vec<Vec<f64>>> {
        match self {
            Init::FirstK => FirstK.seed(data, k, rng),
            Init::KmeansPlusPlus => KmeansPlusPlus.seed(data, k, rng),
        }
    }
}

/// k-means++ centroids from an explicit seed.
pub fn seed_kmeans_plus_plus(data: &[Vec<f64>], k: usize, seed: u64) -> Result<Vec<Vec<f64>>> {
    let mut rng = StdRng::seed_from_u64(seed);
    KmeansPlusPlus.seed(data, k, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn data() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![-5.0, 5.0],
            vec![-5.1, 5.0],
        ]
    }

    #[test]
    fn first_k_takes_prefix() {
        let mut rng = StdRng::seed_from_u64(0);
        let c = FirstK.seed(&data(), 3, &mut rng).unwrap();
        assert_eq!(c, data()[..3].to_vec());
    }

    #[test]
    fn plus_plus_picks_distinct_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let idx = KmeansPlusPlus.seed_indices(&data(), 3, &mut rng).unwrap();
        assert_eq!(idx.len(), 3);
        let unique: HashSet<_> = idx.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn plus_plus_deterministic_with_seed() {
        let a = seed_kmeans_plus_plus(&data(), 3, 1234).unwrap();
        let b = seed_kmeans_plus_plus(&data(), 3, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn plus_plus_never_picks_duplicates_of_chosen() {
        // Only two distinct locations: the second draw must pick the other one.
        let data = vec![vec![0.0], vec![0.0], vec![0.0], vec![9.0]];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let idx = KmeansPlusPlus.seed_indices(&data, 2, &mut rng).unwrap();
            let picked: HashSet<u64> = idx.iter().map(|&i| data[i][0].to_bits()).collect();
            assert_eq!(picked.len(), 2, "seed {seed} picked {idx:?}");
        }
    }

    #[test]
    fn plus_plus_spreads_over_blobs() {
        // With three tight blobs, every draw after the first lands in a new blob.
        for seed in 0..16 {
            let c = seed_kmeans_plus_plus(&data(), 3, seed).unwrap();
            let blobs: HashSet<(i64, i64)> = c
                .iter()
                .map(|p| ((p[0] / 5.0).round() as i64, (p[1] / 5.0).round() as i64))
                .collect();
            assert_eq!(blobs.len(), 3, "seed {seed}: {c:?}");
        }
    }

    #[test]
    fn sample_weighted_follows_weights() {
        // Distances 1 and 2 from the chosen centroid: squared weights give
        // index 1 a share of 0.8, plain distances would give 2/3.
        let weights = [0.0, 1.0, 4.0];
        let mut rng = StdRng::seed_from_u64(17);
        let draws = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[sample_weighted(&weights, 5.0, &mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        let share = counts[2] as f64 / draws as f64;
        assert!((share - 0.8).abs() < 0.02, "share {share}");
    }

    #[test]
    fn plus_plus_weights_by_squared_distance() {
        // Points at 0, 1 and 3 on a line. After starting at 0, the point at 3
        // is drawn with probability 9/10 (it would be 3/4 if weighted by distance).
        let data = vec![vec![0.0], vec![1.0], vec![3.0]];
        let mut started_at_zero = 0usize;
        let mut picked_far = 0usize;
        for seed in 0..6_000 {
            let mut rng = StdRng::seed_from_u64(seed);
            let idx = KmeansPlusPlus.seed_indices(&data, 2, &mut rng).unwrap();
            if idx[0] == 0 {
                started_at_zero += 1;
                if idx[1] == 2 {
                    picked_far += 1;
                }
            }
        }
        assert!(started_at_zero > 1_000);
        let share = picked_far as f64 / started_at_zero as f64;
        assert!((share - 0.9).abs() < 0.04, "share {share}");
    }

    #[test]
    fn too_few_distinct_points() {
        let data = vec![vec![1.0], vec![1.0], vec![1.0]];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            KmeansPlusPlus.seed_indices(&data, 2, &mut rng),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn invalid_cluster_count() {
        let mut rng = StdRng::seed_from_u64(0);
        for k in [0, 1, 6, 7] {
            assert!(matches!(
                KmeansPlusPlus.seed(&data(), k, &mut rng),
                Err(Error::InvalidClusterCount { .. })
            ));
            assert!(matches!(
                FirstK.seed(&data(), k, &mut rng),
                Err(Error::InvalidClusterCount { .. })
            ));
        }
    }

    #[test]
    fn init_dispatches() {
        let mut rng = StdRng::seed_from_u64(3);
        let c = Init::FirstK.seed(&data(), 2, &mut rng).unwrap();
        assert_eq!(c, data()[..2].to_vec());
        let c = Init::KmeansPlusPlus.seed(&data(), 2, &mut rng).unwrap();
        assert_eq!(c.len(), 2);
    }
}
