//! Clustering quality metrics.
//!
//! - [`inertia`]: within-cluster sum of squared distances to the centroids
//!   (the k-means objective).
//! - [`silhouette_samples`] / [`silhouette_score`]: per-point and mean
//!   silhouette coefficient with Euclidean distance, in `[-1, 1]`.
//!
//! For point `i` with cluster `C`:
//!
//! ```text
//! a(i) = mean distance from i to the other members of C
//! b(i) = min over clusters C' != C of the mean distance from i to C'
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! A point alone in its cluster scores 0, as does a point with
//! `a(i) = b(i) = 0`.

use super::linalg::squared_euclidean_unchecked;
use super::util;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Within-cluster sum of squared distances.
pub fn inertia(data: &[Vec<f64>], centroids: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
    let (_, d) = util::validate_points(data)?;
    check_labels(data.len(), labels)?;
    for c in centroids {
        if c.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: c.len(),
            });
        }
    }

    let mut total = 0.0;
    for (point, &label) in data.iter().zip(labels) {
        let centroid = centroids.get(label).ok_or(Error::InvalidParameter {
            name: "labels",
            message: "label has no matching centroid",
        })?;
        total += squared_euclidean_unchecked(point, centroid);
    }
    Ok(total)
}

/// Silhouette coefficient of every point.
///
/// Requires between 2 and `n - 1` distinct labels.
pub fn silhouette_samples(data: &[Vec<f64>], labels: &[usize]) -> Result<Vec<f64>> {
    let (n, _) = util::validate_points(data)?;
    check_labels(n, labels)?;

    // Map arbitrary label values onto 0..n_clusters.
    let mut index: HashMap<usize, usize> = HashMap::new();
    let compact: Vec<usize> = labels
        .iter()
        .map(|l| {
            let next = index.len();
            *index.entry(*l).or_insert(next)
        })
        .collect();
    let n_clusters = index.len();
    if n_clusters < 2 || n_clusters > n - 1 {
        return Err(Error::InvalidParameter {
            name: "labels",
            message: "number of distinct labels must be in [2, n - 1]",
        });
    }

    let mut sizes = vec![0usize; n_clusters];
    for &c in &compact {
        sizes[c] += 1;
    }

    let mut scores = Vec::with_capacity(n);
    let mut dist_sums = vec![0.0; n_clusters];
    for i in 0..n {
        dist_sums.fill(0.0);
        for j in 0..n {
            if i != j {
                dist_sums[compact[j]] += squared_euclidean_unchecked(&data[i], &data[j]).sqrt();
            }
        }

        let own = compact[i];
        if sizes[own] == 1 {
            scores.push(0.0);
            continue;
        }
        let a = dist_sums[own] / (sizes[own] - 1) as f64;
        let b = (0..n_clusters)
            .filter(|&c| c != own)
            .map(|c| dist_sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        scores.push(if denom > 0.0 { (b - a) / denom } else { 0.0 });
    }
    Ok(scores)
}

/// Mean silhouette coefficient over all points.
pub fn silhouette_score(data: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
    let samples = silhouette_samples(data, labels)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

fn check_labels(n: usize, labels: &[usize]) -> Result<()> {
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }
    Ok(())
}
