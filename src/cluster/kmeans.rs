//! K-means clustering (Lloyd's algorithm).
//!
//! Partitions points into `k` clusters by minimizing the within-cluster sum of
//! squares:
//!
//! ```text
//! WCSS = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Each iteration runs three phases:
//!
//! 1. **Assign**: every point goes to its nearest centroid (ties to the lowest
//!    centroid index).
//! 2. **Update**: every centroid moves to the mean of its assigned points. A
//!    centroid with no points keeps its previous position.
//! 3. **Check**: stop when the largest centroid shift is strictly below `tol`,
//!    or after `max_iter` iterations.
//!
//! WCSS never increases from one update to the next, so the loop settles in a
//! local minimum. Which minimum depends on the initial centroids; see
//! [`Init`](super::Init) for first-k and k-means++ seeding.

use super::linalg::squared_euclidean_unchecked;
use super::metrics;
use super::seed::Init;
use super::traits::{Clustering, Seeder};
use super::util;
use crate::error::{Error, Result};
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default iteration cap for [`Kmeans`].
pub const DEFAULT_MAX_ITER: usize = 300;

/// Default tolerance on the largest centroid shift.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Result of a k-means run.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Final centroids (k x d).
    pub centroids: Vec<Vec<f64>>,
    /// Nearest-centroid label for every point, against the final centroids.
    pub labels: Vec<usize>,
    /// Number of assign/update iterations performed.
    pub n_iter: usize,
    /// Whether the shift tolerance was met before the cap.
    pub converged: bool,
    /// Within-cluster sum of squared distances for `labels`.
    pub inertia: f64,
}

/// Refine `initial_centroids` over `data` with Lloyd iterations.
///
/// `k` must equal `initial_centroids.len()` and satisfy `1 < k < n`.
pub fn run_kmeans(
    data: &[Vec<f64>],
    k: usize,
    initial_centroids: Vec<Vec<f64>>,
    max_iter: usize,
    tol: f64,
) -> Result<KmeansFit> {
    let (n, d) = util::validate_points(data)?;
    util::validate_k(k, n)?;
    if initial_centroids.len() != k {
        return Err(Error::InvalidParameter {
            name: "initial_centroids",
            message: "must contain exactly k centroids",
        });
    }
    for c in &initial_centroids {
        if c.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: c.len(),
            });
        }
        if c.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "initial_centroids",
                message: "must contain only finite values",
            });
        }
    }
    if tol.is_nan() || tol < 0.0 {
        return Err(Error::InvalidParameter {
            name: "tol",
            message: "must be non-negative",
        });
    }

    let mut centroids = initial_centroids;
    let mut labels = vec![0usize; n];
    let mut n_iter = 0;
    let mut converged = false;

    while n_iter < max_iter {
        assign(data, &centroids, &mut labels);

        // The update reads the complete label vector, so it starts only after
        // every assignment is written.
        let next = update(data, &labels, &centroids);
        n_iter += 1;

        let shift = centroids
            .iter()
            .zip(next.iter())
            .map(|(old, new)| squared_euclidean_unchecked(old, new).sqrt())
            .fold(0.0, f64::max);
        centroids = next;
        log::trace!("kmeans iter {n_iter}: max shift={shift:.3e}");

        if shift < tol {
            converged = true;
            break;
        }
    }

    assign(data, &centroids, &mut labels);
    let inertia = metrics::inertia(data, &centroids, &labels)?;
    log::debug!(
        "kmeans finished: n={n} k={k} iterations={n_iter} converged={converged} \
         inertia={inertia:.4}"
    );

    Ok(KmeansFit {
        centroids,
        labels,
        n_iter,
        converged,
        inertia,
    })
}

fn assign(data: &[Vec<f64>], centroids: &[Vec<f64>], labels: &mut [usize]) {
    #[cfg(feature = "parallel")]
    labels
        .par_iter_mut()
        .zip(data.par_iter())
        .for_each(|(label, point)| *label = util::nearest(point, centroids).0);

    #[cfg(not(feature = "parallel"))]
    for (label, point) in labels.iter_mut().zip(data) {
        *label = util::nearest(point, centroids).0;
    }
}

fn update(data: &[Vec<f64>], labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = previous.len();
    let d = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; d]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in data.iter().zip(labels) {
        for (s, x) in sums[label].iter_mut().zip(point) {
            *s += x;
        }
        counts[label] += 1;
    }

    let mut empty = 0usize;
    for (c, sum) in sums.iter_mut().enumerate() {
        if counts[c] == 0 {
            sum.clone_from(&previous[c]);
            empty += 1;
        } else {
            let count = counts[c] as f64;
            for s in sum.iter_mut() {
                *s /= count;
            }
        }
    }
    if empty > 0 {
        log::warn!("kmeans: {empty} empty cluster(s) kept their previous centroid");
    }
    sums
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance on the largest centroid shift.
    tol: f64,
    /// Random seed for k-means++.
    seed: Option<u64>,
    /// Centroid initialization.
    init: Init,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            seed: None,
            init: Init::default(),
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the centroid initialization strategy.
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    /// Seed centroids with the configured strategy and refine them.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KmeansFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, rng.as_mut())
    }

    /// Like [`fit`](Self::fit), drawing from `rng` instead of the configured seed.
    pub fn fit_with_rng(&self, data: &[Vec<f64>], rng: &mut dyn RngCore) -> Result<KmeansFit> {
        let initial = self.init.seed(data, self.k, rng)?;
        run_kmeans(data, self.k, initial, self.max_iter, self.tol)
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
