//! Symmetric Non-negative Matrix Factorization (SymNMF).
//!
//! Approximates the normalized affinity `W` (n x n) as `H · Hᵀ` with `H` (n x k)
//! non-negative, minimizing `||W - H·Hᵀ||²_F`. Row `i` of `H` is a soft
//! membership of point `i`; its hard label is the argmax over columns.
//!
//! # Update rule
//!
//! Damped multiplicative update with `β = 0.5`:
//!
//! ```text
//! H ← H ∘ (1 - β + β · (W·H) / (H·(Hᵀ·H)))
//! ```
//!
//! Every factor is non-negative, so a non-negative `H` stays non-negative.
//! Iteration stops when `||H_next - H||²_F < tol` or after `max_iter` updates.
//!
//! # Initialization
//!
//! Entries of `H₀` are drawn uniformly from `[0, 2·sqrt(m / k)]` where `m` is
//! the mean entry of `W`, which puts `H₀·H₀ᵀ` on the same scale as `W`.
//!
//! # References
//!
//! Kuang, Ding, Park (2012). "Symmetric Nonnegative Matrix Factorization for
//! Graph Clustering." SDM 2012.

use super::linalg::Matrix;
use super::similarity;
use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};
use rand::prelude::*;

/// Default iteration cap for [`factorize`] and [`SymNmf`].
pub const DEFAULT_MAX_ITER: usize = 300;

/// Default convergence tolerance on the squared Frobenius step size.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Substituted for an exactly-zero update denominator.
pub const DENOMINATOR_FLOOR: f64 = 1e-12;

const BETA: f64 = 0.5;

/// Outcome of the multiplicative-update loop.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// Final `H` (n x k).
    pub h: Matrix,
    /// Number of updates applied.
    pub n_iter: usize,
    /// Whether the step size fell below the tolerance before the cap.
    pub converged: bool,
}

/// Sample an initial `H` (n x k) for `w`.
pub fn init_h<R: Rng + ?Sized>(w: &Matrix, k: usize, rng: &mut R) -> Result<Matrix> {
    let n = w.rows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if w.cols() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: w.cols(),
        });
    }
    util::validate_k(k, n)?;

    let m = w.mean().max(0.0);
    let upper = 2.0 * (m / k as f64).sqrt();
    let data = (0..n * k).map(|_| rng.random::<f64>() * upper).collect();
    Matrix::from_vec(n, k, data)
}

/// Factorize `w` starting from `h0`; `k` is the column count of `h0`.
///
/// Fails with [`Error::InvalidClusterCount`] before iterating unless `1 < k < n`.
/// `w` and `h0` must be finite and non-negative.
/// Reaching `max_iter` is not an error; the last iterate is returned.
pub fn factorize(w: &Matrix, h0: Matrix, max_iter: usize, tol: f64) -> Result<Matrix> {
    factorize_with_stats(w, h0, max_iter, tol).map(|f| f.h)
}

/// Like [`factorize`], also reporting iteration count and convergence.
pub fn factorize_with_stats(
    w: &Matrix,
    h0: Matrix,
    max_iter: usize,
    tol: f64,
) -> Result<Factorization> {
    let n = w.rows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if w.cols() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: w.cols(),
        });
    }
    let k = h0.cols();
    util::validate_k(k, n)?;
    if h0.rows() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: h0.rows(),
        });
    }
    if w.iter().any(|&x| !x.is_finite() || x < 0.0) {
        return Err(Error::InvalidParameter {
            name: "w",
            message: "must be finite and non-negative",
        });
    }
    if h0.iter().any(|&x| !x.is_finite() || x < 0.0) {
        return Err(Error::InvalidParameter {
            name: "h0",
            message: "must be finite and non-negative",
        });
    }
    if tol.is_nan() || tol < 0.0 {
        return Err(Error::InvalidParameter {
            name: "tol",
            message: "must be non-negative",
        });
    }

    let mut h = h0;
    let mut n_iter = 0;
    let mut converged = false;
    let mut delta = f64::INFINITY;
    let mut floored = 0usize;

    while n_iter < max_iter {
        let (next, zeros) = update(w, &h)?;
        floored += zeros;
        n_iter += 1;
        delta = next.squared_distance(&h)?;
        h = next;
        log::trace!("symnmf iter {n_iter}: delta={delta:.3e}");
        if delta < tol {
            converged = true;
            break;
        }
    }

    if floored > 0 {
        log::warn!("symnmf: floored {floored} zero denominators over {n_iter} iterations");
    }
    log::debug!(
        "symnmf finished: n={n} k={k} iterations={n_iter} converged={converged} delta={delta:.3e}"
    );
    Ok(Factorization { h, n_iter, converged })
}

/// One damped multiplicative update, with the number of floored denominators.
fn update(w: &Matrix, h: &Matrix) -> Result<(Matrix, usize)> {
    let numerator = w.matmul(h)?;
    let gram = h.transpose().matmul(h)?;
    let denominator = h.matmul(&gram)?;

    let (n, k) = h.shape();
    let mut next = Matrix::zeros(n, k);
    let mut floored = 0usize;
    for i in 0..n {
        for j in 0..k {
            let mut den = denominator[(i, j)];
            if den == 0.0 {
                den = DENOMINATOR_FLOOR;
                floored += 1;
            }
            next[(i, j)] = h[(i, j)] * (1.0 - BETA + BETA * numerator[(i, j)] / den);
        }
    }
    Ok((next, floored))
}

/// Hard labels from `h`: per-row argmax, ties to the lowest column.
pub fn hard_labels(h: &Matrix) -> Vec<usize> {
    (0..h.rows())
        .map(|i| {
            let row = h.row(i);
            let mut best = 0;
            for (j, &v) in row.iter().enumerate().skip(1) {
                if v > row[best] {
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Result of [`SymNmf::fit`].
#[derive(Debug, Clone)]
pub struct SymNmfFit {
    /// Normalized affinity the factorization ran on.
    pub w: Matrix,
    /// Final assignment matrix (n x k).
    pub h: Matrix,
    /// Hard label per point.
    pub labels: Vec<usize>,
    /// Number of multiplicative updates applied.
    pub n_iter: usize,
    /// Whether the tolerance was reached before the cap.
    pub converged: bool,
}

/// SymNMF clustering: points → `W` → `H` → labels.
#[derive(Debug, Clone)]
pub struct SymNmf {
    k: usize,
    max_iter: usize,
    tol: f64,
    seed: Option<u64>,
}

impl SymNmf {
    /// Create a new SymNMF clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            seed: None,
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

    /// Set random seed for reproducible `H₀` sampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the pipeline with the configured seed (or thread entropy).
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<SymNmfFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, &mut rng)
    }

    /// Run the pipeline drawing `H₀` from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        data: &[Vec<f64>],
        rng: &mut R,
    ) -> Result<SymNmfFit> {
        let (n, _) = util::validate_points(data)?;
        util::validate_k(self.k, n)?;

        let w = similarity::normalized_affinity(data)?;
        let h0 = init_h(&w, self.k, rng)?;
        let Factorization { h, n_iter, converged } =
            factorize_with_stats(&w, h0, self.max_iter, self.tol)?;
        let labels = hard_labels(&h);

        Ok(SymNmfFit {
            w,
            h,
            labels,
            n_iter,
            converged,
        })
    }
}

impl Default for SymNmf {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for SymNmf {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
