//! Similarity graph construction and normalization.
//!
//! The three stages are historically named `sym`, `ddg` and `norm`:
//!
//! ```text
//! A[i][j] = exp(-||x_i - x_j||² / 2)      (i != j),  A[i][i] = 0
//! D[i]    = Σ_j A[i][j]
//! W[i][j] = A[i][j] / sqrt(D[i] · D[j])
//! ```
//!
//! `W` is the input to [`factorize`](super::factorize). Scaling by the
//! degrees keeps points with a large total similarity ("hubs") from
//! dominating the factorization.
//!
//! A point far enough from every other point has all of its similarities
//! underflow to exactly zero. Its degree is then zero and [`normalize`] fails
//! with [`Error::SingularDegree`] rather than emit NaN.

use super::linalg::{squared_euclidean_unchecked, Matrix};
use super::util;
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Affinity matrix `A` (`sym`).
///
/// Only the strict upper triangle is computed; it is mirrored into the lower
/// triangle and the diagonal stays zero.
pub fn affinity(data: &[Vec<f64>]) -> Result<Matrix> {
    let (n, _) = util::validate_points(data)?;

    let upper_row = |i: usize| -> Vec<f64> {
        data[i + 1..]
            .iter()
            .map(|other| (-squared_euclidean_unchecked(&data[i], other) / 2.0).exp())
            .collect()
    };

    #[cfg(feature = "parallel")]
    let upper: Vec<Vec<f64>> = (0..n).into_par_iter().map(upper_row).collect();

    #[cfg(not(feature = "parallel"))]
    let upper: Vec<Vec<f64>> = (0..n).map(upper_row).collect();

    let mut a = Matrix::zeros(n, n);
    for (i, row) in upper.iter().enumerate() {
        for (offset, &v) in row.iter().enumerate() {
            let j = i + 1 + offset;
            a[(i, j)] = v;
            a[(j, i)] = v;
        }
    }
    Ok(a)
}

/// Degree vector `D` (`ddg`): row sums of `a`.
pub fn degree(a: &Matrix) -> Result<Vec<f64>> {
    check_square(a)?;
    Ok((0..a.rows()).map(|i| a.row(i).iter().sum()).collect())
}

/// Degree as a full `n x n` diagonal matrix.
pub fn degree_matrix(a: &Matrix) -> Result<Matrix> {
    degree(a).map(|d| Matrix::from_diagonal(&d))
}

/// Normalized affinity `W` (`norm`).
///
/// Fails with [`Error::SingularDegree`] on the first zero entry of `degree`.
pub fn normalize(a: &Matrix, degree: &[f64]) -> Result<Matrix> {
    let n = check_square(a)?;
    if degree.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: degree.len(),
        });
    }
    for (index, &d) in degree.iter().enumerate() {
        if !d.is_finite() || d < 0.0 {
            return Err(Error::InvalidParameter {
                name: "degree",
                message: "must be finite and non-negative",
            });
        }
        if d == 0.0 {
            return Err(Error::SingularDegree { index });
        }
    }

    let mut w = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            w[(i, j)] = a[(i, j)] / (degree[i] * degree[j]).sqrt();
        }
    }
    Ok(w)
}

/// `sym -> ddg -> norm` in one call.
pub fn normalized_affinity(data: &[Vec<f64>]) -> Result<Matrix> {
    let a = affinity(data)?;
    let d = degree(&a)?;
    normalize(&a, &d)
}

fn check_square(m: &Matrix) -> Result<usize> {
    if m.rows() != m.cols() {
        return Err(Error::DimensionMismatch {
            expected: m.rows(),
            found: m.cols(),
        });
    }
    Ok(m.rows())
}
