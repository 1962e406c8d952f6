use crate::error::{Error, Result};

/// Check a point set and return `(n, d)`.
///
/// Rejects empty input, ragged rows, and non-finite coordinates.
pub(crate) fn validate_points(data: &[Vec<f64>]) -> Result<(usize, usize)> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    for point in data {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        if point.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "data",
                message: "must contain only finite values",
            });
        }
    }
    Ok((data.len(), d))
}

/// A partition into `k` clusters is only meaningful for `1 < k < n`.
pub(crate) fn validate_k(k: usize, n: usize) -> Result<()> {
    if k <= 1 || k >= n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }
    Ok(())
}

/// Index of the nearest centroid; ties go to the lowest index.
#[inline]
pub(crate) fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = super::linalg::squared_euclidean_unchecked(point, centroid).sqrt();
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    (best, best_dist)
}
