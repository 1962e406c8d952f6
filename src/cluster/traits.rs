use crate::error::Result;
use rand::RngCore;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}

/// Strategy producing the initial centroids for k-means.
///
/// Implementations must be deterministic for a given `rng` state.
pub trait Seeder {
    /// Choose `k` initial centroids from `data`.
    fn seed(&self, data: &[Vec<f64>], k: usize, rng: &mut dyn RngCore) -> Result<Vec<Vec<f64>>>;
}
