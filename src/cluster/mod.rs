//! Clustering of dense point sets by two independent routes.
//!
//! ## SymNMF
//!
//! Builds a similarity graph over the points, normalizes it, and factorizes
//! it into a low-rank non-negative assignment matrix:
//!
//! ```text
//! points ─► A (affinity) ─► D (degree) ─► W = D^-1/2 A D^-1/2
//!        ─► H ≥ 0 with W ≈ H·Hᵀ ─► argmax per row
//! ```
//!
//! `H` is a **soft** clustering: row `i` weighs point `i` against each of the
//! `k` clusters. The hard label is the strongest column.
//!
//! **When to use**: clusters that are connected but not convex, where what
//! matters is local similarity rather than distance to a center.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! Initial centroids come from a [`Seeder`]: the first `k` points, or
//! k-means++.
//!
//! ## Comparing the routes
//!
//! Both implement [`Clustering`], and [`metrics::silhouette_score`] scores
//! either label vector.
//!
//! ## Usage
//!
//! ```rust
//! use symnmf::cluster::{metrics, Clustering, Kmeans, SymNmf};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![0.2, 0.0],
//!     vec![5.0, 5.0],
//!     vec![5.1, 5.1],
//!     vec![5.0, 5.2],
//! ];
//!
//! let nmf = SymNmf::new(2).with_seed(1234).fit_predict(&data).unwrap();
//! assert_eq!(nmf[0], nmf[1]);
//! assert_ne!(nmf[0], nmf[3]);
//!
//! let km = Kmeans::new(2).with_seed(1234).fit_predict(&data).unwrap();
//! assert_eq!(km[3], km[4]);
//!
//! let score = metrics::silhouette_score(&data, &km).unwrap();
//! assert!(score > 0.5);
//! ```

mod kmeans;
pub mod linalg;
pub mod metrics;
mod seed;
pub mod similarity;
mod symnmf;
mod traits;
mod util;

pub use kmeans::{run_kmeans, Kmeans, KmeansFit};
pub use linalg::Matrix;
pub use seed::{seed_kmeans_plus_plus, FirstK, Init, KmeansPlusPlus};
pub use similarity::{affinity, degree, degree_matrix, normalize, normalized_affinity};
pub use symnmf::{
    factorize, factorize_with_stats, hard_labels, init_h, Factorization, SymNmf, SymNmfFit,
    DENOMINATOR_FLOOR,
};
pub use traits::{Clustering, Seeder};

/// Default iteration caps and tolerances.
pub mod defaults {
    pub use super::kmeans::{DEFAULT_MAX_ITER as KMEANS_MAX_ITER, DEFAULT_TOL as KMEANS_TOL};
    pub use super::symnmf::{DEFAULT_MAX_ITER as SYMNMF_MAX_ITER, DEFAULT_TOL as SYMNMF_TOL};
}
