//! Dense clustering by SymNMF and k-means.
//!
//! `symnmf` clusters a set of real-valued points two ways so the results can be
//! compared:
//! - SymNMF: similarity graph (`sym`), degrees (`ddg`), normalized affinity
//!   (`norm`), then a multiplicative-update factorization `W ≈ H·Hᵀ`
//! - k-means (Lloyd iterations, first-k or k-means++ seeding)
//!
//! Everything lives under [`cluster`]. All randomness is drawn from a caller
//! supplied or explicitly seeded RNG; there is no global seed.
//!
//! Enable the `parallel` feature to spread row-wise work over rayon's pool.
//! Results are identical with and without it.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    affinity, degree, factorize, normalize, run_kmeans, seed_kmeans_plus_plus, Clustering, Init,
    Kmeans, KmeansFit, Matrix, Seeder, SymNmf, SymNmfFit,
};
pub use error::{Error, Result};
