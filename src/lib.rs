//! Graph-based and centroid-based clustering of dense points.
//!
//! `symclump` clusters a set of points with two competing algorithms and compares them:
//! - SymNMF: Gaussian similarity graph, symmetric degree normalization, and a
//!   multiplicative-update factorization `W ≈ H·Hᵗ` read out as cluster membership
//! - Lloyd k-means seeded with the first `k` points
//!
//! [`pipeline`] sequences both against the same dataset and scores them with the
//! silhouette coefficient from [`metrics`]. [`io`] holds the text boundary used by the
//! `symnmf` and `analysis` binaries.

#![forbid(unsafe_code)]

pub mod cli;
pub mod cluster;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;

pub use cluster::{Clustering, Kmeans, KmeansFit, NmfFit, Reseed, SymNmf};
pub use error::{Error, Result};
pub use metrics::{silhouette_score, ClusterScore, Silhouette};
pub use pipeline::{compare, run_goal, Comparison, Goal};
