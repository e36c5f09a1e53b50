//! Clustering algorithms for dense points.
//!
//! ## Algorithms
//!
//! ### SymNMF
//!
//! Graph clustering by symmetric non-negative matrix factorization:
//!
//! 1. [`graph::similarity`]: Gaussian affinity `A` between every pair of points
//! 2. [`graph::normalize`]: `W = D^{-1/2} A D^{-1/2}` with `D` the degree matrix
//! 3. [`SymNmf::factorize`]: find `H >= 0` with `W ≈ H·Hᵗ`
//! 4. [`symnmf::extract_labels`]: each point joins the column where its row of `H` peaks
//!
//! Works on the graph, so it can follow non-convex shapes as long as neighbouring
//! points within a cluster are close at the kernel's unit bandwidth.
//!
//! ### K-means
//!
//! Lloyd iterations seeded with the first `k` points. Assumes roughly spherical
//! clusters of similar size.
//!
//! ## Usage
//!
//! ```rust
//! use symclump::cluster::{Clustering, Kmeans, SymNmf};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![10.0, 10.0],
//!     vec![0.1, 0.1],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[2]);
//! assert_ne!(labels[0], labels[1]);
//!
//! let labels = SymNmf::new(2).with_seed(0).fit_predict(&data).unwrap();
//! assert_eq!(labels.len(), data.len());
//! ```

pub mod graph;
pub mod kmeans;
pub mod symnmf;
mod traits;
pub(crate) mod util;

pub use kmeans::{Kmeans, KmeansFit, Reseed};
pub use symnmf::{NmfFit, SymNmf};
pub use traits::Clustering;
