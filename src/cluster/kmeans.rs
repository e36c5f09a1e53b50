//! K-means clustering (Lloyd's algorithm).
//!
//! # The Objective
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. **Seed**: the first `k` points, in input order, are the initial centroids.
//! 2. **Assign**: each point goes to its nearest centroid (lowest index on ties).
//! 3. **Update**: each centroid moves to the mean of its points.
//! 4. Stop when no centroid coordinate moved by `tol` or more, or after `max_iter` rounds.
//!
//! Seeding is deterministic, so the only source of randomness is the policy for
//! clusters that end up with no points, chosen through [`Reseed`].

use log::{debug, trace, warn};
use ndarray::{Array2, Axis, Slice};
use rand::prelude::*;

use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};

/// What to do with a centroid whose cluster received no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reseed {
    /// Move it onto the point farthest from its own centroid (lowest index on ties).
    #[default]
    Farthest,
    /// Draw it uniformly inside the bounding box of the data, from a dedicated generator.
    Uniform {
        /// Seed of the reseeding generator.
        seed: u64,
    },
    /// Leave it where it was.
    Keep,
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum number of rounds.
    max_iter: usize,
    /// Per-coordinate movement below which a round counts as converged.
    tol: f64,
    /// Empty-cluster policy.
    reseed: Reseed,
}

/// Result of a k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// Centroids the returned labels were assigned against, k×d.
    pub centroids: Array2<f64>,
    /// Cluster label per point.
    pub labels: Vec<usize>,
    /// Number of rounds run.
    pub iterations: usize,
    /// `true` if the centroids settled before the round cap.
    pub converged: bool,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    ///
    /// Defaults: `max_iter = 300`, `tol = 1e-4`, `reseed = Reseed::Farthest`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            reseed: Reseed::default(),
        }
    }

    /// Set maximum rounds.
    ///
    /// Must be at least 1: labels only exist after one assignment round.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the empty-cluster policy.
    pub fn with_reseed(mut self, reseed: Reseed) -> Self {
        self.reseed = reseed;
        self
    }

    /// Fit and return centroids along with labels.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KmeansFit> {
        let d = util::check_points(data)?;
        let n = data.len();
        util::check_rank(self.k, n)?;

        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.tol.is_nan() || self.tol <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be positive",
            });
        }

        let x = util::to_matrix(data, d);
        let mut centroids = x.slice_axis(Axis(0), Slice::from(..self.k)).to_owned();
        let mut rng = match self.reseed {
            Reseed::Uniform { seed } => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };

        let mut labels = Vec::new();
        for iter in 0..self.max_iter {
            labels = assign_rows(&x, &centroids);
            let next = self.update(&x, &labels, &centroids, rng.as_mut());

            let settled = centroids
                .iter()
                .zip(next.iter())
                .all(|(a, b)| (a - b).abs() < self.tol);
            trace!("kmeans: round {iter}, settled {settled}");

            if settled {
                debug!("kmeans: converged after {} rounds", iter + 1);
                return Ok(KmeansFit {
                    centroids,
                    labels,
                    iterations: iter + 1,
                    converged: true,
                });
            }
            if iter + 1 < self.max_iter {
                centroids = next;
            }
        }

        debug!("kmeans: stopped at the {} round cap", self.max_iter);
        Ok(KmeansFit {
            centroids,
            labels,
            iterations: self.max_iter,
            converged: false,
        })
    }

    /// Means of the assigned points, with empty clusters reseeded.
    fn update(
        &self,
        x: &Array2<f64>,
        labels: &[usize],
        centroids: &Array2<f64>,
        mut rng: Option<&mut StdRng>,
    ) -> Array2<f64> {
        let d = x.ncols();
        let mut next = Array2::zeros((self.k, d));
        let mut counts = vec![0usize; self.k];

        for (row, &label) in x.rows().into_iter().zip(labels) {
            let mut acc = next.row_mut(label);
            acc += &row;
            counts[label] += 1;
        }

        let mut taken: Vec<usize> = Vec::new();
        for c in 0..self.k {
            if counts[c] > 0 {
                let inv = 1.0 / counts[c] as f64;
                next.row_mut(c).mapv_inplace(|v| v * inv);
                continue;
            }

            warn!("kmeans: cluster {c} is empty, reseeding ({:?})", self.reseed);
            match (self.reseed, rng.as_deref_mut()) {
                (Reseed::Farthest, _) => {
                    let i = farthest_point(x, labels, centroids, &taken);
                    taken.push(i);
                    next.row_mut(c).assign(&x.row(i));
                }
                (Reseed::Uniform { .. }, Some(rng)) => {
                    for j in 0..d {
                        let col = x.column(j);
                        let lo = col.iter().copied().fold(f64::INFINITY, f64::min);
                        let hi = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                        next[[c, j]] = lo + rng.random::<f64>() * (hi - lo);
                    }
                }
                _ => next.row_mut(c).assign(&centroids.row(c)),
            }
        }
        next
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Label each point with its nearest centroid (lowest index on ties).
pub fn assign(data: &[Vec<f64>], centroids: &Array2<f64>) -> Result<Vec<usize>> {
    let d = util::check_points(data)?;
    if centroids.ncols() != d {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: centroids.ncols(),
        });
    }
    if centroids.nrows() == 0 {
        return Err(Error::InvalidRank {
            requested: 0,
            n_items: data.len(),
        });
    }
    Ok(assign_rows(&util::to_matrix(data, d), centroids))
}

fn assign_rows(x: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
    x.rows()
        .into_iter()
        .map(|point| {
            let mut best_cluster = 0;
            let mut best_dist = f64::INFINITY;
            for (c, centroid) in centroids.rows().into_iter().enumerate() {
                let dist = util::squared_euclidean_view(point, centroid);
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = c;
                }
            }
            best_cluster
        })
        .collect()
}

fn farthest_point(
    x: &Array2<f64>,
    labels: &[usize],
    centroids: &Array2<f64>,
    taken: &[usize],
) -> usize {
    let mut best = 0;
    let mut best_dist = f64::NEG_INFINITY;
    for (i, point) in x.rows().into_iter().enumerate() {
        if taken.contains(&i) {
            continue;
        }
        let dist = util::squared_euclidean_view(point, centroids.row(labels[i]));
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
