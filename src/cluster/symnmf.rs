//! Symmetric non-negative matrix factorization (SymNMF).
//!
//! # The Objective
//!
//! Given the normalized similarity matrix `W` (n×n, symmetric, non-negative), find a
//! non-negative factor `H` (n×k) minimizing
//!
//! ```text
//! ||W - H·Hᵗ||²_F
//! ```
//!
//! Row `i` of `H` is read as an unnormalized soft membership of point `i` over the `k`
//! clusters; the hard label is its dominant column.
//!
//! # Multiplicative Updates
//!
//! ```text
//! H ← H ∘ ((1 - β) + β · (W·H) ⊘ (H·Hᵗ·H + ε))
//! ```
//!
//! With `β = 1` this is the plain multiplicative rule; `β < 1` damps each step
//! (Ding et al. use `β = 1/2`). Every factor of the update is non-negative, so `H` stays
//! non-negative as long as the start is. `ε` keeps rows that collapse to zero from
//! dividing by zero.
//!
//! # Initialization
//!
//! Entries of the initial `H` are drawn uniformly from `[0, 2·sqrt(m/k))` where `m` is the
//! mean entry of `W`, so `H·Hᵗ` starts at the scale of `W`.
//!
//! # Termination
//!
//! After `max_iter` updates, or as soon as `||H_next - H||²_F < tol`. Hitting the cap is a
//! normal outcome, reported through [`NmfFit::converged`].
//!
//! # References
//!
//! Kuang, Ding, Park (2012). "Symmetric Nonnegative Matrix Factorization for Graph
//! Clustering." SDM 2012.

use log::{debug, trace};
use ndarray::{Array2, Zip};
use rand::prelude::*;

use super::graph;
use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};

/// Guards the update ratio against all-zero rows of `H`.
const DENOM_EPS: f64 = 1e-12;

/// SymNMF clustering.
#[derive(Debug, Clone)]
pub struct SymNmf {
    /// Rank of the factorization (number of clusters).
    k: usize,
    /// Maximum number of updates.
    max_iter: usize,
    /// Convergence threshold on the squared Frobenius norm of one update.
    tol: f64,
    /// Damping of the multiplicative step, in `(0, 1]`.
    beta: f64,
    /// Seed for the initial factor.
    seed: u64,
}

/// Result of a factorization.
#[derive(Debug, Clone)]
pub struct NmfFit {
    /// The non-negative factor, n×k.
    pub h: Array2<f64>,
    /// Number of updates applied.
    pub iterations: usize,
    /// `true` if the update norm dropped below the threshold before the cap.
    pub converged: bool,
}

impl SymNmf {
    /// Create a new SymNMF solver of rank `k`.
    ///
    /// Defaults: `max_iter = 300`, `tol = 1e-4`, `beta = 1.0`, `seed = 0`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            tol: 1e-4,
            beta: 1.0,
            seed: 0,
        }
    }

    /// Set maximum number of updates.
    ///
    /// Unlike [`Kmeans`](super::Kmeans), zero is allowed: the starting factor already
    /// yields labels, so the fit returns it unchanged.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence threshold.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the damping factor of the update rule.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the seed used to draw the initial factor.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the whole pipeline on raw points: similarity, normalization, factorization.
    ///
    /// Points are validated once, inside [`graph::similarity`].
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<NmfFit> {
        if data.is_empty() {
            return Err(Error::EmptyDataset);
        }
        util::check_rank(self.k, data.len())?;
        let w = graph::normalized_similarity(data)?;
        self.factorize(&w)
    }

    /// Factorize `W`, drawing the initial factor from the configured seed.
    pub fn factorize(&self, w: &Array2<f64>) -> Result<NmfFit> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.factorize_with_rng(w, &mut rng)
    }

    /// Factorize `W`, drawing the initial factor from `rng`.
    pub fn factorize_with_rng<R: Rng>(
        &self,
        w: &Array2<f64>,
        rng: &mut R,
    ) -> Result<NmfFit> {
        let n = check_square(w)?;
        util::check_rank(self.k, n)?;
        let h0 = initial_factor(w, self.k, rng);
        self.factorize_from(w, h0)
    }

    /// Factorize `W` starting from a caller-supplied non-negative `H`.
    pub fn factorize_from(&self, w: &Array2<f64>, h0: Array2<f64>) -> Result<NmfFit> {
        self.check_params()?;
        let n = check_square(w)?;
        if h0.nrows() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: h0.nrows(),
            });
        }
        if h0.ncols() != self.k {
            return Err(Error::DimensionMismatch {
                expected: self.k,
                found: h0.ncols(),
            });
        }
        if h0.iter().any(|&x| x.is_nan() || x < 0.0) {
            return Err(Error::InvalidParameter {
                name: "h",
                message: "initial factor must be non-negative",
            });
        }

        let mut h = h0;
        for iter in 0..self.max_iter {
            let next = self.step(w, &h);
            let delta: f64 = next
                .iter()
                .zip(h.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            h = next;
            trace!("symnmf: iter {iter}, delta {delta:.3e}");

            if delta < self.tol {
                debug!("symnmf: converged after {} updates", iter + 1);
                return Ok(NmfFit {
                    h,
                    iterations: iter + 1,
                    converged: true,
                });
            }
        }

        debug!("symnmf: stopped at the {} update cap", self.max_iter);
        Ok(NmfFit {
            h,
            iterations: self.max_iter,
            converged: false,
        })
    }

    /// One multiplicative update.
    fn step(&self, w: &Array2<f64>, h: &Array2<f64>) -> Array2<f64> {
        let wh = w.dot(h);
        // H·(HᵗH) instead of (H·Hᵗ)·H: O(n·k²) rather than O(n²·k).
        let hhth = h.dot(&h.t().dot(h));
        let keep = 1.0 - self.beta;
        let beta = self.beta;

        let mut next = h.clone();
        Zip::from(&mut next)
            .and(&wh)
            .and(&hhth)
            .for_each(|x, &num, &den| *x *= keep + beta * num / (den + DENOM_EPS));
        next
    }

    fn check_params(&self) -> Result<()> {
        if self.tol.is_nan() || self.tol <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be positive",
            });
        }
        if self.beta.is_nan() || self.beta <= 0.0 || self.beta > 1.0 {
            return Err(Error::InvalidParameter {
                name: "beta",
                message: "must be in (0, 1]",
            });
        }
        Ok(())
    }
}

impl Default for SymNmf {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Clustering for SymNmf {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let fit = self.fit(data)?;
        extract_labels(&fit.h)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Random non-negative starting factor scaled to the mean entry of `W`.
pub fn initial_factor<R: Rng>(w: &Array2<f64>, k: usize, rng: &mut R) -> Array2<f64> {
    let n = w.nrows();
    let m = w.mean().unwrap_or(0.0).max(0.0);
    let upper = 2.0 * (m / k as f64).sqrt();
    Array2::from_shape_simple_fn((n, k), || rng.random::<f64>() * upper)
}

/// Hard labels from a factor: `label[i] = argmax_r H[i][r]`, lowest index on ties.
pub fn extract_labels(h: &Array2<f64>) -> Result<Vec<usize>> {
    if h.ncols() == 0 {
        return Err(Error::InvalidRank {
            requested: 0,
            n_items: h.nrows(),
        });
    }
    Ok(h.rows().into_iter().map(util::argmax).collect())
}

fn check_square(w: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = w.dim();
    if rows != cols {
        return Err(Error::DimensionMismatch {
            expected: rows,
            found: cols,
        });
    }
    if rows == 0 {
        return Err(Error::EmptyDataset);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    fn two_pairs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 0.0],
            vec![10.0, 1.0],
        ]
    }

    fn three_blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.3, 0.1],
            vec![0.1, 0.4],
            vec![8.0, 8.0],
            vec![8.2, 7.9],
            vec![7.8, 8.3],
            vec![-8.0, 8.0],
            vec![-8.3, 8.1],
            vec![-7.9, 7.7],
        ]
    }

    #[test]
    fn symnmf_two_pairs() {
        let labels = SymNmf::new(2).fit_predict(&two_pairs()).unwrap();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn symnmf_factor_is_non_negative() {
        let fit = SymNmf::new(3).with_seed(7).fit(&three_blobs()).unwrap();
        assert_eq!(fit.h.dim(), (9, 3));
        assert!(fit.h.iter().all(|&x| x >= 0.0));
        assert!(fit.iterations >= 1 && fit.iterations <= 300);
    }

    #[test]
    fn symnmf_deterministic_with_seed() {
        let data = three_blobs();
        let a = SymNmf::new(3).with_seed(42).fit(&data).unwrap();
        let b = SymNmf::new(3).with_seed(42).fit(&data).unwrap();
        assert_eq!(a.h, b.h);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn symnmf_iteration_cap_is_not_an_error() {
        let fit = SymNmf::new(2)
            .with_max_iter(1)
            .with_tol(1e-300)
            .fit(&two_pairs())
            .unwrap();
        assert_eq!(fit.iterations, 1);
        assert!(!fit.converged);
    }

    #[test]
    fn symnmf_zero_iterations_returns_start() {
        let w = graph::normalized_similarity(&two_pairs()).unwrap();
        let h0 = Array2::from_elem((4, 2), 0.25);
        let fit = SymNmf::new(2)
            .with_max_iter(0)
            .factorize_from(&w, h0.clone())
            .unwrap();
        assert_eq!(fit.h, h0);
    }

    #[test]
    fn symnmf_damped_update_stays_non_negative() {
        let fit = SymNmf::new(3)
            .with_beta(0.5)
            .with_seed(3)
            .fit(&three_blobs())
            .unwrap();
        assert!(fit.h.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn symnmf_zero_row_stays_finite() {
        let w = graph::normalized_similarity(&two_pairs()).unwrap();
        let h0 = array![[0.0, 0.0], [0.4, 0.1], [0.1, 0.4], [0.2, 0.3]];
        let fit = SymNmf::new(2).factorize_from(&w, h0).unwrap();
        assert!(fit.h.iter().all(|x| x.is_finite() && *x >= 0.0));
        assert_eq!(fit.h.row(0).sum(), 0.0);
    }

    #[test]
    fn symnmf_rejects_shape_mismatch() {
        let w = graph::normalized_similarity(&two_pairs()).unwrap();
        let solver = SymNmf::new(2);

        let tall = Array2::from_elem((5, 2), 0.1);
        assert!(matches!(
            solver.factorize_from(&w, tall),
            Err(Error::DimensionMismatch {
                expected: 4,
                found: 5
            })
        ));

        let wide = Array2::from_elem((4, 3), 0.1);
        assert!(matches!(
            solver.factorize_from(&w, wide),
            Err(Error::DimensionMismatch { .. })
        ));

        let not_square = Array2::from_elem((4, 3), 0.1);
        assert!(matches!(
            solver.factorize(&not_square),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn symnmf_rejects_invalid_rank() {
        let data = two_pairs();
        assert!(matches!(
            SymNmf::new(4).fit(&data),
            Err(Error::InvalidRank {
                requested: 4,
                n_items: 4
            })
        ));
        assert!(matches!(
            SymNmf::new(0).fit(&data),
            Err(Error::InvalidRank { .. })
        ));
    }

    #[test]
    fn symnmf_fit_validation_order() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(matches!(SymNmf::new(1).fit(&empty), Err(Error::EmptyDataset)));
        assert!(matches!(
            SymNmf::new(4).fit(&two_pairs()),
            Err(Error::InvalidRank { .. })
        ));
        let mut bad = two_pairs();
        bad[2][0] = f64::NAN;
        assert!(matches!(
            SymNmf::new(2).fit(&bad),
            Err(Error::InvalidParameter { name: "point", .. })
        ));
    }

    #[test]
    fn symnmf_rejects_invalid_params() {
        let data = two_pairs();
        assert!(SymNmf::new(2).with_beta(0.0).fit(&data).is_err());
        assert!(SymNmf::new(2).with_beta(1.5).fit(&data).is_err());
        assert!(SymNmf::new(2).with_tol(0.0).fit(&data).is_err());
    }

    #[test]
    fn initial_factor_bounds() {
        let w = graph::normalized_similarity(&three_blobs()).unwrap();
        let k = 3;
        let m = w.mean().unwrap();
        let upper = 2.0 * (m / k as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(1);
        let h = initial_factor(&w, k, &mut rng);
        assert_eq!(h.dim(), (9, 3));
        assert!(h.iter().all(|&x| (0.0..upper).contains(&x)));
    }

    #[test]
    fn extract_labels_argmax_lowest_on_ties() {
        let h = array![[0.1, 0.9], [0.5, 0.5], [0.7, 0.2], [0.0, 0.0]];
        assert_eq!(extract_labels(&h).unwrap(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn extract_labels_within_rank() {
        let fit = SymNmf::new(3).fit(&three_blobs()).unwrap();
        let labels = extract_labels(&fit.h).unwrap();
        let distinct: HashSet<_> = labels.iter().collect();
        assert!(labels.iter().all(|&l| l < 3));
        assert!(distinct.len() <= 3);
    }

    #[test]
    fn extract_labels_rejects_empty_rank() {
        let h = Array2::<f64>::zeros((3, 0));
        assert!(extract_labels(&h).is_err());
    }
}
