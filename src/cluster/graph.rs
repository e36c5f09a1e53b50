//! Similarity graph construction and degree normalization.
//!
//! The graph is dense and fully connected: every pair of points is joined by an edge
//! weighted with a Gaussian kernel of unit bandwidth,
//!
//! ```text
//! A[i][j] = exp(-||p_i - p_j||² / 2)    (i != j)
//! A[i][i] = 0
//! ```
//!
//! and normalized symmetrically by its degrees,
//!
//! ```text
//! D[i][i] = Σ_j A[i][j]
//! W       = D^{-1/2} · A · D^{-1/2}
//! ```
//!
//! `W` is the input of the [`SymNmf`](super::SymNmf) solver. Building `A` costs
//! O(n²·d) and dominates the pipeline for large `n`.

use log::trace;
use ndarray::Array2;

use super::util;
use crate::error::{Error, Result};

/// Pairwise affinity matrix of a point set.
///
/// Symmetric, zero diagonal, off-diagonal entries in `(0, 1]` (entries can underflow to
/// zero for points that are very far apart).
pub fn similarity(data: &[Vec<f64>]) -> Result<Array2<f64>> {
    util::check_points(data)?;
    let n = data.len();
    let mut a = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..i {
            let w = (-0.5 * util::squared_euclidean(&data[i], &data[j])).exp();
            a[[i, j]] = w;
            a[[j, i]] = w;
        }
    }

    trace!("similarity: built {n}x{n} affinity matrix");
    Ok(a)
}

/// Diagonal degree matrix of an affinity matrix.
///
/// Fails with [`Error::DegenerateVertex`] when a row sums to zero, since the
/// normalization step would have to invert it.
pub fn degree(a: &Array2<f64>) -> Result<Array2<f64>> {
    let degrees = degrees(a)?;
    Ok(Array2::from_diag(&ndarray::Array1::from(degrees)))
}

/// Symmetric normalization `D^{-1/2} A D^{-1/2}` of an affinity matrix.
pub fn normalize(a: &Array2<f64>) -> Result<Array2<f64>> {
    // Roots first: d_i·d_j can underflow for two weakly connected points.
    let roots: Vec<f64> = degrees(a)?.into_iter().map(f64::sqrt).collect();
    let n = roots.len();
    Ok(Array2::from_shape_fn((n, n), |(i, j)| {
        a[[i, j]] / (roots[i] * roots[j])
    }))
}

/// Similarity followed by normalization: points straight to `W`.
pub fn normalized_similarity(data: &[Vec<f64>]) -> Result<Array2<f64>> {
    normalize(&similarity(data)?)
}

fn degrees(a: &Array2<f64>) -> Result<Vec<f64>> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(Error::DimensionMismatch {
            expected: rows,
            found: cols,
        });
    }
    if rows == 0 {
        return Err(Error::EmptyDataset);
    }

    let mut out = Vec::with_capacity(rows);
    for (index, row) in a.rows().into_iter().enumerate() {
        let d = row.sum();
        if d == 0.0 {
            return Err(Error::DegenerateVertex { index });
        }
        out.push(d);
    }
    Ok(out)
}
