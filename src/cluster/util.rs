use ndarray::{Array2, ArrayView1};

use crate::error::{Error, Result};

/// Validate a point set (non-empty, rectangular, finite) and return its dimensionality.
pub(crate) fn check_points(data: &[Vec<f64>]) -> Result<usize> {
    let first = data.first().ok_or(Error::EmptyDataset)?;
    let d = first.len();
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }
    for point in data {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        if !point.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "point",
                message: "coordinates must be finite",
            });
        }
    }
    Ok(d)
}

/// `1 <= k < n`.
pub(crate) fn check_rank(k: usize, n: usize) -> Result<()> {
    if k == 0 || k >= n {
        return Err(Error::InvalidRank {
            requested: k,
            n_items: n,
        });
    }
    Ok(())
}

/// Copy validated rows into a dense row-major matrix.
pub(crate) fn to_matrix(data: &[Vec<f64>], d: usize) -> Array2<f64> {
    let mut out = Array2::zeros((data.len(), d));
    for (mut row, point) in out.rows_mut().into_iter().zip(data) {
        row.iter_mut().zip(point).for_each(|(dst, &src)| *dst = src);
    }
    out
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[inline]
pub(crate) fn squared_euclidean_view(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best = i;
        }
    }
    best
}
