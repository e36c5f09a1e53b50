//! Clustering quality metrics.
//!
//! The pipelines only need one number per labeling, so the metric sits behind
//! [`ClusterScore`]; [`Silhouette`] is the default.
//!
//! ## Silhouette coefficient
//!
//! For point `i` in cluster `C`:
//!
//! ```text
//! a(i) = mean distance from i to the other members of C
//! b(i) = min over clusters C' != C of the mean distance from i to C'
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! with `s(i) = 0` when `C = {i}`. The score is the mean of `s(i)`, in `[-1, 1]`.
//! Distances are Euclidean. The score is only defined for `2 <= #labels <= n - 1`.
//!
//! Rousseeuw (1987). "Silhouettes: a graphical aid to the interpretation and
//! validation of cluster analysis." J. Comput. Appl. Math. 20.

use std::collections::BTreeMap;

use crate::cluster::util;
use crate::error::{Error, Result};

/// A scalar quality score of a labeling.
pub trait ClusterScore {
    /// Score `labels` (one per point) against the points they label.
    fn score(&self, data: &[Vec<f64>], labels: &[usize]) -> Result<f64>;
}

/// Mean silhouette coefficient.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silhouette;

impl ClusterScore for Silhouette {
    fn score(&self, data: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
        silhouette_score(data, labels)
    }
}

/// Mean silhouette coefficient of a labeling.
pub fn silhouette_score(data: &[Vec<f64>], labels: &[usize]) -> Result<f64> {
    util::check_points(data)?;
    let n = data.len();
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }

    // Compact, ordered cluster ids.
    let mut ids: BTreeMap<usize, usize> = BTreeMap::new();
    for &l in labels {
        let next = ids.len();
        ids.entry(l).or_insert(next);
    }
    let n_clusters = ids.len();
    if n_clusters < 2 || n_clusters >= n {
        return Err(Error::InvalidParameter {
            name: "labels",
            message: "silhouette needs between 2 and n - 1 distinct labels",
        });
    }

    let cluster: Vec<usize> = labels.iter().map(|l| ids[l]).collect();
    let mut sizes = vec![0usize; n_clusters];
    for &c in &cluster {
        sizes[c] += 1;
    }

    let mut total = 0.0;
    let mut sums = vec![0.0f64; n_clusters];
    for i in 0..n {
        let own = cluster[i];
        if sizes[own] == 1 {
            continue;
        }

        sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if j != i {
                sums[cluster[j]] += util::squared_euclidean(&data[i], &data[j]).sqrt();
            }
        }

        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..n_clusters)
            .filter(|&c| c != own)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}
