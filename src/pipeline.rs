//! End-to-end pipelines over one borrowed dataset.
//!
//! [`run_goal`] computes one of the SymNMF intermediate matrices; [`compare`] runs
//! SymNMF and k-means side by side and scores both labelings with the same metric.
//! Both validate the input once, before any matrix work.

use std::fmt;
use std::str::FromStr;

use log::info;
use ndarray::Array2;

use crate::cluster::{graph, symnmf, Clustering, Kmeans, SymNmf};
use crate::cluster::util;
use crate::error::{Error, Result};
use crate::metrics::ClusterScore;

/// Which matrix the primary tool prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Affinity matrix `A`.
    Sym,
    /// Degree matrix `D`.
    Ddg,
    /// Normalized matrix `W`.
    Norm,
    /// Factor matrix `H`.
    SymNmf,
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sym" => Ok(Self::Sym),
            "ddg" => Ok(Self::Ddg),
            "norm" => Ok(Self::Norm),
            "symnmf" => Ok(Self::SymNmf),
            _ => Err(Error::InvalidParameter {
                name: "goal",
                message: "expected one of sym, ddg, norm, symnmf",
            }),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sym => "sym",
            Self::Ddg => "ddg",
            Self::Norm => "norm",
            Self::SymNmf => "symnmf",
        };
        f.write_str(name)
    }
}

/// Reject empty or ragged point sets and ranks outside `1 <= k < n`.
pub fn validate(data: &[Vec<f64>], k: usize) -> Result<()> {
    util::check_points(data)?;
    util::check_rank(k, data.len())
}

/// Compute the matrix named by `goal`.
///
/// `seed` only matters for [`Goal::SymNmf`].
pub fn run_goal(goal: Goal, k: usize, data: &[Vec<f64>], seed: u64) -> Result<Array2<f64>> {
    validate(data, k)?;
    info!("{goal}: n = {}, d = {}, k = {k}", data.len(), data[0].len());

    match goal {
        Goal::Sym => graph::similarity(data),
        Goal::Ddg => graph::degree(&graph::similarity(data)?),
        Goal::Norm => graph::normalized_similarity(data),
        Goal::SymNmf => Ok(SymNmf::new(k).with_seed(seed).fit(data)?.h),
    }
}

/// Scores of both clusterings of one dataset.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Score of the SymNMF labeling.
    pub nmf: f64,
    /// Score of the k-means labeling.
    pub kmeans: f64,
    /// SymNMF labels.
    pub nmf_labels: Vec<usize>,
    /// K-means labels.
    pub kmeans_labels: Vec<usize>,
}

/// Cluster `data` with k-means and SymNMF and score both labelings with `metric`.
pub fn compare<M: ClusterScore + ?Sized>(
    data: &[Vec<f64>],
    k: usize,
    seed: u64,
    metric: &M,
) -> Result<Comparison> {
    validate(data, k)?;

    let kmeans_labels = Kmeans::new(k).fit_predict(data)?;
    let fit = SymNmf::new(k).with_seed(seed).fit(data)?;
    let nmf_labels = symnmf::extract_labels(&fit.h)?;

    let nmf = metric.score(data, &nmf_labels)?;
    let kmeans = metric.score(data, &kmeans_labels)?;
    info!("compare: nmf {nmf:.4}, kmeans {kmeans:.4}");

    Ok(Comparison {
        nmf,
        kmeans,
        nmf_labels,
        kmeans_labels,
    })
}
