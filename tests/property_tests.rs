use std::collections::HashSet;

use proptest::prelude::*;
use symclump::cluster::{graph, kmeans, symnmf, Clustering, Kmeans, SymNmf};
use symclump::Error;

fn points(max_n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 2..max_n)
}

proptest! {
    #[test]
    fn prop_similarity_symmetric_zero_diagonal(data in points(20)) {
        let a = graph::similarity(&data).unwrap();
        let n = data.len();
        for i in 0..n {
            prop_assert_eq!(a[[i, i]], 0.0);
            for j in 0..n {
                prop_assert_eq!(a[[i, j]], a[[j, i]]);
                if i != j {
                    prop_assert!(a[[i, j]] > 0.0 && a[[i, j]] <= 1.0);
                }
            }
        }
    }

    #[test]
    fn prop_normalize_symmetric(data in points(20)) {
        let w = graph::normalized_similarity(&data).unwrap();
        let n = data.len();
        for i in 0..n {
            for j in 0..n {
                prop_assert!((w[[i, j]] - w[[j, i]]).abs() <= 1e-12);
            }
        }
    }

    #[test]
    fn prop_kmeans_assignment_idempotent(data in points(20), k in 1usize..5) {
        if k < data.len() {
            let fit = Kmeans::new(k).fit(&data).unwrap();
            prop_assert_eq!(fit.labels.len(), data.len());
            prop_assert!(fit.labels.iter().all(|&l| l < k));
            prop_assert_eq!(kmeans::assign(&data, &fit.centroids).unwrap(), fit.labels);
        }
    }

    #[test]
    fn prop_rank_not_below_n_rejected(data in points(8), extra in 0usize..3) {
        let k = data.len() + extra;
        let rank_err = |r: Result<Vec<usize>, Error>| matches!(r, Err(Error::InvalidRank { .. }));
        prop_assert!(rank_err(Kmeans::new(k).fit_predict(&data)));
        prop_assert!(rank_err(SymNmf::new(k).fit_predict(&data)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_symnmf_factor_non_negative(data in points(12), k in 1usize..4, seed in any::<u64>()) {
        if k < data.len() {
            let fit = SymNmf::new(k).with_seed(seed).fit(&data).unwrap();
            prop_assert_eq!(fit.h.dim(), (data.len(), k));
            prop_assert!(fit.h.iter().all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn prop_symnmf_labels_within_rank(data in points(12), k in 1usize..4, seed in any::<u64>()) {
        if k < data.len() {
            let fit = SymNmf::new(k).with_seed(seed).fit(&data).unwrap();
            let labels = symnmf::extract_labels(&fit.h).unwrap();
            let distinct: HashSet<_> = labels.iter().collect();
            prop_assert!(labels.iter().all(|&l| l < k));
            prop_assert!(distinct.len() <= k);
        }
    }

    #[test]
    fn prop_symnmf_deterministic(data in points(12), seed in any::<u64>()) {
        let k = 1 + data.len() / 4;
        if k < data.len() {
            let a = SymNmf::new(k).with_seed(seed).fit(&data).unwrap();
            let b = SymNmf::new(k).with_seed(seed).fit(&data).unwrap();
            prop_assert_eq!(a.h, b.h);
        }
    }
}
