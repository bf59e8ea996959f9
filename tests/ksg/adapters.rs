// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The entry points and input adapters must all reach the same estimate.

use ksgte::estimators::approaches::common_nd::metric::{Chebyshev, Manhattan};
use ksgte::estimators::approaches::ksg::{
    Embedding, KsgTransferEntropy, StateSpaceEmbedding, TEVars, transfer_entropy_ksg,
};
use ksgte::estimators::traits::GlobalValue;
use ksgte::estimators::transfer_entropy::TransferEntropy;

use crate::test_helpers::{coupled_gaussian, embed_one_step, gaussian_series};

fn conditioned_points() -> ndarray::Array2<f64> {
    let (source, target) = coupled_gaussian(181, 0.5, 53);
    let other = gaussian_series(181, 59);
    // rows: target(t+1), target(t), source(t), other(t)
    embed_one_step(&source, &target, &[&other])
}

#[test]
fn group_conversions_reach_the_same_estimate() {
    let points = conditioned_points();
    let reference = TransferEntropy::new_ksg(&points, 4, TEVars::new(0, 1, 2, 3))
        .unwrap()
        .global_value()
        .unwrap();

    let ranges = TransferEntropy::new_ksg_from_groups(&points, 4, 0..1, 1..=1, 2..3, vec![3])
        .unwrap()
        .global_value()
        .unwrap();
    let arrays = TransferEntropy::new_ksg_from_groups(&points, 4, [0], [1], [2], &[3usize][..])
        .unwrap()
        .global_value()
        .unwrap();
    assert_eq!(ranges, reference);
    assert_eq!(arrays, reference);
}

#[test]
fn unconditioned_factory_matches_unconditioned_vars() {
    let points = conditioned_points();
    let a = TransferEntropy::new_ksg_unconditioned(&points, 3, 0, 1, 2)
        .unwrap()
        .global_value()
        .unwrap();
    let b = TransferEntropy::new_ksg(&points, 3, TEVars::unconditioned(0, 1, 2))
        .unwrap()
        .global_value()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn embedding_types_are_interchangeable() {
    let points = conditioned_points();
    let vars = TEVars::new(0, 1, 2, 3);
    let owned = TransferEntropy::new_ksg(&points, 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();
    let view = TransferEntropy::new_ksg(&points.view(), 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();

    let labelled = StateSpaceEmbedding::new(points.clone())
        .with_labels(["y(t+1)", "y(t)", "x(t)", "w(t)"])
        .unwrap();
    assert_eq!(labelled.row_of("x(t)"), Some(2));
    let embedded = TransferEntropy::new_ksg(&labelled, 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();

    let dynamic: &dyn Embedding = &labelled;
    let erased = TransferEntropy::new_ksg(dynamic, 4, vars)
        .unwrap()
        .global_value()
        .unwrap();

    assert_eq!(view, owned);
    assert_eq!(embedded, owned);
    assert_eq!(erased, owned);
}

#[test]
fn free_function_matches_estimator() {
    let points = conditioned_points();
    let vars = TEVars::new(0, 1, 2, 3);

    let cheb = KsgTransferEntropy::new(&points, 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();
    assert_eq!(transfer_entropy_ksg(&points, 4, &vars, Chebyshev).unwrap(), cheb);

    let manhattan = KsgTransferEntropy::new(&points, 4, vars.clone())
        .unwrap()
        .with_metric(Manhattan)
        .global_value()
        .unwrap();
    assert_eq!(transfer_entropy_ksg(&points, 4, &vars, Manhattan).unwrap(), manhattan);
}
