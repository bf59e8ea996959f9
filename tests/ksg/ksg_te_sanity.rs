// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statistical sanity checks of KSG transfer entropy against closed forms.

use ksgte::estimators::approaches::ksg::{KsgTransferEntropy, TEVars};
use ksgte::estimators::traits::GlobalValue;
use ksgte::estimators::transfer_entropy::TransferEntropy;
use statrs::function::gamma::digamma;

use crate::test_helpers::{
    assert_abs_diff_eq, coupled_gaussian, embed_one_step, gaussian_series, gaussian_te,
};

#[test]
fn independent_series_give_near_zero_te() {
    let source = gaussian_series(1001, 42);
    let target = gaussian_series(1001, 4242);
    let points = embed_one_step(&source, &target, &[]);

    let te = TransferEntropy::new_ksg(&points, 4, TEVars::unconditioned(0, 1, 2))
        .unwrap()
        .global_value()
        .unwrap();
    assert_abs_diff_eq!(te, 0.0, epsilon = 0.05);
}

#[test]
fn weakly_coupled_gaussian_matches_closed_form() {
    let rho = 0.3;
    let (source, target) = coupled_gaussian(5001, rho, 7);
    let points = embed_one_step(&source, &target, &[]);

    let te = TransferEntropy::new_ksg(&points, 4, TEVars::unconditioned(0, 1, 2))
        .unwrap()
        .global_value()
        .unwrap();
    assert_abs_diff_eq!(te, gaussian_te(rho), epsilon = 0.03);
}

#[test]
fn strongly_coupled_gaussian_matches_closed_form() {
    let rho = 0.8;
    let (source, target) = coupled_gaussian(2001, rho, 11);
    let points = embed_one_step(&source, &target, &[]);
    let vars = TEVars::unconditioned(0, 1, 2);

    let te = TransferEntropy::new_ksg(&points, 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();
    assert_abs_diff_eq!(te, gaussian_te(rho), epsilon = 0.08);

    // The dual-k combination carries no psi(k1) - psi(k2) term, so with
    // k1 != k2 the closed form is only recovered after adding it back.
    let (k1, k2) = (3, 6);
    let dual = KsgTransferEntropy::new_dual(&points, k1, k2, vars)
        .unwrap()
        .with_base(std::f64::consts::E)
        .unwrap()
        .global_value()
        .unwrap();
    let offset = digamma(k1 as f64) - digamma(k2 as f64);
    assert_abs_diff_eq!(dual + offset, gaussian_te(rho), epsilon = 0.1);
}

#[test]
fn coupling_is_directional() {
    let (source, target) = coupled_gaussian(2001, 0.8, 13);
    let forward = embed_one_step(&source, &target, &[]);
    let backward = embed_one_step(&target, &source, &[]);
    let vars = TEVars::unconditioned(0, 1, 2);

    let te_forward = TransferEntropy::new_ksg(&forward, 4, vars.clone())
        .unwrap()
        .global_value()
        .unwrap();
    let te_backward = TransferEntropy::new_ksg(&backward, 4, vars)
        .unwrap()
        .global_value()
        .unwrap();
    assert!(te_forward > 0.3, "forward TE too small: {te_forward}");
    assert_abs_diff_eq!(te_backward, 0.0, epsilon = 0.05);
}

#[test]
fn conditioning_on_an_unrelated_series_keeps_the_flow() {
    let rho = 0.6;
    let (source, target) = coupled_gaussian(2001, rho, 19);
    let unrelated = gaussian_series(2001, 1919);
    let points = embed_one_step(&source, &target, &[&unrelated]);

    let plain = TransferEntropy::new_ksg(&points, 4, TEVars::unconditioned(0, 1, 2))
        .unwrap()
        .global_value()
        .unwrap();
    let conditional = TransferEntropy::new_ksg(&points, 4, TEVars::new(0, 1, 2, 3))
        .unwrap()
        .global_value()
        .unwrap();

    // The extra dimension only adds estimator noise, not information
    assert!(conditional > 0.08, "conditional TE too small: {conditional}");
    assert_abs_diff_eq!(conditional, plain, epsilon = 0.1);
    assert_abs_diff_eq!(conditional, gaussian_te(rho), epsilon = 0.12);
}
