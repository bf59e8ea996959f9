// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, array};
use rstest::rstest;

use ksgte::estimators::approaches::common_nd::counting::{count_within, distance_matrix};
use ksgte::estimators::approaches::common_nd::dataset::Projection;
use ksgte::estimators::approaches::common_nd::metric::{Chebyshev, Euclidean, Manhattan, Metric};
use ksgte::estimators::approaches::common_nd::search::NeighborIndex;

use crate::test_helpers::{ScanOnly, generate_random_points};

/// Reference count straight from the pairwise distance matrix.
fn counts_from_matrix<M: Metric>(proj: &Projection, radii: &Array1<f64>, metric: &M) -> Vec<usize> {
    let dm = distance_matrix(proj, metric);
    dm.rows()
        .into_iter()
        .zip(radii.iter())
        .map(|(row, &r)| row.iter().filter(|&&d| d <= r).count())
        .collect()
}

fn check_against_matrix<M: Metric>(metric: M, dims: usize, seed: u64) {
    let points = generate_random_points(dims + 1, 250, seed);
    let joint_rows: Vec<usize> = (0..=dims).collect();
    let marginal_rows: Vec<usize> = (0..dims).collect();
    let joint = Projection::from_rows(points.view(), &joint_rows).unwrap();
    let marginal = Projection::from_rows(points.view(), &marginal_rows).unwrap();

    // Radii taken from k-th neighbour distances in the larger space, as in KSG
    let radii = NeighborIndex::build(&joint, &metric)
        .kth_neighbor_distances(4)
        .unwrap();

    let expected = counts_from_matrix(&marginal, &radii, &metric);
    let tree = count_within(&marginal, &radii, &metric).unwrap();
    let scan = count_within(&marginal, &radii, &ScanOnly(&metric)).unwrap();
    assert_eq!(tree.to_vec(), expected);
    assert_eq!(scan.to_vec(), expected);
}

#[rstest]
fn counts_match_distance_matrix(#[values(1, 2, 4)] dims: usize) {
    check_against_matrix(Chebyshev, dims, 21);
    check_against_matrix(Euclidean, dims, 23);
    check_against_matrix(Manhattan, dims, 29);
}

#[test]
fn every_count_includes_the_point_itself() {
    let points = generate_random_points(2, 80, 9);
    let proj = Projection::from_rows(points.view(), &[0, 1]).unwrap();
    let zeros = Array1::zeros(80);
    let counts = count_within(&proj, &zeros, &Chebyshev).unwrap();
    assert!(counts.iter().all(|&c| c == 1));
}

#[test]
fn coincident_points_are_all_counted_at_zero_radius() {
    // three copies of one point and one stray point
    let points: Array2<f64> = array![[1.0, 1.0, 1.0, 4.0], [2.0, 2.0, 2.0, 0.0]];
    let proj = Projection::from_rows(points.view(), &[0, 1]).unwrap();
    let radii = Array1::zeros(4);
    let counts = count_within(&proj, &radii, &Chebyshev).unwrap();
    assert_eq!(counts.to_vec(), vec![3, 3, 3, 1]);
}

#[test]
fn shell_points_are_inside_the_closed_ball() {
    // Grid points at exactly Chebyshev distance 1 from the origin
    let points: Array2<f64> = array![
        [0.0, 1.0, -1.0, 1.0, 0.0, 2.0],
        [0.0, 1.0, 0.5, -1.0, -1.0, 0.0]
    ];
    let proj = Projection::from_rows(points.view(), &[0, 1]).unwrap();
    let radii = array![1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let counts = count_within(&proj, &radii, &Chebyshev).unwrap();
    assert_eq!(counts[0], 5);
    let counts = count_within(&proj, &radii, &ScanOnly(Chebyshev)).unwrap();
    assert_eq!(counts[0], 5);
}
