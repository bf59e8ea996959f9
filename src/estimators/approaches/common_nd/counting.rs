// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marginal neighbour counts inside per-point radii.
//!
//! The ball is closed: a point at exactly `radius` is counted, and so is the
//! query point itself, so every count is at least one.

use log::trace;
use ndarray::{Array1, Array2};

use super::dataset::Projection;
use super::metric::Metric;
use super::search::NeighborIndex;
use crate::error::{Error, Result};

/// For each point `i`, count the points `j` (including `i`) with
/// `d(i, j) <= radii[i]` in `projection`.
pub fn count_within<M: Metric>(
    projection: &Projection,
    radii: &Array1<f64>,
    metric: &M,
) -> Result<Array1<usize>> {
    let n = projection.n();
    if radii.len() != n {
        return Err(Error::LengthMismatch {
            expected: n,
            got: radii.len(),
        });
    }
    let index = NeighborIndex::build(projection, metric);
    let counts: Array1<usize> = radii
        .iter()
        .enumerate()
        .map(|(i, &r)| index.count_in_ball(i, r))
        .collect();
    trace!(
        "marginal counts: dim={}, n={}, min={}, max={}",
        projection.dim(),
        n,
        counts.iter().min().copied().unwrap_or(0),
        counts.iter().max().copied().unwrap_or(0)
    );
    Ok(counts)
}

/// Full `n x n` matrix of pairwise distances under `metric`.
pub fn distance_matrix<M: Metric>(projection: &Projection, metric: &M) -> Array2<f64> {
    let n = projection.n();
    let mut out = Array2::zeros((n, n));
    for i in 0..n {
        let pi = projection.point(i);
        for j in (i + 1)..n {
            let d = metric.distance(pi, projection.point(j));
            out[(i, j)] = d;
            out[(j, i)] = d;
        }
    }
    out
}
