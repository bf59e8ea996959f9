// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Exact k-nearest-neighbour search
//!
//! [`NeighborIndex`] answers exact kNN and fixed-radius queries over a
//! [`Projection`] under any [`Metric`].
//!
//! ## Backends
//!
//! - **KD-tree**: used when the projection has at most [`MAX_TREE_DIM`]
//!   dimensions and the metric reports Euclidean norm-equivalence constants
//!   `lo * |x|_2 <= d(x) <= hi * |x|_2`. The tree is a Euclidean kiddo
//!   `ImmutableKdTree`. For a kNN query the k-th Euclidean neighbour distance
//!   `r2` bounds the k-th metric distance by `hi * r2`, so every candidate lies
//!   in the Euclidean ball of radius `hi * r2 / lo`. Those candidates are then
//!   ranked under the real metric, which keeps the answer exact.
//! - **Scan**: row-wise brute force for any other metric or dimension.
//!
//! ## Ties
//!
//! Neighbours are ordered by `(distance, index)`. When several points share
//! the k-th distance, the one with the lowest index is reported, but only the
//! k-th *distance* is meaningful: it is identical whichever tied point is
//! labelled "the" k-th neighbour. The KSG estimators only consume distances,
//! so their output does not depend on tie-breaking.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use log::trace;
use ndarray::{Array1, Array2, Axis};

use super::dataset::Projection;
use super::metric::Metric;
use crate::error::{Error, Result};

/// Largest projection dimension served by the KD-tree backend.
pub const MAX_TREE_DIM: usize = 16;

/// Relative widening of Euclidean candidate radii against rounding.
const RADIUS_SLACK: f64 = 1.0 + 1e-9;

/// Check that `k` neighbours (self excluded) can be found among `n` points.
pub fn check_neighbor_count(k: usize, n: usize) -> Result<()> {
    if k == 0 || k >= n {
        return Err(Error::NeighborCount { k, n });
    }
    Ok(())
}

trait EuclideanTree {
    /// Up to `count` nearest points as `(squared distance, index)`.
    fn nearest_sq(&self, query: &[f64], count: NonZeroUsize) -> Vec<(f64, usize)>;

    /// Indices of all points within squared Euclidean distance `radius_sq`.
    fn within_sq(&self, query: &[f64], radius_sq: f64) -> Vec<usize>;
}

struct KdTree<const K: usize> {
    tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> KdTree<K> {
    fn new(projection: &Projection) -> Self {
        let points = projection.fixed_points::<K>();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    fn fixed(query: &[f64]) -> [f64; K] {
        let mut p = [0.0; K];
        p.copy_from_slice(query);
        p
    }
}

impl<const K: usize> EuclideanTree for KdTree<K> {
    fn nearest_sq(&self, query: &[f64], count: NonZeroUsize) -> Vec<(f64, usize)> {
        let q = Self::fixed(query);
        self.tree
            .nearest_n::<SquaredEuclidean>(&q, count)
            .into_iter()
            .map(|nb| (nb.distance, nb.item as usize))
            .collect()
    }

    fn within_sq(&self, query: &[f64], radius_sq: f64) -> Vec<usize> {
        let q = Self::fixed(query);
        self.tree
            .within_unsorted::<SquaredEuclidean>(&q, radius_sq)
            .into_iter()
            .map(|nb| nb.item as usize)
            .collect()
    }
}

macro_rules! dispatch_tree {
    ($projection:expr; $($k:literal),+) => {
        match $projection.dim() {
            $($k => Some(Box::new(KdTree::<$k>::new($projection)) as Box<dyn EuclideanTree>),)+
            _ => None,
        }
    };
}

fn build_tree(projection: &Projection) -> Option<Box<dyn EuclideanTree>> {
    if projection.dim() > MAX_TREE_DIM {
        return None;
    }
    dispatch_tree!(projection; 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16)
}

enum Backend {
    Tree {
        tree: Box<dyn EuclideanTree>,
        lo: f64,
        hi: f64,
    },
    Scan,
}

fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Keep the `k` closest entries of `cands`, sorted ascending if requested.
fn select_k(cands: &mut Vec<(f64, usize)>, k: usize, sorted: bool) {
    if cands.len() > k {
        cands.select_nth_unstable_by(k - 1, by_distance_then_index);
        cands.truncate(k);
    }
    if sorted {
        cands.sort_unstable_by(by_distance_then_index);
    }
}

/// Result of a kNN self-query: row `i` lists the neighbours of point `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnResult {
    pub k: usize,
    pub sorted: bool,
    /// `n x k` neighbour indices (never the query point itself).
    pub indices: Array2<usize>,
    /// `n x k` neighbour distances matching `indices`.
    pub distances: Array2<f64>,
}

impl KnnResult {
    /// Distance from each point to its k-th nearest neighbour.
    pub fn kth_distances(&self) -> Array1<f64> {
        if self.sorted {
            self.distances.column(self.k - 1).to_owned()
        } else {
            self.distances
                .map_axis(Axis(1), |row| row.iter().copied().fold(0.0, f64::max))
        }
    }
}

/// Exact spatial index over one projection under one metric.
pub struct NeighborIndex<'a, M: Metric> {
    projection: &'a Projection,
    metric: &'a M,
    backend: Backend,
}

impl<'a, M: Metric> NeighborIndex<'a, M> {
    pub fn build(projection: &'a Projection, metric: &'a M) -> Self {
        let dim = projection.dim();
        let backend = match metric.euclidean_equivalence(dim) {
            Some((lo, hi)) if dim > 0 && lo > 0.0 && hi.is_finite() => {
                match build_tree(projection) {
                    Some(tree) => Backend::Tree { tree, lo, hi },
                    None => Backend::Scan,
                }
            }
            _ => Backend::Scan,
        };
        trace!(
            "neighbour index: n={}, dim={}, metric={}, backend={}",
            projection.n(),
            dim,
            metric.name(),
            match &backend {
                Backend::Tree { .. } => "kd-tree",
                Backend::Scan => "scan",
            }
        );
        Self {
            projection,
            metric,
            backend,
        }
    }

    pub fn n(&self) -> usize {
        self.projection.n()
    }

    /// The `k` nearest neighbours of every point, excluding the point itself.
    ///
    /// Fails with [`Error::NeighborCount`] unless `1 <= k < n`.
    pub fn knn(&self, k: usize, sorted: bool) -> Result<KnnResult> {
        let n = self.n();
        check_neighbor_count(k, n)?;
        let mut indices = Array2::from_elem((n, k), 0usize);
        let mut distances = Array2::zeros((n, k));
        for i in 0..n {
            let neigh = self.neighbours_of(i, k, sorted);
            for (slot, (dist, j)) in neigh.into_iter().enumerate() {
                indices[(i, slot)] = j;
                distances[(i, slot)] = dist;
            }
        }
        Ok(KnnResult {
            k,
            sorted,
            indices,
            distances,
        })
    }

    /// Distance from every point to its k-th nearest neighbour.
    pub fn kth_neighbor_distances(&self, k: usize) -> Result<Array1<f64>> {
        Ok(self.knn(k, false)?.kth_distances())
    }

    /// Number of points `j` (including `i`) with `d(i, j) <= radius`.
    pub(crate) fn count_in_ball(&self, i: usize, radius: f64) -> usize {
        let q = self.projection.point(i);
        match &self.backend {
            Backend::Tree { tree, lo, .. } => {
                let radius_sq = self.candidate_radius_sq(radius / lo);
                tree.within_sq(q, radius_sq)
                    .into_iter()
                    .filter(|&j| self.metric.distance(q, self.projection.point(j)) <= radius)
                    .count()
            }
            Backend::Scan => self.scan_count(i, radius),
        }
    }

    fn scan_count(&self, i: usize, radius: f64) -> usize {
        let q = self.projection.point(i);
        self.projection
            .points()
            .filter(|p| self.metric.distance(q, p) <= radius)
            .count()
    }

    fn candidate_radius_sq(&self, euclidean_radius: f64) -> f64 {
        let r = euclidean_radius * RADIUS_SLACK;
        (r * r).max(f64::MIN_POSITIVE)
    }

    fn neighbours_of(&self, i: usize, k: usize, sorted: bool) -> Vec<(f64, usize)> {
        let q = self.projection.point(i);
        let mut cands = match &self.backend {
            Backend::Tree { tree, lo, hi } => {
                // k + 1 so that the query point itself can be dropped
                let count = NonZeroUsize::new(k + 1).unwrap_or(NonZeroUsize::MIN);
                let r2_sq = tree
                    .nearest_sq(q, count)
                    .into_iter()
                    .filter(|&(_, j)| j != i)
                    .take(k)
                    .map(|(d, _)| d)
                    .fold(0.0, f64::max);
                let radius_sq = self.candidate_radius_sq(hi * r2_sq.sqrt() / lo);
                let cands: Vec<(f64, usize)> = tree
                    .within_sq(q, radius_sq)
                    .into_iter()
                    .filter(|&j| j != i)
                    .map(|j| (self.metric.distance(q, self.projection.point(j)), j))
                    .collect();
                if cands.len() >= k {
                    cands
                } else {
                    self.scan_candidates(i)
                }
            }
            Backend::Scan => self.scan_candidates(i),
        };
        select_k(&mut cands, k, sorted);
        cands
    }

    fn scan_candidates(&self, i: usize) -> Vec<(f64, usize)> {
        let q = self.projection.point(i);
        self.projection
            .points()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, p)| (self.metric.distance(q, p), j))
            .collect()
    }
}
