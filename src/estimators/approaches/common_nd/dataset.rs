// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView2;

use crate::error::{Error, Result};

/// Reject point sets with more dimensions (rows) than points (columns).
///
/// Point sets are `dim x n`; a wider-than-tall matrix almost always means the
/// caller handed over the transpose.
pub fn check_shape(points: ArrayView2<'_, f64>) -> Result<()> {
    let (dim, n) = points.dim();
    if dim > n {
        return Err(Error::Dimensionality { dim, n });
    }
    Ok(())
}

/// Reject NaN or infinite coordinates in the given rows.
pub fn check_finite(points: ArrayView2<'_, f64>, rows: &[usize]) -> Result<()> {
    for &row in rows {
        if let Some(col) = points.row(row).iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite { row, col });
        }
    }
    Ok(())
}

/// A marginal projection of a `dim x n` point set: the selected coordinate
/// rows, stored point-major so each point is one contiguous slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    data: Vec<f64>,
    n: usize,
    dim: usize,
}

impl Projection {
    /// Select `rows` (in order, duplicates allowed) from a `dim x n` point set.
    pub fn from_rows(points: ArrayView2<'_, f64>, rows: &[usize]) -> Result<Self> {
        let (total_dim, n) = points.dim();
        if let Some(&index) = rows.iter().find(|&&r| r >= total_dim) {
            return Err(Error::RowIndexOutOfRange {
                group: "projection",
                index,
                dim: total_dim,
            });
        }
        let dim = rows.len();
        let mut data = Vec::with_capacity(n * dim);
        for col in 0..n {
            for &row in rows {
                data.push(points[(row, col)]);
            }
        }
        Ok(Self { data, n, dim })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `i`.
    #[inline]
    pub fn point(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn points(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n).map(move |i| self.point(i))
    }

    /// Copy the points into fixed-size arrays for the KD-tree.
    ///
    /// Callers pick `K` from [`Projection::dim`].
    pub(crate) fn fixed_points<const K: usize>(&self) -> Vec<[f64; K]> {
        debug_assert_eq!(self.dim, K);
        self.data
            .chunks_exact(K)
            .map(|chunk| {
                let mut p = [0.0; K];
                p.copy_from_slice(chunk);
                p
            })
            .collect()
    }
}
