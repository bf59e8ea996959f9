// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Distance metrics over runtime-dimensional points.
//!
//! A metric only has to provide [`Metric::distance`]. Metrics that are
//! equivalent to the Euclidean norm with known constants additionally report
//! them through [`Metric::euclidean_equivalence`], which lets the neighbour
//! search and counting engines use a Euclidean KD-tree to collect candidates
//! and then rank them exactly under the real metric.

/// Distance between two points of equal dimension.
pub trait Metric {
    /// Distance between `a` and `b`. Both slices have the same length.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Constants `(lo, hi)` with `lo * |a - b|_2 <= d(a, b) <= hi * |a - b|_2`
    /// for all points of dimension `dim`, or `None` if no such bound is known.
    fn euclidean_equivalence(&self, _dim: usize) -> Option<(f64, f64)> {
        None
    }

    /// Short name used in log output.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<M: Metric + ?Sized> Metric for &M {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).distance(a, b)
    }

    fn euclidean_equivalence(&self, dim: usize) -> Option<(f64, f64)> {
        (**self).euclidean_equivalence(dim)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Chebyshev distance metric (L-infinity norm), the default for KSG estimators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Chebyshev;

impl Metric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let mut max = 0.0;
        for (ai, bi) in a.iter().zip(b) {
            let diff = (ai - bi).abs();
            if diff > max {
                max = diff;
            }
        }
        max
    }

    fn euclidean_equivalence(&self, dim: usize) -> Option<(f64, f64)> {
        Some((1.0 / (dim.max(1) as f64).sqrt(), 1.0))
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}

/// Euclidean metric (p = 2).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(ai, bi)| (ai - bi) * (ai - bi))
            .sum::<f64>()
            .sqrt()
    }

    fn euclidean_equivalence(&self, _dim: usize) -> Option<(f64, f64)> {
        Some((1.0, 1.0))
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Manhattan metric (p = 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(ai, bi)| (ai - bi).abs()).sum()
    }

    fn euclidean_equivalence(&self, dim: usize) -> Option<(f64, f64)> {
        Some((1.0, (dim.max(1) as f64).sqrt()))
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// General Minkowski metric for any finite `p > 0`.
///
/// For `p < 1` this is a quasi-metric; neighbour ranking is still well
/// defined, which is all the estimators need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minkowski {
    p: f64,
}

impl Minkowski {
    /// Returns `None` unless `p` is finite and strictly positive.
    pub fn new(p: f64) -> Option<Self> {
        (p.is_finite() && p > 0.0).then_some(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Metric for Minkowski {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let acc: f64 = a
            .iter()
            .zip(b)
            .map(|(ai, bi)| (ai - bi).abs().powf(self.p))
            .sum();
        acc.powf(1.0 / self.p)
    }

    fn euclidean_equivalence(&self, dim: usize) -> Option<(f64, f64)> {
        let d = dim.max(1) as f64;
        let exponent = 1.0 / self.p - 0.5;
        if exponent >= 0.0 {
            // p <= 2: |x|_2 <= |x|_p <= d^(1/p - 1/2) |x|_2
            Some((1.0, d.powf(exponent)))
        } else {
            // p > 2: d^(1/p - 1/2) |x|_2 <= |x|_p <= |x|_2
            Some((d.powf(exponent), 1.0))
        }
    }

    fn name(&self) -> &'static str {
        "minkowski"
    }
}
