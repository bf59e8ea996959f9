// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # KSG Transfer Entropy
//!
//! Kraskov-Stögbauer-Grassberger (KSG) nearest-neighbour estimation of
//! (conditional) transfer entropy on a ready-made state-space embedding.
//!
//! ## Theoretical Background
//!
//! With X the target future, Y the target present/past and Z the source
//! present/past (plus any conditioning variables), transfer entropy is
//!
//! TE = I(X; Y, Z) - I(X; Y)
//!
//! Both mutual informations are estimated with adaptive, point-local length
//! scales: the distance to the k-th nearest neighbour in the joint space XYZ
//! (for the first term) and in the reduced space XY (for the second). Those
//! distances are then used as radii for neighbour counts in the marginal
//! projections, giving per point
//!
//! te_i = ψ(N_XY_X) + ψ(N_XY_Y) - ψ(N_XYZ_X) - ψ(N_XYZ_YZ)
//!
//! where ψ is the digamma function and every count includes the point itself
//! and any point exactly on the radius. The estimate is the mean of te_i,
//! optionally converted to another logarithm base.
//!
//! ## Neighbour counts
//!
//! The joint space may use a different neighbour count (`k1`) than the reduced
//! space (`k2`). Following Kraskov et al., prefer `k1 < k2` when either is
//! below 10; `k1 = k2` is fine once the embedding dimension exceeds 5. The
//! single-`k` estimator is the case `k1 = k2 = k`.
//!
//! The combination above is applied as is for any `(k1, k2)`. With `k1 != k2`
//! the result therefore differs from the two KSG mutual-information estimates
//! by the constant ψ(k2) - ψ(k1).

use log::debug;
use ndarray::{Array1, Array2};
use statrs::function::gamma::digamma;

use crate::error::{Error, Result};
use crate::estimators::approaches::common_nd::counting::count_within;
use crate::estimators::approaches::common_nd::dataset::{Projection, check_finite, check_shape};
use crate::estimators::approaches::common_nd::metric::{Chebyshev, Metric};
use crate::estimators::approaches::common_nd::search::{NeighborIndex, check_neighbor_count};
use crate::estimators::traits::{
    ConditionalTransferEntropyEstimator, GlobalValue, LocalValues, TransferEntropyEstimator,
};

use super::embedding::Embedding;
use super::partition::TEVars;

/// Default logarithm base of the single-`k` estimator (nats).
pub const DEFAULT_BASE: f64 = std::f64::consts::E;

/// Default logarithm base of the dual-`k` estimator (bits).
pub const DEFAULT_DUAL_BASE: f64 = 2.0;

fn check_base(base: f64) -> Result<()> {
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(Error::InvalidBase(base));
    }
    Ok(())
}

/// Convert a value in nats to `base`; natural-base values pass through untouched.
fn to_base(nats: f64, base: f64) -> f64 {
    if base == DEFAULT_BASE {
        nats
    } else {
        nats / base.ln()
    }
}

/// Per-point radii and marginal counts behind one estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalCounts {
    /// Distance to the k1-th neighbour in the joint space XYZ.
    pub eps_xyz: Array1<f64>,
    /// Distance to the k2-th neighbour in the reduced space XY.
    pub eps_xy: Array1<f64>,
    pub n_xyz_x: Array1<usize>,
    pub n_xyz_yz: Array1<usize>,
    pub n_xy_x: Array1<usize>,
    pub n_xy_y: Array1<usize>,
}

impl MarginalCounts {
    /// Local contributions in nats.
    pub fn local_nats(&self) -> Array1<f64> {
        let n = self.n_xy_x.len();
        Array1::from_shape_fn(n, |i| {
            digamma(self.n_xy_x[i] as f64) + digamma(self.n_xy_y[i] as f64)
                - digamma(self.n_xyz_x[i] as f64)
                - digamma(self.n_xyz_yz[i] as f64)
        })
    }
}

/// KSG transfer-entropy estimator over a `dim x n` point set.
///
/// All inputs are validated on construction, so an existing estimator always
/// yields a value; computing it never mutates the estimator.
///
/// # Examples
///
/// ```
/// use ksgte::estimators::approaches::ksg::{KsgTransferEntropy, TEVars};
/// use ksgte::estimators::traits::GlobalValue;
/// use ndarray::Array2;
///
/// // rows: target future, target present, source present
/// let points = Array2::from_shape_fn((3, 50), |(r, c)| ((r * 7 + c * 13) % 17) as f64);
/// let vars = TEVars::unconditioned(0, 1, 2);
/// let te = KsgTransferEntropy::new(&points, 3, vars).unwrap();
/// assert!(te.global_value().unwrap().is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct KsgTransferEntropy<M: Metric = Chebyshev> {
    points: Array2<f64>,
    vars: TEVars,
    k_joint: usize,
    k_reduced: usize,
    metric: M,
    base: f64,
}

impl KsgTransferEntropy<Chebyshev> {
    /// Single-`k` estimator in nats with the Chebyshev metric.
    pub fn new<E: Embedding + ?Sized>(embedding: &E, k: usize, vars: TEVars) -> Result<Self> {
        Self::build(embedding, k, k, vars, DEFAULT_BASE)
    }

    /// Dual-`k` estimator: `k1` neighbours in the joint space, `k2` in the
    /// reduced space. Reports bits unless [`Self::with_base`] says otherwise.
    pub fn new_dual<E: Embedding + ?Sized>(
        embedding: &E,
        k1: usize,
        k2: usize,
        vars: TEVars,
    ) -> Result<Self> {
        Self::build(embedding, k1, k2, vars, DEFAULT_DUAL_BASE)
    }

    fn build<E: Embedding + ?Sized>(
        embedding: &E,
        k1: usize,
        k2: usize,
        vars: TEVars,
        base: f64,
    ) -> Result<Self> {
        let points = embedding.points();
        check_shape(points)?;
        let (dim, n) = points.dim();
        vars.validate(dim)?;
        check_finite(points, vars.xyz().as_slice())?;
        check_neighbor_count(k1, n)?;
        check_neighbor_count(k2, n)?;
        check_base(base)?;
        Ok(Self {
            points: points.to_owned(),
            vars,
            k_joint: k1,
            k_reduced: k2,
            metric: Chebyshev,
            base,
        })
    }
}

impl<M: Metric> KsgTransferEntropy<M> {
    /// Use a different distance metric for every search and count.
    pub fn with_metric<N: Metric>(self, metric: N) -> KsgTransferEntropy<N> {
        KsgTransferEntropy {
            points: self.points,
            vars: self.vars,
            k_joint: self.k_joint,
            k_reduced: self.k_reduced,
            metric,
            base: self.base,
        }
    }

    /// Set logarithm base (finite, positive, != 1).
    pub fn with_base(mut self, base: f64) -> Result<Self> {
        check_base(base)?;
        self.base = base;
        Ok(self)
    }

    pub fn vars(&self) -> &TEVars {
        &self.vars
    }

    pub fn k_joint(&self) -> usize {
        self.k_joint
    }

    pub fn k_reduced(&self) -> usize {
        self.k_reduced
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn n_samples(&self) -> usize {
        self.points.ncols()
    }

    /// Run both neighbour searches and all four marginal counts.
    pub fn marginal_counts(&self) -> Result<MarginalCounts> {
        let view = self.points.view();
        let metric = &self.metric;
        debug!(
            "KSG TE: n={}, dim(XYZ)={}, dim(XY)={}, k1={}, k2={}, metric={}, base={}",
            self.n_samples(),
            self.vars.xyz().len(),
            self.vars.xy().len(),
            self.k_joint,
            self.k_reduced,
            metric.name(),
            self.base
        );

        let eps_xyz = {
            let joint = Projection::from_rows(view, self.vars.xyz().as_slice())?;
            NeighborIndex::build(&joint, metric).kth_neighbor_distances(self.k_joint)?
        };
        let eps_xy = {
            let reduced = Projection::from_rows(view, self.vars.xy().as_slice())?;
            NeighborIndex::build(&reduced, metric).kth_neighbor_distances(self.k_reduced)?
        };

        let (n_xyz_x, n_xy_x) = {
            let x = Projection::from_rows(view, self.vars.target_future().as_slice())?;
            (
                count_within(&x, &eps_xyz, metric)?,
                count_within(&x, &eps_xy, metric)?,
            )
        };
        let n_xyz_yz = {
            let yz = Projection::from_rows(view, self.vars.yz().as_slice())?;
            count_within(&yz, &eps_xyz, metric)?
        };
        let n_xy_y = {
            let y = Projection::from_rows(view, self.vars.target_presentpast().as_slice())?;
            count_within(&y, &eps_xy, metric)?
        };

        Ok(MarginalCounts {
            eps_xyz,
            eps_xy,
            n_xyz_x,
            n_xyz_yz,
            n_xy_x,
            n_xy_y,
        })
    }
}

impl<M: Metric> GlobalValue for KsgTransferEntropy<M> {
    fn global_value(&self) -> Result<f64> {
        let local = self.marginal_counts()?.local_nats();
        let nats = local.mean().unwrap_or(0.0);
        let value = to_base(nats, self.base);
        debug!("KSG TE estimate: {value} (base {})", self.base);
        Ok(value)
    }
}

impl<M: Metric> LocalValues for KsgTransferEntropy<M> {
    fn local_values(&self) -> Result<Array1<f64>> {
        let base = self.base;
        Ok(self
            .marginal_counts()?
            .local_nats()
            .mapv(|v| to_base(v, base)))
    }
}

impl<M: Metric> TransferEntropyEstimator for KsgTransferEntropy<M> {}

impl<M: Metric> ConditionalTransferEntropyEstimator for KsgTransferEntropy<M> {}

/// KSG transfer entropy in nats with a single neighbour count `k`.
pub fn transfer_entropy_ksg<E, M>(points: &E, k: usize, vars: &TEVars, metric: M) -> Result<f64>
where
    E: Embedding + ?Sized,
    M: Metric,
{
    KsgTransferEntropy::new(points, k, vars.clone())?
        .with_metric(metric)
        .global_value()
}

/// KSG transfer entropy with `k1` joint-space and `k2` reduced-space
/// neighbours, reported in logarithm base `base` ([`DEFAULT_DUAL_BASE`] for bits).
pub fn transfer_entropy_ksg_dual<E, M>(
    points: &E,
    k1: usize,
    k2: usize,
    vars: &TEVars,
    metric: M,
    base: f64,
) -> Result<f64>
where
    E: Embedding + ?Sized,
    M: Metric,
{
    KsgTransferEntropy::new_dual(points, k1, k2, vars.clone())?
        .with_metric(metric)
        .with_base(base)?
        .global_value()
}
