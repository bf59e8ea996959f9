// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

use crate::error::Result;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> Result<f64>;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the per-sample (local) values of the measure.
    fn local_values(&self) -> Result<Array1<f64>>;

    /// Derive the global value as the mean of the local values.
    ///
    /// An empty set of local values averages to zero.
    fn global_from_local(&self) -> Result<f64> {
        let local_vals = self.local_values()?;
        Ok(local_vals.mean().unwrap_or(0.0))
    }
}

/// Marker trait for Transfer Entropy estimator instances.
pub trait TransferEntropyEstimator: GlobalValue + LocalValues {}

/// Marker trait for Conditional Transfer Entropy estimator instances.
///
/// Implemented by estimators that accept a conditioning group; an empty
/// conditioning group degenerates to plain transfer entropy.
pub trait ConditionalTransferEntropyEstimator: TransferEntropyEstimator {}
