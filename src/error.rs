// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors raised while validating inputs or running an estimator.
///
/// Every error aborts the single computation it came from; no estimator
/// returns partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// More coordinate rows than points; almost always a transposed matrix.
    #[error("point set has {dim} dimensions but only {n} points (is the input transposed?)")]
    Dimensionality { dim: usize, n: usize },

    #[error("neighbour count k = {k} out of range: need 1 <= k < n (n = {n})")]
    NeighborCount { k: usize, n: usize },

    #[error("row index {index} in `{group}` is out of range for {dim} dimensions")]
    RowIndexOutOfRange {
        group: &'static str,
        index: usize,
        dim: usize,
    },

    #[error("variable group `{0}` must not be empty")]
    EmptyGroup(&'static str),

    #[error("non-finite coordinate at row {row}, point {col}")]
    NonFinite { row: usize, col: usize },

    #[error("logarithm base must be finite, positive and != 1 (got {0})")]
    InvalidBase(f64),

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
