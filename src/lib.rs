// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ksgte
//!
//! Kraskov-Stögbauer-Grassberger (KSG) estimation of transfer entropy, the
//! directed information flow from a source to a target time series, optionally
//! conditioned on further variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use ksgte::estimators::approaches::ksg::TEVars;
//! use ksgte::estimators::transfer_entropy::TransferEntropy;
//! use ksgte::estimators::traits::GlobalValue;
//! use ndarray::Array2;
//!
//! // A 3 x n state-space embedding: target future, target present, source present.
//! let points = Array2::from_shape_fn((3, 64), |(r, c)| ((c * (r + 3)) % 29) as f64 / 29.0);
//! let te = TransferEntropy::new_ksg(&points, 4, TEVars::unconditioned(0, 1, 2))?;
//! let nats = te.global_value()?;
//! let bits = te.with_base(2.0)?.global_value()?;
//! assert!((bits - nats / 2f64.ln()).abs() < 1e-12);
//! # Ok::<(), ksgte::Error>(())
//! ```
//!
//! ## Data Layout
//!
//! Point sets are `dim x n` matrices: every column is one embedded point and
//! every row one coordinate. A [`TEVars`](estimators::approaches::ksg::TEVars)
//! assigns rows to the target future, the target present/past, the source
//! present/past and (optionally) conditioning variables. Any type exposing such a
//! matrix can be passed through the
//! [`Embedding`](estimators::approaches::ksg::Embedding) trait.
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: the `TransferEntropy` factory and free functions
//!    `transfer_entropy_ksg` / `transfer_entropy_ksg_dual`
//! 2. **Estimator Core**: `KsgTransferEntropy` (joint and reduced kNN searches,
//!    marginal counts, digamma combination)
//! 3. **Core Infrastructure**: projections, metrics, exact neighbour search
//!    (KD-tree backed where possible) and inclusive marginal counting
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for partitions
//!
//! Logging goes through the [`log`](https://docs.rs/log) facade; install any
//! logger to see the `debug`/`trace` output.

pub mod error;
pub mod estimators;

pub use error::{Error, Result};
