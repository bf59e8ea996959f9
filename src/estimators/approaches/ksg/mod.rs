// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Kraskov-Stögbauer-Grassberger (kNN-based) transfer entropy and its inputs

pub mod embedding;
pub mod ksg_estimator;
pub mod partition;

pub use embedding::{Embedding, StateSpaceEmbedding};
pub use ksg_estimator::{
    DEFAULT_BASE, DEFAULT_DUAL_BASE, KsgTransferEntropy, MarginalCounts, transfer_entropy_ksg,
    transfer_entropy_ksg_dual,
};
pub use partition::{RowIndices, TEVars};
