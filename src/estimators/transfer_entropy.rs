// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::estimators::approaches::ksg::{Embedding, KsgTransferEntropy, RowIndices, TEVars};

/// Factory for transfer-entropy estimators.
///
/// Every constructor only normalises its inputs into a [`TEVars`] and an
/// [`Embedding`] and hands them to [`KsgTransferEntropy`], which does all
/// validation.
pub struct TransferEntropy;

impl TransferEntropy {
    /// Create a KSG transfer entropy estimator (nats, Chebyshev metric).
    pub fn new_ksg<E: Embedding + ?Sized>(
        embedding: &E,
        k: usize,
        vars: TEVars,
    ) -> Result<KsgTransferEntropy> {
        KsgTransferEntropy::new(embedding, k, vars)
    }

    /// Create a KSG transfer entropy estimator with separate neighbour counts
    /// for the joint (`k1`) and reduced (`k2`) spaces (bits, Chebyshev metric).
    pub fn new_ksg_dual<E: Embedding + ?Sized>(
        embedding: &E,
        k1: usize,
        k2: usize,
        vars: TEVars,
    ) -> Result<KsgTransferEntropy> {
        KsgTransferEntropy::new_dual(embedding, k1, k2, vars)
    }

    /// Create a KSG conditional transfer entropy estimator from raw row-index groups.
    ///
    /// An empty `conditioned_presentpast` gives plain transfer entropy.
    pub fn new_ksg_from_groups<E: Embedding + ?Sized>(
        embedding: &E,
        k: usize,
        target_future: impl Into<RowIndices>,
        target_presentpast: impl Into<RowIndices>,
        source_presentpast: impl Into<RowIndices>,
        conditioned_presentpast: impl Into<RowIndices>,
    ) -> Result<KsgTransferEntropy> {
        let vars = TEVars::new(
            target_future,
            target_presentpast,
            source_presentpast,
            conditioned_presentpast,
        );
        Self::new_ksg(embedding, k, vars)
    }

    /// Create a KSG transfer entropy estimator from raw row-index groups,
    /// without conditioning variables.
    pub fn new_ksg_unconditioned<E: Embedding + ?Sized>(
        embedding: &E,
        k: usize,
        target_future: impl Into<RowIndices>,
        target_presentpast: impl Into<RowIndices>,
        source_presentpast: impl Into<RowIndices>,
    ) -> Result<KsgTransferEntropy> {
        Self::new_ksg_from_groups(
            embedding,
            k,
            target_future,
            target_presentpast,
            source_presentpast,
            RowIndices::empty(),
        )
    }
}
