// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::{Range, RangeInclusive};

use crate::error::{Error, Result};

/// An ordered list of row indices into a `dim x n` point set.
///
/// Order is preserved and duplicates are allowed: each entry selects one
/// coordinate row of the embedding. Any of the usual ways of naming rows
/// converts into it (`2`, `0..3`, `1..=2`, `vec![0, 4]`, `[3, 1]`, `(0, 2)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowIndices(Vec<usize>);

impl RowIndices {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Concatenate groups, keeping order and duplicates.
    pub fn concat(groups: &[&RowIndices]) -> Self {
        Self(groups.iter().flat_map(|g| g.0.iter().copied()).collect())
    }
}

impl From<usize> for RowIndices {
    fn from(index: usize) -> Self {
        Self(vec![index])
    }
}

impl From<Range<usize>> for RowIndices {
    fn from(range: Range<usize>) -> Self {
        Self(range.collect())
    }
}

impl From<RangeInclusive<usize>> for RowIndices {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self(range.collect())
    }
}

impl From<Vec<usize>> for RowIndices {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for RowIndices {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for RowIndices {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl From<(usize, usize)> for RowIndices {
    fn from((a, b): (usize, usize)) -> Self {
        Self(vec![a, b])
    }
}

impl From<(usize, usize, usize)> for RowIndices {
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Self(vec![a, b, c])
    }
}

impl<'a> IntoIterator for &'a RowIndices {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Assignment of embedding rows to the variables of a transfer-entropy
/// estimate.
///
/// - `target_future` (X): future state(s) of the target
/// - `target_presentpast` (Y): present/past of the target
/// - `source_presentpast`: present/past of the source
/// - `conditioned_presentpast`: present/past of conditioning variables; empty
///   means no conditioning
///
/// The derived groups `Z = source ++ conditioned`, `XY`, `YZ` and `XYZ` are
/// recomputed on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TEVars {
    target_future: RowIndices,
    target_presentpast: RowIndices,
    source_presentpast: RowIndices,
    conditioned_presentpast: RowIndices,
}

impl TEVars {
    pub fn new(
        target_future: impl Into<RowIndices>,
        target_presentpast: impl Into<RowIndices>,
        source_presentpast: impl Into<RowIndices>,
        conditioned_presentpast: impl Into<RowIndices>,
    ) -> Self {
        Self {
            target_future: target_future.into(),
            target_presentpast: target_presentpast.into(),
            source_presentpast: source_presentpast.into(),
            conditioned_presentpast: conditioned_presentpast.into(),
        }
    }

    /// Partition without conditioning variables.
    pub fn unconditioned(
        target_future: impl Into<RowIndices>,
        target_presentpast: impl Into<RowIndices>,
        source_presentpast: impl Into<RowIndices>,
    ) -> Self {
        Self::new(
            target_future,
            target_presentpast,
            source_presentpast,
            RowIndices::empty(),
        )
    }

    pub fn target_future(&self) -> &RowIndices {
        &self.target_future
    }

    pub fn target_presentpast(&self) -> &RowIndices {
        &self.target_presentpast
    }

    pub fn source_presentpast(&self) -> &RowIndices {
        &self.source_presentpast
    }

    pub fn conditioned_presentpast(&self) -> &RowIndices {
        &self.conditioned_presentpast
    }

    pub fn is_conditioned(&self) -> bool {
        !self.conditioned_presentpast.is_empty()
    }

    /// Z: source followed by conditioning rows.
    pub fn z(&self) -> RowIndices {
        RowIndices::concat(&[&self.source_presentpast, &self.conditioned_presentpast])
    }

    pub fn xy(&self) -> RowIndices {
        RowIndices::concat(&[&self.target_future, &self.target_presentpast])
    }

    pub fn yz(&self) -> RowIndices {
        RowIndices::concat(&[
            &self.target_presentpast,
            &self.source_presentpast,
            &self.conditioned_presentpast,
        ])
    }

    /// The joint space: every row named by the partition.
    pub fn xyz(&self) -> RowIndices {
        RowIndices::concat(&[
            &self.target_future,
            &self.target_presentpast,
            &self.source_presentpast,
            &self.conditioned_presentpast,
        ])
    }

    /// Largest row index referenced by any group.
    pub fn max_row(&self) -> Option<usize> {
        self.groups()
            .into_iter()
            .flat_map(|(_, g)| g.iter().copied())
            .max()
    }

    fn groups(&self) -> [(&'static str, &RowIndices); 4] {
        [
            ("target_future", &self.target_future),
            ("target_presentpast", &self.target_presentpast),
            ("source_presentpast", &self.source_presentpast),
            ("conditioned_presentpast", &self.conditioned_presentpast),
        ]
    }

    /// Check the partition against a point set with `dim` coordinate rows.
    ///
    /// The target future and the source must name at least one row each;
    /// every index must be below `dim`.
    pub fn validate(&self, dim: usize) -> Result<()> {
        if self.target_future.is_empty() {
            return Err(Error::EmptyGroup("target_future"));
        }
        if self.source_presentpast.is_empty() {
            return Err(Error::EmptyGroup("source_presentpast"));
        }
        if self.max_row().is_none_or(|max| max < dim) {
            return Ok(());
        }
        for (group, rows) in self.groups() {
            if let Some(&index) = rows.iter().find(|&&r| r >= dim) {
                return Err(Error::RowIndexOutOfRange { group, index, dim });
            }
        }
        Ok(())
    }
}
