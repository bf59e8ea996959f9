// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView2};

/// Anything that exposes a `dim x n` point matrix (rows are coordinates,
/// columns are points). This is the only thing the estimators need from an
/// embedding.
pub trait Embedding {
    fn points(&self) -> ArrayView2<'_, f64>;
}

impl Embedding for Array2<f64> {
    fn points(&self) -> ArrayView2<'_, f64> {
        self.view()
    }
}

impl Embedding for ArrayView2<'_, f64> {
    fn points(&self) -> ArrayView2<'_, f64> {
        self.view()
    }
}

impl<E: Embedding + ?Sized> Embedding for &E {
    fn points(&self) -> ArrayView2<'_, f64> {
        (**self).points()
    }
}

/// A ready-made state-space embedding: the point matrix plus optional
/// labels for its coordinate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpaceEmbedding {
    points: Array2<f64>,
    labels: Vec<String>,
}

impl StateSpaceEmbedding {
    pub fn new(points: Array2<f64>) -> Self {
        Self {
            points,
            labels: Vec::new(),
        }
    }

    /// Attach one label per coordinate row, e.g. `"y(t+1)"`.
    ///
    /// Returns `None` if the number of labels does not match the number of rows.
    pub fn with_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Option<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.points.nrows() {
            return None;
        }
        self.labels = labels;
        Some(self)
    }

    pub fn dim(&self) -> usize {
        self.points.nrows()
    }

    pub fn n(&self) -> usize {
        self.points.ncols()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Row index of the coordinate with the given label.
    pub fn row_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

impl Embedding for StateSpaceEmbedding {
    fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }
}
