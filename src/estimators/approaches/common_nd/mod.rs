// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Common N-D utilities shared by the kNN-based estimators: projections,
// metrics, neighbour search and marginal counting

pub mod counting;
pub mod dataset;
pub mod metric;
pub mod search;
