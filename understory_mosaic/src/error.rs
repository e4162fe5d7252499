// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when packer input is rejected.

/// Input rejected by a packer before any placement happens.
///
/// Not finding room for an item is never an error: packers fall back to
/// placing it past the current extent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// A footprint is wider than the grid's cross axis.
    #[error("item {index} spans {extent} cells across, but the grid only has {cross_count}")]
    FootprintExceedsCrossAxis {
        /// Position of the item in the input.
        index: usize,
        /// Cross-axis extent of the item's footprint.
        extent: usize,
        /// Number of cells along the cross axis.
        cross_count: usize,
    },
    /// A footprint covers no cells.
    #[error("item {index} has an empty footprint")]
    EmptyFootprint {
        /// Position of the item in the input.
        index: usize,
    },
    /// A flow item has a negative, infinite, or NaN dimension.
    #[error("item {index} has a size that is not finite and non-negative")]
    InvalidFlowSize {
        /// Position of the item in the input.
        index: usize,
    },
    /// Flow spacing has a negative, infinite, or NaN gap.
    #[error("spacing must be finite and non-negative")]
    InvalidSpacing,
}
