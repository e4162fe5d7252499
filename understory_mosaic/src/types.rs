// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid primitives shared by the packers.

use kurbo::Size;

/// Footprint of an item, measured in grid cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Number of columns covered.
    pub width: usize,
    /// Number of rows covered.
    pub height: usize,
}

impl GridSize {
    /// A single cell.
    pub const ONE: Self = Self::new(1, 1);

    /// Create a footprint of `width × height` cells.
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Returns `true` if the footprint covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Extent along the fixed (cross) axis of `orientation`.
    #[inline]
    pub const fn cross_extent(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Vertical => self.width,
            Orientation::Horizontal => self.height,
        }
    }

    /// Extent along the growing (dynamic) axis of `orientation`.
    #[inline]
    pub const fn dynamic_extent(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    /// Returns this footprint with its cross extent limited to `max`.
    #[must_use]
    pub fn clamped_cross(self, orientation: Orientation, max: usize) -> Self {
        match orientation {
            Orientation::Vertical => Self::new(self.width.min(max), self.height),
            Orientation::Horizontal => Self::new(self.width, self.height.min(max)),
        }
    }
}

/// A cell position: `x` is the column, `y` is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Coordinate {
    /// The top-left cell.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a coordinate from a column and a row.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Which way a grid grows.
///
/// The cross axis has a fixed number of cells; the other axis extends as
/// items are packed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Columns are fixed and rows grow downwards.
    #[default]
    Vertical,
    /// Rows are fixed and columns grow to the right.
    Horizontal,
}

impl Orientation {
    /// Map a `(dynamic, cross)` index pair to a cell coordinate.
    #[inline]
    pub const fn coordinate(self, dynamic: usize, cross: usize) -> Coordinate {
        match self {
            Self::Vertical => Coordinate::new(cross, dynamic),
            Self::Horizontal => Coordinate::new(dynamic, cross),
        }
    }

    /// Index of `coordinate` along the growth axis.
    #[inline]
    pub const fn dynamic_of(self, coordinate: Coordinate) -> usize {
        match self {
            Self::Vertical => coordinate.y,
            Self::Horizontal => coordinate.x,
        }
    }

    /// Index of `coordinate` along the cross axis.
    #[inline]
    pub const fn cross_of(self, coordinate: Coordinate) -> usize {
        match self {
            Self::Vertical => coordinate.x,
            Self::Horizontal => coordinate.y,
        }
    }

    /// The dimension of `size` along the cross axis.
    #[inline]
    pub fn cross_dimension(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// The dimension of `size` along the growth axis.
    #[inline]
    pub fn dynamic_dimension(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Build a size from its growth and cross dimensions.
    #[inline]
    pub fn size(self, dynamic: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, dynamic),
            Self::Horizontal => Size::new(dynamic, cross),
        }
    }
}

/// Gaps between adjacent cells, in points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    /// Gap between columns.
    pub horizontal: f64,
    /// Gap between rows.
    pub vertical: f64,
}

impl Spacing {
    /// No spacing on either axis.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create spacing with independent horizontal and vertical gaps.
    #[inline]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The same gap on both axes.
    #[inline]
    pub const fn uniform(spacing: f64) -> Self {
        Self::new(spacing, spacing)
    }

    /// Build spacing from the gap along the growth axis and across it.
    #[inline]
    pub const fn from_axes(orientation: Orientation, along: f64, cross: f64) -> Self {
        match orientation {
            Orientation::Vertical => Self::new(cross, along),
            Orientation::Horizontal => Self::new(along, cross),
        }
    }

    /// Gap between cells along the growth axis of `orientation`.
    #[inline]
    pub const fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Vertical => self.vertical,
            Orientation::Horizontal => self.horizontal,
        }
    }

    /// Gap between cells along the cross axis of `orientation`.
    #[inline]
    pub const fn cross(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Vertical => self.horizontal,
            Orientation::Horizontal => self.vertical,
        }
    }

    /// Grow `size` by one gap on each axis.
    #[inline]
    pub fn inflate(&self, size: Size) -> Size {
        Size::new(size.width + self.horizontal, size.height + self.vertical)
    }
}
