// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a container proposal into a cell size and cross count.

use core::num::NonZeroUsize;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

use crate::flow::FlowAlignment;
use crate::metrics::GridMetrics;
use crate::types::{Orientation, Spacing};

/// A container size offered by the host; either side may be unspecified.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ProposedSize {
    /// Offered width, if any.
    pub width: Option<f64>,
    /// Offered height, if any.
    pub height: Option<f64>,
}

impl ProposedSize {
    /// No size offered on either axis.
    pub const UNSPECIFIED: Self = Self {
        width: None,
        height: None,
    };

    /// Offer exactly `size`.
    pub const fn new(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    /// Offered dimension along the cross axis of `orientation`.
    pub const fn cross_dimension(&self, orientation: Orientation) -> Option<f64> {
        match orientation {
            Orientation::Vertical => self.width,
            Orientation::Horizontal => self.height,
        }
    }
}

impl From<Size> for ProposedSize {
    fn from(size: Size) -> Self {
        Self::new(size)
    }
}

/// How a grid derives its cell size from the container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GridSizing {
    /// Divide the cross axis into `cross_count` cells with a fixed
    /// width-to-height ratio.
    AspectRatio {
        /// Cell width divided by cell height. A ratio that is not positive
        /// and finite resolves to an empty grid.
        ratio: f64,
        /// Cells across.
        cross_count: NonZeroUsize,
    },
    /// Divide the cross axis into `cross_count` cells and use a fixed
    /// dimension along the growth axis.
    AxisDimension {
        /// Cell dimension along the growth axis.
        dimension: f64,
        /// Cells across.
        cross_count: NonZeroUsize,
    },
    /// Use a fixed cell size and fit as many cells across as the container
    /// allows, widening the cross spacing to fill it.
    TileSize(Size),
    /// No grid: items are flowed with [`pack_flow`](crate::pack_flow).
    Flow(FlowAlignment),
}

/// Cell size, cross count and spacing to pack with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedGrid {
    /// Size of one cell.
    pub cell_size: Size,
    /// Cells across.
    pub cross_count: NonZeroUsize,
    /// Spacing to use, possibly widened on the cross axis.
    pub spacing: Spacing,
}

impl ResolvedGrid {
    fn empty(cross_count: NonZeroUsize, spacing: Spacing) -> Self {
        Self {
            cell_size: Size::ZERO,
            cross_count,
            spacing,
        }
    }

    /// Returns `true` when there is nothing to pack into.
    pub fn is_empty(&self) -> bool {
        !(self.cell_size.width > 0.0 && self.cell_size.height > 0.0)
    }

    /// Metrics for converting cells to points.
    pub const fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.cell_size, self.spacing)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_normal() && *v > 0.0)
}

impl GridSizing {
    /// Resolve this sizing mode against `proposal`.
    ///
    /// A missing, zero, or non-finite proposal yields an empty grid rather
    /// than an error; callers skip packing when
    /// [`ResolvedGrid::is_empty`] is set.
    pub fn resolve(
        &self,
        proposal: ProposedSize,
        orientation: Orientation,
        spacing: Spacing,
    ) -> ResolvedGrid {
        let cross_spacing = spacing.cross(orientation);
        match *self {
            Self::AspectRatio { ratio, cross_count } => {
                if !(ratio.is_finite() && ratio > 0.0) {
                    return ResolvedGrid::empty(cross_count, spacing);
                }
                let Some(cell) = divide(proposal, orientation, cross_spacing, cross_count) else {
                    return ResolvedGrid::empty(cross_count, spacing);
                };
                let cell_size = match orientation {
                    Orientation::Vertical => Size::new(cell, cell / ratio),
                    Orientation::Horizontal => Size::new(cell * ratio, cell),
                };
                ResolvedGrid {
                    cell_size,
                    cross_count,
                    spacing,
                }
            }
            Self::AxisDimension {
                dimension,
                cross_count,
            } => {
                let Some(cell) = divide(proposal, orientation, cross_spacing, cross_count) else {
                    return ResolvedGrid::empty(cross_count, spacing);
                };
                ResolvedGrid {
                    cell_size: orientation.size(dimension, cell),
                    cross_count,
                    spacing,
                }
            }
            Self::TileSize(tile) => fit_tiles(tile, proposal, orientation, spacing),
            Self::Flow(_) => ResolvedGrid::empty(NonZeroUsize::MIN, spacing),
        }
    }
}

fn divide(
    proposal: ProposedSize,
    orientation: Orientation,
    gap: f64,
    count: NonZeroUsize,
) -> Option<f64> {
    let available = usable(proposal.cross_dimension(orientation))?;
    let n = count.get() as f64;
    let cell = (available - gap * (n - 1.0)) / n;
    (cell > 0.0).then_some(cell)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "The count is a floored, positive quotient; the cast saturates."
)]
fn fit_tiles(
    tile: Size,
    proposal: ProposedSize,
    orientation: Orientation,
    spacing: Spacing,
) -> ResolvedGrid {
    let tile_cross = orientation.cross_dimension(tile);
    let Some(available) = usable(proposal.cross_dimension(orientation).or(Some(tile_cross)))
    else {
        return ResolvedGrid::empty(NonZeroUsize::MIN, spacing);
    };
    if !(tile_cross.is_normal() && tile_cross > 0.0) {
        return ResolvedGrid::empty(NonZeroUsize::MIN, spacing);
    }

    let gap = spacing.cross(orientation);
    let fitted = ((available + gap) / (tile_cross + gap)).floor() as usize;
    let cross_count = NonZeroUsize::new(fitted).unwrap_or(NonZeroUsize::MIN);
    let spacing = if cross_count.get() == 1 {
        spacing
    } else {
        let n = cross_count.get() as f64;
        let widened = (available - tile_cross * n) / (n - 1.0);
        Spacing::from_axes(orientation, spacing.along(orientation), widened)
    };
    ResolvedGrid {
        cell_size: tile,
        cross_count,
        spacing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn proposal(width: f64, height: f64) -> ProposedSize {
        ProposedSize::new(Size::new(width, height))
    }

    #[test]
    fn aspect_ratio_without_spacing() {
        let sizing = GridSizing::AspectRatio {
            ratio: 2.0,
            cross_count: count(5),
        };
        let v = sizing.resolve(proposal(50.0, 50.0), Orientation::Vertical, Spacing::ZERO);
        assert_eq!(v.cell_size, Size::new(10.0, 5.0));
        let h = sizing.resolve(proposal(50.0, 50.0), Orientation::Horizontal, Spacing::ZERO);
        assert_eq!(h.cell_size, Size::new(20.0, 10.0));
    }

    #[test]
    fn aspect_ratio_subtracts_cross_spacing() {
        let sizing = GridSizing::AspectRatio {
            ratio: 2.0,
            cross_count: count(5),
        };
        let spacing = Spacing::uniform(10.0);
        let v = sizing.resolve(proposal(90.0, 90.0), Orientation::Vertical, spacing);
        assert_eq!(v.cell_size, Size::new(10.0, 5.0));
        assert_eq!(v.spacing, spacing);
        let h = sizing.resolve(proposal(90.0, 90.0), Orientation::Horizontal, spacing);
        assert_eq!(h.cell_size, Size::new(20.0, 10.0));

        let sizing = GridSizing::AspectRatio {
            ratio: 2.0,
            cross_count: count(4),
        };
        let h = sizing.resolve(
            proposal(120.0, 100.0),
            Orientation::Horizontal,
            Spacing::uniform(5.0),
        );
        assert_eq!(h.cell_size, Size::new(42.5, 21.25));
    }

    #[test]
    fn axis_dimension_keeps_growth_dimension() {
        let sizing = GridSizing::AxisDimension {
            dimension: 12.0,
            cross_count: count(5),
        };
        let v = sizing.resolve(
            proposal(90.0, 120.0),
            Orientation::Vertical,
            Spacing::uniform(10.0),
        );
        assert_eq!(v.cell_size, Size::new(10.0, 12.0));
        assert_eq!(v.cross_count.get(), 5);

        let h = sizing.resolve(
            proposal(120.0, 90.0),
            Orientation::Horizontal,
            Spacing::uniform(10.0),
        );
        assert_eq!(h.cell_size, Size::new(12.0, 10.0));
    }

    #[test]
    fn zero_or_missing_proposal_is_empty() {
        let sizing = GridSizing::AspectRatio {
            ratio: 2.0,
            cross_count: count(5),
        };
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let r = sizing.resolve(proposal(0.0, 0.0), orientation, Spacing::ZERO);
            assert_eq!(r.cell_size, Size::ZERO);
            assert!(r.is_empty());
            let r = sizing.resolve(ProposedSize::UNSPECIFIED, orientation, Spacing::ZERO);
            assert!(r.is_empty());
        }

        let axis = GridSizing::AxisDimension {
            dimension: 12.0,
            cross_count: count(3),
        };
        let r = axis.resolve(
            proposal(f64::INFINITY, 10.0),
            Orientation::Vertical,
            Spacing::ZERO,
        );
        assert!(r.is_empty());
    }

    #[test]
    fn spacing_larger_than_container_is_empty() {
        let sizing = GridSizing::AxisDimension {
            dimension: 12.0,
            cross_count: count(5),
        };
        let r = sizing.resolve(
            proposal(30.0, 30.0),
            Orientation::Vertical,
            Spacing::uniform(10.0),
        );
        assert!(r.is_empty());
    }

    #[test]
    fn tile_size_fits_as_many_as_possible() {
        let sizing = GridSizing::TileSize(Size::new(10.0, 10.0));
        let r = sizing.resolve(
            proposal(100.0, 40.0),
            Orientation::Vertical,
            Spacing::uniform(2.0),
        );
        assert_eq!(r.cross_count.get(), 8);
        assert_eq!(r.cell_size, Size::new(10.0, 10.0));
        assert_eq!(r.spacing.vertical, 2.0);
        assert!((r.spacing.horizontal - 20.0 / 7.0).abs() < 1e-9);
        assert!(!r.is_empty());
    }

    #[test]
    fn tile_size_keeps_spacing_for_a_single_column() {
        let sizing = GridSizing::TileSize(Size::new(30.0, 10.0));
        let spacing = Spacing::uniform(4.0);
        let r = sizing.resolve(proposal(50.0, 0.0), Orientation::Vertical, spacing);
        assert_eq!(r.cross_count.get(), 1);
        assert_eq!(r.spacing, spacing);

        // Without a proposal the tile itself is the container.
        let r = sizing.resolve(ProposedSize::UNSPECIFIED, Orientation::Horizontal, spacing);
        assert_eq!(r.cross_count.get(), 1);
        assert_eq!(r.cell_size, Size::new(30.0, 10.0));
    }

    #[test]
    fn degenerate_tile_is_empty() {
        let sizing = GridSizing::TileSize(Size::new(0.0, 10.0));
        let r = sizing.resolve(proposal(100.0, 100.0), Orientation::Vertical, Spacing::ZERO);
        assert!(r.is_empty());
    }

    #[test]
    fn tile_size_with_zero_proposal_is_empty() {
        let sizing = GridSizing::TileSize(Size::new(9.0, 9.0));
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let r = sizing.resolve(proposal(0.0, 0.0), orientation, Spacing::uniform(10.0));
            assert_eq!(r.cell_size, Size::ZERO);
            assert!(r.is_empty());
        }
    }

    #[test]
    fn degenerate_ratio_is_empty() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let sizing = GridSizing::AspectRatio {
                ratio,
                cross_count: count(5),
            };
            for orientation in [Orientation::Vertical, Orientation::Horizontal] {
                let r = sizing.resolve(proposal(50.0, 50.0), orientation, Spacing::ZERO);
                assert_eq!(r.cell_size, Size::ZERO);
                assert!(r.is_empty());
                assert_eq!(r.cross_count.get(), 5);
            }
        }
    }

    #[test]
    fn flow_has_no_cells() {
        let r = GridSizing::Flow(FlowAlignment::Leading).resolve(
            proposal(100.0, 100.0),
            Orientation::Vertical,
            Spacing::ZERO,
        );
        assert!(r.is_empty());
        assert_eq!(r.cross_count.get(), 1);
    }

    #[test]
    fn resolved_grid_metrics() {
        let r = GridSizing::TileSize(Size::new(10.0, 10.0)).resolve(
            proposal(100.0, 40.0),
            Orientation::Horizontal,
            Spacing::ZERO,
        );
        assert_eq!(r.cross_count.get(), 4);
        let m = r.metrics();
        assert_eq!(m.cell_size, Size::new(10.0, 10.0));
        assert_eq!(m.spacing, r.spacing);
    }
}
