// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_mosaic --heading-base-level=0

//! Understory Mosaic: tile packing for mosaic grids.
//!
//! A mosaic grid has a fixed number of cells along one axis (the *cross*
//! axis) and grows along the other. Items cover a rectangular block of cells
//! and are packed in order without overlap. This crate computes where each
//! item goes; measuring and drawing the items is left to the host.
//!
//! The core concepts are:
//!
//! - [`TilePacker`]: first-fit packing of [`TileItem`] footprints. Each
//!   [`PlacedTile`] carries a snapshot of the [`OccupancyMatrix`], so passing
//!   a previous layout back in only repacks the items after the first one
//!   whose id or footprint changed.
//! - [`pack_flow`] and [`FlowPacker`]: free-form packing of arbitrarily sized
//!   rectangles against a frontier of candidate edges, for content that does
//!   not snap to cells.
//! - [`GridSizing`]: turns a [`ProposedSize`] into a [`ResolvedGrid`], the cell
//!   size, cross count and spacing to pack with.
//! - [`GridMetrics`]: converts between cells and points, including the
//!   footprint a measured item needs.
//!
//! Packing runs synchronously and keeps no state between calls other than
//! the layout the caller chooses to pass back.
//!
//! ## Tile packing
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use understory_mosaic::{GridSize, Orientation, TileItem, TilePacker};
//!
//! let packer = TilePacker::new(Orientation::Vertical, NonZeroUsize::new(3).unwrap());
//! let items = [
//!     TileItem::new("hero", GridSize::new(2, 1)),
//!     TileItem::new("a", GridSize::ONE),
//!     TileItem::new("b", GridSize::ONE),
//!     TileItem::new("tall", GridSize::new(1, 2)),
//! ];
//! let layout = packer.pack(&items, &[]).unwrap();
//! let origins: Vec<_> = layout
//!     .placements
//!     .iter()
//!     .map(|p| (p.origin.x, p.origin.y))
//!     .collect();
//! assert_eq!(origins, [(0, 0), (2, 0), (0, 1), (1, 1)]);
//! assert_eq!((layout.columns, layout.rows), (3, 3));
//!
//! // Appending an item reuses every earlier placement.
//! let mut more = items.to_vec();
//! more.push(TileItem::new("c", GridSize::ONE));
//! let next = packer.pack(&more, &layout.placements).unwrap();
//! assert_eq!(next.reused, 4);
//! ```
//!
//! ## Sizing and metrics
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use kurbo::Size;
//! use understory_mosaic::{GridSizing, Orientation, ProposedSize, Spacing};
//!
//! let sizing = GridSizing::AspectRatio {
//!     ratio: 2.0,
//!     cross_count: NonZeroUsize::new(5).unwrap(),
//! };
//! let grid = sizing.resolve(
//!     ProposedSize::new(Size::new(90.0, 90.0)),
//!     Orientation::Vertical,
//!     Spacing::uniform(10.0),
//! );
//! assert_eq!(grid.cell_size, Size::new(10.0, 5.0));
//!
//! // A 25×12 point item needs two cells each way.
//! let footprint = grid.metrics().footprint_for(Size::new(25.0, 12.0));
//! assert_eq!((footprint.width, footprint.height), (2, 2));
//! ```
//!
//! ## Flow packing
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_mosaic::{FlowItem, Orientation, Spacing, pack_flow};
//!
//! let items = [
//!     FlowItem::new(0, Size::new(60.0, 10.0)),
//!     FlowItem::new(1, Size::new(50.0, 20.0)),
//!     FlowItem::new(2, Size::new(40.0, 30.0)),
//! ];
//! let layout = pack_flow(
//!     &items,
//!     Size::new(100.0, 200.0),
//!     Orientation::Vertical,
//!     Spacing::uniform(10.0),
//!     None,
//! )
//! .unwrap();
//! let origins: Vec<Point> = layout.placements.iter().map(|p| p.origin).collect();
//! assert_eq!(
//!     origins,
//!     [Point::new(0.0, 0.0), Point::new(0.0, 20.0), Point::new(60.0, 20.0)]
//! );
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` support in `kurbo`.
//! - `libm`: float math through `libm` for `no_std` builds.
//!
//! Diagnostics go through [`tracing`]; install a subscriber in the host to
//! see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coords;
mod error;
mod flow;
mod frontier;
mod matrix;
mod metrics;
mod sizing;
mod tile;
mod types;

pub use coords::{CoordinateSequence, Coordinates};
pub use error::PackError;
pub use flow::{FlowAlignment, FlowItem, FlowLayout, FlowPacker, FlowPlacement, pack_flow};
pub use matrix::{Cells, MatrixCell, OccupancyMatrix};
pub use metrics::GridMetrics;
pub use sizing::{GridSizing, ProposedSize, ResolvedGrid};
pub use tile::{Overflow, PlacedTile, TileItem, TileLayout, TilePacker};
pub use types::{Coordinate, GridSize, Orientation, Spacing};
