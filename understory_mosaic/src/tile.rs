// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! First-fit tile packing with incremental reuse.
//!
//! Items are placed in input order. Each item goes to the first free cell,
//! scanning lane by lane from the matrix cursor, at which its whole
//! footprint fits. When no allocated cell works, the item starts a fresh
//! lane at the end of the grid.
//!
//! Every placement keeps a snapshot of the occupancy matrix taken right after
//! it was marked. Passing a previous layout back as the cache lets [`TilePacker::pack`]
//! skip the unchanged prefix and resume from the last matching snapshot.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use kurbo::{Rect, Size};

use crate::coords::CoordinateSequence;
use crate::error::PackError;
use crate::matrix::OccupancyMatrix;
use crate::metrics::GridMetrics;
use crate::types::{Coordinate, GridSize, Orientation};

/// One item to pack: a caller key and a footprint in cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileItem<K> {
    /// Caller-assigned identity.
    pub id: K,
    /// Footprint in cells.
    pub size: GridSize,
}

impl<K> TileItem<K> {
    /// Create an item with the given id and footprint.
    pub const fn new(id: K, size: GridSize) -> Self {
        Self { id, size }
    }
}

/// A placed item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedTile<K> {
    /// Identity of the item this placement belongs to.
    pub id: K,
    /// Footprint that was packed, after any clamping.
    pub size: GridSize,
    /// Top-left cell.
    pub origin: Coordinate,
    snapshot: OccupancyMatrix,
}

impl<K> PlacedTile<K> {
    /// Occupancy right after this tile was marked.
    pub fn snapshot(&self) -> &OccupancyMatrix {
        &self.snapshot
    }

    /// Leftmost column covered.
    #[inline]
    pub const fn min_x(&self) -> usize {
        self.origin.x
    }

    /// Topmost row covered.
    #[inline]
    pub const fn min_y(&self) -> usize {
        self.origin.y
    }

    /// Rightmost column covered, inclusive.
    #[inline]
    pub const fn max_x(&self) -> usize {
        self.origin.x + self.size.width - 1
    }

    /// Bottom row covered, inclusive.
    #[inline]
    pub const fn max_y(&self) -> usize {
        self.origin.y + self.size.height - 1
    }

    /// The cells this tile covers.
    #[inline]
    pub const fn cells(&self) -> CoordinateSequence {
        CoordinateSequence::new(self.origin, self.size)
    }

    /// Frame of this tile in points.
    pub fn frame(&self, metrics: &GridMetrics) -> Rect {
        metrics.frame_of(self.origin, self.size)
    }
}

/// Result of a tile packing pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayout<K> {
    /// One placement per input item, in input order.
    pub placements: Vec<PlacedTile<K>>,
    /// Number of columns the grid spans.
    pub columns: usize,
    /// Number of rows the grid spans.
    pub rows: usize,
    /// How many leading placements were taken from the cache.
    pub reused: usize,
}

impl<K> TileLayout<K> {
    /// Size of the packed grid in points.
    pub fn content_size(&self, metrics: &GridMetrics) -> Size {
        metrics.content_size(self.columns, self.rows)
    }
}

/// What to do with a footprint wider than the cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Fail with [`PackError::FootprintExceedsCrossAxis`].
    #[default]
    Reject,
    /// Shrink the cross extent to the cross count.
    Clamp,
}

/// Packs [`TileItem`]s into a grid with a fixed number of cells across.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TilePacker {
    orientation: Orientation,
    cross_count: NonZeroUsize,
    overflow: Overflow,
}

impl TilePacker {
    /// Create a packer for a grid with `cross_count` cells across.
    pub const fn new(orientation: Orientation, cross_count: NonZeroUsize) -> Self {
        Self {
            orientation,
            cross_count,
            overflow: Overflow::Reject,
        }
    }

    /// Set how footprints wider than the cross axis are handled.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Orientation of the grid.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells across.
    pub const fn cross_count(&self) -> usize {
        self.cross_count.get()
    }

    /// Place `items` in order, reusing the matching prefix of `cache`.
    ///
    /// A cached placement is reused while its id and footprint match the
    /// item at the same position. The first mismatch invalidates it and
    /// everything after it. A cache built for another orientation or cross
    /// count is ignored.
    ///
    /// All footprints are validated before anything is placed.
    pub fn pack<K: Clone + PartialEq>(
        &self,
        items: &[TileItem<K>],
        cache: &[PlacedTile<K>],
    ) -> Result<TileLayout<K>, PackError> {
        let sizes = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.footprint(index, item.size))
            .collect::<Result<Vec<_>, _>>()?;

        let reused = cache
            .iter()
            .zip(items.iter().zip(&sizes))
            .take_while(|(placed, (item, size))| {
                placed.id == item.id && placed.size == **size && self.accepts(&placed.snapshot)
            })
            .count();

        let mut matrix = match reused.checked_sub(1) {
            Some(last) => cache[last].snapshot.clone(),
            None => OccupancyMatrix::new(self.orientation, self.cross_count),
        };
        if reused > 0 {
            tracing::debug!(reused, total = items.len(), "reusing cached placements");
        }

        let mut placements = Vec::with_capacity(items.len());
        placements.extend_from_slice(&cache[..reused]);

        for (index, (item, &size)) in items.iter().zip(&sizes).enumerate().skip(reused) {
            let origin = match self.first_fit(&matrix, size) {
                Some(origin) => origin,
                None => {
                    let origin = self.orientation.coordinate(matrix.extent(), 0);
                    tracing::debug!(
                        index,
                        x = origin.x,
                        y = origin.y,
                        "no fit, starting a new lane"
                    );
                    origin
                }
            };
            matrix.fill(CoordinateSequence::new(origin, size));
            tracing::trace!(
                index,
                x = origin.x,
                y = origin.y,
                width = size.width,
                height = size.height,
                "placed tile"
            );
            placements.push(PlacedTile {
                id: item.id.clone(),
                size,
                origin,
                snapshot: matrix.clone(),
            });
        }

        Ok(TileLayout {
            placements,
            columns: matrix.width(),
            rows: matrix.height(),
            reused,
        })
    }

    fn footprint(&self, index: usize, size: GridSize) -> Result<GridSize, PackError> {
        if size.is_empty() {
            return Err(PackError::EmptyFootprint { index });
        }
        let extent = size.cross_extent(self.orientation);
        if extent <= self.cross_count() {
            return Ok(size);
        }
        match self.overflow {
            Overflow::Reject => Err(PackError::FootprintExceedsCrossAxis {
                index,
                extent,
                cross_count: self.cross_count(),
            }),
            Overflow::Clamp => Ok(size.clamped_cross(self.orientation, self.cross_count())),
        }
    }

    fn accepts(&self, snapshot: &OccupancyMatrix) -> bool {
        snapshot.orientation() == self.orientation && snapshot.cross_count() == self.cross_count()
    }

    fn first_fit(&self, matrix: &OccupancyMatrix, size: GridSize) -> Option<Coordinate> {
        matrix
            .cells_from_cursor()
            .filter(|cell| !cell.occupied)
            .map(|cell| matrix.to_coordinate(cell.dynamic, cell.cross))
            .find(|&origin| self.fits(matrix, origin, size))
    }

    fn fits(&self, matrix: &OccupancyMatrix, origin: Coordinate, size: GridSize) -> bool {
        let cross_end = self.orientation.cross_of(origin) + size.cross_extent(self.orientation);
        cross_end <= self.cross_count()
            && CoordinateSequence::new(origin, size)
                .iter()
                .all(|c| !matrix.get(c.x, c.y))
    }
}
