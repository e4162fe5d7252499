// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enumeration of the cells covered by a footprint.

use core::iter::FusedIterator;

use crate::types::{Coordinate, GridSize};

/// The cells covered by a footprint placed at an origin, in row-major order.
///
/// The sequence is a small `Copy` value; every call to `into_iter` starts a
/// fresh pass, so it can be walked any number of times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoordinateSequence {
    origin: Coordinate,
    size: GridSize,
}

impl CoordinateSequence {
    /// Cells of `size` starting at `origin`.
    #[inline]
    pub const fn new(origin: Coordinate, size: GridSize) -> Self {
        Self { origin, size }
    }

    /// Top-left cell of the footprint.
    #[inline]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// The footprint being enumerated.
    #[inline]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cells the sequence yields.
    #[inline]
    pub const fn len(&self) -> usize {
        self.size.area()
    }

    /// Returns `true` if the sequence yields nothing.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Start a new pass over the cells.
    #[inline]
    pub fn iter(&self) -> Coordinates {
        Coordinates {
            seq: *self,
            offset: 0,
        }
    }
}

impl IntoIterator for CoordinateSequence {
    type Item = Coordinate;
    type IntoIter = Coordinates;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &CoordinateSequence {
    type Item = Coordinate;
    type IntoIter = Coordinates;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`CoordinateSequence`].
#[derive(Clone, Debug)]
pub struct Coordinates {
    seq: CoordinateSequence,
    // Linear index into the footprint, row-major.
    offset: usize,
}

impl Iterator for Coordinates {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.offset >= self.seq.len() {
            return None;
        }
        let width = self.seq.size.width;
        let dx = self.offset % width;
        let dy = self.offset / width;
        self.offset += 1;
        Some(Coordinate::new(
            self.seq.origin.x + dx,
            self.seq.origin.y + dy,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len().saturating_sub(self.offset);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coordinates {}
impl FusedIterator for Coordinates {}
