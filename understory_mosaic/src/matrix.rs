// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growable occupancy matrix for grid packing.
//!
//! The matrix is stored as one *lane* per index along the growth axis: rows
//! for a vertical grid, columns for a horizontal one. Every lane holds exactly
//! `cross_count` cells. Lanes that were never written read as free and take no
//! storage.
//!
//! Lanes are reference counted, so cloning a matrix is `O(lanes)` and shares
//! cell storage with the original. A write copies only the lane it touches.
//! The tile packer relies on this to hand out a snapshot per placed item.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

use crate::types::{Coordinate, Orientation};

type Lane = Arc<Vec<bool>>;

/// A 2D boolean grid with a fixed cross axis and a growing dynamic axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMatrix {
    orientation: Orientation,
    cross_count: NonZeroUsize,
    lanes: Vec<Lane>,
    // First lane that may still contain a free cell.
    last_available: usize,
}

impl OccupancyMatrix {
    /// Create an empty matrix with `cross_count` cells across.
    pub fn new(orientation: Orientation, cross_count: NonZeroUsize) -> Self {
        Self {
            orientation,
            cross_count,
            lanes: Vec::new(),
            last_available: 0,
        }
    }

    /// Orientation this matrix was created with.
    #[inline]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells along the fixed axis.
    #[inline]
    pub const fn cross_count(&self) -> usize {
        self.cross_count.get()
    }

    /// Number of allocated lanes along the growth axis.
    #[inline]
    pub fn extent(&self) -> usize {
        self.lanes.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        match self.orientation {
            Orientation::Vertical => self.cross_count(),
            Orientation::Horizontal => self.extent(),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        match self.orientation {
            Orientation::Vertical => self.extent(),
            Orientation::Horizontal => self.cross_count(),
        }
    }

    /// Earliest lane known to still contain a free cell.
    ///
    /// Equal to [`extent`](Self::extent) when every allocated lane is full.
    #[inline]
    pub const fn last_available_index(&self) -> usize {
        self.last_available
    }

    /// The cells of lane `index`, if it has been allocated.
    pub fn lane(&self, index: usize) -> Option<&[bool]> {
        self.lanes.get(index).map(|lane| lane.as_slice())
    }

    /// Map a `(dynamic, cross)` pair to a cell coordinate.
    #[inline]
    pub const fn to_coordinate(&self, dynamic: usize, cross: usize) -> Coordinate {
        self.orientation.coordinate(dynamic, cross)
    }

    /// Whether the cell lies inside the allocated part of the matrix.
    pub fn is_valid(&self, column: usize, row: usize) -> bool {
        let (dynamic, cross) = self.split(column, row);
        cross < self.cross_count() && dynamic < self.extent()
    }

    /// Whether the cell at `(column, row)` is occupied.
    ///
    /// Cells in lanes that have not been allocated yet read as free. Reading
    /// past the cross axis is a caller bug: it debug-asserts and reads as free.
    pub fn get(&self, column: usize, row: usize) -> bool {
        let (dynamic, cross) = self.split(column, row);
        debug_assert!(
            cross < self.cross_count(),
            "occupancy read outside the cross axis: [{column}, {row}] in a {}x{} matrix",
            self.width(),
            self.height()
        );
        if cross >= self.cross_count() {
            tracing::error!(
                column,
                row,
                width = self.width(),
                height = self.height(),
                "occupancy read outside the cross axis"
            );
            return false;
        }
        self.lanes
            .get(dynamic)
            .is_some_and(|lane| lane[cross])
    }

    /// Mark the cell at `(column, row)` as occupied or free.
    ///
    /// Allocates lanes up to and including the written one, then keeps
    /// [`last_available_index`](Self::last_available_index) in sync.
    ///
    /// # Panics
    ///
    /// Panics if the cross-axis index is not below
    /// [`cross_count`](Self::cross_count).
    pub fn set(&mut self, column: usize, row: usize, value: bool) {
        let (dynamic, cross) = self.split(column, row);
        assert!(
            cross < self.cross_count(),
            "occupancy write outside the cross axis: [{column}, {row}] with cross count {}",
            self.cross_count()
        );
        if dynamic >= self.lanes.len() {
            let empty: Lane = Arc::new(vec![false; self.cross_count()]);
            self.lanes.resize(dynamic + 1, empty);
        }
        Arc::make_mut(&mut self.lanes[dynamic])[cross] = value;
        self.update_cursor(dynamic, value);
    }

    /// Mark every cell in `cells` as occupied.
    pub fn fill<I: IntoIterator<Item = Coordinate>>(&mut self, cells: I) {
        for c in cells {
            self.set(c.x, c.y, true);
        }
    }

    /// Iterate every allocated cell in lane-major order.
    pub fn cells(&self) -> Cells<'_> {
        Cells::new(self, 0)
    }

    /// Iterate allocated cells starting at the first lane that may have room.
    ///
    /// Lanes before [`last_available_index`](Self::last_available_index) are
    /// full and are skipped.
    pub fn cells_from_cursor(&self) -> Cells<'_> {
        Cells::new(self, self.last_available)
    }

    fn split(&self, column: usize, row: usize) -> (usize, usize) {
        let c = Coordinate::new(column, row);
        (self.orientation.dynamic_of(c), self.orientation.cross_of(c))
    }

    fn update_cursor(&mut self, updated: usize, value: bool) {
        if !value && self.last_available > updated {
            self.last_available = updated;
        } else if value && self.last_available == updated {
            let mut index = updated;
            while self
                .lanes
                .get(index)
                .is_some_and(|lane| lane.iter().all(|&cell| cell))
            {
                index += 1;
            }
            self.last_available = index;
        }
    }
}

/// One cell visited by [`Cells`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatrixCell {
    /// Lane index along the growth axis.
    pub dynamic: usize,
    /// Position within the lane.
    pub cross: usize,
    /// Whether the cell is taken.
    pub occupied: bool,
}

/// Iterator over the allocated cells of an [`OccupancyMatrix`].
#[derive(Clone, Debug)]
pub struct Cells<'a> {
    matrix: &'a OccupancyMatrix,
    dynamic: usize,
    cross: usize,
}

impl<'a> Cells<'a> {
    fn new(matrix: &'a OccupancyMatrix, start: usize) -> Self {
        Self {
            matrix,
            dynamic: start,
            cross: 0,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = MatrixCell;

    fn next(&mut self) -> Option<MatrixCell> {
        let lane = self.matrix.lanes.get(self.dynamic)?;
        let cell = MatrixCell {
            dynamic: self.dynamic,
            cross: self.cross,
            occupied: lane[self.cross],
        };
        self.cross += 1;
        if self.cross >= lane.len() {
            self.cross = 0;
            self.dynamic += 1;
        }
        Some(cell)
    }
}

impl FusedIterator for Cells<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn five() -> NonZeroUsize {
        NonZeroUsize::new(5).unwrap()
    }

    #[test]
    fn empty_matrix_reads_free() {
        let v = OccupancyMatrix::new(Orientation::Vertical, five());
        let h = OccupancyMatrix::new(Orientation::Horizontal, five());
        for index in 0..6 {
            assert!(!v.get(0, index));
            assert!(!h.get(index, 0));
        }
        assert_eq!(v.width(), 5);
        assert_eq!(v.height(), 0);
        assert_eq!(h.width(), 0);
        assert_eq!(h.height(), 5);
    }

    #[test]
    fn writes_grow_the_dynamic_axis() {
        let mut v = OccupancyMatrix::new(Orientation::Vertical, five());
        let mut h = OccupancyMatrix::new(Orientation::Horizontal, five());
        for index in 0..6 {
            v.set(1, index, true);
            h.set(index, 1, true);
            assert!(v.is_valid(0, index));
            assert!(v.is_valid(1, index));
            assert!(h.is_valid(index, 0));
            assert!(h.is_valid(index, 1));
            assert!(!v.is_valid(0, index + 1));
            assert!(!v.is_valid(1, index + 1));
            assert!(!h.is_valid(index + 1, 0));
            assert!(!h.is_valid(index + 1, 1));
            assert!(!v.get(0, index));
            assert!(v.get(1, index));
        }
        assert_eq!(v.height(), 6);
        assert_eq!(h.width(), 6);
    }

    #[test]
    fn skipped_lanes_are_allocated_empty() {
        let mut v = OccupancyMatrix::new(Orientation::Vertical, five());
        v.set(0, 3, true);
        assert_eq!(v.extent(), 4);
        assert_eq!(v.lane(1), Some(&[false; 5][..]));
        assert!(v.get(0, 3));
    }

    #[test]
    #[should_panic(expected = "outside the cross axis")]
    fn write_past_cross_axis_panics() {
        let mut v = OccupancyMatrix::new(Orientation::Vertical, five());
        v.set(5, 0, true);
    }

    #[test]
    fn cursor_advances_past_full_lanes() {
        let two = NonZeroUsize::new(2).unwrap();
        let mut m = OccupancyMatrix::new(Orientation::Vertical, two);
        m.set(0, 0, true);
        assert_eq!(m.last_available_index(), 0);
        m.set(1, 1, true);
        m.set(0, 1, true);
        // Row 1 is full but row 0 is not, so the cursor stays.
        assert_eq!(m.last_available_index(), 0);
        m.set(1, 0, true);
        assert_eq!(m.last_available_index(), 2);
    }

    #[test]
    fn cursor_rewinds_when_a_cell_is_freed() {
        let two = NonZeroUsize::new(2).unwrap();
        let mut m = OccupancyMatrix::new(Orientation::Horizontal, two);
        for x in 0..3 {
            m.set(x, 0, true);
            m.set(x, 1, true);
        }
        assert_eq!(m.last_available_index(), 3);
        m.set(1, 1, false);
        assert_eq!(m.last_available_index(), 1);
        // Freeing a later lane does not move the cursor forward.
        m.set(2, 0, false);
        assert_eq!(m.last_available_index(), 1);
    }

    #[test]
    fn spliced_iteration_starts_at_cursor() {
        let two = NonZeroUsize::new(2).unwrap();
        let mut m = OccupancyMatrix::new(Orientation::Vertical, two);
        m.set(0, 0, true);
        m.set(1, 0, true);
        m.set(0, 1, true);

        let all: Vec<_> = m.cells().collect();
        assert_eq!(all.len(), 4);

        let spliced: Vec<_> = m.cells_from_cursor().collect();
        assert_eq!(
            spliced,
            [
                MatrixCell {
                    dynamic: 1,
                    cross: 0,
                    occupied: true
                },
                MatrixCell {
                    dynamic: 1,
                    cross: 1,
                    occupied: false
                },
            ]
        );
    }

    #[test]
    fn clones_do_not_observe_later_writes() {
        let mut m = OccupancyMatrix::new(Orientation::Vertical, five());
        m.set(0, 0, true);
        let snapshot = m.clone();
        m.set(1, 0, true);
        m.set(0, 1, true);
        assert!(!snapshot.get(1, 0));
        assert_eq!(snapshot.extent(), 1);
        assert!(m.get(1, 0));
    }
}
