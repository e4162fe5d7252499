// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between grid cells and points.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

use crate::types::{Coordinate, GridSize, Spacing};

/// Cell size and spacing of a concrete grid.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GridMetrics {
    /// Size of one cell in points.
    pub cell_size: Size,
    /// Gaps between cells.
    pub spacing: Spacing,
}

fn span(count: usize, cell: f64, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    cell * n + gap * (n - 1.0)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell counts are small positive integers; the cast saturates."
)]
fn cells_for(dimension: f64, cell: f64, gap: f64) -> usize {
    let pitch = cell + gap;
    if !(dimension > 0.0 && pitch > 0.0 && dimension.is_finite()) {
        return 1;
    }
    let rough = (dimension / pitch).ceil();
    let reach = rough * cell + (rough - 1.0) * gap;
    let count = if reach >= dimension { rough } else { rough + 1.0 };
    (count as usize).max(1)
}

impl GridMetrics {
    /// Create metrics from a cell size and spacing.
    pub const fn new(cell_size: Size, spacing: Spacing) -> Self {
        Self { cell_size, spacing }
    }

    /// Size in points of a block of cells, including the gaps inside it.
    pub fn span_size(&self, size: GridSize) -> Size {
        Size::new(
            span(size.width, self.cell_size.width, self.spacing.horizontal),
            span(size.height, self.cell_size.height, self.spacing.vertical),
        )
    }

    /// Top-left corner of a cell in points.
    pub fn origin_of(&self, cell: Coordinate) -> Point {
        Point::new(
            cell.x as f64 * (self.cell_size.width + self.spacing.horizontal),
            cell.y as f64 * (self.cell_size.height + self.spacing.vertical),
        )
    }

    /// Frame of a block of cells whose top-left cell is `origin`.
    pub fn frame_of(&self, origin: Coordinate, size: GridSize) -> Rect {
        Rect::from_origin_size(self.origin_of(origin), self.span_size(size))
    }

    /// Size of a whole grid of `columns × rows` cells.
    pub fn content_size(&self, columns: usize, rows: usize) -> Size {
        self.span_size(GridSize::new(columns, rows))
    }

    /// Smallest footprint whose span covers `measured`.
    ///
    /// Each side is at least one cell. With a non-positive cell pitch every
    /// side is one cell.
    pub fn footprint_for(&self, measured: Size) -> GridSize {
        GridSize::new(
            cells_for(
                measured.width,
                self.cell_size.width,
                self.spacing.horizontal,
            ),
            cells_for(
                measured.height,
                self.cell_size.height,
                self.spacing.vertical,
            ),
        )
    }

    /// Center content of `measured` size inside `frame`.
    pub fn centered(&self, frame: Rect, measured: Size) -> Rect {
        Rect::from_center_size(frame.center(), measured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> GridMetrics {
        GridMetrics::new(Size::new(10.0, 20.0), Spacing::new(2.0, 4.0))
    }

    #[test]
    fn span_includes_inner_gaps_only() {
        let m = metrics();
        assert_eq!(m.span_size(GridSize::new(1, 1)), Size::new(10.0, 20.0));
        assert_eq!(m.span_size(GridSize::new(3, 2)), Size::new(34.0, 44.0));
        assert_eq!(m.span_size(GridSize::new(0, 2)), Size::new(0.0, 44.0));
        assert_eq!(m.content_size(0, 0), Size::ZERO);
    }

    #[test]
    fn origins_step_by_cell_and_gap() {
        let m = metrics();
        assert_eq!(m.origin_of(Coordinate::ZERO), Point::ZERO);
        assert_eq!(m.origin_of(Coordinate::new(2, 3)), Point::new(24.0, 72.0));
        assert_eq!(
            m.frame_of(Coordinate::new(1, 0), GridSize::new(2, 1)),
            Rect::new(12.0, 0.0, 34.0, 20.0)
        );
    }

    #[test]
    fn footprint_rounds_up_to_whole_cells() {
        let m = GridMetrics::new(Size::new(10.0, 10.0), Spacing::uniform(2.0));
        assert_eq!(m.footprint_for(Size::new(10.0, 22.0)), GridSize::new(1, 2));
        assert_eq!(m.footprint_for(Size::new(11.0, 23.0)), GridSize::new(2, 3));
        assert_eq!(m.footprint_for(Size::new(0.0, 1.0)), GridSize::ONE);
    }

    #[test]
    fn footprint_of_degenerate_input_is_one_cell() {
        let m = GridMetrics::default();
        assert_eq!(m.footprint_for(Size::new(50.0, 50.0)), GridSize::ONE);
        let m = metrics();
        assert_eq!(m.footprint_for(Size::new(f64::NAN, -3.0)), GridSize::ONE);
    }

    #[test]
    fn centered_content_shares_the_frame_center() {
        let m = metrics();
        let frame = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert_eq!(
            m.centered(frame, Size::new(10.0, 10.0)),
            Rect::new(15.0, 5.0, 25.0, 15.0)
        );
    }
}
