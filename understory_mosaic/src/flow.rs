// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-form flow packing.
//!
//! Flow packing places rectangles of arbitrary size instead of whole cells.
//! The packer keeps two [frontier sets](crate::frontier) of candidate edge
//! positions, one per axis, and tries their cartesian product in scan order.
//! A candidate is only considered if it sits on an axis or in a concave
//! corner of the packed region, so new rectangles never float free of the
//! ones already placed.
//!
//! Each rectangle is grown by the spacing before collision tests, and the
//! container is grown by the same amount so the last rectangle on the cross
//! axis may end flush with the container edge.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::error::PackError;
use crate::frontier::{FrontierOrder, FrontierSet};
use crate::types::{Orientation, Spacing};

/// One item to flow: a caller key and its measured size in points.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowItem<K> {
    /// Caller-assigned identity.
    pub id: K,
    /// Measured size, without spacing.
    pub size: Size,
}

impl<K> FlowItem<K> {
    /// Create an item with the given id and size.
    pub const fn new(id: K, size: Size) -> Self {
        Self { id, size }
    }
}

/// A flowed item.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowPlacement<K> {
    /// Identity of the item this placement belongs to.
    pub id: K,
    /// Measured size, without spacing.
    pub size: Size,
    /// Top-left corner relative to the content origin.
    pub origin: Point,
}

impl<K> FlowPlacement<K> {
    /// The item's frame, without spacing.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// How flowed content sits inside bounds larger than itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowAlignment {
    /// Towards the origin.
    Leading,
    /// Centered.
    #[default]
    Center,
    /// Away from the origin.
    Trailing,
}

impl FlowAlignment {
    fn offset(self, available: f64, content: f64) -> f64 {
        match self {
            Self::Leading => 0.0,
            Self::Center => ((available - content) / 2.0).max(0.0),
            Self::Trailing => (available - content).max(0.0),
        }
    }
}

/// Result of a flow packing pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowLayout<K> {
    /// One placement per input item, in input order.
    pub placements: Vec<FlowPlacement<K>>,
    /// Extent of the packed content, including trailing spacing.
    pub size: Size,
    /// Container the layout was packed into.
    pub container: Size,
    /// Spacing the layout was packed with.
    pub spacing: Spacing,
    /// Orientation the layout was packed with.
    pub orientation: Orientation,
    /// How many leading placements were replayed from a previous layout.
    pub reused: usize,
}

impl<K> FlowLayout<K> {
    fn empty(container: Size, orientation: Orientation, spacing: Spacing) -> Self {
        Self {
            placements: Vec::new(),
            size: Size::ZERO,
            container,
            spacing,
            orientation,
            reused: 0,
        }
    }

    /// Offset to add to every placement when showing the content in `bounds`.
    ///
    /// The axis along which content grows follows `alignment` in horizontal
    /// layouts and is centered in vertical ones. The cross axis follows
    /// `alignment` in vertical layouts and is centered in horizontal ones.
    pub fn alignment_offset(&self, bounds: Size, alignment: FlowAlignment) -> Vec2 {
        let (x, y) = match self.orientation {
            Orientation::Vertical => (alignment, FlowAlignment::Center),
            Orientation::Horizontal => (FlowAlignment::Center, alignment),
        };
        Vec2::new(
            x.offset(bounds.width, self.size.width),
            y.offset(bounds.height, self.size.height),
        )
    }
}

type EdgeIndex = HashMap<u64, SmallVec<[usize; 4]>>;

fn edge_key(value: f64) -> u64 {
    // Fold -0.0 into 0.0 so both land in the same bucket.
    (value + 0.0).to_bits()
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

fn strictly_contains(rect: Rect, point: Point) -> bool {
    rect.x0 < point.x && point.x < rect.x1 && rect.y0 < point.y && point.y < rect.y1
}

/// Incremental free-form packer.
///
/// Rectangles handed to [`add`](Self::add) and [`is_available`](Self::is_available)
/// are expected to already include spacing; [`place`](Self::place) adds it.
#[derive(Clone, Debug)]
pub struct FlowPacker {
    orientation: Orientation,
    spacing: Spacing,
    bounds: Size,
    rects: Vec<Rect>,
    // Placed rects keyed by their right and bottom edges.
    by_x1: EdgeIndex,
    by_y1: EdgeIndex,
    potential_x: FrontierSet,
    potential_y: FrontierSet,
}

impl FlowPacker {
    /// Create a packer for `container`, growing along `orientation`.
    ///
    /// Only the cross dimension of `container` bounds placement; the growth
    /// axis is unbounded.
    pub fn new(orientation: Orientation, container: Size, spacing: Spacing) -> Self {
        debug_assert!(
            valid_spacing(spacing),
            "flow spacing must be finite and non-negative"
        );
        let inflated = spacing.inflate(container);
        let (bounds, x_order, y_order) = match orientation {
            Orientation::Vertical => (
                Size::new(inflated.width, f64::INFINITY),
                FrontierOrder::Descending,
                FrontierOrder::Ascending,
            ),
            Orientation::Horizontal => (
                Size::new(f64::INFINITY, inflated.height),
                FrontierOrder::Ascending,
                FrontierOrder::Descending,
            ),
        };
        Self {
            orientation,
            spacing,
            bounds,
            rects: Vec::new(),
            by_x1: EdgeIndex::new(),
            by_y1: EdgeIndex::new(),
            potential_x: FrontierSet::seeded(x_order),
            potential_y: FrontierSet::seeded(y_order),
        }
    }

    /// Working bounds: the container grown by spacing, infinite along the
    /// growth axis.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Rectangles placed so far, including spacing.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Candidate origins for a rectangle of `size`, in scan order.
    ///
    /// Candidates on either axis qualify unless a placed rectangle strictly
    /// contains them. Others need a placed rectangle ending at `x` that
    /// overlaps the candidate vertically, and one ending at `y` that overlaps
    /// it horizontally.
    pub fn candidates(&self, size: Size) -> Vec<Point> {
        let mut out = Vec::new();
        match self.orientation {
            Orientation::Vertical => {
                for y in self.potential_y.iter() {
                    for x in self.potential_x.iter() {
                        self.push_candidate(&mut out, Point::new(x, y), size);
                    }
                }
            }
            Orientation::Horizontal => {
                for x in self.potential_x.iter() {
                    for y in self.potential_y.iter() {
                        self.push_candidate(&mut out, Point::new(x, y), size);
                    }
                }
            }
        }
        out
    }

    fn push_candidate(&self, out: &mut Vec<Point>, point: Point, size: Size) {
        let on_axis = point.x == 0.0 || point.y == 0.0;
        let keep = if on_axis && !self.rects.iter().any(|&r| strictly_contains(r, point)) {
            true
        } else {
            self.has_neighbors(Rect::from_origin_size(point, size))
        };
        if keep {
            out.push(point);
        }
    }

    fn has_neighbors(&self, rect: Rect) -> bool {
        let (Some(left), Some(above)) = (
            self.by_x1.get(&edge_key(rect.x0)),
            self.by_y1.get(&edge_key(rect.y0)),
        ) else {
            return false;
        };
        let has_left = left.iter().any(|&i| {
            let l = self.rects[i];
            l.y1 > rect.y0 && rect.y1 > l.y0
        });
        has_left
            && above.iter().any(|&i| {
                let a = self.rects[i];
                a.x1 > rect.x0 && rect.x1 > a.x0
            })
    }

    /// Whether `rect` stays inside the cross bound and clears every placed
    /// rectangle.
    pub fn is_available(&self, rect: Rect) -> bool {
        let inside = match self.orientation {
            Orientation::Vertical => rect.x1 <= self.bounds.width,
            Orientation::Horizontal => rect.y1 <= self.bounds.height,
        };
        inside && !self.rects.iter().any(|&r| overlaps(r, rect))
    }

    /// Record `rect` as placed and update the frontiers.
    ///
    /// A far edge still inside the bounds becomes a new candidate. An edge
    /// that reaches the bounds closes off the opposite axis at the
    /// rectangle's near edge.
    pub fn add(&mut self, rect: Rect) {
        let index = self.rects.len();
        self.rects.push(rect);
        self.by_x1.entry(edge_key(rect.x1)).or_default().push(index);
        self.by_y1.entry(edge_key(rect.y1)).or_default().push(index);

        if self.bounds.width > rect.x1 {
            self.potential_x.insert(rect.x1);
        } else {
            self.potential_y.remove(rect.y0);
        }
        if self.bounds.height > rect.y1 {
            self.potential_y.insert(rect.y1);
        } else {
            self.potential_x.remove(rect.x0);
        }
    }

    /// Place an item of measured `size` and return its origin.
    pub fn place(&mut self, size: Size) -> Point {
        let size = self.spacing.inflate(size);
        let found = self
            .candidates(size)
            .into_iter()
            .find(|&origin| self.is_available(Rect::from_origin_size(origin, size)));
        let origin = match found {
            Some(origin) => origin,
            None => {
                let origin = self.fallback_origin();
                tracing::debug!(
                    width = size.width,
                    height = size.height,
                    x = origin.x,
                    y = origin.y,
                    "no flow candidate fits, placing past the content"
                );
                origin
            }
        };
        self.add(Rect::from_origin_size(origin, size));
        origin
    }

    /// Far edges of everything placed so far.
    pub fn content_size(&self) -> Size {
        self.rects.iter().fold(Size::ZERO, |acc, r| {
            Size::new(acc.width.max(r.x1), acc.height.max(r.y1))
        })
    }

    /// Where an item goes when no candidate fits: the start of the cross
    /// axis, just past the content.
    pub fn fallback_origin(&self) -> Point {
        let content = self.content_size();
        match self.orientation {
            Orientation::Vertical => Point::new(0.0, content.height),
            Orientation::Horizontal => Point::new(content.width, 0.0),
        }
    }
}

fn valid_size(size: Size) -> bool {
    [size.width, size.height]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
}

fn valid_spacing(spacing: Spacing) -> bool {
    valid_size(Size::new(spacing.horizontal, spacing.vertical))
}

/// Flow `items` into `container`.
///
/// When `previous` was packed into the same container with the same spacing
/// and orientation, its placements are replayed for the longest prefix whose
/// ids and sizes still match, and only the rest is packed.
///
/// A container without a positive, finite cross dimension yields an empty
/// layout. Item sizes and spacing must be finite and non-negative.
pub fn pack_flow<K: Clone + PartialEq>(
    items: &[FlowItem<K>],
    container: Size,
    orientation: Orientation,
    spacing: Spacing,
    previous: Option<&FlowLayout<K>>,
) -> Result<FlowLayout<K>, PackError> {
    if let Some(index) = items.iter().position(|item| !valid_size(item.size)) {
        return Err(PackError::InvalidFlowSize { index });
    }
    if !valid_spacing(spacing) {
        return Err(PackError::InvalidSpacing);
    }

    let cross = orientation.cross_dimension(container);
    if !(cross.is_finite() && cross > 0.0) {
        tracing::info!(
            width = container.width,
            height = container.height,
            "flow container has no usable cross dimension, using an empty layout"
        );
        return Ok(FlowLayout::empty(container, orientation, spacing));
    }

    let previous = previous
        .filter(|p| {
            p.container == container && p.spacing == spacing && p.orientation == orientation
        })
        .map_or(&[][..], |p| p.placements.as_slice());
    let reused = previous
        .iter()
        .zip(items)
        .take_while(|(placed, item)| placed.id == item.id && placed.size == item.size)
        .count();

    let mut packer = FlowPacker::new(orientation, container, spacing);
    let mut placements = Vec::with_capacity(items.len());
    for placed in &previous[..reused] {
        packer.add(Rect::from_origin_size(
            placed.origin,
            spacing.inflate(placed.size),
        ));
        placements.push(placed.clone());
    }
    if reused > 0 {
        tracing::debug!(reused, total = items.len(), "replaying flow placements");
    }

    for item in &items[reused..] {
        let origin = packer.place(item.size);
        tracing::trace!(x = origin.x, y = origin.y, "flowed item");
        placements.push(FlowPlacement {
            id: item.id.clone(),
            size: item.size,
            origin,
        });
    }

    Ok(FlowLayout {
        placements,
        size: packer.content_size(),
        container,
        spacing,
        orientation,
        reused,
    })
}
