// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorted set of candidate edge positions for the flow packer.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Iteration order of a [`FrontierSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FrontierOrder {
    Ascending,
    Descending,
}

/// A duplicate-free set of positions kept in a fixed order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrontierSet {
    order: FrontierOrder,
    values: Vec<f64>,
}

impl FrontierSet {
    /// A set holding only `0`.
    pub(crate) fn seeded(order: FrontierOrder) -> Self {
        Self {
            order,
            values: vec![0.0],
        }
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        match self.order {
            FrontierOrder::Ascending => a.total_cmp(&b),
            FrontierOrder::Descending => b.total_cmp(&a),
        }
    }

    fn search(&self, value: f64) -> Result<usize, usize> {
        self.values
            .binary_search_by(|probe| self.compare(*probe, value))
    }

    pub(crate) fn insert(&mut self, value: f64) {
        // -0.0 and 0.0 order differently under total_cmp.
        let value = value + 0.0;
        if let Err(at) = self.search(value) {
            self.values.insert(at, value);
        }
    }

    pub(crate) fn remove(&mut self, value: f64) {
        let value = value + 0.0;
        if let Ok(at) = self.search(value) {
            self.values.remove(at);
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, value: f64) -> bool {
        self.search(value + 0.0).is_ok()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.values.iter().copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_insert_keeps_order_and_dedupes() {
        let mut set = FrontierSet::seeded(FrontierOrder::Ascending);
        for v in [30.0, 10.0, 20.0, 10.0, 30.0] {
            set.insert(v);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), [0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn descending_insert_keeps_order() {
        let mut set = FrontierSet::seeded(FrontierOrder::Descending);
        for v in [10.0, 30.0, 20.0] {
            set.insert(v);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), [30.0, 20.0, 10.0, 0.0]);
    }

    #[test]
    fn remove_drops_only_present_values() {
        let mut set = FrontierSet::seeded(FrontierOrder::Ascending);
        set.insert(5.0);
        set.remove(7.0);
        assert_eq!(set.len(), 2);
        set.remove(0.0);
        assert!(!set.contains(0.0));
        assert!(set.contains(5.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let mut set = FrontierSet::seeded(FrontierOrder::Descending);
        set.insert(-0.0);
        assert_eq!(set.len(), 1);
        set.remove(-0.0);
        assert_eq!(set.len(), 0);
    }
}
