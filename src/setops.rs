//! Set algebra over the membership set: every operation treats a tree as
//! a plain set of `(begin, end, data)` triples and builds or mutates trees
//! from the resulting sets.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::tree::IntervalTree;

impl<T, V> IntervalTree<T, V>
where
    T: Ord + Clone + Hash + Debug,
    V: Ord + Clone + Debug,
{
    /// A fresh tree holding every interval stored in `self` or `other`.
    pub fn union(&self, other: &Self) -> Self {
        let all: HashSet<_> = self
            .all_intervals
            .union(&other.all_intervals)
            .cloned()
            .collect();
        Self::assemble(all)
    }

    /// A fresh tree holding every interval stored in both `self` and
    /// `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        let all: HashSet<_> = self
            .all_intervals
            .intersection(&other.all_intervals)
            .cloned()
            .collect();
        Self::assemble(all)
    }

    /// A fresh tree holding every interval stored in `self` but not in
    /// `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let all: HashSet<_> = self
            .all_intervals
            .difference(&other.all_intervals)
            .cloned()
            .collect();
        Self::assemble(all)
    }

    /// A fresh tree holding every interval stored in exactly one of `self`
    /// and `other`.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let all: HashSet<_> = self
            .all_intervals
            .symmetric_difference(&other.all_intervals)
            .cloned()
            .collect();
        Self::assemble(all)
    }

    /// Add every interval stored in `other`.
    pub fn union_update(&mut self, other: &Self) {
        for iv in &other.all_intervals {
            self.add_valid(iv.clone());
        }
    }

    /// Keep only the intervals also stored in `other`.
    pub fn intersection_update(&mut self, other: &Self) {
        let drop: Vec<_> = self
            .all_intervals
            .difference(&other.all_intervals)
            .cloned()
            .collect();
        for iv in &drop {
            self.discard(iv);
        }
    }

    /// Remove every interval stored in `other`.
    pub fn difference_update(&mut self, other: &Self) {
        for iv in &other.all_intervals {
            self.discard(iv);
        }
    }

    /// Toggle membership of every interval stored in `other`: shared ones
    /// are removed, unshared ones added.
    pub fn symmetric_difference_update(&mut self, other: &Self) {
        for iv in &other.all_intervals {
            if !self.discard(iv) {
                self.add_valid(iv.clone());
            }
        }
    }

    /// Returns true if `self` and `other` share no interval.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.all_intervals.is_disjoint(&other.all_intervals)
    }

    /// Returns true if every interval of `self` is stored in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.all_intervals.is_subset(&other.all_intervals)
    }

    /// Returns true if every interval of `other` is stored in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        self.all_intervals.is_superset(&other.all_intervals)
    }
}
