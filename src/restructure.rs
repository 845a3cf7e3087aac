//! Operations that reshape the stored coverage rather than querying it:
//! bulk removal, chopping, slicing, splitting and merging.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::{interval::Interval, tree::IntervalTree};

impl<T, V> IntervalTree<T, V>
where
    T: Ord + Clone + Hash + Debug,
    V: Ord + Clone + Debug,
{
    /// Remove every interval containing the point `p`.
    pub fn remove_overlap_point(&mut self, p: &T) {
        let hits: Vec<_> = self.at(p).into_iter().cloned().collect();
        for iv in &hits {
            let removed = self.discard(iv);
            debug_assert!(removed);
        }
    }

    /// Remove every interval overlapping `[begin, end)`.
    ///
    /// An empty or reversed window overlaps nothing and removes nothing.
    pub fn remove_overlap(&mut self, begin: &T, end: &T) {
        let hits: Vec<_> = self.overlap(begin, end).into_iter().cloned().collect();
        for iv in &hits {
            let removed = self.discard(iv);
            debug_assert!(removed);
        }
    }

    /// Remove every interval lying entirely within `[begin, end)`.
    pub fn remove_envelop(&mut self, begin: &T, end: &T) {
        let hits: Vec<_> = self.envelop(begin, end).into_iter().cloned().collect();
        for iv in &hits {
            let removed = self.discard(iv);
            debug_assert!(removed);
        }
    }

    /// Cut the window `[begin, end)` out of the stored coverage.
    ///
    /// Intervals inside the window are removed; intervals straddling a
    /// window bound are trimmed back to it, keeping their payload. An
    /// interval spanning the whole window is split into the parts before
    /// and after it.
    ///
    /// ```
    /// use centravl::IntervalTree;
    ///
    /// let mut t = IntervalTree::default();
    /// t.addi(0, 10, "x").unwrap();
    /// t.chop(&3, &7);
    ///
    /// assert!(t.containsi(0, 3, "x"));
    /// assert!(t.containsi(7, 10, "x"));
    /// assert_eq!(t.len(), 2);
    /// ```
    pub fn chop(&mut self, begin: &T, end: &T) {
        self.chop_inner(begin, end, &mut |iv, _| iv.data.clone());
    }

    /// As [`chop`](Self::chop), deriving each trimmed piece's payload from
    /// the interval it was cut from. `trim` receives `true` for the piece
    /// keeping the original lower bound and `false` for the piece keeping
    /// the original upper bound.
    pub fn chop_with<F>(&mut self, begin: &T, end: &T, mut trim: F)
    where
        F: FnMut(&Interval<T, V>, bool) -> V,
    {
        self.chop_inner(begin, end, &mut trim);
    }

    fn chop_inner(&mut self, begin: &T, end: &T, trim: &mut dyn FnMut(&Interval<T, V>, bool) -> V) {
        if begin >= end {
            // An empty window has no interior to cut out.
            return;
        }

        let begin_hits: Vec<_> = self
            .at(begin)
            .into_iter()
            .filter(|iv| iv.begin < *begin)
            .cloned()
            .collect();
        let end_hits: Vec<_> = self
            .at(end)
            .into_iter()
            .filter(|iv| iv.end > *end)
            .cloned()
            .collect();

        let mut trimmed = Vec::with_capacity(begin_hits.len() + end_hits.len());
        for iv in &begin_hits {
            trimmed.push(Interval::new(iv.begin.clone(), begin.clone(), trim(iv, true)));
        }
        for iv in &end_hits {
            trimmed.push(Interval::new(end.clone(), iv.end.clone(), trim(iv, false)));
        }

        self.remove_envelop(begin, end);
        for iv in begin_hits.iter().chain(end_hits.iter()) {
            self.discard(iv);
        }
        for iv in trimmed {
            // Trimmed pieces are non-null: each keeps one original bound
            // strictly outside the window.
            self.add_valid(iv);
        }
    }

    /// Split every interval strictly straddling `p` into two parts meeting
    /// at `p`, keeping the payload on both. Intervals with a bound exactly
    /// at `p` are left alone.
    pub fn slice(&mut self, p: &T) {
        self.slice_inner(p, &mut |iv, _| iv.data.clone());
    }

    /// As [`slice`](Self::slice), deriving the payloads of the two halves
    /// from the sliced interval. `split` receives `true` for the lower
    /// half and `false` for the upper half.
    pub fn slice_with<F>(&mut self, p: &T, mut split: F)
    where
        F: FnMut(&Interval<T, V>, bool) -> V,
    {
        self.slice_inner(p, &mut split);
    }

    fn slice_inner(&mut self, p: &T, split: &mut dyn FnMut(&Interval<T, V>, bool) -> V) {
        // at(p) already excludes intervals ending at p; drop the ones
        // beginning there too.
        let hits: Vec<_> = self
            .at(p)
            .into_iter()
            .filter(|iv| iv.begin < *p)
            .cloned()
            .collect();

        let mut halves = Vec::with_capacity(hits.len() * 2);
        for iv in &hits {
            halves.push(Interval::new(iv.begin.clone(), p.clone(), split(iv, true)));
            halves.push(Interval::new(p.clone(), iv.end.clone(), split(iv, false)));
        }

        for iv in &hits {
            self.discard(iv);
        }
        for iv in halves {
            self.add_valid(iv);
        }
    }

    /// Slice at every stored boundary coordinate, leaving a tree in which
    /// no two intervals partially overlap: any two either share both
    /// bounds or are disjoint. Idempotent.
    pub fn split_overlaps(&mut self) {
        if self.is_empty() {
            return;
        }
        if self.boundary_table.len() == 2 {
            // All intervals share both bounds already.
            return;
        }

        let bounds: Vec<T> = self.boundary_table.keys().cloned().collect();

        let mut pieces = HashSet::new();
        for pair in bounds.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            for iv in self.at(lower) {
                pieces.insert(Interval::new(lower.clone(), upper.clone(), iv.data.clone()));
            }
        }

        *self = Self::assemble(pieces);
    }

    /// Merge every run of transitively overlapping intervals into a single
    /// interval spanning the run. Payloads of merged runs collapse to the
    /// payload of the run's lowest-ordered member. Idempotent.
    ///
    /// Adjacent-but-disjoint intervals (`a.end == b.begin`) are not
    /// merged: they share no point.
    ///
    /// ```
    /// use centravl::{Interval, IntervalTree};
    ///
    /// let mut t: IntervalTree<i32> = IntervalTree::from_tuples([(1, 3), (2, 4), (5, 6)]).unwrap();
    /// t.merge_overlaps();
    ///
    /// let mut got: Vec<_> = t.iter().cloned().collect();
    /// got.sort();
    /// assert_eq!(got, vec![Interval::from((1, 4)), Interval::from((5, 6))]);
    /// ```
    pub fn merge_overlaps(&mut self) {
        self.merge_overlaps_inner(&mut None::<fn(V, V) -> V>);
    }

    /// As [`merge_overlaps`](Self::merge_overlaps), folding the payloads
    /// of each merged run pairwise in ascending interval order.
    pub fn merge_overlaps_with<F>(&mut self, reducer: F)
    where
        F: FnMut(V, V) -> V,
    {
        self.merge_overlaps_inner(&mut Some(reducer));
    }

    fn merge_overlaps_inner<F>(&mut self, reducer: &mut Option<F>)
    where
        F: FnMut(V, V) -> V,
    {
        if self.len() < 2 {
            return;
        }

        let mut sorted: Vec<_> = self.all_intervals.iter().cloned().collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval<T, V>> = Vec::with_capacity(sorted.len());
        for higher in sorted {
            let extends_run = matches!(merged.last(), Some(lower) if higher.begin < lower.end);
            if extends_run {
                // Fold the interval into the current run.
                let lower = merged.pop().expect("checked non-empty");
                let end = if higher.end > lower.end {
                    higher.end
                } else {
                    lower.end
                };
                let data = match reducer {
                    Some(f) => f(lower.data, higher.data),
                    None => lower.data,
                };
                merged.push(Interval::new(lower.begin, end, data));
            } else {
                merged.push(higher);
            }
        }

        *self = Self::assemble(merged.into_iter().collect());
    }

    /// Merge every group of intervals sharing both bounds into a single
    /// interval, collapsing payloads like
    /// [`merge_overlaps`](Self::merge_overlaps). Idempotent.
    pub fn merge_equals(&mut self) {
        self.merge_equals_inner(&mut None::<fn(V, V) -> V>);
    }

    /// As [`merge_equals`](Self::merge_equals), folding the payloads of
    /// each group pairwise in ascending payload order.
    pub fn merge_equals_with<F>(&mut self, reducer: F)
    where
        F: FnMut(V, V) -> V,
    {
        self.merge_equals_inner(&mut Some(reducer));
    }

    fn merge_equals_inner<F>(&mut self, reducer: &mut Option<F>)
    where
        F: FnMut(V, V) -> V,
    {
        if self.len() < 2 {
            return;
        }

        let mut sorted: Vec<_> = self.all_intervals.iter().cloned().collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval<T, V>> = Vec::with_capacity(sorted.len());
        for higher in sorted {
            let same_bounds = matches!(
                merged.last(),
                Some(lower) if lower.begin == higher.begin && lower.end == higher.end
            );
            if same_bounds {
                let lower = merged.pop().expect("checked non-empty");
                let data = match reducer {
                    Some(f) => f(lower.data, higher.data),
                    None => lower.data,
                };
                merged.push(Interval::new(lower.begin, lower.end, data));
            } else {
                merged.push(higher);
            }
        }

        *self = Self::assemble(merged.into_iter().collect());
    }
}
