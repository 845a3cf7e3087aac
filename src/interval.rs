use std::{
    hash::{Hash, Hasher},
    ops::{Range, Sub},
};

/// A half-open interval `[begin, end)` tagged with an arbitrary payload.
///
/// An [`Interval`] is an immutable value: equality and hashing are defined
/// over it as a whole, and the tree never mutates one in place. Two
/// intervals with the same bounds but different payloads are distinct
/// values and may coexist in one tree.
///
/// # Ordering
///
/// Intervals are totally ordered by `begin`, tie-broken by `end` and then
/// by `data`. This makes sorted containers of intervals deterministic
/// without any runtime comparability checks.
///
/// # Null intervals
///
/// An interval with `begin >= end` is "null": it contains no point. Null
/// intervals may exist transiently (for example as a query argument that
/// degenerates to a point) but are rejected by every tree entry point that
/// would store one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T, V = ()> {
    /// Inclusive lower bound.
    pub begin: T,
    /// Exclusive upper bound.
    pub end: T,
    /// Opaque user payload.
    pub data: V,
}

impl<T, V> Interval<T, V> {
    /// Construct an interval from its bounds and payload.
    ///
    /// No validation is performed; see [`Interval::is_null()`].
    pub fn new(begin: T, end: T, data: V) -> Self {
        Self { begin, end, data }
    }
}

impl<T, V> Interval<T, V>
where
    T: Ord,
{
    /// Returns true if this interval contains no point (`begin >= end`).
    pub fn is_null(&self) -> bool {
        self.begin >= self.end
    }

    /// Returns true if `p` falls within this interval (`begin <= p < end`).
    pub fn contains_point(&self, p: &T) -> bool {
        self.begin <= *p && *p < self.end
    }

    /// Returns true if this interval and `[begin, end)` share at least one
    /// point.
    pub fn overlaps_range(&self, begin: &T, end: &T) -> bool {
        self.begin < *end && *begin < self.end
    }

    /// Returns true if this interval and `other` share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_range(&other.begin, &other.end)
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl<T, V> Interval<T, V>
where
    T: Ord + Clone,
{
    /// The coordinate span of this interval as a [`Range`].
    pub fn range(&self) -> Range<T> {
        self.begin.clone()..self.end.clone()
    }
}

impl<T, V> Interval<T, V>
where
    T: Ord + Clone + Sub<Output = T>,
{
    /// The length of this interval: `end - begin`, or zero for a null
    /// interval.
    pub fn length(&self) -> T {
        if self.is_null() {
            // A subtractable scalar has no literal zero; derive one.
            return self.begin.clone() - self.begin.clone();
        }
        self.end.clone() - self.begin.clone()
    }

    /// The gap between this interval and the point `p`: zero if `p` is
    /// contained, otherwise the distance to the nearer bound.
    pub fn distance_to_point(&self, p: &T) -> T {
        if self.contains_point(p) {
            self.begin.clone() - self.begin.clone()
        } else if *p < self.begin {
            self.begin.clone() - p.clone()
        } else {
            p.clone() - self.end.clone()
        }
    }

    /// The gap between this interval and `other`: zero if they overlap,
    /// otherwise the distance between the facing bounds. Symmetric.
    pub fn distance_to(&self, other: &Self) -> T {
        if self.overlaps(other) {
            self.begin.clone() - self.begin.clone()
        } else if self.begin < other.begin {
            other.begin.clone() - self.end.clone()
        } else {
            self.begin.clone() - other.end.clone()
        }
    }
}

/// Hashing covers the bounds only.
///
/// Payloads would otherwise need to be hashable, which the data model does
/// not require. This is consistent with [`Eq`]: triple-equal intervals
/// always have equal bounds. Intervals sharing bounds but not payloads
/// collide and are separated by the full equality check.
impl<T, V> Hash for Interval<T, V>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.begin.hash(state);
        self.end.hash(state);
    }
}

impl<T, V> From<(T, T, V)> for Interval<T, V> {
    fn from((begin, end, data): (T, T, V)) -> Self {
        Self::new(begin, end, data)
    }
}

impl<T, V> From<(T, T)> for Interval<T, V>
where
    V: Default,
{
    fn from((begin, end): (T, T)) -> Self {
        Self::new(begin, end, V::default())
    }
}

impl<T, V> From<Range<T>> for Interval<T, V>
where
    V: Default,
{
    fn from(value: Range<T>) -> Self {
        Self::new(value.start, value.end, V::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{arbitrary_interval, COORD_MAX};

    #[test]
    fn test_half_open_predicates() {
        let iv: Interval<_, ()> = (4, 7).into();

        assert!(iv.contains_point(&4));
        assert!(iv.contains_point(&6));
        assert!(!iv.contains_point(&7)); // exclusive upper bound
        assert!(!iv.contains_point(&3));

        // Tangent ranges do not overlap under half-open semantics.
        assert!(!iv.overlaps_range(&7, &9));
        assert!(!iv.overlaps_range(&2, &4));
        assert!(iv.overlaps_range(&6, &9));
        assert!(iv.overlaps_range(&2, &5));
        assert!(iv.overlaps_range(&5, &6));
    }

    #[test]
    fn test_containment() {
        let outer = Interval::new(0, 10, "outer");
        let inner = Interval::new(3, 7, "inner");
        let edge = Interval::new(0, 10, "edge");

        assert!(outer.contains_interval(&inner));
        assert!(!inner.contains_interval(&outer));
        assert!(outer.contains_interval(&edge));
    }

    #[test]
    fn test_length_and_distance() {
        let iv: Interval<i64, ()> = (10, 14).into();

        assert_eq!(iv.length(), 4);
        assert_eq!(Interval::<i64, ()>::new(5, 5, ()).length(), 0);
        assert_eq!(Interval::<i64, ()>::new(9, 2, ()).length(), 0);

        assert_eq!(iv.distance_to_point(&11), 0);
        assert_eq!(iv.distance_to_point(&7), 3);
        assert_eq!(iv.distance_to_point(&20), 6);

        let near: Interval<i64, ()> = (16, 18).into();
        assert_eq!(iv.distance_to(&near), 2);
        assert_eq!(near.distance_to(&iv), 2);
        assert_eq!(iv.distance_to(&(12, 30).into()), 0);
    }

    #[test]
    fn test_hash_covers_bounds_only() {
        // Same bounds, different payloads: distinct set members that land
        // in the same bucket.
        let a = Interval::new(1, 5, "a");
        let b = Interval::new(1, 5, "b");

        let set: HashSet<_> = [a.clone(), b.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
        assert!(set.contains(&b));
    }

    proptest! {
        /// The derived ordering is lexicographic over (begin, end, data).
        #[test]
        fn prop_ordering(a in arbitrary_interval(), b in arbitrary_interval()) {
            let want = a.begin.cmp(&b.begin)
                .then(a.end.cmp(&b.end))
                .then(a.data.cmp(&b.data));
            prop_assert_eq!(a.cmp(&b), want);
        }

        /// Overlap is symmetric and matches the pointwise definition.
        #[test]
        fn prop_overlaps(a in arbitrary_interval(), b in arbitrary_interval()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));

            let brute = (0..COORD_MAX * 2).any(|p| a.contains_point(&p) && b.contains_point(&p));
            prop_assert_eq!(a.overlaps(&b), brute);
        }

        /// Envelopment implies overlap (for non-null intervals).
        #[test]
        fn prop_containment_implies_overlap(
            a in arbitrary_interval(),
            b in arbitrary_interval(),
        ) {
            if a.contains_interval(&b) {
                prop_assert!(a.overlaps(&b));
            }
        }
    }
}
