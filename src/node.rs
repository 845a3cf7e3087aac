use std::{collections::BTreeSet, fmt::Debug};

use crate::{error::Error, interval::Interval};

/// One vertex of the balanced search tree.
///
/// A [`Node`] owns the non-empty set of intervals that cover its pivot
/// coordinate (`begin <= pivot < end`). Intervals ending at or before the
/// pivot live in the left subtree; intervals beginning after it live in
/// the right subtree. The pivot of a freshly created node is the `begin`
/// of the interval that created it.
#[derive(Debug, Clone)]
pub(crate) struct Node<T, V> {
    pivot: T,

    /// The intervals covering `pivot`, sorted by their natural order.
    ///
    /// Never empty: a node whose center set drains is pruned out of the
    /// tree by its parent.
    s_center: BTreeSet<Interval<T, V>>,

    /// Child node pointers.
    left: Option<Box<Node<T, V>>>,
    right: Option<Box<Node<T, V>>>,

    /// Subtree depth: 1 for a leaf, `1 + max(child depths)` otherwise.
    ///
    /// A u8 bounds the representable depth at 255, enough for a balanced
    /// tree far beyond addressable memory.
    depth: u8,
}

impl<T, V> Node<T, V>
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    /// Create a leaf holding `iv`, pivoted on its lower bound.
    pub(crate) fn from_interval(iv: Interval<T, V>) -> Box<Self> {
        let pivot = iv.begin.clone();
        let mut s_center = BTreeSet::new();
        s_center.insert(iv);

        Box::new(Self {
            pivot,
            s_center,
            left: None,
            right: None,
            depth: 1,
        })
    }

    /// Build a subtree from intervals sorted by their natural order,
    /// pivoting each level on the median lower bound.
    ///
    /// The resulting shape starts close to balanced; a rebalance pass at
    /// each level absorbs whatever skew the center sets introduce.
    pub(crate) fn from_sorted(ivs: Vec<Interval<T, V>>) -> Option<Box<Self>> {
        if ivs.is_empty() {
            return None;
        }

        let pivot = ivs[ivs.len() / 2].begin.clone();

        // The median interval itself covers `pivot`, so the center set is
        // never empty.
        let mut s_center = BTreeSet::new();
        let mut lower = Vec::new();
        let mut upper = Vec::new();
        for iv in ivs {
            if iv.end <= pivot {
                lower.push(iv);
            } else if iv.begin > pivot {
                upper.push(iv);
            } else {
                s_center.insert(iv);
            }
        }

        let mut node = Box::new(Self {
            pivot,
            s_center,
            left: Self::from_sorted(lower),
            right: Self::from_sorted(upper),
            depth: 1,
        });
        rebalance(&mut node);

        Some(node)
    }

    /// Integrate `iv` into the subtree rooted at this node, rebalancing on
    /// the way back up.
    pub(crate) fn insert(self: &mut Box<Self>, iv: Interval<T, V>) {
        if iv.contains_point(&self.pivot) {
            // Growing the center set never changes the subtree shape.
            self.s_center.insert(iv);
            return;
        }

        let child = if iv.end <= self.pivot {
            &mut self.left
        } else {
            &mut self.right
        };

        match child {
            Some(v) => {
                v.insert(iv);
                rebalance(self);
            }
            None => {
                *child = Some(Self::from_interval(iv));
                update_depth(self);
            }
        }
    }

    /// Add every interval of the subtree rooted at this node to `results`.
    pub(crate) fn collect_intervals<'a>(&'a self, results: &mut Vec<&'a Interval<T, V>>) {
        results.extend(self.s_center.iter());
        if let Some(l) = self.left.as_deref() {
            l.collect_intervals(results);
        }
        if let Some(r) = self.right.as_deref() {
            r.collect_intervals(results);
        }
    }

    /// Add every stored interval containing the point `p` to `results`.
    pub(crate) fn search_point<'a>(&'a self, p: &T, results: &mut Vec<&'a Interval<T, V>>) {
        for iv in &self.s_center {
            if iv.contains_point(p) {
                results.push(iv);
            }
        }

        // At most one subtree can hold intervals covering `p`: the left
        // one holds intervals ending at or before the pivot, the right one
        // intervals beginning after it.
        if *p < self.pivot {
            if let Some(l) = self.left.as_deref() {
                l.search_point(p, results);
            }
        } else if *p > self.pivot {
            if let Some(r) = self.right.as_deref() {
                r.search_point(p, results);
            }
        }
    }

    /// Add every stored interval overlapping `[begin, end)` to `results`.
    pub(crate) fn search_overlap<'a>(
        &'a self,
        begin: &T,
        end: &T,
        results: &mut Vec<&'a Interval<T, V>>,
    ) {
        for iv in &self.s_center {
            if iv.overlaps_range(begin, end) {
                results.push(iv);
            }
        }

        // Both subtrees are visited when the query straddles the pivot.
        if *begin < self.pivot {
            if let Some(l) = self.left.as_deref() {
                l.search_overlap(begin, end, results);
            }
        }
        if *end > self.pivot {
            if let Some(r) = self.right.as_deref() {
                r.search_overlap(begin, end, results);
            }
        }
    }

    /// Returns true if any stored interval contains the point `p`.
    pub(crate) fn contains_point(&self, p: &T) -> bool {
        if self.s_center.iter().any(|iv| iv.contains_point(p)) {
            return true;
        }

        let child = if *p < self.pivot {
            self.left.as_deref()
        } else {
            self.right.as_deref()
        };
        child.is_some_and(|c| c.contains_point(p))
    }

    /// Returns true if any stored interval overlaps `[begin, end)`.
    pub(crate) fn overlaps_range(&self, begin: &T, end: &T) -> bool {
        if self.s_center.iter().any(|iv| iv.overlaps_range(begin, end)) {
            return true;
        }

        (*begin < self.pivot
            && self
                .left
                .as_deref()
                .is_some_and(|l| l.overlaps_range(begin, end)))
            || (*end > self.pivot
                && self
                    .right
                    .as_deref()
                    .is_some_and(|r| r.overlaps_range(begin, end)))
    }

    /// Recursively re-check the structural invariants of the subtree
    /// rooted at this node, reporting the first violation found.
    ///
    /// `lo` and `hi` carry the bounds inherited from ancestors: every
    /// interval in this subtree must satisfy `begin > lo` and `end <= hi`.
    pub(crate) fn verify(&self, lo: Option<&T>, hi: Option<&T>) -> Result<(), Error> {
        if self.s_center.is_empty() {
            return Err(Error::InvariantViolation(format!(
                "node {:?} has an empty center set",
                self.pivot
            )));
        }

        for iv in &self.s_center {
            if iv.is_null() {
                return Err(Error::InvariantViolation(format!(
                    "null interval {iv:?} stored at node {:?}",
                    self.pivot
                )));
            }
            if !iv.contains_point(&self.pivot) {
                return Err(Error::InvariantViolation(format!(
                    "center interval {iv:?} does not cover pivot {:?}",
                    self.pivot
                )));
            }
            if let Some(lo) = lo {
                if iv.begin <= *lo {
                    return Err(Error::InvariantViolation(format!(
                        "interval {iv:?} escapes the right-subtree bound {lo:?}"
                    )));
                }
            }
            if let Some(hi) = hi {
                if iv.end > *hi {
                    return Err(Error::InvariantViolation(format!(
                        "interval {iv:?} escapes the left-subtree bound {hi:?}"
                    )));
                }
            }
        }

        let want_depth = 1 + depth_of(&self.left).max(depth_of(&self.right));
        if self.depth != want_depth {
            return Err(Error::InvariantViolation(format!(
                "node {:?} records depth {}, recomputed {}",
                self.pivot, self.depth, want_depth
            )));
        }

        let b = balance(self);
        if b.abs() > 1 {
            return Err(Error::InvariantViolation(format!(
                "node {:?} has balance factor {b}",
                self.pivot
            )));
        }

        if let Some(l) = self.left.as_deref() {
            l.verify(lo, Some(&self.pivot))?;
        }
        if let Some(r) = self.right.as_deref() {
            r.verify(Some(&self.pivot), hi)?;
        }
        Ok(())
    }

    /// Fold this subtree's advisory tightness subscores into `best`,
    /// returning the number of intervals stored in the subtree.
    pub(crate) fn score(&self, best: &mut f64) -> usize {
        let mut size = self.s_center.len();
        if let Some(l) = self.left.as_deref() {
            size += l.score(best);
        }
        if let Some(r) = self.right.as_deref() {
            size += r.score(best);
        }

        let n = size as f64;
        let subscore = (1.0 - (f64::from(self.depth) - n.log2()) / n).clamp(0.0, 1.0);
        if subscore > *best {
            *best = subscore;
        }
        size
    }

    #[cfg(test)]
    pub(crate) fn pivot(&self) -> &T {
        &self.pivot
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> u8 {
        self.depth
    }

    #[cfg(test)]
    pub(crate) fn center_len(&self) -> usize {
        self.s_center.len()
    }

    #[cfg(test)]
    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

fn depth_of<T, V>(n: &Option<Box<Node<T, V>>>) -> u8 {
    n.as_deref().map(|v| v.depth).unwrap_or_default()
}

fn update_depth<T, V>(n: &mut Node<T, V>) {
    n.depth = 1 + depth_of(&n.left).max(depth_of(&n.right));
}

/// Compute the balance factor of `n`: positive when the right subtree is
/// deeper, negative when the left one is.
fn balance<T, V>(n: &Node<T, V>) -> i8 {
    // Correctness: depths are u8, so the difference fits an i16 without
    // wrapping or sign inversion.
    (i16::from(depth_of(&n.right)) - i16::from(depth_of(&n.left))) as i8
}

/// Restore the depth bookkeeping and shape invariant of the subtree rooted
/// at `node`, assuming both child subtrees already satisfy it.
///
/// Runs rotations until the balance factor is back within `[-1, 1]`. A
/// plain AVL insert or delete needs at most one (possibly double)
/// rotation, but interval promotion can prune nodes out of a child and
/// shift its depth by more than one level; the loop absorbs that too.
fn rebalance<T, V>(node: &mut Box<Node<T, V>>)
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    update_depth(node);
    loop {
        let b = balance(node);
        if b.abs() <= 1 {
            return;
        }

        if b > 0 {
            // Right-heavy. A right child skewed the opposite way takes a
            // double rotation; a child balance of zero (possible after a
            // deletion) takes the single one.
            if node.right.as_deref().map(balance).unwrap_or_default() < 0 {
                rotate_right(node.right.as_mut().expect("right-heavy node lacks right child"));
            }
            rotate_left(node);
        } else {
            if node.left.as_deref().map(balance).unwrap_or_default() > 0 {
                rotate_left(node.left.as_mut().expect("left-heavy node lacks left child"));
            }
            rotate_right(node);
        }
    }
}

/// Left rotate the subtree rooted at `x` around its right child `r`:
///
/// ```text
///      x                               r
///     / \                            /   \
///    1   r       Rotate Left        x     3
///       / \    --------------->    / \
///      2   3                      1   2
/// ```
///
/// Intervals in the demoted node's center that cover the promoted pivot
/// are then moved up into the promoted node's center: left in place, they
/// would sit in `r`'s left subtree while overlapping `r.pivot`, and any
/// search descending the other side would miss them.
///
/// # Panics
///
/// Panics if `x` has no right child (cannot be rotated).
fn rotate_left<T, V>(x: &mut Box<Node<T, V>>)
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    let mut demoted = x.right.take().expect("rotate_left requires a right child");
    std::mem::swap(x, &mut demoted);

    demoted.right = x.left.take();
    rebalance(&mut demoted);

    x.left = Some(demoted);
    promote_covering(x, true);
    update_depth(x);
}

/// Right rotate the subtree rooted at `y` around its left child `l`:
///
/// ```text
///        y                             l
///       / \                          /   \
///      l   3     Rotate Right       1     y
///     / \      --------------->          / \
///    1   2                              2   3
/// ```
///
/// The demoted node's center is repaired exactly as in [`rotate_left`].
///
/// # Panics
///
/// Panics if `y` has no left child (cannot be rotated).
fn rotate_right<T, V>(y: &mut Box<Node<T, V>>)
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    let mut demoted = y.left.take().expect("rotate_right requires a left child");
    std::mem::swap(y, &mut demoted);

    demoted.left = y.right.take();
    rebalance(&mut demoted);

    y.right = Some(demoted);
    promote_covering(y, false);
    update_depth(y);
}

/// Move intervals covering `x.pivot` out of the freshly demoted child's
/// center and into `x`'s own, pruning the child if its center drains.
fn promote_covering<T, V>(x: &mut Node<T, V>, demoted_on_left: bool)
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    let pivot = x.pivot.clone();
    let child_slot = if demoted_on_left {
        &mut x.left
    } else {
        &mut x.right
    };

    let covering: Vec<_> = match child_slot.as_deref() {
        Some(child) => child
            .s_center
            .iter()
            .filter(|iv| iv.contains_point(&pivot))
            .cloned()
            .collect(),
        None => return,
    };
    if covering.is_empty() {
        return;
    }

    {
        let child = child_slot.as_mut().expect("demoted child vanished");
        for iv in &covering {
            child.s_center.remove(iv);
        }
    }

    if child_slot.as_deref().expect("demoted child vanished").s_center.is_empty() {
        prune(child_slot);
    } else {
        rebalance(child_slot.as_mut().expect("demoted child vanished"));
    }

    x.s_center.extend(covering);
}

/// Recurse into the subtree rooted at `slot` and erase `iv` from the node
/// holding it, pruning the node if its center set drains and rebalancing
/// on the way back up.
///
/// Fails with [`Error::NotFound`] if the search property routes to a node
/// that does not hold `iv`; with membership pre-checked by the caller this
/// is only reachable when an invariant is already broken.
pub(crate) fn remove_recurse<T, V>(
    slot: &mut Option<Box<Node<T, V>>>,
    iv: &Interval<T, V>,
) -> Result<(), Error>
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    let node = match slot {
        Some(v) => v,
        None => return Err(Error::NotFound(format!("{iv:?}"))),
    };

    if iv.contains_point(&node.pivot) {
        if !node.s_center.remove(iv) {
            return Err(Error::NotFound(format!("{iv:?}")));
        }
        if node.s_center.is_empty() {
            prune(slot);
        }
        return Ok(());
    }

    let child = if iv.end <= node.pivot {
        &mut node.left
    } else {
        &mut node.right
    };
    remove_recurse(child, iv)?;
    rebalance(node);
    Ok(())
}

/// Unlink the node rooted at `slot`, whose center set has drained, and
/// reassemble the subtree in its place.
///
/// A node with at most one child is spliced out directly. A node with two
/// children is replaced by the greatest node of its left subtree.
fn prune<T, V>(slot: &mut Option<Box<Node<T, V>>>)
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    let mut node = slot.take().expect("prune of empty subtree");
    debug_assert!(node.s_center.is_empty());

    match (node.left.take(), node.right.take()) {
        (None, child) | (child, None) => {
            *slot = child;
        }
        (Some(left), Some(right)) => {
            let mut left = Some(left);
            let mut heir = pop_greatest_child(&mut left);

            heir.left = left;
            heir.right = Some(right);
            rebalance(&mut heir);

            *slot = Some(heir);
        }
    }
}

/// Unlink and return the greatest node of the subtree rooted at `slot`,
/// leaving the remainder rebalanced in place.
///
/// On the way back up the right spine, every ancestor moves the center
/// intervals covering the popped node's pivot into it. Such intervals can
/// only sit on spine ancestors: anything hanging off the spine to the left
/// is capped by an ancestor pivot below the popped pivot. Moving them
/// keeps the search property intact once the popped node is promoted above
/// this subtree.
fn pop_greatest_child<T, V>(slot: &mut Option<Box<Node<T, V>>>) -> Box<Node<T, V>>
where
    T: Ord + Clone + Debug,
    V: Ord + Clone + Debug,
{
    if slot
        .as_deref()
        .expect("pop of empty subtree")
        .right
        .is_none()
    {
        // The tip of the right spine is the greatest node; its left
        // subtree takes its place.
        let mut tip = slot.take().expect("pop of empty subtree");
        *slot = tip.left.take();
        tip.depth = 1;
        return tip;
    }

    let node = slot.as_mut().expect("pop of empty subtree");
    let mut heir = pop_greatest_child(&mut node.right);

    let covering: Vec<_> = node
        .s_center
        .iter()
        .filter(|iv| iv.contains_point(&heir.pivot))
        .cloned()
        .collect();
    for iv in covering {
        node.s_center.remove(&iv);
        heir.s_center.insert(iv);
    }

    if node.s_center.is_empty() {
        prune(slot);
    } else {
        rebalance(slot.as_mut().expect("pop of empty subtree"));
    }
    heir
}
