//! A mutable, self-balancing interval tree for tagged half-open ranges.
//!
//! [`IntervalTree`] stores a set of [`Interval`]s, half-open `[begin,
//! end)` ranges each carrying an arbitrary payload, and answers point,
//! overlap and envelopment queries in logarithmic time. Beyond plain
//! insertion and removal it supports structural editing of the stored
//! coverage: chopping a window out, slicing at a point, splitting all
//! partial overlaps and merging overlapping runs.
//!
//! The crate is aimed at tagging text ranges, time ranges and genomic
//! regions: workloads where intervals carry metadata and are looked up by
//! position.
//!
//! ```
//! use centravl::IntervalTree;
//!
//! let mut tree = IntervalTree::default();
//! tree.addi(0, 450, "exon 1").unwrap();
//! tree.addi(300, 720, "exon 2").unwrap();
//! tree.addi(900, 1000, "exon 3").unwrap();
//!
//! // Which annotations cover position 350?
//! let mut hits: Vec<_> = tree.at(&350).into_iter().map(|iv| iv.data).collect();
//! hits.sort();
//! assert_eq!(hits, vec!["exon 1", "exon 2"]);
//!
//! // Trim everything back to the first 500 positions.
//! tree.chop(&500, &1000);
//! assert_eq!(tree.end(), Some(&500));
//! ```
//!
//! # Coordinates and payloads
//!
//! Coordinates may be any ordered, hashable type; the few operations doing
//! arithmetic (`span`, `length`, `distance_to`) additionally need
//! subtraction. Payloads only need a total order; they are never cloned
//! into queries (queries return references) and never mutated.
//!
//! # Serialization
//!
//! With the `serde` feature enabled, intervals and trees serialize as
//! plain interval sequences and deserialize by rebuilding the tree,
//! re-validating every interval on the way in.

mod error;
mod interval;
mod node;
mod restructure;
mod setops;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::Error;
pub use interval::Interval;
pub use tree::IntervalTree;
