use proptest::prelude::*;

use crate::interval::Interval;

/// Upper bound for generated interval coordinates.
///
/// A small domain encourages generated intervals and queries to collide on
/// the same coordinates, exercising ties and tangent bounds.
pub(crate) const COORD_MAX: i64 = 20;

/// Generate valid intervals with bounds in `[0, COORD_MAX + 4)` and a tiny
/// payload domain.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<i64, u8>> {
    (0..COORD_MAX, 1..=4_i64, 0..3_u8)
        .prop_map(|(begin, len, data)| Interval::new(begin, begin + len, data))
}

/// Generate raw `(begin, end, data)` triples, including null ones.
pub(crate) fn arbitrary_triple() -> impl Strategy<Value = (i64, i64, u8)> {
    (0..COORD_MAX, 0..COORD_MAX, 0..3_u8)
}

#[allow(unused)]
pub(crate) fn print_dot<T, V>(t: &crate::IntervalTree<T, V>) -> String
where
    T: std::fmt::Display + Ord + Clone + std::hash::Hash + std::fmt::Debug,
    V: Ord + Clone + std::fmt::Debug,
{
    use std::fmt::Write;

    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, "node [shape=record];").unwrap();
    if let Some(root) = t.root.as_deref() {
        recurse(root, &mut buf);
    }
    writeln!(buf, "}}").unwrap();

    buf
}

#[allow(unused)]
fn recurse<T, V, W>(n: &crate::node::Node<T, V>, buf: &mut W)
where
    W: std::fmt::Write,
    T: std::fmt::Display + Ord + Clone + std::fmt::Debug,
    V: Ord + Clone + std::fmt::Debug,
{
    writeln!(
        buf,
        r#"{} [label="{} | {}"];"#,
        n.pivot(),
        n.pivot(),
        n.center_len()
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(buf, "{} -> {};", n.pivot(), v.pivot()).unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "null_{} [shape=point,style=invis];", n.pivot()).unwrap();
                writeln!(buf, "{} -> null_{} [style=invis];", n.pivot(), n.pivot()).unwrap();
            }
        };
    }
}
