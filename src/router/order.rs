//! Specificity ordering between patterns.
//!
//! When several patterns match one path the most specific is tried first:
//! 1. nodes are compared position by position;
//! 2. where one pattern has run out of nodes, the longer pattern comes first;
//! 3. otherwise literal < required < optional < rest (earlier is more specific);
//! 4. patterns with identical shape are ordered by registration, latest first.
//!
//! Rule 4 lets routes registered later shadow structurally identical ones
//! registered before them.

use super::compile::NodeKind;

use std::cmp::Ordering;

/// Compares two priority keys by shape only. `Less` means `a` is tried first.
pub fn compare_keys(a: &[NodeKind], b: &[NodeKind]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        match (a.get(i), b.get(i)) {
            (None, _) => return Ordering::Greater,
            (_, None) => return Ordering::Less,
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Equal => continue,
                ord => return ord,
            },
        }
    }
    Ordering::Equal
}

/// Total order over registered patterns, `index` being the registration index.
pub fn compare_entries(a: (usize, &[NodeKind]), b: (usize, &[NodeKind])) -> Ordering {
    compare_keys(a.1, b.1).then_with(|| b.0.cmp(&a.0))
}
