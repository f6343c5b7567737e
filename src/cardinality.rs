//! Exact cardinality of the family encoded by a ZDD.
//!
//! Spanning-tree families routinely overflow machine words, so the count
//! is a `BigUint` throughout and only the final decimal string leaves the
//! crate through the report.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::types::NodeId;
use crate::zdd::Zdd;

/// Number of accepted subsets: |⊥| = 0, |⊤| = 1, |n| = |n.lo| + |n.hi|.
///
/// One bottom-up sweep over the node table; per-level scratch lives only
/// for the duration of the call.
pub fn count(zdd: &Zdd) -> BigUint {
    let root = zdd.root();
    if root.is_terminal() {
        return if root.is_top() { BigUint::one() } else { BigUint::zero() };
    }

    let top = root.row();
    let mut counts: Vec<Vec<BigUint>> = Vec::with_capacity(top + 1);
    counts.push(vec![BigUint::zero(), BigUint::one()]);

    for row in 1..=top {
        let level = zdd.level(row);
        let mut row_counts = Vec::with_capacity(level.len());
        for node in level {
            let total = value(&counts, node.lo) + value(&counts, node.hi);
            row_counts.push(total);
        }
        counts.push(row_counts);
    }

    counts[top][root.col()].clone()
}

/// The count as a decimal string, the report's exchange format.
pub fn count_string(zdd: &Zdd) -> String {
    count(zdd).to_str_radix(10)
}

fn value(counts: &[Vec<BigUint>], id: NodeId) -> &BigUint {
    &counts[id.row()][id.col()]
}
