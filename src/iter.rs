//! Enumeration of the edge subsets accepted by a diagram.
//!
//! Counting answers most questions, but small families are worth
//! materialising: verification against brute force, and downstream tools
//! that consume the unfoldings themselves. The iterator performs a
//! depth-first walk over the node table; skipped levels need no handling
//! because an absent variable is an excluded edge.

use crate::types::NodeId;
use crate::zdd::Zdd;

/// Iterator yielding every accepted subset as ascending edge indices.
pub struct SetIterator<'a> {
    zdd: &'a Zdd,
    num_edges: usize,
    /// Stack of (node, edges chosen so far, hi branch pending).
    stack: Vec<(NodeId, Vec<usize>, bool)>,
}

impl<'a> SetIterator<'a> {
    fn new(zdd: &'a Zdd, num_edges: usize) -> Self {
        let mut stack = Vec::new();
        if !zdd.root().is_bottom() {
            stack.push((zdd.root(), Vec::new(), false));
        }
        SetIterator { zdd, num_edges, stack }
    }
}

impl Iterator for SetIterator<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, chosen, hi_pending)) = self.stack.pop() {
            if id.is_bottom() {
                continue;
            }
            if id.is_top() {
                return Some(chosen);
            }

            let node = self.zdd.node(id);
            if !hi_pending {
                // Revisit for the hi branch after the lo subtree is done.
                self.stack.push((id, chosen.clone(), true));
                self.stack.push((node.lo, chosen, false));
            } else {
                let mut with_edge = chosen;
                with_edge.push(self.num_edges - id.row());
                self.stack.push((node.hi, with_edge, false));
            }
        }
        None
    }
}

impl Zdd {
    /// Iterates over every accepted subset.
    ///
    /// `num_edges` is the variable count the diagram was built over; it
    /// maps levels back to edge indices (the reduced root may sit below
    /// the top level when leading edges are forced out).
    ///
    /// The family size can be astronomically larger than the node table,
    /// so enumerate only what counting has already shown to be small.
    pub fn sets(&self, num_edges: usize) -> SetIterator<'_> {
        SetIterator::new(self, num_edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminals() {
        let none: Vec<_> = Zdd::terminal(false).sets(3).collect();
        assert!(none.is_empty());

        let empty_set: Vec<_> = Zdd::terminal(true).sets(3).collect();
        assert_eq!(empty_set, vec![Vec::<usize>::new()]);
    }

    #[test]
    fn enumerates_spanning_trees() {
        use crate::builder::build;
        use crate::graph::Graph;
        use crate::spanning::SpanningTreeSpec;

        let g = Graph::new(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let dd = build(&SpanningTreeSpec::new(&g));
        let mut trees: Vec<_> = dd.sets(3).collect();
        trees.sort();
        assert_eq!(trees, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn indices_account_for_skipped_levels() {
        use crate::builder::build;
        use crate::spec::{DdSpec, ACCEPT, REJECT};

        // Exactly {edge 2} out of 4 edges: the reduced diagram pins edges
        // 0 and 1 to zero by level skipping, so the root sits below the
        // top level.
        struct OnlyEdgeTwo;
        impl DdSpec for OnlyEdgeTwo {
            type State = ();
            fn init_root(&self, _: &mut ()) -> i32 {
                4
            }
            fn step(&self, _: &mut (), level: i32, value: bool) -> i32 {
                let want = level == 2;
                if value != want {
                    return REJECT;
                }
                if level == 1 {
                    ACCEPT
                } else {
                    level - 1
                }
            }
        }

        let dd = build(&OnlyEdgeTwo);
        let sets: Vec<_> = dd.sets(4).collect();
        assert_eq!(sets, vec![vec![2]]);
    }
}
