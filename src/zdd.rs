//! The ZDD value type: a level-indexed node table plus a root.
//!
//! Unlike a manager-centric diagram library, every diagram here is an
//! owned, immutable value: the builder and the subsetter produce whole
//! tables level by level, counting walks them bottom up, and dropping the
//! value releases everything. `Clone` is a deep copy.
//!
//! A diagram is *reduced* when no node has `hi = ⊥` (zero-suppression) and
//! no two nodes on a level share a (lo, hi) pair. [`Zdd::reduce`]
//! establishes both properties bottom up.

use std::collections::HashMap;

use crate::types::{NodeId, ZddNode};

/// A zero-suppressed decision diagram over binary edge variables.
///
/// Level `r` of the table holds the nodes deciding edge `|E| - r`; row 0
/// is reserved for the implicit terminals ⊥ and ⊤. Node successors may
/// skip levels: a `lo`/`hi` target at a lower row pins the skipped
/// variables to 0.
#[derive(Debug, Clone)]
pub struct Zdd {
    levels: Vec<Vec<ZddNode>>,
    root: NodeId,
}

impl Zdd {
    /// The trivial diagram: ⊤ (`{∅}`) if `accept`, else ⊥ (empty family).
    pub fn terminal(accept: bool) -> Self {
        Zdd {
            levels: Vec::new(),
            root: if accept { NodeId::TOP } else { NodeId::BOTTOM },
        }
    }

    /// Assembles a diagram from a raw table and a root.
    pub(crate) fn from_table(levels: Vec<Vec<ZddNode>>, root: NodeId) -> Self {
        Zdd { levels, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The topmost populated level (0 when the diagram is a terminal).
    pub fn top_level(&self) -> usize {
        self.root.row()
    }

    pub fn node(&self, id: NodeId) -> ZddNode {
        debug_assert!(!id.is_terminal());
        self.levels[id.row()][id.col()]
    }

    pub fn level(&self, row: usize) -> &[ZddNode] {
        if row < self.levels.len() {
            &self.levels[row]
        } else {
            &[]
        }
    }

    /// Number of decision nodes in the table.
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Canonicalises the diagram: bottom-up zero-suppression and per-level
    /// (lo, hi) unique-ification.
    ///
    /// Nodes whose `hi` successor resolves to ⊥ are replaced by their `lo`
    /// successor; structurally equal nodes on one level are fused. The
    /// input table is consumed.
    pub fn reduce(self) -> Zdd {
        if self.root.is_terminal() {
            return self;
        }
        let top = self.root.row();

        // translate[row][col] = canonical successor of the old node.
        let mut translate: Vec<Vec<NodeId>> = Vec::with_capacity(top + 1);
        translate.push(Vec::new());

        let mut levels: Vec<Vec<ZddNode>> = vec![Vec::new(); top + 1];

        for row in 1..=top {
            let mut uniq: HashMap<ZddNode, NodeId> = HashMap::new();
            let mut row_translate = Vec::with_capacity(self.levels[row].len());

            for node in &self.levels[row] {
                let lo = resolve(&translate, node.lo);
                let hi = resolve(&translate, node.hi);

                let target = if hi.is_bottom() {
                    lo
                } else {
                    let canon = ZddNode::new(lo, hi);
                    *uniq.entry(canon).or_insert_with(|| {
                        levels[row].push(canon);
                        NodeId::new(row, levels[row].len() - 1)
                    })
                };
                row_translate.push(target);
            }
            translate.push(row_translate);
        }

        let root = resolve(&translate, self.root);
        levels.truncate(root.row() + 1);
        Zdd { levels, root }
    }
}

fn resolve(translate: &[Vec<NodeId>], id: NodeId) -> NodeId {
    if id.is_terminal() {
        id
    } else {
        translate[id.row()][id.col()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_diagrams() {
        let t = Zdd::terminal(true);
        assert!(t.root().is_top());
        assert_eq!(t.node_count(), 0);

        let f = Zdd::terminal(false);
        assert!(f.root().is_bottom());
    }

    #[test]
    fn reduce_zero_suppresses() {
        // One node at level 1 with hi = ⊥ collapses to its lo successor.
        let levels = vec![
            Vec::new(),
            vec![ZddNode::new(NodeId::TOP, NodeId::BOTTOM)],
        ];
        let zdd = Zdd::from_table(levels, NodeId::new(1, 0)).reduce();
        assert!(zdd.root().is_top());
        assert_eq!(zdd.node_count(), 0);
    }

    #[test]
    fn reduce_fuses_equal_nodes() {
        // Two structurally equal nodes at level 1; a level-2 node whose
        // branches point at each of them must end up with lo = hi.
        let levels = vec![
            Vec::new(),
            vec![
                ZddNode::new(NodeId::BOTTOM, NodeId::TOP),
                ZddNode::new(NodeId::BOTTOM, NodeId::TOP),
            ],
            vec![ZddNode::new(NodeId::new(1, 0), NodeId::new(1, 1))],
        ];
        let zdd = Zdd::from_table(levels, NodeId::new(2, 0)).reduce();
        assert_eq!(zdd.level(1).len(), 1);
        let root = zdd.node(zdd.root());
        assert_eq!(root.lo, root.hi);
    }

    #[test]
    fn reduce_cascades() {
        // The level-2 node's hi leads to a node that zero-suppresses away
        // to ⊥, so the level-2 node itself must collapse too.
        let levels = vec![
            Vec::new(),
            vec![ZddNode::new(NodeId::BOTTOM, NodeId::BOTTOM)],
            vec![ZddNode::new(NodeId::TOP, NodeId::new(1, 0))],
        ];
        let zdd = Zdd::from_table(levels, NodeId::new(2, 0)).reduce();
        assert!(zdd.root().is_top());
    }
}
