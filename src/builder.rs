//! Generic top-down construction of a ZDD from a predicate spec.
//!
//! The builder walks levels from the root down. At each level it
//! hash-conses the pending spec states (equal states become one node),
//! patches the parents that requested them, and expands both branches of
//! every surviving node. Work for a level is dropped as soon as the level
//! is finalised, so at any instant only the frontier of pending states is
//! alive next to the growing node table.

use std::collections::HashMap;

use crate::spec::{DdSpec, ACCEPT, REJECT};
use crate::types::{NodeId, ZddNode};
use crate::zdd::Zdd;

/// Where a finalised node id must be written back to.
///
/// A pending state starts life as a request from a parent branch (or from
/// the conceptual root) and becomes a node id exactly once, when its level
/// assigns columns.
enum SrcRef {
    Root,
    Branch { row: usize, col: usize, hi: bool },
}

/// Materialises the family described by `spec` as a reduced ZDD.
pub fn build<S: DdSpec>(spec: &S) -> Zdd {
    let mut root_state = S::State::default();
    let top = match spec.init_root(&mut root_state) {
        REJECT => return Zdd::terminal(false),
        ACCEPT => return Zdd::terminal(true),
        level => level as usize,
    };

    let mut levels: Vec<Vec<ZddNode>> = vec![Vec::new(); top + 1];
    let mut work: Vec<Vec<(S::State, SrcRef)>> = Vec::with_capacity(top + 1);
    work.resize_with(top + 1, Vec::new);
    work[top].push((root_state, SrcRef::Root));

    let mut root = NodeId::BOTTOM;

    for i in (1..=top).rev() {
        let pending = std::mem::take(&mut work[i]);
        if pending.is_empty() {
            continue;
        }

        // Pass 1: fuse equal states, allocate one column each, redirect
        // the requesting parents.
        let mut uniq: HashMap<S::State, usize> = HashMap::new();
        let mut states: Vec<S::State> = Vec::new();
        for (state, src) in pending {
            let col = *uniq.entry(state.clone()).or_insert_with(|| {
                states.push(state);
                levels[i].push(ZddNode::new(NodeId::BOTTOM, NodeId::BOTTOM));
                states.len() - 1
            });
            patch(&mut levels, &mut root, src, NodeId::new(i, col));
        }
        drop(uniq);

        // Pass 2: expand both branches of every new node.
        for (col, state) in states.into_iter().enumerate() {
            for value in [false, true] {
                let mut child = state.clone();
                let src = SrcRef::Branch { row: i, col, hi: value };
                match spec.step(&mut child, i as i32, value) {
                    REJECT => patch(&mut levels, &mut root, src, NodeId::BOTTOM),
                    ACCEPT => patch(&mut levels, &mut root, src, NodeId::TOP),
                    next => {
                        debug_assert!((next as usize) < i, "spec must descend");
                        work[next as usize].push((child, src));
                    }
                }
            }
        }
    }

    Zdd::from_table(levels, root).reduce()
}

fn patch(levels: &mut [Vec<ZddNode>], root: &mut NodeId, src: SrcRef, id: NodeId) {
    match src {
        SrcRef::Root => *root = id,
        SrcRef::Branch { row, col, hi } => {
            let node = &mut levels[row][col];
            if hi {
                node.hi = id;
            } else {
                node.lo = id;
            }
        }
    }
}
