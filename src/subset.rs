//! Intersection of an existing ZDD with a predicate spec.
//!
//! The traversal is keyed by pairs of (input node, spec state): per input
//! column, pending states are fused per level exactly as in the builder.
//! Because either side may skip levels (the input through
//! zero-suppression, the spec by returning a lower level), a sync loop
//! keeps the two aligned — the input descends through 0-branches, the
//! spec steps with 0, until both sit at the same level or a terminal
//! verdict falls out.

use std::collections::HashMap;

use crate::spec::{DdSpec, ACCEPT, REJECT};
use crate::types::{NodeId, ZddNode};
use crate::zdd::Zdd;

#[derive(Clone, Copy)]
enum SrcRef {
    Root,
    Branch { row: usize, col: usize, hi: bool },
}

/// Builds the reduced ZDD whose language is `L(input) ∩ L(spec)`.
///
/// The input diagram is only read; the result is a fresh value.
pub fn subset<S: DdSpec>(input: &Zdd, spec: &S) -> Zdd {
    let mut root_state = S::State::default();
    let mut n = spec.init_root(&mut root_state);
    let mut f = input.root();
    let mut k = node_level(f);

    // Align the spec root with the input root.
    while n != 0 && k != 0 && n != k {
        if n < k {
            k = down_table(input, &mut f, false, n);
        } else {
            n = down_spec(spec, &mut root_state, n, false, k);
        }
    }
    if n <= 0 || k <= 0 {
        return Zdd::terminal(n != 0 && k != 0);
    }

    let top = n as usize;
    let mut levels: Vec<Vec<ZddNode>> = vec![Vec::new(); top + 1];
    let mut root = NodeId::BOTTOM;

    // work[level][input column] = pending spec states for that column.
    let mut work: Vec<Vec<Vec<(S::State, SrcRef)>>> = Vec::with_capacity(top + 1);
    for row in 0..=top {
        work.push(vec![Vec::new(); input.level(row).len()]);
    }
    work[top][f.col()].push((root_state, SrcRef::Root));

    for i in (1..=top).rev() {
        let columns = std::mem::take(&mut work[i]);

        // Pass 1: per input column, fuse equal states and allocate output
        // columns.
        let mut expansions: Vec<(usize, S::State, usize)> = Vec::new();
        for (j, pending) in columns.into_iter().enumerate() {
            if pending.is_empty() {
                continue;
            }
            let mut uniq: HashMap<S::State, usize> = HashMap::new();
            for (state, src) in pending {
                let col = *uniq.entry(state.clone()).or_insert_with(|| {
                    levels[i].push(ZddNode::new(NodeId::BOTTOM, NodeId::BOTTOM));
                    expansions.push((j, state, levels[i].len() - 1));
                    levels[i].len() - 1
                });
                patch(&mut levels, &mut root, src, NodeId::new(i, col));
            }
        }

        // Pass 2: expand both branches of every output node, re-syncing
        // the two sides after each step.
        for (j, state, out_col) in expansions {
            for value in [false, true] {
                let mut st = state.clone();
                let mut f = NodeId::new(i, j);
                let mut kk = down_table(input, &mut f, value, i as i32 - 1);
                let mut ii = down_spec(spec, &mut st, i as i32, value, kk);

                while ii != 0 && kk != 0 && ii != kk {
                    if ii < kk {
                        kk = down_table(input, &mut f, false, ii);
                    } else {
                        ii = down_spec(spec, &mut st, ii, false, kk);
                    }
                }

                let src = SrcRef::Branch { row: i, col: out_col, hi: value };
                if ii <= 0 || kk <= 0 {
                    let accept = ii != 0 && kk != 0;
                    let id = if accept { NodeId::TOP } else { NodeId::BOTTOM };
                    patch(&mut levels, &mut root, src, id);
                } else {
                    work[ii as usize][f.col()].push((st, src));
                }
            }
        }
    }

    Zdd::from_table(levels, root).reduce()
}

/// Level code of a node: positive row, −1 for ⊤, 0 for ⊥.
fn node_level(f: NodeId) -> i32 {
    if f.is_top() {
        ACCEPT
    } else if f.is_bottom() {
        REJECT
    } else {
        f.row() as i32
    }
}

/// Follows `value` out of `f`, then 0-branches down to `zerosup_level`.
fn down_table(input: &Zdd, f: &mut NodeId, value: bool, zerosup_level: i32) -> i32 {
    let zs = zerosup_level.max(0) as usize;
    let node = input.node(*f);
    *f = if value { node.hi } else { node.lo };
    while f.row() > zs {
        *f = input.node(*f).lo;
    }
    node_level(*f)
}

/// Steps the spec on `value`, then with 0 down to `zerosup_level`.
fn down_spec<S: DdSpec>(
    spec: &S,
    state: &mut S::State,
    level: i32,
    value: bool,
    zerosup_level: i32,
) -> i32 {
    let zs = zerosup_level.max(0);
    let mut i = spec.step(state, level, value);
    while i > zs {
        i = spec.step(state, i, false);
    }
    i
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::cardinality::count;
    use num_bigint::BigUint;

    /// Accepts every subset of `m` edges.
    struct Everything {
        m: i32,
    }

    impl DdSpec for Everything {
        type State = ();

        fn init_root(&self, _: &mut ()) -> i32 {
            self.m
        }

        fn step(&self, _: &mut (), level: i32, _: bool) -> i32 {
            if level == 1 {
                ACCEPT
            } else {
                level - 1
            }
        }
    }

    /// Requires edge `target` (0-indexed from the top of `m` edges) to be
    /// present.
    struct Requires {
        m: i32,
        target: i32,
    }

    impl DdSpec for Requires {
        type State = ();

        fn init_root(&self, _: &mut ()) -> i32 {
            self.m
        }

        fn step(&self, _: &mut (), level: i32, value: bool) -> i32 {
            if self.m - level == self.target && !value {
                return REJECT;
            }
            if level == 1 {
                ACCEPT
            } else {
                level - 1
            }
        }
    }

    #[test]
    fn subset_of_powerset() {
        // 2^4 subsets; requiring one fixed edge halves the family.
        let all = build(&Everything { m: 4 });
        assert_eq!(count(&all), BigUint::from(16u32));

        for target in 0..4 {
            let constrained = subset(&all, &Requires { m: 4, target });
            assert_eq!(count(&constrained), BigUint::from(8u32), "target {}", target);
        }
    }

    #[test]
    fn subset_chains() {
        let all = build(&Everything { m: 4 });
        let a = subset(&all, &Requires { m: 4, target: 0 });
        let b = subset(&a, &Requires { m: 4, target: 3 });
        assert_eq!(count(&b), BigUint::from(4u32));

        // The reverse order yields the same family size.
        let c = subset(&all, &Requires { m: 4, target: 3 });
        let d = subset(&c, &Requires { m: 4, target: 0 });
        assert_eq!(count(&d), BigUint::from(4u32));
    }

    #[test]
    fn subset_with_terminal_input() {
        assert!(subset(&Zdd::terminal(false), &Everything { m: 3 })
            .root()
            .is_bottom());

        // ⊤ meets a spec that accepts the empty set.
        let kept = subset(&Zdd::terminal(true), &Everything { m: 3 });
        assert!(kept.root().is_top());

        // ⊤ meets a spec that requires an edge: rejected.
        let dropped = subset(&Zdd::terminal(true), &Requires { m: 3, target: 1 });
        assert!(dropped.root().is_bottom());
    }
}
