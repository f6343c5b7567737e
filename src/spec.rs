//! Declarative predicate specifications over edge-indicator families.
//!
//! A spec describes a family of edge subsets by a state machine walked top
//! down: `init_root` seeds the state and names the top level, `step`
//! transitions on one binary decision and either continues at a lower
//! level, accepts, or rejects. The [builder](crate::builder) materialises a
//! spec as a ZDD and the [subsetter](crate::subset) intersects a spec with
//! an existing ZDD; both fuse equal states per level, which is what keeps
//! the diagrams small.

use std::hash::Hash;

/// `step`/`init_root` return code: the path is rejected (⊥).
pub const REJECT: i32 = 0;

/// `step`/`init_root` return code: the path is accepted (⊤).
pub const ACCEPT: i32 = -1;

/// A predicate over edge subsets, described as a level-indexed transition
/// system.
///
/// Levels count down: level `l` decides edge `|E| - l`, and level 1 is the
/// last decision. Return values of `init_root` and `step` share one
/// contract: a positive value is the next level to decide, [`REJECT`]
/// prunes the path, [`ACCEPT`] terminates it in ⊤. A returned level lower
/// than `level - 1` skips the levels in between, which under ZDD semantics
/// pins the skipped variables to 0.
pub trait DdSpec {
    /// Per-path state. Hashed and compared byte-for-byte to fuse
    /// equivalent paths at each level.
    type State: Clone + Eq + Hash + Default;

    /// Initialises `state` and returns the top level (or a terminal code).
    fn init_root(&self, state: &mut Self::State) -> i32;

    /// Transitions `state` on deciding `value` for the edge at `level`.
    fn step(&self, state: &mut Self::State, level: i32, value: bool) -> i32;
}

/// Intersection of two specs: a path is accepted iff both accept it.
///
/// The two states ride together; a reject from either side prunes the
/// path, and a side that accepts early is marked done and imposes no
/// further constraint. Both sides must otherwise descend in lockstep.
pub struct Intersect<A, B> {
    a: A,
    b: B,
}

impl<A, B> Intersect<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Intersect { a, b }
    }
}

/// Combined state of an [`Intersect`] spec.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct PairState<S, T> {
    a: S,
    b: T,
    a_done: bool,
    b_done: bool,
}

fn combine(ra: i32, rb: i32, a_done: &mut bool, b_done: &mut bool) -> i32 {
    if ra == REJECT || rb == REJECT {
        return REJECT;
    }
    match (ra, rb) {
        (ACCEPT, ACCEPT) => ACCEPT,
        (ACCEPT, level) => {
            *a_done = true;
            level
        }
        (level, ACCEPT) => {
            *b_done = true;
            level
        }
        (la, lb) => {
            debug_assert_eq!(la, lb, "intersected specs must descend in lockstep");
            la
        }
    }
}

impl<A: DdSpec, B: DdSpec> DdSpec for Intersect<A, B> {
    type State = PairState<A::State, B::State>;

    fn init_root(&self, state: &mut Self::State) -> i32 {
        state.a_done = false;
        state.b_done = false;
        let ra = self.a.init_root(&mut state.a);
        let rb = self.b.init_root(&mut state.b);
        combine(ra, rb, &mut state.a_done, &mut state.b_done)
    }

    fn step(&self, state: &mut Self::State, level: i32, value: bool) -> i32 {
        let ra = if state.a_done {
            ACCEPT
        } else {
            self.a.step(&mut state.a, level, value)
        };
        let rb = if state.b_done {
            ACCEPT
        } else {
            self.b.step(&mut state.b, level, value)
        };
        combine(ra, rb, &mut state.a_done, &mut state.b_done)
    }
}
