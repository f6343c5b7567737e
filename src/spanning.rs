//! Spanning trees as a frontier-based predicate spec.
//!
//! The state is one component id per frontier slot: two frontier vertices
//! are in the same selected-edge component iff their slots hold the same
//! id. Ids are vertex numbers; the surviving id of a merge is the larger
//! one, and a slot is −1 once its vertex has left the frontier cleanly.

use crate::frontier::FrontierManager;
use crate::graph::Graph;
use crate::spec::{DdSpec, ACCEPT, REJECT};

pub struct SpanningTreeSpec<'a> {
    graph: &'a Graph,
    fm: FrontierManager,
    num_edges: i32,
}

impl<'a> SpanningTreeSpec<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        SpanningTreeSpec {
            graph,
            fm: FrontierManager::new(graph),
            num_edges: graph.num_edges() as i32,
        }
    }

    fn comp(&self, state: &[i16], v: u16) -> i16 {
        state[self.fm.vertex_to_pos(v)]
    }

    fn set_comp(&self, state: &mut [i16], v: u16, c: i16) {
        state[self.fm.vertex_to_pos(v)] = c;
    }
}

impl DdSpec for SpanningTreeSpec<'_> {
    type State = Vec<i16>;

    fn init_root(&self, state: &mut Vec<i16>) -> i32 {
        state.clear();
        state.resize(self.fm.max_frontier_size(), 0);
        if self.num_edges == 0 {
            // An edgeless graph is spanned by the empty set only when
            // there is nothing to connect.
            return if self.graph.num_vertices() <= 1 { ACCEPT } else { REJECT };
        }
        self.num_edges
    }

    fn step(&self, state: &mut Vec<i16>, level: i32, value: bool) -> i32 {
        let e = (self.num_edges - level) as usize;
        let edge = self.graph.edge(e);

        // Vertices meeting their first edge start as their own component.
        for &w in self.fm.entering(e) {
            self.set_comp(state, w, w as i16);
        }

        if value {
            let a = self.comp(state, edge.u);
            let b = self.comp(state, edge.v);
            if a == b {
                // Both endpoints already connected: the edge would close a
                // cycle.
                return REJECT;
            }
            let (cmin, cmax) = if a < b { (a, b) } else { (b, a) };
            for &w in self.fm.frontier(e) {
                if self.comp(state, w) == cmin {
                    self.set_comp(state, w, cmax);
                }
            }
        }

        if level == 1 {
            // All earlier leavers were verified connected to the surviving
            // frontier, which by now is exactly this edge's endpoints.
            return if self.comp(state, edge.u) == self.comp(state, edge.v) {
                ACCEPT
            } else {
                REJECT
            };
        }

        let leaving = self.fm.leaving(e);
        for (idx, &v) in leaving.iter().enumerate() {
            // A vertex may only leave if some still-present frontier
            // vertex shares its component; otherwise its fragment can
            // never reconnect.
            let cv = self.comp(state, v);
            let mut connected = false;
            for &w in self.fm.frontier(e) {
                if w == v || leaving[..idx].contains(&w) {
                    continue;
                }
                if self.comp(state, w) == cv {
                    connected = true;
                    break;
                }
            }
            if !connected {
                return REJECT;
            }
            self.set_comp(state, v, -1);
        }

        level - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::cardinality::count;
    use num_bigint::BigUint;

    fn spanning_count(num_vertices: usize, pairs: &[(u16, u16)]) -> BigUint {
        let g = Graph::new(num_vertices, pairs).unwrap();
        count(&build(&SpanningTreeSpec::new(&g)))
    }

    #[test]
    fn triangle() {
        assert_eq!(spanning_count(3, &[(0, 1), (1, 2), (0, 2)]), BigUint::from(3u32));
    }

    #[test]
    fn four_cycle() {
        assert_eq!(
            spanning_count(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]),
            BigUint::from(4u32)
        );
    }

    #[test]
    fn tetrahedron() {
        assert_eq!(
            spanning_count(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]),
            BigUint::from(16u32)
        );
    }

    #[test]
    fn disconnected_graph_has_no_spanning_tree() {
        assert_eq!(spanning_count(4, &[(0, 1), (2, 3)]), BigUint::from(0u32));
    }

    #[test]
    fn tree_input_has_one_spanning_tree() {
        assert_eq!(
            spanning_count(4, &[(0, 1), (1, 2), (2, 3)]),
            BigUint::from(1u32)
        );
    }

    #[test]
    fn parallel_edges_multiply() {
        // Two parallel edges between two vertices: two one-edge trees.
        assert_eq!(spanning_count(2, &[(0, 1), (0, 1)]), BigUint::from(2u32));
    }
}
