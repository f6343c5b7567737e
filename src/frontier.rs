//! Frontier bookkeeping for top-down diagram construction.
//!
//! For every edge index `e` the manager precomputes which vertices enter
//! the frontier at `e`, which form the frontier while `e` is decided, and
//! which leave once `e` has been decided. Every vertex also gets a stable
//! slot in `[0, max_frontier_size)` that per-node state arrays are indexed
//! by for as long as the vertex stays on the frontier.

use crate::graph::Graph;

const NO_SLOT: u16 = u16::MAX;

/// Precomputed frontier structure of a graph under its canonical edge order.
pub struct FrontierManager {
    entering: Vec<Vec<u16>>,
    frontier: Vec<Vec<u16>>,
    leaving: Vec<Vec<u16>>,
    slot: Vec<u16>,
    max_frontier_size: usize,
}

impl FrontierManager {
    pub fn new(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        let m = graph.num_edges();

        // Pass 1: last edge index incident to each vertex.
        let mut last_occurrence = vec![usize::MAX; n];
        for (e, edge) in graph.edges().iter().enumerate() {
            last_occurrence[edge.u as usize] = e;
            last_occurrence[edge.v as usize] = e;
        }

        // Pass 2: walk the edges in order, assigning slots from a free pool
        // on first sight and reclaiming them at last sight.
        let mut entering = vec![Vec::new(); m];
        let mut frontier = vec![Vec::new(); m];
        let mut leaving = vec![Vec::new(); m];
        let mut slot = vec![NO_SLOT; n];
        let mut free_slots: Vec<u16> = Vec::new();
        let mut next_slot: u16 = 0;
        let mut active: Vec<u16> = Vec::new();

        for (e, edge) in graph.edges().iter().enumerate() {
            for w in [edge.u, edge.v] {
                if slot[w as usize] == NO_SLOT {
                    let s = free_slots.pop().unwrap_or_else(|| {
                        let s = next_slot;
                        next_slot += 1;
                        s
                    });
                    slot[w as usize] = s;
                    entering[e].push(w);
                    active.push(w);
                }
            }

            frontier[e] = active.clone();

            for w in [edge.u, edge.v] {
                if last_occurrence[w as usize] == e {
                    leaving[e].push(w);
                }
            }
            for &w in &leaving[e] {
                active.retain(|&x| x != w);
                free_slots.push(slot[w as usize]);
            }
        }

        FrontierManager {
            entering,
            frontier,
            leaving,
            slot,
            max_frontier_size: next_slot as usize,
        }
    }

    /// Vertices entering the frontier at edge `e`.
    pub fn entering(&self, e: usize) -> &[u16] {
        &self.entering[e]
    }

    /// The frontier while edge `e` is decided.
    pub fn frontier(&self, e: usize) -> &[u16] {
        &self.frontier[e]
    }

    /// Vertices leaving the frontier after edge `e` is decided.
    pub fn leaving(&self, e: usize) -> &[u16] {
        &self.leaving[e]
    }

    /// The state-array slot of vertex `v`.
    ///
    /// Well-defined only while `v` is on the frontier; slots are recycled
    /// between vertices with disjoint frontier windows.
    ///
    /// # Panics
    ///
    /// Panics if `v` is isolated (never on any frontier). Querying a
    /// vertex outside its frontier window is a programming error that this
    /// precomputed table cannot detect; callers must respect the window.
    pub fn vertex_to_pos(&self, v: u16) -> usize {
        let s = self.slot[v as usize];
        assert!(s != NO_SLOT, "vertex {} is never on the frontier", v);
        s as usize
    }

    /// Width of the widest frontier; sizes per-node state arrays.
    pub fn max_frontier_size(&self) -> usize {
        self.max_frontier_size
    }
}
