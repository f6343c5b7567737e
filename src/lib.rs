//! # unfold-zdd: Counting edge unfoldings with Zero-Suppressed Decision Diagrams
//!
//! **`unfold-zdd`** counts, exactly and at any magnitude, the edge unfoldings of
//! a convex polyhedron: cutting the surface along a spanning tree of the
//! polyhedron graph and flattening it yields one unfolding per tree, so the
//! crate answers three nested questions about a graph Γ:
//!
//! 1. **|ST|** — how many spanning trees Γ has,
//! 2. **|NO|** — how many of them unfold without overlap, given precomputed
//!    minimal overlapping edge sets (MOPEs),
//! 3. **|NI|** — how many of those are distinct up to the symmetries of Γ,
//!    by Burnside's lemma over Aut(Γ).
//!
//! ## How it works
//!
//! Families of edge subsets are represented as **Zero-Suppressed Decision
//! Diagrams**: one decision level per edge, sharing across paths, with the
//! zero-suppression rule (`hi = ⊥` nodes vanish) keeping sparse families
//! compact.
//!
//! - [`spanning`] describes the spanning trees of a graph as a frontier/
//!   component predicate; [`builder`] materialises any such predicate as a
//!   reduced diagram.
//! - [`filters`] and [`subset`] carve sub-families out of an existing
//!   diagram: overlap exclusion, symmetry fixing, and top-edge restriction
//!   for memory-bounded partitioning.
//! - [`cardinality`] counts accepted subsets with big integers, and
//!   [`iter`] enumerates them when the family is small enough to touch;
//!   [`burnside`] and [`pipeline`] drive the whole computation.
//!
//! ## Quick start
//!
//! ```
//! use unfold_zdd::builder::build;
//! use unfold_zdd::cardinality::count_string;
//! use unfold_zdd::graph::Graph;
//! use unfold_zdd::spanning::SpanningTreeSpec;
//!
//! // The tetrahedron graph: 4 vertices, 6 edges.
//! let graph = Graph::new(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
//! let trees = build(&SpanningTreeSpec::new(&graph));
//! assert_eq!(count_string(&trees), "16");
//! ```
//!
//! ## Core components
//!
//! - **[`graph`]**: the input graph and its `.grh` format; the edge order is
//!   the diagram variable order.
//! - **[`frontier`]**: entering/frontier/leaving vertex sets per edge.
//! - **[`zdd`]**, **[`types`]**: the level-indexed node table and its ids.
//! - **[`spec`]**: the predicate interface shared by builder and subsetter.
//! - **[`bitmask`]**: fixed-width filter state, 64 to 448 bits.
//! - **[`io`]**: MOPE and automorphism inputs, the result report.

pub mod bitmask;
pub mod builder;
pub mod burnside;
pub mod cardinality;
pub mod filters;
pub mod frontier;
pub mod graph;
pub mod io;
pub mod iter;
pub mod pipeline;
pub mod spanning;
pub mod spec;
pub mod subset;
pub mod types;
pub mod zdd;
