//! The phase 4 → 5 → 6 drivers.
//!
//! Phase 4 builds the spanning-tree diagram, phase 5 subsets it against
//! every MOPE in input order, phase 6 runs the Burnside driver over the
//! automorphisms. With a split depth d > 0 the same sequence runs once
//! per top-edge bit pattern: each partition's diagram is built, filtered,
//! counted and dropped before the next begins, trading build work for a
//! peak-memory bound of roughly 1/2^d of the whole diagram.
//!
//! The filters carry their state in a bitmask whose width is picked here:
//! the narrowest of u64 … 7×64 bits that covers the edge count, each
//! monomorphising the whole run.

use std::time::Instant;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bitmask::{BitMask, WideMask};
use crate::builder::build;
use crate::burnside;
use crate::cardinality::count;
use crate::filters::{UnfoldingFilter, VariableRestrictor};
use crate::graph::Graph;
use crate::io::Automorphisms;
use crate::spanning::SpanningTreeSpec;
use crate::spec::Intersect;
use crate::subset::subset;
use crate::zdd::Zdd;

/// Maximum supported edge count (the widest filter mask).
pub const MAX_EDGES: usize = 448;

/// One full run's inputs.
pub struct Pipeline<'a> {
    pub graph: &'a Graph,
    /// Minimal overlapping edge sets, applied in order. `None` disables
    /// phase 5.
    pub mopes: Option<&'a [Vec<usize>]>,
    /// Automorphism group action. `None` disables phase 6.
    pub automorphisms: Option<&'a Automorphisms>,
    /// 0 = unpartitioned; d > 0 restricts the top d edges to each of the
    /// 2^d patterns in turn.
    pub split_depth: usize,
}

/// Everything the report needs, with counts still as big integers.
pub struct Outcome {
    pub spanning_tree_count: BigUint,
    pub non_overlapping_count: BigUint,
    pub burnside: Option<BurnsideSummary>,
    pub build_time_ms: f64,
    pub subset_time_ms: f64,
    pub burnside_time_ms: f64,
}

pub struct BurnsideSummary {
    pub invariant_counts: Vec<BigUint>,
    pub sum: BigUint,
    pub nonisomorphic_count: BigUint,
}

/// Runs the pipeline with the narrowest filter mask that fits the graph.
pub fn run(pipeline: &Pipeline) -> Outcome {
    let m = pipeline.graph.num_edges();
    assert!(m <= MAX_EDGES, "edge count {} exceeds supported maximum {}", m, MAX_EDGES);

    if m <= 64 {
        run_with::<u64>(pipeline)
    } else if m <= 128 {
        run_with::<WideMask<2>>(pipeline)
    } else if m <= 192 {
        run_with::<WideMask<3>>(pipeline)
    } else if m <= 256 {
        run_with::<WideMask<4>>(pipeline)
    } else if m <= 320 {
        run_with::<WideMask<5>>(pipeline)
    } else if m <= 384 {
        run_with::<WideMask<6>>(pipeline)
    } else {
        run_with::<WideMask<7>>(pipeline)
    }
}

fn run_with<W: BitMask>(pipeline: &Pipeline) -> Outcome {
    if pipeline.split_depth == 0 {
        run_whole::<W>(pipeline)
    } else {
        run_partitioned::<W>(pipeline)
    }
}

fn run_whole<W: BitMask>(pipeline: &Pipeline) -> Outcome {
    let graph = pipeline.graph;
    let m = graph.num_edges();

    let started = Instant::now();
    let mut dd = build(&SpanningTreeSpec::new(graph));
    let build_time_ms = elapsed_ms(started);

    let spanning_tree_count = count(&dd);
    log::info!(
        "spanning tree diagram: {} nodes, {} trees",
        dd.node_count(),
        spanning_tree_count
    );

    let mut subset_time_ms = 0.0;
    let mut non_overlapping_count = spanning_tree_count.clone();
    if let Some(mopes) = pipeline.mopes.filter(|sets| !sets.is_empty()) {
        let started = Instant::now();
        dd = apply_mopes::<W>(dd, m, mopes);
        subset_time_ms = elapsed_ms(started);
        non_overlapping_count = count(&dd);
        log::info!("non-overlapping unfoldings: {}", non_overlapping_count);
    }

    let mut burnside_time_ms = 0.0;
    let burnside = pipeline.automorphisms.map(|auto| {
        let started = Instant::now();
        let invariant_counts = burnside::invariant_counts::<W>(
            &dd,
            m,
            &auto.edge_permutations,
            auto.zero_flags.as_deref(),
            Some(&non_overlapping_count),
        );
        let (sum, nonisomorphic_count) = burnside::combine(&invariant_counts, auto.group_order);
        burnside_time_ms = elapsed_ms(started);
        BurnsideSummary { invariant_counts, sum, nonisomorphic_count }
    });

    Outcome {
        spanning_tree_count,
        non_overlapping_count,
        burnside,
        build_time_ms,
        subset_time_ms,
        burnside_time_ms,
    }
}

fn run_partitioned<W: BitMask>(pipeline: &Pipeline) -> Outcome {
    let graph = pipeline.graph;
    let m = graph.num_edges();
    let depth = pipeline.split_depth;
    let num_partitions = 1usize << depth;
    let num_automorphisms = pipeline
        .automorphisms
        .map_or(0, |a| a.edge_permutations.len());

    let mut spanning_tree_count = BigUint::zero();
    let mut non_overlapping_count = BigUint::zero();
    let mut invariant_totals = vec![BigUint::zero(); num_automorphisms];
    let mut build_time_ms = 0.0;
    let mut subset_time_ms = 0.0;
    let mut burnside_time_ms = 0.0;

    for pattern in 0..num_partitions {
        log::info!("partition {}/{}", pattern + 1, num_partitions);

        let started = Instant::now();
        let spec = Intersect::new(
            SpanningTreeSpec::new(graph),
            VariableRestrictor::new(m, depth, pattern as u64),
        );
        let mut dd = build(&spec);
        build_time_ms += elapsed_ms(started);

        let part_spanning = count(&dd);
        log::info!("  spanning trees in partition: {}", part_spanning);
        spanning_tree_count += &part_spanning;

        let mut part_non_overlapping = part_spanning;
        if let Some(mopes) = pipeline.mopes.filter(|sets| !sets.is_empty()) {
            let started = Instant::now();
            dd = apply_mopes::<W>(dd, m, mopes);
            subset_time_ms += elapsed_ms(started);
            part_non_overlapping = count(&dd);
            log::info!("  non-overlapping in partition: {}", part_non_overlapping);
        }
        non_overlapping_count += &part_non_overlapping;

        if let Some(auto) = pipeline.automorphisms {
            if part_non_overlapping.is_zero() {
                log::info!("  empty partition, skipping fixed-point counts");
            } else {
                let started = Instant::now();
                let counts = burnside::invariant_counts::<W>(
                    &dd,
                    m,
                    &auto.edge_permutations,
                    auto.zero_flags.as_deref(),
                    Some(&part_non_overlapping),
                );
                for (total, c) in invariant_totals.iter_mut().zip(counts) {
                    *total += c;
                }
                let cumulative = invariant_totals
                    .iter()
                    .fold(BigUint::zero(), |acc, c| acc + c);
                log::info!("  cumulative Burnside sum: {}", cumulative);
                burnside_time_ms += elapsed_ms(started);
            }
        }
        // dd drops here: the partition's whole table is released before
        // the next pattern is built.
    }

    let burnside = pipeline.automorphisms.map(|auto| {
        let (sum, nonisomorphic_count) = burnside::combine(&invariant_totals, auto.group_order);
        BurnsideSummary { invariant_counts: invariant_totals, sum, nonisomorphic_count }
    });

    Outcome {
        spanning_tree_count,
        non_overlapping_count,
        burnside,
        build_time_ms,
        subset_time_ms,
        burnside_time_ms,
    }
}

fn apply_mopes<W: BitMask>(mut dd: Zdd, num_edges: usize, mopes: &[Vec<usize>]) -> Zdd {
    let total = mopes.len();
    for (i, mope) in mopes.iter().enumerate() {
        log::info!("MOPE {}/{}", i + 1, total);
        dd = subset(&dd, &UnfoldingFilter::<W>::new(num_edges, mope));
    }
    dd
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
