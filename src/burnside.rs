//! Fixed-point counting over an automorphism group.
//!
//! For every edge permutation g the driver produces |T_g|, the number of
//! family members fixed pointwise by g; Burnside's lemma then gives the
//! number of equivalence classes as Σ|T_g| / |G|. The diagram being
//! filtered is frozen: each permutation's subset is a fresh value that is
//! dropped before the next one is processed.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bitmask::BitMask;
use crate::cardinality::count;
use crate::filters::SymmetryFilter;
use crate::subset::subset;
use crate::zdd::Zdd;

/// Computes |T_g| for every permutation, in input order.
///
/// `zero_flags[i]`, when present and true, asserts |T_{g_i}| = 0 without
/// touching the diagram (a precomputed fixed-point test). The identity
/// permutation is answered with `identity_count` if supplied, else with
/// one cardinality sweep. Every other permutation costs one symmetry
/// subset plus one count.
pub fn invariant_counts<W: BitMask>(
    dd: &Zdd,
    num_edges: usize,
    permutations: &[Vec<usize>],
    zero_flags: Option<&[bool]>,
    identity_count: Option<&BigUint>,
) -> Vec<BigUint> {
    let total = permutations.len();
    let flags = zero_flags.filter(|z| z.len() == total);
    let mut cached_identity: Option<BigUint> = identity_count.cloned();
    let mut counts = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for (i, perm) in permutations.iter().enumerate() {
        if flags.map_or(false, |z| z[i]) {
            log::info!(
                "automorphism {}/{}: |T_g| = 0 (precomputed zero flag)",
                i + 1,
                total
            );
            counts.push(BigUint::zero());
            skipped += 1;
            continue;
        }

        let is_identity = perm.iter().enumerate().all(|(j, &p)| p == j);
        let c = if is_identity {
            let c = cached_identity.get_or_insert_with(|| count(dd)).clone();
            log::info!("automorphism {}/{}: |T_g| = {} (identity)", i + 1, total, c);
            c
        } else {
            let filter = SymmetryFilter::<W>::new(num_edges, perm);
            let fixed = subset(dd, &filter);
            let c = count(&fixed);
            log::info!("automorphism {}/{}: |T_g| = {}", i + 1, total, c);
            c
        };
        counts.push(c);
    }

    if skipped > 0 {
        log::info!("{}/{} automorphisms answered by zero flags", skipped, total);
    }
    counts
}

/// Sums the per-permutation counts and divides by the group order.
///
/// A non-zero remainder indicates a bug somewhere upstream; it is
/// reported loudly but the quotient is still returned so that the run
/// produces inspectable output.
pub fn combine(invariant_counts: &[BigUint], group_order: usize) -> (BigUint, BigUint) {
    let sum = invariant_counts
        .iter()
        .fold(BigUint::zero(), |acc, c| acc + c);
    let order = BigUint::from(group_order);
    let quotient = &sum / &order;
    let remainder = &sum % &order;
    if !remainder.is_zero() {
        log::warn!(
            "Burnside sum {} is not divisible by group order {} (remainder {}); \
             the reported class count is suspect",
            sum,
            group_order,
            remainder
        );
    }
    (sum, quotient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::graph::Graph;
    use crate::spanning::SpanningTreeSpec;

    fn triangle_trees() -> Zdd {
        let g = Graph::new(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        build(&SpanningTreeSpec::new(&g))
    }

    /// Edge action of S₃ on the triangle with edges (0,1), (1,2), (0,2).
    fn s3_edge_permutations() -> Vec<Vec<usize>> {
        vec![
            vec![0, 1, 2], // id
            vec![0, 2, 1], // swap vertices 0,1
            vec![2, 1, 0], // swap vertices 1,2
            vec![1, 0, 2], // swap vertices 0,2
            vec![1, 2, 0], // rotation 0→1→2
            vec![2, 0, 1], // rotation 0→2→1
        ]
    }

    #[test]
    fn triangle_class_count() {
        let dd = triangle_trees();
        let counts = invariant_counts::<u64>(&dd, 3, &s3_edge_permutations(), None, None);
        let expected: Vec<BigUint> =
            [3u32, 1, 1, 1, 0, 0].iter().map(|&c| BigUint::from(c)).collect();
        assert_eq!(counts, expected);

        let (sum, classes) = combine(&counts, 6);
        assert_eq!(sum, BigUint::from(6u32));
        assert_eq!(classes, BigUint::from(1u32));
    }

    #[test]
    fn zero_flags_short_circuit() {
        let dd = triangle_trees();
        let flags = vec![false, false, false, false, true, true];
        let counts =
            invariant_counts::<u64>(&dd, 3, &s3_edge_permutations(), Some(&flags), None);
        // The flagged rotations are answered without filtering; the
        // answers happen to be their true values.
        assert_eq!(counts[4], BigUint::zero());
        assert_eq!(counts[5], BigUint::zero());
        let (_, classes) = combine(&counts, 6);
        assert_eq!(classes, BigUint::from(1u32));
    }

    #[test]
    fn inverse_permutations_fix_equally() {
        let dd = triangle_trees();
        let perms = s3_edge_permutations();
        let counts = invariant_counts::<u64>(&dd, 3, &perms, None, None);
        // [1,2,0] and [2,0,1] are mutually inverse.
        assert_eq!(counts[4], counts[5]);
    }
}
