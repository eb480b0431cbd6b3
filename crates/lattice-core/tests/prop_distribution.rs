// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Property-Based Tests (proptest) for lattice-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the block-cyclic distribution core.
//!
//! Covers: ownership partition and owned-count consistency, index
//! mapper idempotence, and scatter/gather roundtrips over both the
//! serial reference and the in-process channel fabric.

use ndarray::Array2;
use proptest::prelude::*;

use lattice_core::cyclic;
use lattice_core::domain::Layout;
use lattice_core::scatter::{gather_serial, scatter_serial, scatter_with_fabric};

fn sample(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| (i * n + j) as f64)
}

// ── Index Mapper Invariants ──────────────────────────────────────────

proptest! {
    /// Owned counts along one dimension agree with direct enumeration
    /// and sum to the block count across all coordinates.
    #[test]
    fn owned_counts_match_enumeration(
        nblocks in 0usize..64,
        p in 1usize..9,
    ) {
        let mut total = 0;
        for coord in 0..p {
            let direct = (0..nblocks).filter(|i| i % p == coord).count();
            let counted = cyclic::owned_block_count(nblocks, p, coord);
            prop_assert_eq!(counted, direct);
            total += counted;
        }
        prop_assert_eq!(total, nblocks);
    }

    /// Local-then-global block translation is the identity.
    #[test]
    fn mapper_is_idempotent(
        gbi in 0usize..256,
        p in 1usize..9,
    ) {
        let coord = gbi % p;
        let lbi = cyclic::local_block(gbi, p);
        prop_assert_eq!(cyclic::global_block(lbi, p, coord), gbi);
    }

    /// Every global element belongs to exactly one grid coordinate,
    /// and per-coordinate element counts equal NBP * NBQ * B * B.
    #[test]
    fn elements_partition_across_grid(
        nblocks in 1usize..8,
        b in 1usize..5,
        p in 1usize..5,
        q in 1usize..5,
    ) {
        let n = nblocks * b;
        let mut counts = vec![0usize; p * q];
        for gi in 0..n {
            for gj in 0..n {
                let (row, col) = cyclic::element_owner(gi, gj, b, p, q);
                prop_assert!(row < p && col < q);
                counts[row * q + col] += 1;
            }
        }
        for row in 0..p {
            for col in 0..q {
                let nbp = cyclic::owned_block_count(nblocks, p, row);
                let nbq = cyclic::owned_block_count(nblocks, q, col);
                prop_assert_eq!(counts[row * q + col], nbp * nbq * b * b);
            }
        }
    }
}

// ── Distribution Roundtrips ──────────────────────────────────────────

proptest! {
    /// Scattering then gathering through the serial reference
    /// reconstructs the global matrix exactly.
    #[test]
    fn serial_scatter_gather_roundtrip(
        nblocks in 1usize..7,
        b in 1usize..5,
        p in 1usize..5,
        q in 1usize..5,
    ) {
        let n = nblocks * b;
        let global = sample(n);
        let layout = Layout::new(n, b, 0).expect("layout");
        let domains = scatter_serial(&global, layout, p, q).expect("scatter");
        let lengths: usize = domains.iter().map(|d| d.num_blocks()).sum();
        prop_assert_eq!(lengths, nblocks * nblocks);
        let reassembled = gather_serial(&domains).expect("gather");
        prop_assert_eq!(reassembled, global);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The transported scatter agrees with the serial reference
    /// block-for-block, for any holder rank.
    #[test]
    fn transported_scatter_matches_reference(
        nblocks in 1usize..5,
        b in 1usize..4,
        p in 1usize..4,
        q in 1usize..4,
        holder_seed in 0usize..16,
    ) {
        let n = nblocks * b;
        let holder = holder_seed % (p * q);
        let global = sample(n);
        let layout = Layout::new(n, b, holder).expect("layout");

        let reference = scatter_serial(&global, layout, p, q).expect("serial");
        let transported = scatter_with_fabric(&global, layout, p, q).expect("fabric");

        prop_assert_eq!(reference.len(), transported.len());
        for (expected, actual) in reference.iter().zip(&transported) {
            prop_assert_eq!((expected.nbp(), expected.nbq()), (actual.nbp(), actual.nbq()));
            for ((_, blk_e), (_, blk_a)) in expected.blocks().zip(actual.blocks()) {
                prop_assert_eq!(blk_e, blk_a);
            }
        }
        let reassembled = gather_serial(&transported).expect("gather");
        prop_assert_eq!(reassembled, global);
    }
}
