// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Block-Cyclic Index Mapper
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pure translation between global matrix coordinates and
//! (owning coordinate, local block index, in-block offset) triples.
//!
//! Global block (I, J) is owned by grid coordinate (I mod P, J mod Q);
//! blocks cycle over the grid so every coordinate gets a near-equal
//! share. All functions here are stateless; the same formulas drive
//! both sides of the scatter protocol, so ownership is never negotiated
//! at run time.

/// Owning grid coordinate of global block (gbi, gbj).
pub fn block_owner(gbi: usize, gbj: usize, p: usize, q: usize) -> (usize, usize) {
    (gbi % p, gbj % q)
}

/// Local block index of global block `gbi` at its owning coordinate.
/// Valid only when `gbi % p` equals the querying coordinate.
pub fn local_block(gbi: usize, p: usize) -> usize {
    gbi / p
}

/// Global block index of local block `lbi` held at grid coordinate
/// `coord` along a dimension with `p` grid entries.
pub fn global_block(lbi: usize, p: usize, coord: usize) -> usize {
    lbi * p + coord
}

/// Global element index of in-block offset `ii` within local block
/// `lbi` held at grid coordinate `coord`, for block dimension `b`.
pub fn global_index(lbi: usize, p: usize, coord: usize, b: usize, ii: usize) -> usize {
    global_block(lbi, p, coord) * b + ii
}

/// Number of global blocks owned along one dimension by grid
/// coordinate `coord`: floor share plus one for the leading remainder
/// coordinates.
pub fn owned_block_count(nblocks: usize, p: usize, coord: usize) -> usize {
    nblocks / p + usize::from(coord < nblocks % p)
}

/// Owning grid coordinate of global element (gi, gj) for block
/// dimension `b`.
pub fn element_owner(gi: usize, gj: usize, b: usize, p: usize, q: usize) -> (usize, usize) {
    block_owner(gi / b, gj / b, p, q)
}
