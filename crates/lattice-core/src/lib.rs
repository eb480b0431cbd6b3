// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Distribution Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Block-cyclic distribution of dense square matrices over a 2D process
//! grid: index mapping, local block storage, and the one-shot scatter
//! from the holder rank to every other rank.

pub mod cyclic;
pub mod diag;
pub mod domain;
pub mod fabric;
pub mod grid;
pub mod scatter;
pub mod tile;
