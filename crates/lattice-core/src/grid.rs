// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Process Grid
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Logical P×Q arrangement of cooperating ranks.
//!
//! Linear rank and (row, col) coordinate are related row-major:
//! rank = row * q + col. Created once at program start, immutable.

use lattice_types::error::{LatticeError, LatticeResult};

/// 2D process grid descriptor for one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessGrid {
    /// Grid rows.
    pub p: usize,
    /// Grid columns.
    pub q: usize,
    /// This rank's linear index (0 .. p*q - 1).
    pub rank: usize,
    /// This rank's row coordinate.
    pub myrow: usize,
    /// This rank's column coordinate.
    pub mycol: usize,
}

impl ProcessGrid {
    /// Build the grid view for `rank` out of `nprocs` launched ranks.
    /// `p * q != nprocs` is a fatal configuration error.
    pub fn new(nprocs: usize, p: usize, q: usize, rank: usize) -> LatticeResult<Self> {
        if p == 0 || q == 0 {
            return Err(LatticeError::ConfigError(format!(
                "process grid must be at least 1x1, got {p}x{q}"
            )));
        }
        if p * q != nprocs {
            return Err(LatticeError::ConfigError(format!(
                "process grid {p}x{q} does not cover {nprocs} ranks"
            )));
        }
        if rank >= nprocs {
            return Err(LatticeError::ConfigError(format!(
                "rank {rank} outside 0..{nprocs}"
            )));
        }
        Ok(Self {
            p,
            q,
            rank,
            myrow: rank / q,
            mycol: rank % q,
        })
    }

    /// Linear rank of the process at grid coordinate (row, col).
    pub fn rank_of(&self, row: usize, col: usize) -> LatticeResult<usize> {
        if row >= self.p || col >= self.q {
            return Err(LatticeError::GridOutOfBounds { row, col });
        }
        Ok(row * self.q + col)
    }

    /// Grid coordinate of a linear rank.
    pub fn coords_of(&self, rank: usize) -> LatticeResult<(usize, usize)> {
        if rank >= self.size() {
            return Err(LatticeError::ConfigError(format!(
                "rank {rank} outside 0..{}",
                self.size()
            )));
        }
        Ok((rank / self.q, rank % self.q))
    }

    /// Total rank count.
    pub fn size(&self) -> usize {
        self.p * self.q
    }
}

/// Most nearly square P×Q factorization of the rank count, with p <= q.
/// Used when launch tooling supplies only a total process count.
pub fn factor_grid(nprocs: usize) -> (usize, usize) {
    let mut best = (1, nprocs);
    for p in 1..=nprocs {
        if nprocs % p != 0 {
            continue;
        }
        let q = nprocs / p;
        if p > q {
            break;
        }
        if q - p < best.1 - best.0 {
            best = (p, q);
        }
    }
    best
}
