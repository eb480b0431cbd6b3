// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Local Domain
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-rank container of owned blocks.
//!
//! All blocks a rank owns live in one contiguous buffer, in row-major
//! order of local block indices; each block is itself a contiguous
//! b×b row-major tile. Buffer length is always nbp * nbq * b * b.

use ndarray::{ArrayView2, ArrayViewMut2};

use lattice_types::config::DistConfig;
use lattice_types::error::{LatticeError, LatticeResult};

use crate::cyclic;
use crate::grid::ProcessGrid;

/// Distribution parameters shared by the engine and the local container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Global matrix dimension.
    pub n: usize,
    /// Block dimension.
    pub b: usize,
    /// Rank holding the complete matrix before distribution.
    pub holder: usize,
}

impl Layout {
    /// Validated constructor. `n` must be a positive multiple of `b`;
    /// trailing partial blocks are not supported.
    pub fn new(n: usize, b: usize, holder: usize) -> LatticeResult<Self> {
        if n == 0 || b == 0 {
            return Err(LatticeError::ConfigError(format!(
                "matrix and block dimensions must be >= 1, got {n} and {b}"
            )));
        }
        if n % b != 0 {
            return Err(LatticeError::ConfigError(format!(
                "matrix dimension {n} is not a multiple of block dimension {b}; \
                 trailing partial blocks are not supported"
            )));
        }
        Ok(Self { n, b, holder })
    }

    /// Derive from a configuration already checked against the rank count.
    pub fn from_config(cfg: &DistConfig, nprocs: usize) -> LatticeResult<Self> {
        cfg.validate(nprocs)?;
        Self::new(cfg.matrix_dim, cfg.block_dim, cfg.holder)
    }

    /// Number of block-rows (== block-columns) in the global matrix.
    pub fn num_blocks(&self) -> usize {
        self.n / self.b
    }
}

/// One rank's portion of the global matrix, addressed by local block
/// indices.
#[derive(Debug, Clone)]
pub struct LocalDomain {
    grid: ProcessGrid,
    layout: Layout,
    nbp: usize,
    nbq: usize,
    data: Vec<f64>,
}

impl LocalDomain {
    /// Size and allocate the block buffer for `grid`'s coordinate.
    /// The buffer starts zeroed; the distribution engine fills it.
    pub fn allocate(layout: Layout, grid: ProcessGrid) -> Self {
        let nblocks = layout.num_blocks();
        let nbp = cyclic::owned_block_count(nblocks, grid.p, grid.myrow);
        let nbq = cyclic::owned_block_count(nblocks, grid.q, grid.mycol);
        let data = vec![0.0; nbp * nbq * layout.b * layout.b];
        Self {
            grid,
            layout,
            nbp,
            nbq,
            data,
        }
    }

    pub fn grid(&self) -> &ProcessGrid {
        &self.grid
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Global matrix dimension.
    pub fn n(&self) -> usize {
        self.layout.n
    }

    /// Block dimension.
    pub fn b(&self) -> usize {
        self.layout.b
    }

    /// Owned block-row count.
    pub fn nbp(&self) -> usize {
        self.nbp
    }

    /// Owned block-column count.
    pub fn nbq(&self) -> usize {
        self.nbq
    }

    pub fn num_blocks(&self) -> usize {
        self.nbp * self.nbq
    }

    /// A rank owns nothing when the grid is larger than the block count
    /// in one dimension.
    pub fn is_empty(&self) -> bool {
        self.num_blocks() == 0
    }

    fn block_offset(&self, lbi: usize, lbj: usize) -> LatticeResult<usize> {
        if lbi >= self.nbp || lbj >= self.nbq {
            return Err(LatticeError::IndexOutOfBounds(format!(
                "local block ({lbi}, {lbj}) outside {}x{}",
                self.nbp, self.nbq
            )));
        }
        Ok((lbi * self.nbq + lbj) * self.layout.b * self.layout.b)
    }

    /// Contiguous storage of local block (lbi, lbj).
    pub fn block_slice(&self, lbi: usize, lbj: usize) -> LatticeResult<&[f64]> {
        let start = self.block_offset(lbi, lbj)?;
        let bsq = self.layout.b * self.layout.b;
        Ok(&self.data[start..start + bsq])
    }

    pub fn block_slice_mut(&mut self, lbi: usize, lbj: usize) -> LatticeResult<&mut [f64]> {
        let start = self.block_offset(lbi, lbj)?;
        let bsq = self.layout.b * self.layout.b;
        Ok(&mut self.data[start..start + bsq])
    }

    /// Local block (lbi, lbj) as a b×b view.
    pub fn block(&self, lbi: usize, lbj: usize) -> LatticeResult<ArrayView2<'_, f64>> {
        let b = self.layout.b;
        let slice = self.block_slice(lbi, lbj)?;
        ArrayView2::from_shape((b, b), slice)
            .map_err(|e| LatticeError::ShapeMismatch(e.to_string()))
    }

    pub fn block_mut(&mut self, lbi: usize, lbj: usize) -> LatticeResult<ArrayViewMut2<'_, f64>> {
        let b = self.layout.b;
        let slice = self.block_slice_mut(lbi, lbj)?;
        ArrayViewMut2::from_shape((b, b), slice)
            .map_err(|e| LatticeError::ShapeMismatch(e.to_string()))
    }

    /// Element (ii, jj) of local block (lbi, lbj).
    pub fn element(&self, lbi: usize, lbj: usize, ii: usize, jj: usize) -> LatticeResult<f64> {
        let b = self.layout.b;
        if ii >= b || jj >= b {
            return Err(LatticeError::IndexOutOfBounds(format!(
                "in-block offset ({ii}, {jj}) outside {b}x{b}"
            )));
        }
        let start = self.block_offset(lbi, lbj)?;
        Ok(self.data[start + ii * b + jj])
    }

    /// All owned blocks in local row-major order, with their indices.
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), &[f64])> {
        let bsq = self.layout.b * self.layout.b;
        let nbq = self.nbq;
        self.data
            .chunks_exact(bsq)
            .enumerate()
            .map(move |(k, blk)| ((k / nbq, k % nbq), blk))
    }

    /// Global row index of in-block row `ii` of local block-row `lbi`.
    pub fn global_row(&self, lbi: usize, ii: usize) -> usize {
        cyclic::global_index(lbi, self.grid.p, self.grid.myrow, self.layout.b, ii)
    }

    /// Global column index of in-block column `jj` of local block-column
    /// `lbj`.
    pub fn global_col(&self, lbj: usize, jj: usize) -> usize {
        cyclic::global_index(lbj, self.grid.q, self.grid.mycol, self.layout.b, jj)
    }
}
