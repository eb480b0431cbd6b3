// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, LatticeResult};

/// Distribution parameters for one run: global matrix dimension, block
/// dimension, process-grid factors, and the rank that initially holds
/// the full matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistConfig {
    pub matrix_dim: usize,
    pub block_dim: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    /// Rank holding the complete matrix before distribution.
    #[serde(default)]
    pub holder: usize,
}

impl DistConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> LatticeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check the configuration against the launched process count.
    /// Every violation here is fatal before any transfer is attempted.
    pub fn validate(&self, nprocs: usize) -> LatticeResult<()> {
        if self.matrix_dim == 0 || self.block_dim == 0 {
            return Err(LatticeError::ConfigError(format!(
                "matrix_dim and block_dim must be >= 1, got {} and {}",
                self.matrix_dim, self.block_dim
            )));
        }
        if self.block_dim > self.matrix_dim {
            return Err(LatticeError::ConfigError(format!(
                "block_dim {} exceeds matrix_dim {}",
                self.block_dim, self.matrix_dim
            )));
        }
        if self.matrix_dim % self.block_dim != 0 {
            return Err(LatticeError::ConfigError(format!(
                "matrix_dim {} is not a multiple of block_dim {}; \
                 trailing partial blocks are not supported",
                self.matrix_dim, self.block_dim
            )));
        }
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(LatticeError::ConfigError(format!(
                "process grid must be at least 1x1, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if self.grid_rows * self.grid_cols != nprocs {
            return Err(LatticeError::ConfigError(format!(
                "process grid {}x{} does not cover {} ranks",
                self.grid_rows, self.grid_cols, nprocs
            )));
        }
        if self.holder >= nprocs {
            return Err(LatticeError::ConfigError(format!(
                "holder rank {} outside 0..{}",
                self.holder, nprocs
            )));
        }
        Ok(())
    }

    /// Number of block-rows (== block-columns) in the global matrix.
    pub fn num_blocks(&self) -> usize {
        self.matrix_dim / self.block_dim
    }
}
