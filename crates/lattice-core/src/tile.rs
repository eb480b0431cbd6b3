// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Strided Tile View
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Borrowed strided descriptor of a rectangular tile inside a larger
//! row-major buffer.
//!
//! The sender hands a `TileView` to the transport instead of packing
//! every block into a scratch buffer up front; a transport with native
//! strided support can walk `row_slices()` in place, and one without it
//! packs exactly once at send time.

use ndarray::Array2;

use lattice_types::error::{LatticeError, LatticeResult};

/// Non-owning view of a `rows`×`cols` tile whose rows are `row_stride`
/// elements apart in the underlying buffer.
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a> {
    data: &'a [f64],
    offset: usize,
    row_stride: usize,
    rows: usize,
    cols: usize,
}

impl<'a> TileView<'a> {
    /// View the b×b tile whose top-left element is global (gi, gj).
    pub fn from_global(global: &'a Array2<f64>, gi: usize, gj: usize, b: usize) -> LatticeResult<Self> {
        let (nrows, ncols) = global.dim();
        if gi + b > nrows || gj + b > ncols {
            return Err(LatticeError::IndexOutOfBounds(format!(
                "tile at ({gi}, {gj}) of size {b} exceeds global shape ({nrows}, {ncols})"
            )));
        }
        let data = global.as_slice().ok_or_else(|| {
            LatticeError::ShapeMismatch("global matrix must be contiguous row-major".to_string())
        })?;
        Ok(Self {
            data,
            offset: gi * ncols + gj,
            row_stride: ncols,
            rows: b,
            cols: b,
        })
    }

    /// View an already-contiguous b×b block (row stride == b).
    pub fn from_block(block: &'a [f64], b: usize) -> LatticeResult<Self> {
        if block.len() != b * b {
            return Err(LatticeError::ShapeMismatch(format!(
                "block of length {} is not a {b}x{b} tile",
                block.len()
            )));
        }
        Ok(Self {
            data: block,
            offset: 0,
            row_stride: b,
            rows: b,
            cols: b,
        })
    }

    /// Element count of the tile.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// The tile's rows as contiguous slices of the underlying buffer.
    pub fn row_slices(&self) -> impl Iterator<Item = &'a [f64]> {
        let data = self.data;
        let offset = self.offset;
        let stride = self.row_stride;
        let cols = self.cols;
        (0..self.rows).map(move |r| {
            let start = offset + r * stride;
            &data[start..start + cols]
        })
    }

    /// Pack the tile into a caller-supplied contiguous buffer.
    pub fn pack_into(&self, buf: &mut [f64]) -> LatticeResult<()> {
        if buf.len() != self.len() {
            return Err(LatticeError::ShapeMismatch(format!(
                "pack buffer of length {} for a tile of {} elements",
                buf.len(),
                self.len()
            )));
        }
        if self.is_empty() {
            return Ok(());
        }
        for (dst, src) in buf.chunks_exact_mut(self.cols).zip(self.row_slices()) {
            dst.copy_from_slice(src);
        }
        Ok(())
    }

    /// Pack the tile into a fresh contiguous vector.
    pub fn pack(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        for row in self.row_slices() {
            out.extend_from_slice(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn sample(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, n), |(i, j)| (i * n + j) as f64)
    }

    #[test]
    fn test_from_global_packs_strided_tile() {
        let global = sample(6);
        let tile = TileView::from_global(&global, 2, 4, 2).expect("tile");
        assert_eq!(tile.len(), 4);
        assert_eq!(tile.pack(), vec![16.0, 17.0, 22.0, 23.0]);
    }

    #[test]
    fn test_row_slices_borrow_global_rows_in_place() {
        let global = sample(4);
        let tile = TileView::from_global(&global, 1, 1, 2).expect("tile");
        let rows: Vec<&[f64]> = tile.row_slices().collect();
        assert_eq!(rows, vec![&[5.0, 6.0][..], &[9.0, 10.0][..]]);
    }

    #[test]
    fn test_pack_into_matches_pack() {
        let global = sample(8);
        let tile = TileView::from_global(&global, 4, 2, 3).expect("tile");
        let mut buf = vec![0.0; 9];
        tile.pack_into(&mut buf).expect("pack_into");
        assert_eq!(buf, tile.pack());
    }

    #[test]
    fn test_from_block_is_identity() {
        let block = [1.0, 2.0, 3.0, 4.0];
        let tile = TileView::from_block(&block, 2).expect("tile");
        assert_eq!(tile.pack(), block.to_vec());
    }

    #[test]
    fn test_out_of_bounds_tile_rejected() {
        let global = sample(4);
        assert!(TileView::from_global(&global, 3, 0, 2).is_err());
        assert!(TileView::from_global(&global, 0, 4, 1).is_err());
    }

    #[test]
    fn test_pack_into_rejects_wrong_length() {
        let global = sample(4);
        let tile = TileView::from_global(&global, 0, 0, 2).expect("tile");
        let mut buf = vec![0.0; 3];
        assert!(tile.pack_into(&mut buf).is_err());
    }

    #[test]
    fn test_from_block_rejects_wrong_length() {
        let block = [1.0, 2.0, 3.0];
        assert!(TileView::from_block(&block, 2).is_err());
    }
}
