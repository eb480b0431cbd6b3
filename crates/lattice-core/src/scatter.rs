// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Distribution Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One-shot scatter of the global matrix from the holder rank into
//! per-rank local domains, and the inverse gather.
//!
//! The protocol is asymmetric. The holder walks every grid coordinate;
//! for its own coordinate it copies blocks straight out of the global
//! buffer, for every other coordinate it sends that target's blocks in
//! row-major (lbi, lbj) order. Each participant posts its receives in
//! the same order, so per-pair in-order delivery pairs every message
//! without tags. Exactly one communication round, no relaying.

use ndarray::Array2;
use rayon::prelude::*;

use lattice_types::error::{LatticeError, LatticeResult};

use crate::cyclic;
use crate::domain::{Layout, LocalDomain};
use crate::fabric::Transport;
use crate::grid::ProcessGrid;
use crate::tile::TileView;

/// Caller's role in the distribution protocol, derived from the grid
/// coordinate rather than hardcoded to rank zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Holder,
    Participant,
}

impl Role {
    pub fn of(grid: &ProcessGrid, holder: usize) -> Role {
        if grid.rank == holder {
            Role::Holder
        } else {
            Role::Participant
        }
    }
}

/// Distribute the global matrix across the grid.
///
/// The holder passes `Some(global)`, every other rank passes `None`;
/// a mismatch between the argument and the caller's role is rejected
/// before any transfer. Returns this rank's populated domain.
pub fn scatter<T: Transport>(
    global: Option<&Array2<f64>>,
    layout: Layout,
    grid: ProcessGrid,
    transport: &mut T,
) -> LatticeResult<LocalDomain> {
    match (Role::of(&grid, layout.holder), global) {
        (Role::Holder, Some(matrix)) => scatter_from_holder(matrix, layout, grid, transport),
        (Role::Holder, None) => Err(LatticeError::ConfigError(format!(
            "holder rank {} was not given the global matrix",
            grid.rank
        ))),
        (Role::Participant, Some(_)) => Err(LatticeError::ConfigError(format!(
            "rank {} is not the holder but was given a global matrix",
            grid.rank
        ))),
        (Role::Participant, None) => receive_domain(layout, grid, transport),
    }
}

fn scatter_from_holder<T: Transport>(
    global: &Array2<f64>,
    layout: Layout,
    grid: ProcessGrid,
    transport: &mut T,
) -> LatticeResult<LocalDomain> {
    check_global_shape(global, layout)?;
    let nblocks = layout.num_blocks();
    let b = layout.b;
    let mut domain = LocalDomain::allocate(layout, grid);
    for p in 0..grid.p {
        for q in 0..grid.q {
            let dest = grid.rank_of(p, q)?;
            if dest == grid.rank {
                copy_owned_blocks(global, &mut domain)?;
                continue;
            }
            let nbp = cyclic::owned_block_count(nblocks, grid.p, p);
            let nbq = cyclic::owned_block_count(nblocks, grid.q, q);
            for lbi in 0..nbp {
                for lbj in 0..nbq {
                    let gi = cyclic::global_index(lbi, grid.p, p, b, 0);
                    let gj = cyclic::global_index(lbj, grid.q, q, b, 0);
                    let tile = TileView::from_global(global, gi, gj, b)?;
                    transport.send(dest, tile)?;
                }
            }
        }
    }
    Ok(domain)
}

fn receive_domain<T: Transport>(
    layout: Layout,
    grid: ProcessGrid,
    transport: &mut T,
) -> LatticeResult<LocalDomain> {
    let mut domain = LocalDomain::allocate(layout, grid);
    for lbi in 0..domain.nbp() {
        for lbj in 0..domain.nbq() {
            let block = domain.block_slice_mut(lbi, lbj)?;
            transport.recv(layout.holder, block)?;
        }
    }
    Ok(domain)
}

/// Gather every rank's domain back into the global matrix; the exact
/// inverse of `scatter`. Participants send their blocks in the same
/// row-major order the holder consumes them; the holder returns
/// `Some(matrix)`, participants `None`.
pub fn gather<T: Transport>(
    domain: &LocalDomain,
    transport: &mut T,
) -> LatticeResult<Option<Array2<f64>>> {
    let layout = domain.layout();
    let grid = *domain.grid();
    match Role::of(&grid, layout.holder) {
        Role::Participant => {
            for (_, block) in domain.blocks() {
                let tile = TileView::from_block(block, layout.b)?;
                transport.send(layout.holder, tile)?;
            }
            Ok(None)
        }
        Role::Holder => {
            let nblocks = layout.num_blocks();
            let b = layout.b;
            let mut global = Array2::zeros((layout.n, layout.n));
            let mut buf = vec![0.0; b * b];
            for p in 0..grid.p {
                for q in 0..grid.q {
                    let src = grid.rank_of(p, q)?;
                    if src == grid.rank {
                        inject_owned_blocks(domain, &mut global)?;
                        continue;
                    }
                    let nbp = cyclic::owned_block_count(nblocks, grid.p, p);
                    let nbq = cyclic::owned_block_count(nblocks, grid.q, q);
                    for lbi in 0..nbp {
                        for lbj in 0..nbq {
                            transport.recv(src, &mut buf)?;
                            let gi = cyclic::global_index(lbi, grid.p, p, b, 0);
                            let gj = cyclic::global_index(lbj, grid.q, q, b, 0);
                            for ii in 0..b {
                                for jj in 0..b {
                                    global[[gi + ii, gj + jj]] = buf[ii * b + jj];
                                }
                            }
                        }
                    }
                }
            }
            Ok(Some(global))
        }
    }
}

/// Single-process reference: compute every rank's domain directly from
/// the global matrix, no transport involved. Ground truth for the
/// transported scatter, and the degenerate path for a 1x1 grid where
/// distribution is a plain copy.
pub fn scatter_serial(
    global: &Array2<f64>,
    layout: Layout,
    p: usize,
    q: usize,
) -> LatticeResult<Vec<LocalDomain>> {
    check_global_shape(global, layout)?;
    let nprocs = p * q;
    (0..nprocs)
        .into_par_iter()
        .map(|rank| {
            let grid = ProcessGrid::new(nprocs, p, q, rank)?;
            let mut domain = LocalDomain::allocate(layout, grid);
            copy_owned_blocks(global, &mut domain)?;
            Ok(domain)
        })
        .collect()
}

/// Reassemble the global matrix from every rank's domain; inverse of
/// `scatter_serial`.
pub fn gather_serial(domains: &[LocalDomain]) -> LatticeResult<Array2<f64>> {
    let first = domains.first().ok_or_else(|| {
        LatticeError::ConfigError("gather_serial needs at least one domain".to_string())
    })?;
    let layout = first.layout();
    let mut global = Array2::zeros((layout.n, layout.n));
    for domain in domains {
        if domain.layout() != layout {
            return Err(LatticeError::ShapeMismatch(
                "domains were built from different layouts".to_string(),
            ));
        }
        inject_owned_blocks(domain, &mut global)?;
    }
    Ok(global)
}

/// Run the full scatter over an in-process channel fabric, one scoped
/// thread per rank. Convenience entry point for single-host runs,
/// tests, and benchmarks.
pub fn scatter_with_fabric(
    global: &Array2<f64>,
    layout: Layout,
    p: usize,
    q: usize,
) -> LatticeResult<Vec<LocalDomain>> {
    let nprocs = p * q;
    crate::fabric::run_ranks(nprocs, |rank, mut endpoint| {
        let grid = ProcessGrid::new(nprocs, p, q, rank)?;
        let source = if rank == layout.holder {
            Some(global)
        } else {
            None
        };
        scatter(source, layout, grid, &mut endpoint)
    })
    .into_iter()
    .collect()
}

/// Element-by-element gather of the holder's own blocks out of the
/// row-major global buffer, which is not block-contiguous.
fn copy_owned_blocks(global: &Array2<f64>, domain: &mut LocalDomain) -> LatticeResult<()> {
    let b = domain.b();
    for lbi in 0..domain.nbp() {
        for lbj in 0..domain.nbq() {
            let gi = domain.global_row(lbi, 0);
            let gj = domain.global_col(lbj, 0);
            let block = domain.block_slice_mut(lbi, lbj)?;
            for ii in 0..b {
                for jj in 0..b {
                    block[ii * b + jj] = global[[gi + ii, gj + jj]];
                }
            }
        }
    }
    Ok(())
}

fn inject_owned_blocks(domain: &LocalDomain, global: &mut Array2<f64>) -> LatticeResult<()> {
    let b = domain.b();
    for ((lbi, lbj), block) in domain.blocks() {
        let gi = domain.global_row(lbi, 0);
        let gj = domain.global_col(lbj, 0);
        for ii in 0..b {
            for jj in 0..b {
                global[[gi + ii, gj + jj]] = block[ii * b + jj];
            }
        }
    }
    Ok(())
}

fn check_global_shape(global: &Array2<f64>, layout: Layout) -> LatticeResult<()> {
    if global.dim() != (layout.n, layout.n) {
        return Err(LatticeError::ShapeMismatch(format!(
            "global matrix shape {:?} does not match layout dimension {}",
            global.dim(),
            layout.n
        )));
    }
    Ok(())
}
