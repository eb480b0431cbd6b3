// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Rank Fabric
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Point-to-point transport seam and its in-process realization.
//!
//! The distribution engine only needs reliable, ordered delivery
//! between each ordered rank pair. `ChannelEndpoint` provides that with
//! one mpsc channel per (src, dst) pair, and `run_ranks` stands in for
//! process launch by giving every rank its own scoped thread. Wiring
//! the same protocol to an MPI communicator is a 1:1 swap of the
//! `Transport` implementation.

use std::sync::mpsc::{self, Receiver, Sender};

use lattice_types::error::{LatticeError, LatticeResult};

use crate::tile::TileView;

/// Blocking point-to-point transport between ranks.
///
/// Implementations must deliver payloads between a given (src, dst)
/// pair in send order; no ordering is required across distinct pairs.
pub trait Transport {
    /// Send one tile to `dest`. The tile may be strided; transports
    /// without native strided support pack it exactly once here.
    fn send(&mut self, dest: usize, tile: TileView<'_>) -> LatticeResult<()>;

    /// Block until the next payload from `src` arrives and copy it into
    /// `buf`. A payload whose length differs from `buf.len()` is a
    /// transport error, never a silent truncation.
    fn recv(&mut self, src: usize, buf: &mut [f64]) -> LatticeResult<()>;
}

/// One rank's endpoint into the in-process channel fabric.
pub struct ChannelEndpoint {
    rank: usize,
    to_peer: Vec<Sender<Vec<f64>>>,
    from_peer: Vec<Receiver<Vec<f64>>>,
}

impl ChannelEndpoint {
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Build the full fabric: one endpoint per rank, one channel per
/// ordered rank pair. Endpoint `r` is moved onto rank `r`'s thread.
pub fn channel_fabric(nprocs: usize) -> Vec<ChannelEndpoint> {
    let mut senders: Vec<Vec<Sender<Vec<f64>>>> = (0..nprocs).map(|_| Vec::new()).collect();
    let mut receivers: Vec<Vec<Receiver<Vec<f64>>>> = Vec::with_capacity(nprocs);
    for _dst in 0..nprocs {
        let mut from_peer = Vec::with_capacity(nprocs);
        for src_senders in senders.iter_mut() {
            let (tx, rx) = mpsc::channel();
            src_senders.push(tx);
            from_peer.push(rx);
        }
        receivers.push(from_peer);
    }
    senders
        .into_iter()
        .zip(receivers)
        .enumerate()
        .map(|(rank, (to_peer, from_peer))| ChannelEndpoint {
            rank,
            to_peer,
            from_peer,
        })
        .collect()
}

impl Transport for ChannelEndpoint {
    fn send(&mut self, dest: usize, tile: TileView<'_>) -> LatticeResult<()> {
        let tx = self.to_peer.get(dest).ok_or_else(|| {
            LatticeError::Transport(format!(
                "rank {} has no channel to rank {dest}",
                self.rank
            ))
        })?;
        tx.send(tile.pack()).map_err(|_| {
            LatticeError::Transport(format!(
                "rank {dest} disconnected before receiving from rank {}",
                self.rank
            ))
        })
    }

    fn recv(&mut self, src: usize, buf: &mut [f64]) -> LatticeResult<()> {
        let rx = self.from_peer.get(src).ok_or_else(|| {
            LatticeError::Transport(format!(
                "rank {} has no channel from rank {src}",
                self.rank
            ))
        })?;
        let payload = rx.recv().map_err(|_| {
            LatticeError::Transport(format!(
                "rank {src} disconnected before sending to rank {}",
                self.rank
            ))
        })?;
        if payload.len() != buf.len() {
            return Err(LatticeError::Transport(format!(
                "payload of {} elements for a receive buffer of {}",
                payload.len(),
                buf.len()
            )));
        }
        buf.copy_from_slice(&payload);
        Ok(())
    }
}

/// Run one closure per rank on scoped threads, each with its endpoint,
/// and collect the results in rank order. Joining every thread before
/// returning doubles as the end-of-distribution barrier.
pub fn run_ranks<T, F>(nprocs: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, ChannelEndpoint) -> T + Sync,
{
    let endpoints = channel_fabric(nprocs);
    let f = &f;
    std::thread::scope(|s| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .enumerate()
            .map(|(rank, endpoint)| s.spawn(move || f(rank, endpoint)))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(value) => value,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
