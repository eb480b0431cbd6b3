// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Core — Diagnostics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Injectable debug rendering of local domains.
//!
//! Nothing here is referenced by the distribution protocol; callers
//! wire a writer in when they want to inspect what each rank holds.

use std::io::{self, Write};

use ndarray::Array2;

use crate::domain::LocalDomain;

/// Render one rank's owned blocks.
pub fn write_domain<W: Write>(domain: &LocalDomain, out: &mut W) -> io::Result<()> {
    writeln!(out, "----------------------")?;
    writeln!(
        out,
        "Rank {} local domain ({}x{} blocks of {}x{}):",
        domain.grid().rank,
        domain.nbp(),
        domain.nbq(),
        domain.b(),
        domain.b()
    )?;
    for ((lbi, lbj), block) in domain.blocks() {
        write!(out, "\tBlock ({lbi}, {lbj}):")?;
        for value in block {
            write!(out, " {value:6.1}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render every rank's domain in rank order, one after another. The
/// in-process counterpart of a barrier-sequenced per-rank dump.
pub fn dump_all_ranks<W: Write>(domains: &[LocalDomain], out: &mut W) -> io::Result<()> {
    for domain in domains {
        write_domain(domain, out)?;
    }
    Ok(())
}

/// Render a full matrix row by row.
pub fn write_matrix<W: Write>(matrix: &Array2<f64>, out: &mut W) -> io::Result<()> {
    for row in matrix.outer_iter() {
        for value in row {
            write!(out, " {value:6.1}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Layout;
    use crate::scatter::scatter_serial;

    #[test]
    fn test_dump_lists_every_block_in_rank_order() {
        let global = Array2::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as f64);
        let layout = Layout::new(4, 2, 0).expect("layout");
        let domains = scatter_serial(&global, layout, 2, 2).expect("scatter");

        let mut out = Vec::new();
        dump_all_ranks(&domains, &mut out).expect("dump");
        let text = String::from_utf8(out).expect("utf8");

        for rank in 0..4 {
            assert!(text.contains(&format!("Rank {rank} local domain")));
        }
        // Rank 0 owns global block (0, 0); its first element is 0.0.
        assert!(text.contains("Block (0, 0):    0.0"));
    }

    #[test]
    fn test_write_matrix_shape() {
        let matrix = Array2::from_elem((2, 3), 1.5);
        let mut out = Vec::new();
        write_matrix(&matrix, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.matches("1.5").count(), 6);
    }
}
