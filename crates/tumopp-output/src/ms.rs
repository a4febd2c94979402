//! Segregating sites in the classical `ms` block format.

use std::io::{self, Write};

/// Write one replicate block.
///
/// `matrix` is cell-major: one row per sampled cell, each row holding the
/// 0/1 genotype over the segregating sites (as produced by
/// `Tissue::segregating_sites`).  The block looks like:
///
/// ```text
///
/// //
/// segsites: S
/// positions: 0 0 ... 0
/// 0110...
/// 1010...
/// ```
///
/// Positions are placeholder integers — the simulator tracks mutation
/// identities, not genomic coordinates.  With zero segregating sites the
/// positions and genotype lines are replaced by a single blank line.
pub fn write_ms<W: Write>(out: &mut W, matrix: &[Vec<u8>]) -> io::Result<()> {
    let num_sites = matrix.first().map_or(0, Vec::len);
    write!(out, "\n//\nsegsites: {num_sites}\n")?;
    if num_sites == 0 {
        writeln!(out)?;
        return Ok(());
    }
    let positions = vec!["0"; num_sites].join(" ");
    writeln!(out, "positions: {positions}")?;
    for row in matrix {
        let line: String = row.iter().map(|&bit| char::from(b'0' + bit)).collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}
