//! `tumopp-lattice` — neighborhood topology and coordinate algebra.
//!
//! The tissue lives on a regular integer lattice.  Three topologies are
//! supported in 2 and 3 dimensions:
//!
//! | Topology  | Neighbors (2-D / 3-D) | Graph distance            |
//! |-----------|-----------------------|---------------------------|
//! | Neumann   | 4 / 6                 | Manhattan                 |
//! | Moore     | 8 / 26                | Chebyshev                 |
//! | Hexagonal | 6 / 18                | axial-cube hex distance   |
//!
//! A [`Lattice`] is built once from `(Topology, dimensions)` with no
//! randomness; its direction table is fixed and deterministic, which the
//! simulation relies on for reproducible displacement decisions.

pub mod coord;
pub mod lattice;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use lattice::Lattice;
