//! `tumopp-tissue` — the simulation driver.
//!
//! A `Tissue` owns everything a run needs: the lattice, the live-cell store
//! and its spatial occupancy index, the continuous-time event queue, the
//! genealogy of frozen snapshots, and the run RNG.  The main loop pops the
//! earliest event and enacts a birth (with displacement of crowded
//! neighbors), a death, or a migration, rescheduling cells as it goes.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`queue`]     | Time-ordered multimap of pending cell events         |
//! | [`occupancy`] | Coordinate → live cell spatial index                 |
//! | [`placement`] | Displacement policies (push cascades, strolls, …)    |
//! | [`tissue`]    | `Tissue`: construction, `grow`, `plateau`, `treatment` |
//! | [`sampling`]  | Post-run sampling, pairwise distances, neutral mutations |
//! | [`error`]     | `TissueError`, `TissueResult`                        |

pub mod error;
pub mod occupancy;
pub mod placement;
pub mod queue;
pub mod sampling;
pub mod tissue;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TissueError, TissueResult};
pub use occupancy::{CellKey, Occupancy};
pub use queue::EventQueue;
pub use sampling::PairwiseDistance;
pub use tissue::{SnapshotBlock, Tissue};
