//! `tumopp-cell` — the cell entity and the genealogy it leaves behind.
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`cell`]      | `Cell`: state, event-time sampling, division, drivers |
//! | [`genealogy`] | Append-only arena of frozen snapshots; lineage queries |
//!
//! A live `Cell` carries a shared [`EventRates`](tumopp_core::EventRates)
//! handle and a link (`RecordId`) to the frozen snapshot of its mother at
//! the division that produced it.  Snapshots are immutable once written, so
//! lineage queries (`traceback`, `branch_length`, `has_mutations_of`) never
//! observe later driver mutations.

pub mod cell;
pub mod genealogy;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, CellType, DriverEvent, Event, TraitKind};
pub use genealogy::{FrozenCell, Genealogy};
