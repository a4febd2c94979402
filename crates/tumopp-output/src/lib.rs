//! `tumopp-output` — rendering of simulation results.
//!
//! All artifacts are tab-separated text with a header row, except the
//! segregating-sites report which replicates the classical `ms` block
//! format.  Stringification happens strictly post-run; nothing here is
//! called from inside the event loop.
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`row`]   | Plain row structs and their extraction from a `Tissue`    |
//! | [`tsv`]   | `TsvWriter`: population / snapshots / drivers / distances |
//! | [`ms`]    | `write_ms`: segregating sites in ms format                |
//! | [`error`] | `OutputError`, `OutputResult`                             |

pub mod error;
pub mod ms;
pub mod row;
pub mod tsv;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use ms::write_ms;
pub use row::{
    distance_rows, driver_rows, population_rows, snapshot_rows, CellRow, DistanceRow, DriverRow,
};
pub use tsv::TsvWriter;
