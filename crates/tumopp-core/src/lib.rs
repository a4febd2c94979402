//! `tumopp-core` — foundational types for the `rust_tumopp` simulator.
//!
//! This crate is a dependency of every other `tumopp-*` crate.  It
//! intentionally has no `tumopp-*` dependencies and minimal external ones
//! (only `rand`/`rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`ids`]     | `CellId`, `RecordId`                                |
//! | [`rng`]     | `SimRng` — the single per-run random source         |
//! | [`rates`]   | `EventRates`, the heritable copy-on-write record    |
//! | [`params`]  | `CellParams`, `DriverParams`, `TissueParams`, `RunParams` |
//! | [`error`]   | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod error;
pub mod ids;
pub mod params;
pub mod rates;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CellId, RecordId};
pub use params::{
    CellParams, DisplacementPath, DriverParams, LocalDensity, RunParams, SamplingScheme,
    TissueParams, Topology,
};
pub use rates::EventRates;
pub use rng::SimRng;
