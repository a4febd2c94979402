//! The heritable event-rate record.
//!
//! # Copy-on-write sharing
//!
//! Sibling lineages that never mutate share one `Arc<EventRates>`.  Any
//! driver mutation clones the record, edits the clone, and swaps the handle —
//! ancestors and unmutated relatives keep observing the original values.
//! `EventRates` itself has no interior mutability, so aliased modification is
//! impossible by construction.

use std::sync::Arc;

/// Per-lineage event rates: birth β, death δ, death-on-division α, migration ρ.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRates {
    /// β — birth rate.
    pub birth: f64,
    /// δ — death rate.
    pub death: f64,
    /// α — probability that a scheduled division resolves to death instead.
    pub death_prob: f64,
    /// ρ — migration rate.
    pub migra: f64,
}

impl EventRates {
    pub fn new(birth: f64, death: f64, death_prob: f64, migra: f64) -> Self {
        Self { birth, death, death_prob, migra }
    }

    /// Wrap in a fresh shared handle.
    pub fn shared(self) -> Arc<EventRates> {
        Arc::new(self)
    }
}

impl Default for EventRates {
    /// Pure birth process: β = 1, everything else 0.
    fn default() -> Self {
        Self { birth: 1.0, death: 0.0, death_prob: 0.0, migra: 0.0 }
    }
}

/// Detach `rates` for writing: clone the record and return a mutable
/// reference to the private copy, replacing the shared handle in place.
pub fn make_mut(rates: &mut Arc<EventRates>) -> &mut EventRates {
    Arc::make_mut(rates)
}
