//! `EventQueue` — time-ordered queue of pending cell events.
//!
//! # Why this exists
//!
//! The simulation is event-driven: each live cell has exactly one pending
//! event (birth, death, or migration) at a sampled future time.  The driver
//! repeatedly needs the globally earliest event, and the post-growth regimes
//! need to rebuild (`plateau`) or enumerate (`treatment`) the pending set.
//!
//! # Representation
//!
//! A `BTreeMap` keyed by `(time, sequence)`.  Event times are continuous and
//! may collide, so a monotone sequence number disambiguates equal keys and
//! fixes the pop order to insertion order — a multimap with deterministic
//! ties.  `OrderedFloat` supplies the total order `BTreeMap` needs; the
//! scheduler itself never produces NaN.

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use crate::CellKey;

/// Time-ordered multimap of `(event_time, cell)` entries.
#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<(OrderedFloat<f64>, u64), CellKey>,
    seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `cell` at absolute time `time`.
    pub fn push(&mut self, time: f64, cell: CellKey) {
        self.inner.insert((OrderedFloat(time), self.seq), cell);
        self.seq += 1;
    }

    /// The earliest entry without removing it.
    pub fn peek_min(&self) -> Option<(f64, CellKey)> {
        self.inner
            .iter()
            .next()
            .map(|(&(time, _), &cell)| (time.into_inner(), cell))
    }

    /// Remove and return the earliest entry.
    pub fn pop_min(&mut self) -> Option<(f64, CellKey)> {
        self.inner
            .pop_first()
            .map(|((time, _), cell)| (time.into_inner(), cell))
    }

    /// Drop every pending event (plateau rebuilds the queue from scratch).
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate entries in key order.  This is the deterministic enumeration
    /// of the live population used by the treatment regime.
    pub fn iter(&self) -> impl Iterator<Item = (f64, CellKey)> + '_ {
        self.inner
            .iter()
            .map(|(&(time, _), &cell)| (time.into_inner(), cell))
    }
}
