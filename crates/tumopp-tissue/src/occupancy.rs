//! `Occupancy` — the coordinate → live-cell spatial index.
//!
//! Live cells are stored in a `SlotMap` (stable keys survive the constant
//! insertion and removal churn); the occupancy index maps each occupied
//! lattice site to the key of the cell sitting on it.  At most one live cell
//! per coordinate, by construction: insertion is either a checked
//! `try_place` (fails on conflict) or an explicit `swap_in` (evicts and
//! returns the previous occupant, which displacement cascades then keep
//! moving).

use std::collections::HashMap;

use slotmap::new_key_type;
use tumopp_lattice::Coord;

new_key_type! {
    /// Stable handle of a live cell in the tissue's slot map.
    pub struct CellKey;
}

/// Spatial hash of the live population.
#[derive(Default)]
pub struct Occupancy {
    map: HashMap<Coord, CellKey>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The occupant of `coord`, if any.
    pub fn find(&self, coord: Coord) -> Option<CellKey> {
        self.map.get(&coord).copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.map.contains_key(&coord)
    }

    /// Claim an empty site.  Returns `false` (and changes nothing) if the
    /// site is already occupied.
    pub fn try_place(&mut self, coord: Coord, cell: CellKey) -> bool {
        match self.map.entry(coord) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(cell);
                true
            }
        }
    }

    /// Put `cell` on `coord` unconditionally, returning the evicted previous
    /// occupant if the site was taken.
    pub fn swap_in(&mut self, coord: Coord, cell: CellKey) -> Option<CellKey> {
        self.map.insert(coord, cell)
    }

    /// Free a site.
    pub fn remove(&mut self, coord: Coord) -> Option<CellKey> {
        self.map.remove(&coord)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
