//! The genealogy arena: every cell that ever existed, frozen.
//!
//! # Why an arena
//!
//! The genealogy is a reverse tree — children point at parents, never the
//! other way — and records are immutable once written.  Storing frozen
//! snapshots in a `Vec` indexed by `RecordId` gives cheap appends, cheap
//! upward walks, and no reference-cycle bookkeeping.  A division freezes the
//! pre-division mother *before* either offspring mutates, so historical
//! records are immune to later rate changes by construction.

use std::collections::HashSet;
use std::sync::Arc;

use tumopp_core::{CellId, EventRates, RecordId};
use tumopp_lattice::Coord;

use crate::{Cell, CellType};

/// An immutable snapshot of a cell at the moment it left the live
/// population (division, death, or end of run).
#[derive(Clone, Debug)]
pub struct FrozenCell {
    pub id: CellId,
    pub ancestor: Option<RecordId>,
    pub coord: Coord,
    pub rates: Arc<EventRates>,
    pub kind: CellType,
    pub prolif_capacity: u8,
    pub time_of_birth: f64,
    pub time_of_death: f64,
}

impl FrozenCell {
    /// Snapshot a live cell as it currently stands.
    pub fn of(cell: &Cell) -> Self {
        Self {
            id: cell.id(),
            ancestor: cell.ancestor(),
            coord: cell.coord(),
            rates: Arc::new(cell.rates().clone()),
            kind: cell.kind(),
            prolif_capacity: cell.prolif_capacity(),
            time_of_birth: cell.time_of_birth(),
            time_of_death: cell.time_of_death(),
        }
    }
}

/// Append-only store of [`FrozenCell`] records.
#[derive(Default)]
pub struct Genealogy {
    records: Vec<FrozenCell>,
}

impl Genealogy {
    pub fn with_capacity(n: usize) -> Self {
        Self { records: Vec::with_capacity(n) }
    }

    /// Freeze `cell` with the given death time and return its record id.
    pub fn freeze(&mut self, cell: &Cell, time_of_death: f64) -> RecordId {
        let mut record = FrozenCell::of(cell);
        record.time_of_death = time_of_death;
        let id = RecordId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    pub fn get(&self, id: RecordId) -> &FrozenCell {
        &self.records[id.index()]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrozenCell> {
        self.records.iter()
    }

    // ── Lineage queries ───────────────────────────────────────────────────

    /// All ancestral ids of `cell`, including its own.
    pub fn traceback(&self, cell: &Cell) -> HashSet<CellId> {
        let mut ids = HashSet::new();
        ids.insert(cell.id());
        let mut next = cell.ancestor();
        while let Some(record_id) = next {
            let record = self.get(record_id);
            ids.insert(record.id);
            next = record.ancestor;
        }
        ids
    }

    /// Number of divisions on the path between two live cells through their
    /// most recent common ancestor.  Zero for identical ids; mother and
    /// daughter of the same division are at length 2.
    pub fn branch_length(&self, a: &Cell, b: &Cell) -> usize {
        if a.id() == b.id() {
            return 0;
        }
        let lineage_a = self.traceback(a);
        let mut length = 2usize;
        let mut mrca = CellId::FOUNDER;
        let mut next = b.ancestor();
        while let Some(record_id) = next {
            let record = self.get(record_id);
            if lineage_a.contains(&record.id) {
                mrca = record.id;
                break;
            }
            length += 1;
            next = record.ancestor;
        }
        let mut next = a.ancestor();
        while let Some(record_id) = next {
            let record = self.get(record_id);
            if record.id <= mrca {
                break;
            }
            length += 1;
            next = record.ancestor;
        }
        length
    }

    /// Genotype of `cell` over the given mutant ids: 1 where the mutant id
    /// appears in the cell's traceback, 0 otherwise.
    pub fn has_mutations_of(&self, cell: &Cell, mutants: &[CellId]) -> Vec<u8> {
        let lineage = self.traceback(cell);
        mutants
            .iter()
            .map(|id| u8::from(lineage.contains(id)))
            .collect()
    }
}
