//! Plain data rows extracted from a finished `Tissue`.

use tumopp_cell::{Cell, FrozenCell, Genealogy};
use tumopp_tissue::{PairwiseDistance, Tissue};

/// One cell as written to the population and snapshot tables.
///
/// `z` is 0 for 2-D lattices; `ancestor` is 0 for the founder; `kind` is
/// 0 = stem, 1 = non-stem; `omega` is the proliferation capacity at the
/// moment the row was taken.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRow {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub id: u32,
    pub ancestor: u32,
    pub birth: f64,
    pub death: f64,
    pub beta: f64,
    pub delta: f64,
    pub alpha: f64,
    pub rho: f64,
    pub kind: u8,
    pub omega: u8,
}

impl CellRow {
    pub fn from_frozen(record: &FrozenCell, genealogy: &Genealogy) -> Self {
        Self {
            x: record.coord.x(),
            y: record.coord.y(),
            z: record.coord.z(),
            id: record.id.0,
            ancestor: record.ancestor.map_or(0, |a| genealogy.get(a).id.0),
            birth: record.time_of_birth,
            death: record.time_of_death,
            beta: record.rates.birth,
            delta: record.rates.death,
            alpha: record.rates.death_prob,
            rho: record.rates.migra,
            kind: record.kind.code(),
            omega: record.prolif_capacity,
        }
    }

    pub fn from_cell(cell: &Cell, genealogy: &Genealogy) -> Self {
        Self {
            x: cell.coord().x(),
            y: cell.coord().y(),
            z: cell.coord().z(),
            id: cell.id().0,
            ancestor: cell.ancestor().map_or(0, |a| genealogy.get(a).id.0),
            birth: cell.time_of_birth(),
            death: cell.time_of_death(),
            beta: cell.rates().birth,
            delta: cell.rates().death,
            alpha: cell.rates().death_prob,
            rho: cell.rates().migra,
            kind: cell.kind().code(),
            omega: cell.prolif_capacity(),
        }
    }
}

/// One driver mutation: which cell, which trait, what coefficient.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverRow {
    pub id: u32,
    pub kind: &'static str,
    pub coef: f64,
}

/// One sampled pair of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRow {
    pub genealogy: usize,
    pub graph: u32,
    pub euclidean: f64,
}

// ── Extraction ────────────────────────────────────────────────────────────────

/// Every cell that ever existed: the frozen history first, then the
/// survivors in ascending id order.
pub fn population_rows(tissue: &Tissue) -> Vec<CellRow> {
    let genealogy = tissue.genealogy();
    let mut rows: Vec<CellRow> = genealogy
        .iter()
        .map(|record| CellRow::from_frozen(record, genealogy))
        .collect();
    rows.extend(
        tissue
            .live_cells()
            .into_iter()
            .map(|cell| CellRow::from_cell(cell, genealogy)),
    );
    rows
}

/// Snapshot blocks flattened to `(time, row)` pairs.
pub fn snapshot_rows(tissue: &Tissue) -> Vec<(f64, CellRow)> {
    let genealogy = tissue.genealogy();
    tissue
        .snapshots()
        .iter()
        .flat_map(|block| {
            block
                .cells
                .iter()
                .map(move |record| (block.time, CellRow::from_frozen(record, genealogy)))
        })
        .collect()
}

/// The driver-mutation log in event order.
pub fn driver_rows(tissue: &Tissue) -> Vec<DriverRow> {
    tissue
        .drivers()
        .iter()
        .map(|event| DriverRow {
            id: event.id.0,
            kind: match event.kind {
                tumopp_cell::TraitKind::Birth => "birth",
                tumopp_cell::TraitKind::Death => "death",
                tumopp_cell::TraitKind::Migra => "migra",
            },
            coef: event.coef,
        })
        .collect()
}

/// Pairwise-distance measurements as rows.
pub fn distance_rows(pairs: &[PairwiseDistance]) -> Vec<DistanceRow> {
    pairs
        .iter()
        .map(|pair| DistanceRow {
            genealogy: pair.genealogy,
            graph: pair.graph,
            euclidean: pair.euclidean,
        })
        .collect()
}
