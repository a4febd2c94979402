//! The `Tissue` struct and its event loop.

use slotmap::SlotMap;
use tracing::{debug, info};

use tumopp_cell::{Cell, DriverEvent, Event, FrozenCell, Genealogy};
use tumopp_core::{CellId, CellParams, DriverParams, SimRng, TissueParams};
use tumopp_lattice::{Coord, Lattice};

use crate::placement::Placement;
use crate::{CellKey, EventQueue, Occupancy, TissueResult};

/// All live cells at one recorded instant.
pub struct SnapshotBlock {
    pub time: f64,
    pub cells: Vec<FrozenCell>,
}

/// A growing cell population on a lattice.
///
/// The occupancy index holds the canonical handle to each live cell; the
/// event queue holds a secondary handle; the genealogy holds frozen
/// snapshots of everything that ever lived.  One RNG drives the whole run.
pub struct Tissue {
    pub(crate) cell_params: CellParams,
    pub(crate) driver_params: DriverParams,
    pub(crate) lattice: Lattice,
    pub(crate) placement: Placement,

    pub(crate) cells: SlotMap<CellKey, Cell>,
    pub(crate) occupancy: Occupancy,
    pub(crate) queue: EventQueue,
    pub(crate) genealogy: Genealogy,
    pub(crate) rng: SimRng,

    /// Continuous simulation time, advanced by the event loop.
    time: f64,
    /// Total ids minted; the next division takes `id_tail + 1`.
    id_tail: u32,
    /// Counter of periodic snapshots; the next boundary is
    /// `i_snapshot * snapshot_interval`.
    i_snapshot: u32,

    snapshots: Vec<SnapshotBlock>,
    drivers: Vec<DriverEvent>,
}

impl Tissue {
    /// Build the lattice and placement policy, then seed the initial
    /// population on `sphere(initial_size)`.
    ///
    /// For `initial_size > 1` the founder is divided repeatedly at t = 0,
    /// each seeding division freezing an ancestor exactly like a live one,
    /// so the genealogy is well-formed from the start.
    pub fn new(
        tissue: &TissueParams,
        cell: &CellParams,
        driver: &DriverParams,
        rng: SimRng,
    ) -> TissueResult<Self> {
        tissue.validate()?;
        cell.validate()?;
        driver.validate()?;
        let lattice = Lattice::new(tissue.coordinate, tissue.dimensions)?;
        let placement = Placement::resolve(tissue.local_density, tissue.displacement)?;

        let mut this = Self {
            cell_params: cell.clone(),
            driver_params: driver.clone(),
            lattice,
            placement,
            cells: SlotMap::with_key(),
            occupancy: Occupancy::new(),
            queue: EventQueue::new(),
            genealogy: Genealogy::with_capacity(2 * tissue.initial_size),
            rng,
            time: 0.0,
            id_tail: 0,
            i_snapshot: 1,
            snapshots: Vec::new(),
            drivers: Vec::new(),
        };

        let seeds = this.lattice.sphere(tissue.initial_size);
        this.id_tail += 1;
        let founder = Cell::new(
            seeds[0],
            CellId(this.id_tail),
            this.cell_params.initial_rates().shared(),
            this.cell_params.max_prolif,
        );
        let key = this.cells.insert(founder);
        this.occupancy.swap_in(seeds[0], key);

        while this.cells.len() < tissue.initial_size {
            for key in this.live_keys_by_id() {
                let coord = seeds[this.cells.len()];
                let mut daughter = this.cells[key].daughter(&this.cell_params, &mut this.rng);
                daughter.set_coord(coord);
                let ancestor = this.genealogy.freeze(&this.cells[key], 0.0);
                this.id_tail += 1;
                let mother_id = CellId(this.id_tail);
                this.cells[key].assume_birth(0.0, mother_id, ancestor);
                this.id_tail += 1;
                daughter.assume_birth(0.0, CellId(this.id_tail), ancestor);
                let daughter_key = this.cells.insert(daughter);
                this.occupancy.swap_in(coord, daughter_key);
                if this.cells.len() >= tissue.initial_size {
                    break;
                }
            }
        }

        for key in this.live_keys_by_id() {
            this.queue_push(key);
        }
        Ok(this)
    }

    // ── Getters ───────────────────────────────────────────────────────────

    /// Live population size.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total number of cell identities minted so far.
    pub fn id_tail(&self) -> u32 {
        self.id_tail
    }

    pub fn dimensions(&self) -> usize {
        self.lattice.dimensions()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn genealogy(&self) -> &Genealogy {
        &self.genealogy
    }

    pub fn drivers(&self) -> &[DriverEvent] {
        &self.drivers
    }

    pub fn snapshots(&self) -> &[SnapshotBlock] {
        &self.snapshots
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn cell(&self, key: CellKey) -> &Cell {
        &self.cells[key]
    }

    /// Live cells in ascending id order — the deterministic base order for
    /// output and sampling.
    pub fn live_cells(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by_key(|c| c.id());
        cells
    }

    /// Reclaim the run RNG, e.g. to seed a fresh tissue after extinction.
    pub fn into_rng(self) -> SimRng {
        self.rng
    }

    pub(crate) fn live_keys_by_id(&self) -> Vec<CellKey> {
        let mut keys: Vec<CellKey> = self.cells.keys().collect();
        keys.sort_by_key(|&k| self.cells[k].id());
        keys
    }

    // ── Main loop ─────────────────────────────────────────────────────────

    /// Run the event loop until the population reaches `max_size`, the clock
    /// passes `max_time`, or the population goes extinct.
    ///
    /// Returns `true` on a cap (normal termination with the breaking event
    /// left queued, so the regimes can resume the loop) and `false` on
    /// extinction; the caller's policy is to restart extinct runs.
    pub fn grow(
        &mut self,
        max_size: usize,
        max_time: f64,
        snapshot_interval: f64,
        mut record_early_growth: usize,
        mut mutation_timing: usize,
    ) -> bool {
        info!(
            size = self.cells.len(),
            max_size, max_time, "entering growth loop"
        );
        if record_early_growth > 0 {
            self.append_snapshot();
        }
        let mut success = false;
        let mut time_snapshot = f64::from(self.i_snapshot) * snapshot_interval;
        let mut iterations: u64 = 0;

        while let Some((t_next, key)) = self.queue.peek_min() {
            iterations += 1;
            if iterations % 1000 == 0 {
                debug!(size = self.cells.len(), time = t_next, "growing");
            }
            self.time = t_next;
            if t_next > max_time || self.cells.len() >= max_size {
                success = true;
                break;
            }
            while self.time > time_snapshot {
                self.append_snapshot();
                self.i_snapshot += 1;
                time_snapshot = f64::from(self.i_snapshot) * snapshot_interval;
            }
            self.queue.pop_min();

            match self.cells[key].next_event() {
                Event::Birth => {
                    let daughter = self.cells[key].daughter(&self.cell_params, &mut self.rng);
                    let Some(daughter_key) = self.place_daughter(daughter) else {
                        // Displacement rejected: no id, no genealogy write.
                        self.queue_push(key);
                        continue;
                    };
                    let t = self.time;
                    let ancestor = self.genealogy.freeze(&self.cells[key], t);
                    self.id_tail += 1;
                    let mother_id = CellId(self.id_tail);
                    self.cells[key].assume_birth(t, mother_id, ancestor);
                    self.id_tail += 1;
                    self.cells[daughter_key].assume_birth(t, CellId(self.id_tail), ancestor);

                    let log = self.cells[key].mutate(&self.driver_params, &mut self.rng);
                    self.drivers.extend(log);
                    let log = self.cells[daughter_key].mutate(&self.driver_params, &mut self.rng);
                    self.drivers.extend(log);
                    if self.cells.len() > mutation_timing {
                        // Single-shot: fires once, then rearms to infinity.
                        mutation_timing = usize::MAX;
                        let log =
                            self.cells[daughter_key].force_mutate(&self.driver_params, &mut self.rng);
                        self.drivers.extend(log);
                    }
                    self.queue_push(key);
                    self.queue_push(daughter_key);
                }
                Event::Death => {
                    self.cells[key].set_time_of_death(self.time);
                    if let Some(cell) = self.cells.remove(key) {
                        self.occupancy.remove(cell.coord());
                        self.genealogy.freeze(&cell, self.time);
                    }
                    if self.cells.is_empty() {
                        break;
                    }
                }
                Event::Migration => {
                    self.migrate(key);
                    self.queue_push(key);
                }
            }

            if self.cells.len() < record_early_growth {
                self.append_snapshot();
            } else {
                // Disarm so a later dip below the threshold cannot restart
                // early-growth recording.
                record_early_growth = 0;
            }
        }
        info!(
            size = self.cells.len(),
            time = self.time,
            success,
            "growth loop finished"
        );
        success
    }

    // ── Post-growth regimes ───────────────────────────────────────────────

    /// Stable-turnover regime: match every live cell's death rate to its
    /// birth rate (net growth ≈ 0), reset migration clocks, rebuild the
    /// queue, and run for `duration` more time units.
    pub fn plateau(&mut self, duration: f64) {
        info!(size = self.cells.len(), duration, "entering plateau");
        self.queue.clear();
        for key in self.live_keys_by_id() {
            self.cells[key].increase_death_rate();
            self.cells[key].reset_elapsed();
            self.queue_push(key);
        }
        self.grow(usize::MAX, self.time + duration, f64::INFINITY, 0, usize::MAX);
    }

    /// Treatment regime: give all but `num_resistant` randomly chosen live
    /// cells a cycle-dependent death probability, then let the loop continue
    /// with a small size margin so the resistant lineages can regrow.
    ///
    /// Cells are enumerated from the event queue (time order) before the
    /// shuffle so the choice of survivors is reproducible.
    pub fn treatment(&mut self, death_prob: f64, num_resistant: usize) {
        info!(
            size = self.cells.len(),
            death_prob, num_resistant, "entering treatment"
        );
        let original_size = self.cells.len();
        let mut keys: Vec<CellKey> = self.queue.iter().map(|(_, key)| key).collect();
        self.rng.shuffle(&mut keys);
        for &key in keys.iter().skip(num_resistant) {
            self.cells[key].set_cycle_dependent_death(death_prob, &mut self.rng);
        }
        let margin = 10 * num_resistant + 10;
        self.grow(original_size + margin, f64::MAX, f64::INFINITY, 0, usize::MAX);
    }

    // ── Event mechanics ───────────────────────────────────────────────────

    /// Sample the cell's next event and schedule it at `time + dt`.
    pub(crate) fn queue_push(&mut self, key: CellKey) {
        let positional = self.positional_value(self.cells[key].coord());
        let dt = self.cells[key].delta_time(positional, &self.cell_params, &mut self.rng);
        self.queue.push(self.time + dt, key);
    }

    /// Move to a uniformly random neighbor; on collision the two cells swap
    /// sites.  Migration mints no ids and writes no genealogy.
    pub(crate) fn migrate(&mut self, key: CellKey) {
        let origin = self.cells[key].coord();
        self.occupancy.remove(origin);
        let target = self.lattice.random_neighbor(origin, &mut self.rng);
        self.cells[key].set_coord(target);
        if let Some(displaced) = self.occupancy.swap_in(target, key) {
            self.cells[displaced].set_coord(origin);
            self.occupancy.swap_in(origin, displaced);
        }
    }

    /// Hook for density-dependent event slowdowns; currently uniform.
    fn positional_value(&self, _coord: Coord) -> f64 {
        1.0
    }

    fn append_snapshot(&mut self) {
        let cells = self
            .live_cells()
            .into_iter()
            .map(FrozenCell::of)
            .collect();
        self.snapshots.push(SnapshotBlock { time: self.time, cells });
    }
}
