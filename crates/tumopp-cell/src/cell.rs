//! The `Cell` entity.

use std::fmt;
use std::sync::Arc;

use tumopp_core::rates::make_mut;
use tumopp_core::{CellId, CellParams, DriverParams, EventRates, RecordId, SimRng};
use tumopp_lattice::Coord;

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Heritable cell category.  Stem cells never spend proliferation capacity;
/// NonStem cells lose one unit per division.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    Stem,
    NonStem,
}

impl CellType {
    /// Output encoding: 0 = stem, 1 = non-stem.
    pub fn code(self) -> u8 {
        match self {
            CellType::Stem => 0,
            CellType::NonStem => 1,
        }
    }
}

/// The event a cell is scheduled for next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Birth,
    Death,
    Migration,
}

/// Which trait a driver mutation hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraitKind {
    Birth,
    Death,
    Migra,
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TraitKind::Birth => "birth",
            TraitKind::Death => "death",
            TraitKind::Migra => "migra",
        })
    }
}

/// One driver mutation, as recorded in the driver log.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriverEvent {
    /// Cell that acquired the mutation.
    pub id: CellId,
    pub kind: TraitKind,
    /// Gaussian selection coefficient s; the trait was scaled by (1 + s).
    pub coef: f64,
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A live cancer cell.
///
/// The rate record is shared copy-on-write: unmutated relatives point to the
/// same `Arc`, and every `mutate*` call detaches a private copy before
/// writing.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: Coord,
    rates: Arc<EventRates>,
    kind: CellType,
    /// ω — remaining divisions for NonStem cells.
    prolif_capacity: u8,
    next_event: Event,
    /// Migration time accumulated since the last division.
    elapsed: f64,
    id: CellId,
    ancestor: Option<RecordId>,
    time_of_birth: f64,
    time_of_death: f64,
}

impl Cell {
    /// Construct an initial cell (founder or seeded sibling).
    pub fn new(coord: Coord, id: CellId, rates: Arc<EventRates>, max_prolif: u8) -> Self {
        Self {
            coord,
            rates,
            kind: CellType::Stem,
            prolif_capacity: max_prolif,
            next_event: Event::Birth,
            elapsed: 0.0,
            id,
            ancestor: None,
            time_of_birth: 0.0,
            time_of_death: 0.0,
        }
    }

    // ── Getters ───────────────────────────────────────────────────────────

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn ancestor(&self) -> Option<RecordId> {
        self.ancestor
    }

    pub fn kind(&self) -> CellType {
        self.kind
    }

    pub fn prolif_capacity(&self) -> u8 {
        self.prolif_capacity
    }

    pub fn next_event(&self) -> Event {
        self.next_event
    }

    pub fn rates(&self) -> &EventRates {
        &self.rates
    }

    pub fn time_of_birth(&self) -> f64 {
        self.time_of_birth
    }

    pub fn time_of_death(&self) -> f64 {
        self.time_of_death
    }

    // ── Setters used by the driver ────────────────────────────────────────

    pub fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }

    pub fn set_time_of_death(&mut self, t: f64) {
        self.time_of_death = t;
    }

    /// Reset the accumulated migration clock (plateau regime).
    pub fn reset_elapsed(&mut self) {
        self.elapsed = 0.0;
    }

    /// Assume a fresh identity after a division: birth time, newly minted id,
    /// and the frozen pre-division mother as ancestor.  NonStem cells pay one
    /// unit of proliferation capacity here.
    pub fn assume_birth(&mut self, t: f64, id: CellId, ancestor: RecordId) {
        self.time_of_birth = t;
        self.id = id;
        self.ancestor = Some(ancestor);
        if self.kind == CellType::NonStem {
            self.prolif_capacity = self.prolif_capacity.saturating_sub(1);
        }
    }

    // ── Event-time sampling ───────────────────────────────────────────────

    /// Draw waiting times for the three candidate events, set
    /// [`next_event`](Self::next_event), and return the winning dt.
    ///
    /// Birth wins only as the unique minimum; a Bernoulli(α) trial may then
    /// convert it to death on the spot.  Migration accumulates its waiting
    /// time into `elapsed` so the division clock keeps running across moves.
    ///
    /// `positional_value` is reserved for density-dependent slowdowns and is
    /// currently always 1.0.
    pub fn delta_time(
        &mut self,
        positional_value: f64,
        params: &CellParams,
        rng: &mut SimRng,
    ) -> f64 {
        let mut t_birth = f64::INFINITY;
        if self.prolif_capacity > 0 && self.rates.birth > 0.0 {
            let mean = 1.0 / (self.rates.birth * positional_value) - self.elapsed;
            let theta = (mean / params.gamma_shape).max(0.0);
            t_birth = rng.gamma(params.gamma_shape, theta);
        }
        let t_death = if self.rates.death > 0.0 {
            rng.exponential(self.rates.death)
        } else {
            f64::INFINITY
        };
        let t_migra = if self.rates.migra > 0.0 {
            rng.exponential(self.rates.migra)
        } else {
            f64::INFINITY
        };

        if t_birth < t_death && t_birth < t_migra {
            self.next_event = if rng.bernoulli(self.rates.death_prob) {
                Event::Death
            } else {
                Event::Birth
            };
            self.elapsed = 0.0;
            t_birth
        } else if t_death < t_migra {
            self.next_event = Event::Death;
            t_death
        } else {
            self.next_event = Event::Migration;
            self.elapsed += t_migra;
            t_migra
        }
    }

    // ── Division ──────────────────────────────────────────────────────────

    /// Produce a daughter at the mother's coordinate, sharing the rate
    /// record.  A Stem mother begets a Stem daughter with probability
    /// `prob_symmetric` and a NonStem daughter otherwise; the differentiation
    /// draw happens here, before any placement attempt.
    pub fn daughter(&self, params: &CellParams, rng: &mut SimRng) -> Cell {
        let mut kind = self.kind;
        if kind == CellType::Stem && !rng.bernoulli(params.prob_symmetric) {
            kind = CellType::NonStem;
        }
        Cell {
            coord: self.coord,
            rates: Arc::clone(&self.rates),
            kind,
            prolif_capacity: self.prolif_capacity,
            next_event: Event::Birth,
            elapsed: 0.0,
            id: self.id,
            ancestor: self.ancestor,
            time_of_birth: self.time_of_birth,
            time_of_death: 0.0,
        }
    }

    // ── Driver mutations ──────────────────────────────────────────────────

    /// Independently test each trait for a driver mutation and apply any
    /// hits copy-on-write.  The death draw scales both δ and α by the same
    /// (1 + s) factor.
    pub fn mutate(&mut self, driver: &DriverParams, rng: &mut SimRng) -> Vec<DriverEvent> {
        let mut log = Vec::new();
        if rng.bernoulli(driver.rate_birth) {
            let s = rng.normal(driver.mean_birth, driver.sd_birth);
            make_mut(&mut self.rates).birth *= 1.0 + s;
            log.push(DriverEvent { id: self.id, kind: TraitKind::Birth, coef: s });
        }
        if rng.bernoulli(driver.rate_death) {
            let s = rng.normal(driver.mean_death, driver.sd_death);
            let rates = make_mut(&mut self.rates);
            rates.death *= 1.0 + s;
            rates.death_prob *= 1.0 + s;
            log.push(DriverEvent { id: self.id, kind: TraitKind::Death, coef: s });
        }
        if rng.bernoulli(driver.rate_migra) {
            let s = rng.normal(driver.mean_migra, driver.sd_migra);
            make_mut(&mut self.rates).migra *= 1.0 + s;
            log.push(DriverEvent { id: self.id, kind: TraitKind::Migra, coef: s });
        }
        log
    }

    /// Driver mutation on all three traits unconditionally; used for the
    /// single planted mutation at a configured population size.
    pub fn force_mutate(&mut self, driver: &DriverParams, rng: &mut SimRng) -> Vec<DriverEvent> {
        let s_birth = rng.normal(driver.mean_birth, driver.sd_birth);
        let s_death = rng.normal(driver.mean_death, driver.sd_death);
        let s_migra = rng.normal(driver.mean_migra, driver.sd_migra);
        let rates = make_mut(&mut self.rates);
        rates.birth *= 1.0 + s_birth;
        rates.death *= 1.0 + s_death;
        rates.death_prob *= 1.0 + s_death;
        rates.migra *= 1.0 + s_migra;
        vec![
            DriverEvent { id: self.id, kind: TraitKind::Birth, coef: s_birth },
            DriverEvent { id: self.id, kind: TraitKind::Death, coef: s_death },
            DriverEvent { id: self.id, kind: TraitKind::Migra, coef: s_migra },
        ]
    }

    // ── Regime hooks ──────────────────────────────────────────────────────

    /// Matched-rate plateau: raise the death rate to the current birth rate
    /// so net growth is approximately zero.
    pub fn increase_death_rate(&mut self) {
        let rates = make_mut(&mut self.rates);
        rates.death = rates.birth;
    }

    /// Treatment regime: set α = p and immediately re-decide the pending
    /// event as death with probability p, birth otherwise.  The scheduled
    /// event time is untouched.
    pub fn set_cycle_dependent_death(&mut self, p: f64, rng: &mut SimRng) {
        make_mut(&mut self.rates).death_prob = p;
        self.next_event = if rng.bernoulli(p) { Event::Death } else { Event::Birth };
    }
}
