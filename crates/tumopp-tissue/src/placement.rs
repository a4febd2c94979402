//! Displacement policies: where a daughter lands when its site is taken.
//!
//! A policy is the product of a local-density effect (does crowding suppress
//! the birth?) and a displacement path (how displaced cells make room).  Only
//! some combinations are defined:
//!
//! | density \ path | random | mindrag | minstraight | roulette | stroll |
//! |----------------|--------|---------|-------------|----------|--------|
//! | const          | push   | push    | push        | push     | stroll |
//! | step           | gated  | adjacent-only | —     | —        | —      |
//! | linear         | probabilistic | single-neighbor | — | —   | —      |
//!
//! Rejection is a first-class outcome, not an error: `place_daughter`
//! returns `None`, the driver reschedules the mother, and nothing else
//! happens — no id is minted and no genealogy record is written.

use tumopp_cell::Cell;
use tumopp_core::{DisplacementPath, LocalDensity};
use tumopp_lattice::Coord;

use crate::{CellKey, Tissue, TissueError, TissueResult};

/// Breadth cap on the nearest-empty direction search.
const SEARCH_MAX: usize = 26;

/// The closed set of supported (density, path) behaviors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// const/random — push in a uniformly random direction.
    PushRandom,
    /// const/mindrag — push, re-aiming at the nearest empty site each step.
    PushMindrag,
    /// const/minstraight — push in the initially nearest-empty direction.
    PushMinstraight,
    /// const/roulette — direction weighted by 1/steps-to-empty.
    PushRoulette,
    /// const/stroll — try adjacent insertion at every step of the push.
    Stroll,
    /// step/random — reject unless an adjacent site is empty, then push.
    StepRandom,
    /// step/mindrag — insert into an adjacent empty site or reject.
    StepMindrag,
    /// linear/random — push with probability = empty-neighbor fraction.
    LinearRandom,
    /// linear/mindrag — single uniform-neighbor insertion, no cascade.
    LinearMindrag,
}

impl Placement {
    /// Validate a configuration pair against the table above.
    pub(crate) fn resolve(
        density: LocalDensity,
        path: DisplacementPath,
    ) -> TissueResult<Placement> {
        use DisplacementPath as P;
        use LocalDensity as D;
        match (density, path) {
            (D::Const, P::Random) => Ok(Placement::PushRandom),
            (D::Const, P::Mindrag) => Ok(Placement::PushMindrag),
            (D::Const, P::Minstraight) => Ok(Placement::PushMinstraight),
            (D::Const, P::Roulette) => Ok(Placement::PushRoulette),
            (D::Const, P::Stroll) => Ok(Placement::Stroll),
            (D::Step, P::Random) => Ok(Placement::StepRandom),
            (D::Step, P::Mindrag) => Ok(Placement::StepMindrag),
            (D::Linear, P::Random) => Ok(Placement::LinearRandom),
            (D::Linear, P::Mindrag) => Ok(Placement::LinearMindrag),
            _ => Err(TissueError::UnsupportedPlacement { density, path }),
        }
    }
}

impl Tissue {
    /// Place a newborn daughter (currently at her mother's coordinate).
    ///
    /// Returns the daughter's key on success, `None` when the policy rejects
    /// the birth.  A rejected daughter is dropped without entering any
    /// index.
    pub(crate) fn place_daughter(&mut self, daughter: Cell) -> Option<CellKey> {
        match self.placement {
            Placement::PushRandom => {
                let direction = self.lattice.random_direction(&mut self.rng);
                Some(self.push(daughter, direction))
            }
            Placement::PushMindrag => Some(self.push_minimum_drag(daughter)),
            Placement::PushMinstraight => {
                let direction = self.to_nearest_empty(daughter.coord());
                Some(self.push(daughter, direction))
            }
            Placement::PushRoulette => {
                let direction = self.roulette_direction(daughter.coord());
                Some(self.push(daughter, direction))
            }
            Placement::Stroll => {
                let direction = self.lattice.random_direction(&mut self.rng);
                Some(self.stroll(daughter, direction))
            }
            Placement::StepRandom => {
                if self.num_empty_neighbors(daughter.coord()) == 0 {
                    return None;
                }
                let direction = self.lattice.random_direction(&mut self.rng);
                Some(self.push(daughter, direction))
            }
            Placement::StepMindrag => {
                let key = self.cells.insert(daughter);
                if self.insert_adjacent(key) {
                    Some(key)
                } else {
                    self.cells.remove(key);
                    None
                }
            }
            Placement::LinearRandom => {
                let prob = self.proportion_empty_neighbors(daughter.coord());
                if self.rng.canonical() < prob {
                    let direction = self.lattice.random_direction(&mut self.rng);
                    Some(self.push(daughter, direction))
                } else {
                    None
                }
            }
            Placement::LinearMindrag => {
                let target = self
                    .lattice
                    .random_neighbor(daughter.coord(), &mut self.rng);
                if self.occupancy.contains(target) {
                    return None;
                }
                let mut daughter = daughter;
                daughter.set_coord(target);
                let key = self.cells.insert(daughter);
                self.occupancy.swap_in(target, key);
                Some(key)
            }
        }
    }

    // ── Push cascades ─────────────────────────────────────────────────────

    /// Step the moving cell by `direction`; whoever occupies the next site
    /// is evicted and becomes the mover, until a step lands on empty ground.
    /// Exactly one net insertion.
    pub(crate) fn push(&mut self, daughter: Cell, direction: Coord) -> CellKey {
        let daughter_key = self.cells.insert(daughter);
        let mut moving = daughter_key;
        loop {
            let next = self.cells[moving].coord() + direction;
            self.cells[moving].set_coord(next);
            match self.occupancy.swap_in(next, moving) {
                None => break,
                Some(evicted) => moving = evicted,
            }
        }
        daughter_key
    }

    /// Push, but re-aim every step at the currently nearest empty site.
    pub(crate) fn push_minimum_drag(&mut self, daughter: Cell) -> CellKey {
        let daughter_key = self.cells.insert(daughter);
        let mut moving = daughter_key;
        loop {
            let here = self.cells[moving].coord();
            let direction = self.to_nearest_empty(here);
            self.cells[moving].set_coord(here + direction);
            match self.occupancy.swap_in(here + direction, moving) {
                None => break,
                Some(evicted) => moving = evicted,
            }
        }
        daughter_key
    }

    /// Push, but before every swap let the mover slip into any empty
    /// neighbor of its current site.
    pub(crate) fn stroll(&mut self, daughter: Cell, direction: Coord) -> CellKey {
        let daughter_key = self.cells.insert(daughter);
        let mut moving = daughter_key;
        loop {
            if self.insert_adjacent(moving) {
                break;
            }
            let next = self.cells[moving].coord() + direction;
            self.cells[moving].set_coord(next);
            match self.occupancy.swap_in(next, moving) {
                None => break,
                Some(evicted) => moving = evicted,
            }
        }
        daughter_key
    }

    /// Place an uninserted cell into an empty neighbor of its coordinate,
    /// trying neighbors in shuffled order.  Leaves the cell untouched on
    /// failure.
    pub(crate) fn insert_adjacent(&mut self, key: CellKey) -> bool {
        let mut neighbors = self.lattice.neighbors(self.cells[key].coord());
        self.rng.shuffle(&mut neighbors);
        for site in neighbors {
            if self.occupancy.try_place(site, key) {
                self.cells[key].set_coord(site);
                return true;
            }
        }
        false
    }

    // ── Ray searches ──────────────────────────────────────────────────────

    /// Occupied sites along the ray from `from` in `direction` before the
    /// first empty one; 0 means the adjacent site is free.
    pub(crate) fn steps_to_empty(&self, from: Coord, direction: Coord) -> usize {
        let mut current = from;
        let mut steps = 0;
        loop {
            current += direction;
            if !self.occupancy.contains(current) {
                return steps;
            }
            steps += 1;
        }
    }

    /// The direction whose ray reaches an empty site in the fewest steps;
    /// ties are broken by the shuffled search order, and the search breadth
    /// is capped at [`SEARCH_MAX`] directions.
    pub(crate) fn to_nearest_empty(&mut self, from: Coord) -> Coord {
        let mut directions = self.lattice.directions().to_vec();
        self.rng.shuffle(&mut directions);
        directions.truncate(SEARCH_MAX);
        let mut best = directions[0];
        let mut least = usize::MAX;
        for direction in directions {
            let steps = self.steps_to_empty(from, direction);
            if steps < least {
                least = steps;
                best = direction;
            }
        }
        best
    }

    /// Sample a direction with probability ∝ 1/steps-to-empty; a direction
    /// whose adjacent site is already free wins outright.
    pub(crate) fn roulette_direction(&mut self, from: Coord) -> Coord {
        let mut directions = self.lattice.directions().to_vec();
        self.rng.shuffle(&mut directions);
        let mut weights = Vec::with_capacity(directions.len());
        for &direction in &directions {
            let steps = self.steps_to_empty(from, direction);
            if steps == 0 {
                return direction;
            }
            weights.push(1.0 / steps as f64);
        }
        let total: f64 = weights.iter().sum();
        let mut x = self.rng.canonical() * total;
        for (direction, weight) in directions.iter().zip(&weights) {
            x -= weight;
            if x <= 0.0 {
                return *direction;
            }
        }
        directions[directions.len() - 1]
    }

    // ── Crowding measures ─────────────────────────────────────────────────

    pub(crate) fn num_empty_neighbors(&self, coord: Coord) -> usize {
        self.lattice
            .neighbors(coord)
            .into_iter()
            .filter(|&site| !self.occupancy.contains(site))
            .count()
    }

    pub(crate) fn proportion_empty_neighbors(&self, coord: Coord) -> f64 {
        self.num_empty_neighbors(coord) as f64 / self.lattice.directions().len() as f64
    }
}
