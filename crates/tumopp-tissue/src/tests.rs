//! Integration tests for the simulation driver.

use tumopp_cell::{Cell, Event};
use tumopp_core::{
    CellId, CellParams, DisplacementPath, DriverParams, LocalDensity, SimRng, TissueParams,
    Topology,
};
use tumopp_lattice::Coord;

use crate::{CellKey, Tissue};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn moore2(density: LocalDensity, path: DisplacementPath) -> TissueParams {
    TissueParams {
        initial_size: 1,
        dimensions: 2,
        coordinate: Topology::Moore,
        local_density: density,
        displacement: path,
    }
}

fn pure_birth() -> CellParams {
    CellParams::default() // β = 1, δ = α = ρ = 0
}

fn make_tissue(tissue: &TissueParams, cell: &CellParams, seed: u64) -> Tissue {
    Tissue::new(tissue, cell, &DriverParams::default(), SimRng::new(seed)).unwrap()
}

/// Drop an unscheduled filler cell onto a site; it never appears in the
/// event queue, so it only matters as an obstacle.
fn occupy(tissue: &mut Tissue, coord: Coord, id: u32) -> CellKey {
    let cell = Cell::new(
        coord,
        CellId(id),
        tissue.cell(tissue.live_keys_by_id()[0]).rates().clone().shared(),
        10,
    );
    let key = tissue.cells.insert(cell);
    tissue.cells[key].set_coord(coord);
    assert!(tissue.occupancy.try_place(coord, key), "site {coord} already taken");
    key
}

// ── Queue unit behavior ───────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use slotmap::SlotMap;

    use crate::{CellKey, EventQueue};

    fn keys(n: usize) -> Vec<CellKey> {
        let mut sm: SlotMap<CellKey, ()> = SlotMap::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn pops_in_time_order() {
        let k = keys(3);
        let mut queue = EventQueue::new();
        queue.push(3.0, k[0]);
        queue.push(1.0, k[1]);
        queue.push(2.0, k[2]);
        assert_eq!(queue.peek_min(), Some((1.0, k[1])));
        assert_eq!(queue.pop_min(), Some((1.0, k[1])));
        assert_eq!(queue.pop_min(), Some((2.0, k[2])));
        assert_eq!(queue.pop_min(), Some((3.0, k[0])));
        assert_eq!(queue.pop_min(), None);
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let k = keys(3);
        let mut queue = EventQueue::new();
        for &key in &k {
            queue.push(1.0, key);
        }
        let popped: Vec<CellKey> = std::iter::from_fn(|| queue.pop_min().map(|(_, c)| c)).collect();
        assert_eq!(popped, k);
    }

    #[test]
    fn clear_empties() {
        let k = keys(2);
        let mut queue = EventQueue::new();
        queue.push(1.0, k[0]);
        queue.push(2.0, k[1]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn iter_is_key_ordered() {
        let k = keys(3);
        let mut queue = EventQueue::new();
        queue.push(2.0, k[0]);
        queue.push(1.0, k[1]);
        queue.push(3.0, k[2]);
        let times: Vec<f64> = queue.iter().map(|(t, _)| t).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }
}

// ── Occupancy unit behavior ───────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use slotmap::SlotMap;
    use tumopp_lattice::Coord;

    use crate::{CellKey, Occupancy};

    #[test]
    fn try_place_respects_occupants() {
        let mut sm: SlotMap<CellKey, ()> = SlotMap::with_key();
        let (a, b) = (sm.insert(()), sm.insert(()));
        let mut occ = Occupancy::new();
        let site = Coord::new(1, 2, 0);
        assert!(occ.try_place(site, a));
        assert!(!occ.try_place(site, b), "occupied site must refuse");
        assert_eq!(occ.find(site), Some(a));
        assert_eq!(occ.len(), 1);
    }

    #[test]
    fn swap_in_returns_evicted() {
        let mut sm: SlotMap<CellKey, ()> = SlotMap::with_key();
        let (a, b) = (sm.insert(()), sm.insert(()));
        let mut occ = Occupancy::new();
        let site = Coord::ORIGIN;
        assert_eq!(occ.swap_in(site, a), None);
        assert_eq!(occ.swap_in(site, b), Some(a));
        assert_eq!(occ.find(site), Some(b));
    }

    #[test]
    fn remove_frees_site() {
        let mut sm: SlotMap<CellKey, ()> = SlotMap::with_key();
        let a = sm.insert(());
        let mut occ = Occupancy::new();
        occ.swap_in(Coord::ORIGIN, a);
        assert_eq!(occ.remove(Coord::ORIGIN), Some(a));
        assert!(occ.is_empty());
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn founder_at_origin() {
        let tissue = make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        assert_eq!(tissue.size(), 1);
        assert_eq!(tissue.id_tail(), 1);
        let cells = tissue.live_cells();
        assert_eq!(cells[0].id(), CellId::FOUNDER);
        assert_eq!(cells[0].coord(), Coord::ORIGIN);
        assert!(cells[0].ancestor().is_none());
        assert_eq!(tissue.queue().len(), 1);
    }

    #[test]
    fn multi_cell_seed_builds_genealogy() {
        let params = TissueParams {
            initial_size: 4,
            ..moore2(LocalDensity::Const, DisplacementPath::Random)
        };
        let tissue = make_tissue(&params, &pure_birth(), 1);
        assert_eq!(tissue.size(), 4);
        // Three seeding divisions: 1 founder id + 2 ids each.
        assert_eq!(tissue.id_tail(), 7);
        assert_eq!(tissue.genealogy().len(), 3);
        assert_eq!(tissue.queue().len(), 4);
        for cell in tissue.live_cells() {
            assert_eq!(cell.time_of_birth(), 0.0);
        }
        for record in tissue.genealogy().iter() {
            assert_eq!(record.time_of_death, 0.0);
        }
    }

    #[test]
    fn unsupported_placement_is_config_error() {
        let params = moore2(LocalDensity::Step, DisplacementPath::Roulette);
        assert!(Tissue::new(&params, &pure_birth(), &DriverParams::default(), SimRng::new(1)).is_err());
    }

    #[test]
    fn invalid_cell_params_rejected() {
        let bad = CellParams { birth_rate: -1.0, ..pure_birth() };
        let result = Tissue::new(
            &moore2(LocalDensity::Const, DisplacementPath::Random),
            &bad,
            &DriverParams::default(),
            SimRng::new(1),
        );
        assert!(result.is_err());
    }
}

// ── Displacement primitives ───────────────────────────────────────────────────

#[cfg(test)]
mod displacement {
    use super::*;

    #[test]
    fn push_cascades_until_empty() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        let founder = tissue.live_keys_by_id()[0];
        let a = occupy(&mut tissue, Coord::new(1, 0, 0), 100);
        let b = occupy(&mut tissue, Coord::new(2, 0, 0), 101);

        let daughter = tissue.cell(founder).clone();
        let daughter_key = tissue.push(daughter, Coord::new(1, 0, 0));

        assert_eq!(tissue.cell(daughter_key).coord(), Coord::new(1, 0, 0));
        assert_eq!(tissue.cell(a).coord(), Coord::new(2, 0, 0));
        assert_eq!(tissue.cell(b).coord(), Coord::new(3, 0, 0));
        assert_eq!(tissue.occupancy.find(Coord::new(3, 0, 0)), Some(b));
        assert_eq!(tissue.size(), 4);
    }

    #[test]
    fn steps_to_empty_counts_occupied_sites() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        occupy(&mut tissue, Coord::new(1, 0, 0), 100);
        occupy(&mut tissue, Coord::new(2, 0, 0), 101);
        let east = Coord::new(1, 0, 0);
        assert_eq!(tissue.steps_to_empty(Coord::ORIGIN, east), 2);
        assert_eq!(tissue.steps_to_empty(Coord::new(5, 5, 0), east), 0);
    }

    #[test]
    fn insert_adjacent_fails_when_surrounded() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        let founder = tissue.live_keys_by_id()[0];
        let neighbors = tissue.lattice().neighbors(Coord::ORIGIN);
        for (i, site) in neighbors.into_iter().enumerate() {
            occupy(&mut tissue, site, 100 + i as u32);
        }
        let daughter = tissue.cell(founder).clone();
        let key = tissue.cells.insert(daughter);
        assert!(!tissue.insert_adjacent(key));
        // Unplaced cell left exactly where it started.
        assert_eq!(tissue.cell(key).coord(), Coord::ORIGIN);
    }

    #[test]
    fn insert_adjacent_lands_on_an_empty_neighbor() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        let founder = tissue.live_keys_by_id()[0];
        let daughter = tissue.cell(founder).clone();
        let key = tissue.cells.insert(daughter);
        assert!(tissue.insert_adjacent(key));
        let landed = tissue.cell(key).coord();
        assert!(tissue.lattice().directions().contains(&(landed - Coord::ORIGIN)));
        assert_eq!(tissue.occupancy.find(landed), Some(key));
    }

    #[test]
    fn num_empty_neighbors_counts_down() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 1);
        assert_eq!(tissue.num_empty_neighbors(Coord::ORIGIN), 8);
        occupy(&mut tissue, Coord::new(1, 0, 0), 100);
        occupy(&mut tissue, Coord::new(-1, 0, 0), 101);
        assert_eq!(tissue.num_empty_neighbors(Coord::ORIGIN), 6);
        assert_eq!(tissue.proportion_empty_neighbors(Coord::ORIGIN), 0.75);
    }
}

// ── Growth scenarios ──────────────────────────────────────────────────────────

#[cfg(test)]
mod growth {
    use super::*;

    #[test]
    fn pure_birth_reaches_cap_with_consistent_books() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 42);
        let success = tissue.grow(100, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        assert!(success);
        assert_eq!(tissue.size(), 100);
        // 99 divisions: 2 ids each on top of the founder's, 1 frozen mother each.
        assert_eq!(tissue.id_tail(), 199);
        assert_eq!(tissue.genealogy().len(), 99);
        assert!(tissue.drivers().is_empty());
        // One queue entry per live cell.
        assert_eq!(tissue.queue().len(), tissue.size());
        // No driver mutations: every cell still carries the founding rates.
        for cell in tissue.live_cells() {
            assert_eq!(cell.rates().birth, 1.0);
            assert_eq!(cell.rates().death, 0.0);
        }
    }

    #[test]
    fn every_coordinate_is_unique_after_growth() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 7);
        tissue.grow(64, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        let mut seen = std::collections::HashSet::new();
        for cell in tissue.live_cells() {
            assert!(seen.insert(cell.coord()), "duplicate site {}", cell.coord());
        }
    }

    #[test]
    fn ancestry_invariants_hold() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 11);
        tissue.grow(50, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        for cell in tissue.live_cells() {
            if let Some(record_id) = cell.ancestor() {
                let ancestor = tissue.genealogy().get(record_id);
                assert!(ancestor.id < cell.id());
                assert_eq!(ancestor.time_of_death, cell.time_of_birth());
            } else {
                assert_eq!(cell.id(), CellId::FOUNDER);
            }
        }
    }

    #[test]
    fn growth_is_deterministic_per_seed() {
        let run = |seed: u64| {
            let mut tissue = make_tissue(
                &moore2(LocalDensity::Const, DisplacementPath::Random),
                &pure_birth(),
                seed,
            );
            tissue.grow(80, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
            let mut coords: Vec<Coord> = tissue.live_cells().iter().map(|c| c.coord()).collect();
            coords.sort();
            (tissue.id_tail(), tissue.time(), coords)
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42).2, run(43).2);
    }

    #[test]
    fn saturated_step_policy_rejects_all_births() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Step, DisplacementPath::Random), &pure_birth(), 5);
        for (i, site) in tissue.lattice().neighbors(Coord::ORIGIN).into_iter().enumerate() {
            occupy(&mut tissue, site, 100 + i as u32);
        }
        let success = tissue.grow(1000, 1.0, f64::INFINITY, 0, usize::MAX);
        assert!(success, "time cap is a normal termination");
        assert_eq!(tissue.id_tail(), 1, "rejected births must not mint ids");
        assert_eq!(tissue.genealogy().len(), 0);
        assert_eq!(tissue.size(), 9);
    }

    #[test]
    fn extinction_returns_failure() {
        let lethal = CellParams {
            birth_rate: 0.1,
            death_rate: 10.0,
            ..CellParams::default()
        };
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &lethal, 3);
        let success = tissue.grow(1_000, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        assert!(!success);
        assert_eq!(tissue.size(), 0);
        // The whole lineage is in the genealogy.
        assert_eq!(tissue.genealogy().len() as u32, tissue.id_tail());
    }

    #[test]
    fn driver_mutations_compound_deterministically() {
        let drivers = DriverParams {
            rate_birth: 1.0,
            mean_birth: 0.5,
            sd_birth: 0.0,
            ..DriverParams::default()
        };
        let mut tissue = Tissue::new(
            &moore2(LocalDensity::Const, DisplacementPath::Random),
            &pure_birth(),
            &drivers,
            SimRng::new(42),
        )
        .unwrap();
        tissue.grow(16, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        assert!(!tissue.drivers().is_empty());
        for event in tissue.drivers() {
            assert_eq!(event.coef, 0.5);
        }
        // β = β₀ · 1.5^k where k = divisions on the cell's lineage.
        for cell in tissue.live_cells() {
            let k = tissue.genealogy().traceback(cell).len() - 1;
            let expected = 1.5f64.powi(k as i32);
            assert!(
                (cell.rates().birth - expected).abs() < 1e-9,
                "cell {} at depth {k}: β = {} ≠ {expected}",
                cell.id(),
                cell.rates().birth,
            );
        }
    }

    #[test]
    fn single_shot_mutation_fires_once() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 9);
        tissue.grow(64, f64::INFINITY, f64::INFINITY, 0, 10);
        // Exactly one forced mutation: three driver rows from force_mutate
        // and nothing else (the per-division rates are all zero).
        assert_eq!(tissue.drivers().len(), 3);
        let planted: Vec<CellId> = tissue.drivers().iter().map(|d| d.id).collect();
        assert!(planted.windows(2).all(|w| w[0] == w[1]), "one planted cell: {planted:?}");
    }

    #[test]
    fn snapshots_follow_the_interval_clock() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 13);
        tissue.grow(usize::MAX, 3.0, 0.5, 0, usize::MAX);
        let snapshots = tissue.snapshots();
        assert!(!snapshots.is_empty());
        for pair in snapshots.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn early_growth_recording_starts_immediately() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 17);
        tissue.grow(32, f64::INFINITY, f64::INFINITY, 16, usize::MAX);
        let snapshots = tissue.snapshots();
        assert!(snapshots.len() >= 15, "one block per event below the threshold");
        assert_eq!(snapshots[0].time, 0.0, "seeding state is captured");
        assert!(snapshots[0].cells.len() == 1);
    }
}

// ── Migration ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod migration {
    use super::*;

    fn neumann2() -> TissueParams {
        TissueParams {
            initial_size: 1,
            dimensions: 2,
            coordinate: Topology::Neumann,
            local_density: LocalDensity::Const,
            displacement: DisplacementPath::Random,
        }
    }

    #[test]
    fn crowded_migration_swaps_sites() {
        let mut tissue = make_tissue(&neumann2(), &pure_birth(), 1);
        let founder = tissue.live_keys_by_id()[0];
        // Every neighbor occupied: any migration must swap.
        let neighbors = tissue.lattice().neighbors(Coord::ORIGIN);
        let fillers: Vec<CellKey> = neighbors
            .iter()
            .enumerate()
            .map(|(i, &site)| occupy(&mut tissue, site, 100 + i as u32))
            .collect();

        tissue.migrate(founder);

        let landed = tissue.cell(founder).coord();
        assert!(neighbors.contains(&landed), "founder moved to a neighbor");
        let displaced = fillers
            .iter()
            .find(|&&k| tissue.cell(k).coord() == Coord::ORIGIN)
            .copied();
        assert!(displaced.is_some(), "displaced cell took the origin");
        assert_eq!(tissue.occupancy.find(landed), Some(founder));
        assert_eq!(tissue.occupancy.find(Coord::ORIGIN), displaced);
        assert_eq!(tissue.size(), 5, "migration kills nobody");
        assert_eq!(tissue.id_tail(), 1, "migration mints no ids");
    }

    #[test]
    fn migration_to_empty_site_just_moves() {
        let mut tissue = make_tissue(&neumann2(), &pure_birth(), 2);
        let founder = tissue.live_keys_by_id()[0];
        tissue.migrate(founder);
        let landed = tissue.cell(founder).coord();
        assert_ne!(landed, Coord::ORIGIN);
        assert_eq!(tissue.occupancy.find(landed), Some(founder));
        assert_eq!(tissue.occupancy.find(Coord::ORIGIN), None);
    }
}

// ── Post-growth regimes ───────────────────────────────────────────────────────

#[cfg(test)]
mod regimes {
    use super::*;

    #[test]
    fn plateau_matches_rates_and_advances_time() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 21);
        tissue.grow(50, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        let grown_at = tissue.time();
        tissue.plateau(2.0);
        assert!(tissue.time() >= grown_at + 2.0 || tissue.size() == 0);
        for cell in tissue.live_cells() {
            assert_eq!(cell.rates().death, cell.rates().birth);
        }
        assert_eq!(tissue.queue().len(), tissue.size());
    }

    #[test]
    fn treatment_spares_exactly_the_resistant() {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), 42);
        tissue.grow(100, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        tissue.treatment(1.0, 3);

        // Regrowth cap: 100 + 10·3 + 10.
        assert_eq!(tissue.size(), 140);
        let mut doomed = 0;
        let mut resistant_line = 0;
        for cell in tissue.live_cells() {
            match cell.rates().death_prob {
                p if p == 1.0 => {
                    doomed += 1;
                    // A doomed cell never divides again: its pending event
                    // was re-decided to death.
                    assert_eq!(cell.next_event(), Event::Death);
                }
                p if p == 0.0 => resistant_line += 1,
                p => panic!("unexpected death_prob {p}"),
            }
        }
        assert!(doomed <= 97);
        assert!(resistant_line >= 43, "resistant lineages repopulate: {resistant_line}");
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampling {
    use super::*;

    fn grown(seed: u64) -> Tissue {
        let mut tissue =
            make_tissue(&moore2(LocalDensity::Const, DisplacementPath::Random), &pure_birth(), seed);
        tissue.grow(64, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        tissue
    }

    #[test]
    fn random_sample_is_distinct() {
        let mut tissue = grown(1);
        let sample = tissue.sample_random(10);
        assert_eq!(sample.len(), 10);
        let mut ids: Vec<CellId> = sample.iter().map(|&k| tissue.cell(k).id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn section_sample_stays_in_plane() {
        let params = TissueParams {
            initial_size: 1,
            dimensions: 3,
            coordinate: Topology::Moore,
            local_density: LocalDensity::Const,
            displacement: DisplacementPath::Random,
        };
        let mut tissue = make_tissue(&params, &pure_birth(), 2);
        tissue.grow(200, f64::INFINITY, f64::INFINITY, 0, usize::MAX);
        let sample = tissue.sample_section(5);
        assert!(sample.iter().all(|&k| tissue.cell(k).coord().z() == 0));
    }

    #[test]
    fn bulk_sample_is_nearest_first() {
        let tissue = grown(3);
        let sample = tissue.sample_bulk(Coord::ORIGIN, 8);
        assert_eq!(sample.len(), 8);
        let picked: std::collections::HashSet<CellKey> = sample.iter().copied().collect();
        let max_picked = sample
            .iter()
            .map(|&k| tissue.lattice().euclidean_distance(tissue.cell(k).coord()))
            .fold(0.0, f64::max);
        for cell_key in tissue.live_keys_by_id() {
            if !picked.contains(&cell_key) {
                let d = tissue
                    .lattice()
                    .euclidean_distance(tissue.cell(cell_key).coord());
                assert!(d >= max_picked, "unpicked cell closer than a picked one");
            }
        }
    }

    #[test]
    fn medoid_sample_has_requested_size() {
        let mut tissue = grown(4);
        let sample = tissue.sample_medoids(4);
        assert_eq!(sample.len(), 4);
        let distinct: std::collections::HashSet<CellKey> = sample.iter().copied().collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn pairwise_distance_rows() {
        let mut tissue = grown(5);
        let rows = tissue.pairwise_distance(10);
        assert_eq!(rows.len(), 10);
        for row in &rows {
            // Two distinct live cells are at least one division apart on
            // each side of the MRCA.
            assert!(row.genealogy >= 2);
            assert!(row.euclidean >= 0.0);
        }
        assert!(tissue.pairwise_distance(0).is_empty());
    }

    #[test]
    fn neutral_mutations_forced_covers_every_division() {
        let mut tissue = grown(6);
        let id_tail = tissue.id_tail();
        let mutants = tissue.generate_neutral_mutations(0.0, true);
        assert_eq!(mutants.len(), id_tail as usize);
        assert_eq!(mutants[0], CellId(1));
        assert_eq!(mutants[id_tail as usize - 1], CellId(id_tail));

        let none = tissue.generate_neutral_mutations(0.0, false);
        assert!(none.is_empty());
    }

    #[test]
    fn neutral_mutations_stay_in_id_range() {
        let mut tissue = grown(7);
        let id_tail = tissue.id_tail();
        let mutants = tissue.generate_neutral_mutations(0.5, false);
        assert!(mutants.iter().all(|m| m.0 >= 1 && m.0 <= id_tail));
    }

    #[test]
    fn segregating_sites_drops_fixed_columns() {
        let mut tissue = grown(8);
        let samples = tissue.sample_random(6);
        let mutants = tissue.generate_neutral_mutations(0.0, true);
        let matrix = tissue.segregating_sites(&samples, &mutants);
        assert_eq!(matrix.len(), 6);
        let sites = matrix[0].len();
        assert!(matrix.iter().all(|row| row.len() == sites));
        for site in 0..sites {
            let daf: usize = matrix.iter().map(|row| usize::from(row[site])).sum();
            assert!(daf > 0 && daf < 6, "site {site} is not segregating");
        }
        // The founder id is carried by everyone — never segregating.
        let founder_only = tissue.segregating_sites(&samples, &[CellId::FOUNDER]);
        assert!(founder_only.iter().all(|row| row.is_empty()));
    }
}
