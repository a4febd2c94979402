//! The `Lattice` type: direction tables, distances, and cluster seeding.

use tumopp_core::{CoreError, CoreResult, SimRng, Topology};

use crate::Coord;

/// An immutable lattice configuration: topology, dimensionality, and the
/// fixed table of neighbor directions.
///
/// Construction is deterministic; the direction order below is part of the
/// reproducibility contract because displacement policies index into it with
/// RNG draws.
#[derive(Clone, Debug)]
pub struct Lattice {
    topology: Topology,
    dimensions: usize,
    directions: Vec<Coord>,
}

impl Lattice {
    pub fn new(topology: Topology, dimensions: usize) -> CoreResult<Self> {
        if !(dimensions == 2 || dimensions == 3) {
            return Err(CoreError::Config(format!(
                "dimensions must be 2 or 3, got {dimensions}"
            )));
        }
        let directions = match topology {
            Topology::Neumann => neumann_directions(dimensions),
            Topology::Moore => moore_directions(dimensions),
            Topology::Hex => hex_directions(dimensions),
        };
        Ok(Self { topology, dimensions, directions })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The fixed, ordered direction table.
    pub fn directions(&self) -> &[Coord] {
        &self.directions
    }

    /// All sites adjacent to `v`, in direction-table order.
    pub fn neighbors(&self, v: Coord) -> Vec<Coord> {
        self.directions.iter().map(|&d| v + d).collect()
    }

    /// Uniformly random entry of the direction table.
    pub fn random_direction(&self, rng: &mut SimRng) -> Coord {
        self.directions[rng.index(self.directions.len())]
    }

    /// Uniformly random neighbor of `v`.
    pub fn random_neighbor(&self, v: Coord, rng: &mut SimRng) -> Coord {
        v + self.random_direction(rng)
    }

    // ── Distances ─────────────────────────────────────────────────────────

    /// Number of lattice steps spanned by the displacement `d`.
    pub fn graph_distance(&self, d: Coord) -> u32 {
        match self.topology {
            Topology::Neumann => {
                d.x().unsigned_abs() + d.y().unsigned_abs() + d.z().unsigned_abs()
            }
            Topology::Moore => d
                .0
                .iter()
                .map(|&v| v.unsigned_abs())
                .max()
                .unwrap_or(0),
            Topology::Hex => {
                let mut m = d
                    .0
                    .iter()
                    .map(|&v| v.unsigned_abs())
                    .max()
                    .unwrap_or(0)
                    .max((d.x() + d.y()).unsigned_abs());
                if self.dimensions == 3 {
                    m = m.max((d.x() + d.z()).unsigned_abs());
                }
                m
            }
        }
    }

    /// Euclidean length of the displacement `d`.
    ///
    /// For the hexagonal topology this is defined equal to the graph
    /// distance; the axial integer coordinates are not Cartesian and the
    /// continuous embedding is only used by the medoid sampler.
    pub fn euclidean_distance(&self, d: Coord) -> f64 {
        match self.topology {
            Topology::Hex => f64::from(self.graph_distance(d)),
            _ => (d.norm_sq() as f64).sqrt(),
        }
    }

    /// Map a site to continuous coordinates for clustering.
    pub fn continuous(&self, v: Coord) -> [f64; 3] {
        match self.topology {
            Topology::Hex => {
                // Axial-cube planar part plus close-packed layer spacing.
                let x = f64::from(v.x()) + 0.5 * f64::from(v.y());
                let y = f64::from(v.y()) * (3.0f64.sqrt() / 2.0);
                let z = f64::from(v.z()) * (2.0f64 / 3.0).sqrt();
                [x, y, z]
            }
            _ => [f64::from(v.x()), f64::from(v.y()), f64::from(v.z())],
        }
    }

    // ── Cluster seeding ───────────────────────────────────────────────────

    /// The `n` sites closest to the origin, sorted by Euclidean distance
    /// with lexicographic tie-breaks.  Used to place multi-cell initial
    /// populations; `sphere(1)` is just the origin.
    pub fn sphere(&self, n: usize) -> Vec<Coord> {
        let mut lim = 1i32;
        loop {
            let mut sites = self.cube_sites(lim);
            if sites.len() >= n {
                sites.sort_by(|&a, &b| {
                    self.euclidean_distance(a)
                        .partial_cmp(&self.euclidean_distance(b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.cmp(&b))
                });
                sites.truncate(n);
                return sites;
            }
            lim += 1;
        }
    }

    fn cube_sites(&self, lim: i32) -> Vec<Coord> {
        let zs: Vec<i32> = if self.dimensions == 3 {
            (-lim..=lim).collect()
        } else {
            vec![0]
        };
        let mut sites = Vec::new();
        for x in -lim..=lim {
            for y in -lim..=lim {
                for &z in &zs {
                    sites.push(Coord::new(x, y, z));
                }
            }
        }
        sites
    }
}

// ── Direction tables ──────────────────────────────────────────────────────────

/// Unit vectors along each axis: positive axes first, then negative.
fn neumann_directions(dimensions: usize) -> Vec<Coord> {
    let mut out = Vec::with_capacity(2 * dimensions);
    if dimensions == 2 {
        out.extend([Coord::new(0, 1, 0), Coord::new(1, 0, 0)]);
        out.extend([Coord::new(-1, 0, 0), Coord::new(0, -1, 0)]);
    } else {
        out.extend([
            Coord::new(0, 0, 1),
            Coord::new(0, 1, 0),
            Coord::new(1, 0, 0),
        ]);
        out.extend([
            Coord::new(-1, 0, 0),
            Coord::new(0, -1, 0),
            Coord::new(0, 0, -1),
        ]);
    }
    out
}

/// All 3^D − 1 offsets including diagonals, in row-major loop order.
fn moore_directions(dimensions: usize) -> Vec<Coord> {
    let mut out = Vec::with_capacity(3usize.pow(dimensions as u32) - 1);
    for x in -1..=1 {
        for y in -1..=1 {
            if dimensions == 2 {
                if x == 0 && y == 0 {
                    continue;
                }
                out.push(Coord::new(x, y, 0));
                continue;
            }
            for z in -1..=1 {
                if x == 0 && y == 0 && z == 0 {
                    continue;
                }
                out.push(Coord::new(x, y, z));
            }
        }
    }
    out
}

/// The six axial offsets of the hex plane, and in 3-D the same six repeated
/// in the layers below and above (6 × 3 = 18).
fn hex_directions(dimensions: usize) -> Vec<Coord> {
    const PLANAR: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];
    let layers: &[i32] = if dimensions == 3 { &[0, -1, 1] } else { &[0] };
    let mut out = Vec::with_capacity(6 * layers.len());
    for &z in layers {
        out.extend(PLANAR.iter().map(|&(x, y)| Coord::new(x, y, z)));
    }
    out
}
