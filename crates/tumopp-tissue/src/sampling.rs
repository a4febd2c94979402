//! Post-run sampling, pairwise distances, and neutral mutations.
//!
//! All samplers draw from the live population materialized in ascending id
//! order, so the RNG consumption is reproducible no matter how the hash
//! maps iterate.  Samplers return `CellKey`s; rendering is the output
//! crate's business.

use tumopp_core::{CellId, SimRng};
use tumopp_lattice::Coord;

use crate::{CellKey, Tissue};

/// One sampled pair: divisions through the MRCA, lattice steps, and
/// straight-line separation.
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseDistance {
    pub genealogy: usize,
    pub graph: u32,
    pub euclidean: f64,
}

impl Tissue {
    // ── Samplers ──────────────────────────────────────────────────────────

    /// Uniform sample of `n` live cells without replacement.
    pub fn sample_random(&mut self, n: usize) -> Vec<CellKey> {
        let keys = self.live_keys_by_id();
        self.rng
            .sample_indices(keys.len(), n)
            .into_iter()
            .map(|i| keys[i])
            .collect()
    }

    /// Uniform sample restricted to the z = 0 cross-section.  On a 2-D
    /// lattice every cell is in the section, so this degenerates to
    /// [`sample_random`](Self::sample_random).
    pub fn sample_section(&mut self, n: usize) -> Vec<CellKey> {
        let section: Vec<CellKey> = self
            .live_keys_by_id()
            .into_iter()
            .filter(|&key| self.cells[key].coord().z() == 0)
            .collect();
        self.rng
            .sample_indices(section.len(), n)
            .into_iter()
            .map(|i| section[i])
            .collect()
    }

    /// The `n` live cells closest to `center` in Euclidean distance, ties
    /// broken by id.
    pub fn sample_bulk(&self, center: Coord, n: usize) -> Vec<CellKey> {
        let mut keys = self.live_keys_by_id();
        keys.sort_by(|&a, &b| {
            let da = self.lattice.euclidean_distance(self.cells[a].coord() - center);
            let db = self.lattice.euclidean_distance(self.cells[b].coord() - center);
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| self.cells[a].id().cmp(&self.cells[b].id()))
        });
        keys.truncate(n);
        keys
    }

    /// `n` medoid cells from a partitioning-around-medoids clustering of
    /// the live population in continuous coordinates.
    pub fn sample_medoids(&mut self, n: usize) -> Vec<CellKey> {
        let keys = self.live_keys_by_id();
        let points: Vec<[f64; 3]> = keys
            .iter()
            .map(|&key| self.lattice.continuous(self.cells[key].coord()))
            .collect();
        pam(&points, n, &mut self.rng)
            .into_iter()
            .map(|i| keys[i])
            .collect()
    }

    // ── Pairwise distances ────────────────────────────────────────────────

    /// Draw `2·npair` cells, shuffle, pair them up, and measure each pair.
    pub fn pairwise_distance(&mut self, npair: usize) -> Vec<PairwiseDistance> {
        let mut rows = Vec::with_capacity(npair);
        if npair == 0 {
            return rows;
        }
        let mut keys = self.sample_random(2 * npair);
        self.rng.shuffle(&mut keys);
        for pair in keys.chunks_exact(2) {
            let a = &self.cells[pair[0]];
            let b = &self.cells[pair[1]];
            let diff = a.coord() - b.coord();
            rows.push(PairwiseDistance {
                genealogy: self.genealogy.branch_length(a, b),
                graph: self.lattice.graph_distance(diff),
                euclidean: self.lattice.euclidean_distance(diff),
            });
        }
        rows
    }

    // ── Neutral mutations ─────────────────────────────────────────────────

    /// Sprinkle neutral mutations over the genealogy: K ~ Poisson(μ · id_tail)
    /// ids drawn uniformly (with replacement) from every identity ever
    /// minted.  With `force_one_per_division`, every id additionally carries
    /// one guaranteed mutation.
    pub fn generate_neutral_mutations(&mut self, mu: f64, force_one_per_division: bool) -> Vec<CellId> {
        let id_tail = self.id_tail();
        let num_mutants = self.rng.poisson(mu * f64::from(id_tail));
        let mut mutants = Vec::with_capacity(num_mutants as usize + id_tail as usize);
        if force_one_per_division {
            mutants.extend((1..=id_tail).map(CellId));
        }
        for _ in 0..num_mutants {
            mutants.push(CellId(self.rng.uniform_u32(1, id_tail)));
        }
        mutants
    }

    /// Genotype matrix of `samples` over `mutants`, with non-segregating
    /// sites (derived-allele frequency 0 or |samples|) removed.  Rows are
    /// cells; row length is the number of segregating sites.
    pub fn segregating_sites(&self, samples: &[CellKey], mutants: &[CellId]) -> Vec<Vec<u8>> {
        let genotypes: Vec<Vec<u8>> = samples
            .iter()
            .map(|&key| self.genealogy.has_mutations_of(&self.cells[key], mutants))
            .collect();
        let sample_size = samples.len();
        let keep: Vec<usize> = (0..mutants.len())
            .filter(|&site| {
                let daf: usize = genotypes.iter().map(|g| usize::from(g[site])).sum();
                daf > 0 && daf < sample_size
            })
            .collect();
        genotypes
            .into_iter()
            .map(|g| keep.iter().map(|&site| g[site]).collect())
            .collect()
    }
}

// ── Partitioning around medoids ───────────────────────────────────────────────

/// Plain PAM: random build, first-improvement swap phase until no swap
/// lowers the total assignment cost.  Quadratic in the population size —
/// fine for the sample sizes this simulator emits.
fn pam(points: &[[f64; 3]], k: usize, rng: &mut SimRng) -> Vec<usize> {
    let n = points.len();
    if k == 0 || n == 0 {
        return Vec::new();
    }
    if k >= n {
        return (0..n).collect();
    }

    let dist = |a: usize, b: usize| -> f64 {
        let (pa, pb) = (points[a], points[b]);
        (pa[0] - pb[0])
            .hypot(pa[1] - pb[1])
            .hypot(pa[2] - pb[2])
    };
    let total_cost = |medoids: &[usize]| -> f64 {
        (0..n)
            .map(|i| {
                medoids
                    .iter()
                    .map(|&m| dist(i, m))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum()
    };

    let mut medoids = rng.sample_indices(n, k);
    let mut cost = total_cost(&medoids);
    loop {
        let mut improved = false;
        for slot in 0..k {
            for candidate in 0..n {
                if medoids.contains(&candidate) {
                    continue;
                }
                let previous = medoids[slot];
                medoids[slot] = candidate;
                let swapped = total_cost(&medoids);
                if swapped + 1e-12 < cost {
                    cost = swapped;
                    improved = true;
                } else {
                    medoids[slot] = previous;
                }
            }
        }
        if !improved {
            return medoids;
        }
    }
}
