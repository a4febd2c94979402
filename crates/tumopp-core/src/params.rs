//! Run configuration.
//!
//! Four parameter groups mirror the simulator's concerns: per-cell event
//! rates, driver-mutation effects, tissue geometry/placement, and run
//! control.  The CLI layer fills these from arguments and dumps the resolved
//! values as JSON next to the other artifacts, so every run is reproducible
//! from its output directory alone.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult, EventRates};

// ── Shared vocabulary ─────────────────────────────────────────────────────────

/// Lattice neighborhood topology.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topology {
    Neumann,
    Moore,
    Hex,
}

impl FromStr for Topology {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "neumann" => Ok(Topology::Neumann),
            "moore" => Ok(Topology::Moore),
            "hex" => Ok(Topology::Hex),
            _ => Err(CoreError::Config(format!(
                "invalid coordinate system {s:?}; choose from neumann, moore, hex"
            ))),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Neumann => "neumann",
            Topology::Moore => "moore",
            Topology::Hex => "hex",
        })
    }
}

/// How crowding modulates whether a birth succeeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocalDensity {
    Const,
    Step,
    Linear,
}

impl FromStr for LocalDensity {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "const" => Ok(LocalDensity::Const),
            "step" => Ok(LocalDensity::Step),
            "linear" => Ok(LocalDensity::Linear),
            _ => Err(CoreError::Config(format!(
                "invalid local density effect {s:?}; choose from const, step, linear"
            ))),
        }
    }
}

impl fmt::Display for LocalDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalDensity::Const => "const",
            LocalDensity::Step => "step",
            LocalDensity::Linear => "linear",
        })
    }
}

/// How a daughter cell finds a site when its target is occupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplacementPath {
    Random,
    Mindrag,
    Minstraight,
    Roulette,
    Stroll,
}

impl FromStr for DisplacementPath {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "random" => Ok(DisplacementPath::Random),
            "mindrag" => Ok(DisplacementPath::Mindrag),
            "minstraight" => Ok(DisplacementPath::Minstraight),
            "roulette" => Ok(DisplacementPath::Roulette),
            "stroll" => Ok(DisplacementPath::Stroll),
            _ => Err(CoreError::Config(format!(
                "invalid displacement path {s:?}; choose from random, mindrag, \
                 minstraight, roulette, stroll"
            ))),
        }
    }
}

impl fmt::Display for DisplacementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplacementPath::Random => "random",
            DisplacementPath::Mindrag => "mindrag",
            DisplacementPath::Minstraight => "minstraight",
            DisplacementPath::Roulette => "roulette",
            DisplacementPath::Stroll => "stroll",
        })
    }
}

/// Post-run sampling scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SamplingScheme {
    Random,
    Section,
    Bulk,
    Medoid,
}

impl FromStr for SamplingScheme {
    type Err = CoreError;
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "random" => Ok(SamplingScheme::Random),
            "section" => Ok(SamplingScheme::Section),
            "bulk" => Ok(SamplingScheme::Bulk),
            "medoid" => Ok(SamplingScheme::Medoid),
            _ => Err(CoreError::Config(format!(
                "invalid sampling scheme {s:?}; choose from random, section, bulk, medoid"
            ))),
        }
    }
}

impl fmt::Display for SamplingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SamplingScheme::Random => "random",
            SamplingScheme::Section => "section",
            SamplingScheme::Bulk => "bulk",
            SamplingScheme::Medoid => "medoid",
        })
    }
}

// ── CellParams ────────────────────────────────────────────────────────────────

/// Initial per-cell rates and division behavior.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellParams {
    /// β₀ — initial birth rate.
    pub birth_rate: f64,
    /// δ₀ — initial death rate.
    pub death_rate: f64,
    /// α₀ — initial death probability on division attempt.
    pub death_prob: f64,
    /// ρ₀ — initial migration rate.
    pub migra_rate: f64,
    /// k — shape of the Gamma waiting-time distribution for division.
    pub gamma_shape: f64,
    /// p_s — probability that a stem division is symmetric.
    pub prob_symmetric: f64,
    /// ω_max — proliferation capacity granted to every cell at birth.
    pub max_prolif: u8,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            birth_rate: 1.0,
            death_rate: 0.0,
            death_prob: 0.0,
            migra_rate: 0.0,
            gamma_shape: 1.0,
            prob_symmetric: 1.0,
            max_prolif: 10,
        }
    }
}

impl CellParams {
    /// The founder's shared rate record.
    pub fn initial_rates(&self) -> EventRates {
        EventRates::new(self.birth_rate, self.death_rate, self.death_prob, self.migra_rate)
    }

    pub fn validate(&self) -> CoreResult<()> {
        for (name, v) in [
            ("birth_rate", self.birth_rate),
            ("death_rate", self.death_rate),
            ("death_prob", self.death_prob),
            ("migra_rate", self.migra_rate),
        ] {
            if v < 0.0 {
                return Err(CoreError::Config(format!("{name} must be non-negative, got {v}")));
            }
        }
        if self.gamma_shape <= 0.0 {
            return Err(CoreError::Config(format!(
                "gamma_shape must be positive, got {}",
                self.gamma_shape
            )));
        }
        if !(0.0..=1.0).contains(&self.prob_symmetric) {
            return Err(CoreError::Config(format!(
                "prob_symmetric must be in [0, 1], got {}",
                self.prob_symmetric
            )));
        }
        Ok(())
    }
}

// ── DriverParams ──────────────────────────────────────────────────────────────

/// Driver-mutation probabilities and Gaussian effect sizes, per trait.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverParams {
    /// μ_β — probability of a birth-rate driver per division, per cell.
    pub rate_birth: f64,
    /// μ_δ.
    pub rate_death: f64,
    /// μ_ρ.
    pub rate_migra: f64,
    /// s̄_β — mean selection coefficient of a birth driver.
    pub mean_birth: f64,
    /// s̄_δ.
    pub mean_death: f64,
    /// s̄_ρ.
    pub mean_migra: f64,
    /// σ_β — std-dev of the birth coefficient.
    pub sd_birth: f64,
    /// σ_δ.
    pub sd_death: f64,
    /// σ_ρ.
    pub sd_migra: f64,
}

impl DriverParams {
    pub fn validate(&self) -> CoreResult<()> {
        for (name, v) in [
            ("rate_birth", self.rate_birth),
            ("rate_death", self.rate_death),
            ("rate_migra", self.rate_migra),
            ("sd_birth", self.sd_birth),
            ("sd_death", self.sd_death),
            ("sd_migra", self.sd_migra),
        ] {
            if v < 0.0 {
                return Err(CoreError::Config(format!("{name} must be non-negative, got {v}")));
            }
        }
        Ok(())
    }
}

// ── TissueParams ──────────────────────────────────────────────────────────────

/// Geometry and placement policy of the simulated tissue.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TissueParams {
    /// Number of cells present at t = 0.
    pub initial_size: usize,
    /// 2 or 3.
    pub dimensions: usize,
    pub coordinate: Topology,
    pub local_density: LocalDensity,
    pub displacement: DisplacementPath,
}

impl Default for TissueParams {
    fn default() -> Self {
        Self {
            initial_size: 1,
            dimensions: 3,
            coordinate: Topology::Moore,
            local_density: LocalDensity::Const,
            displacement: DisplacementPath::Random,
        }
    }
}

impl TissueParams {
    pub fn validate(&self) -> CoreResult<()> {
        if self.initial_size == 0 {
            return Err(CoreError::Config("initial_size must be at least 1".into()));
        }
        if !(self.dimensions == 2 || self.dimensions == 3) {
            return Err(CoreError::Config(format!(
                "dimensions must be 2 or 3, got {}",
                self.dimensions
            )));
        }
        Ok(())
    }
}

// ── RunParams ─────────────────────────────────────────────────────────────────

/// Run control: termination caps, recording, post-growth regimes, and the
/// neutral-mutation model.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunParams {
    /// Stop when the live population reaches this size.
    pub max_size: usize,
    /// Stop when simulated time exceeds this.
    pub max_time: f64,
    /// Dump a population snapshot every this many time units.
    pub snapshot_interval: f64,
    /// Snapshot every event while the population is below this size.
    pub record_early_growth: usize,
    /// Plant one forced driver when the population first exceeds this size.
    /// `usize::MAX` disables the single-shot mutation.
    pub mutation_timing: usize,
    /// Duration of the matched-rate plateau regime after growth (0 = skip).
    pub plateau_time: f64,
    /// Cycle-dependent death probability applied by the treatment regime
    /// (0 = skip treatment).
    pub treatment_death_prob: f64,
    /// Cells exempted from treatment.
    pub treatment_resistant: usize,
    /// μ — neutral mutation rate per cell division.
    pub mutation_rate: f64,
    /// Guarantee one neutral mutation per division (for tree inference).
    pub force_one_per_division: bool,
    /// Number of cells per sample.
    pub nsam: usize,
    /// Number of ms replicates to emit.
    pub howmany: usize,
    /// Pairs drawn for the pairwise-distance table.
    pub npair: usize,
    /// Post-run sampling scheme; `None` picks section for 3-D, random for 2-D.
    pub sampling: Option<SamplingScheme>,
    /// RNG seed.
    pub seed: u64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            max_size: 16_384,
            max_time: f64::INFINITY,
            snapshot_interval: f64::INFINITY,
            record_early_growth: 0,
            mutation_timing: usize::MAX,
            plateau_time: 0.0,
            treatment_death_prob: 0.0,
            treatment_resistant: 3,
            mutation_rate: 0.0,
            force_one_per_division: false,
            nsam: 0,
            howmany: 1,
            npair: 0,
            sampling: None,
            seed: 42,
        }
    }
}

impl RunParams {
    pub fn validate(&self) -> CoreResult<()> {
        if self.nsam > self.max_size {
            return Err(CoreError::Config(format!(
                "nsam ({}) must not exceed max tumor size ({})",
                self.nsam, self.max_size
            )));
        }
        if self.mutation_rate < 0.0 {
            return Err(CoreError::Config(format!(
                "mutation_rate must be non-negative, got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.treatment_death_prob) {
            return Err(CoreError::Config(format!(
                "treatment death probability must be in [0, 1], got {}",
                self.treatment_death_prob
            )));
        }
        Ok(())
    }
}
