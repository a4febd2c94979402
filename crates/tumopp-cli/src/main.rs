//! `tumopp` — lattice tumor-growth simulator.
//!
//! Runs one simulation (restarting on extinction), prints ms-format
//! segregating-sites replicates on stdout, and optionally writes the full
//! TSV artifact set into an output directory.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use tumopp_core::{
    CellParams, DisplacementPath, DriverParams, LocalDensity, RunParams, SamplingScheme, SimRng,
    TissueParams, Topology,
};
use tumopp_lattice::Coord;
use tumopp_output::{
    distance_rows, driver_rows, population_rows, snapshot_rows, write_ms, TsvWriter,
};
use tumopp_tissue::Tissue;

// ── Command line ──────────────────────────────────────────────────────────────

/// Spatial tumor growth with driver and neutral mutations.
#[derive(Parser, Debug)]
#[command(name = "tumopp", version, about)]
struct Cli {
    /// Number of cells per sample.
    nsam: usize,

    /// Number of ms replicates to emit.
    #[arg(default_value_t = 1)]
    howmany: usize,

    /// Output directory for TSV artifacts; omit to skip file output.
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    // ── Tissue ────────────────────────────────────────────────────────────
    /// Initial population size.
    #[arg(short = 'N', long, default_value_t = 1)]
    initial: usize,

    /// Lattice dimensionality (2 or 3).
    #[arg(short = 'D', long, default_value_t = 3)]
    dimensions: usize,

    /// Coordinate system: neumann, moore, or hex.
    #[arg(short = 'C', long, default_value = "moore")]
    coord: Topology,

    /// Local density effect: const, step, or linear.
    #[arg(short = 'L', long, default_value = "const")]
    local: LocalDensity,

    /// Displacement path: random, mindrag, minstraight, roulette, or stroll.
    #[arg(short = 'P', long, default_value = "random")]
    path: DisplacementPath,

    // ── Cell rates ────────────────────────────────────────────────────────
    /// β₀ — initial birth rate.
    #[arg(short = 'b', long, default_value_t = 1.0)]
    beta0: f64,

    /// δ₀ — initial death rate.
    #[arg(short = 'd', long, default_value_t = 0.0)]
    delta0: f64,

    /// α₀ — death probability on division attempt.
    #[arg(short = 'a', long, default_value_t = 0.0)]
    alpha0: f64,

    /// ρ₀ — initial migration rate.
    #[arg(short = 'm', long, default_value_t = 0.0)]
    rho0: f64,

    /// k — Gamma shape of the division waiting time.
    #[arg(short = 'k', long, default_value_t = 1.0)]
    shape: f64,

    /// p_s — probability of symmetric stem division.
    #[arg(short = 'p', long, default_value_t = 1.0)]
    symmetric: f64,

    /// ω_max — proliferation capacity of non-stem cells.
    #[arg(short = 'r', long, default_value_t = 10)]
    prolif: u8,

    // ── Driver mutations ──────────────────────────────────────────────────
    /// μ_β — birth-driver probability per division.
    #[arg(long = "ub", default_value_t = 0.0)]
    driver_rate_birth: f64,

    /// μ_δ — death-driver probability per division.
    #[arg(long = "ud", default_value_t = 0.0)]
    driver_rate_death: f64,

    /// μ_ρ — migration-driver probability per division.
    #[arg(long = "um", default_value_t = 0.0)]
    driver_rate_migra: f64,

    /// s̄_β — mean birth selection coefficient.
    #[arg(long = "mb", default_value_t = 0.0)]
    driver_mean_birth: f64,

    /// s̄_δ — mean death selection coefficient.
    #[arg(long = "md", default_value_t = 0.0)]
    driver_mean_death: f64,

    /// s̄_ρ — mean migration selection coefficient.
    #[arg(long = "mm", default_value_t = 0.0)]
    driver_mean_migra: f64,

    /// σ_β — sd of the birth coefficient.
    #[arg(long = "sb", default_value_t = 0.0)]
    driver_sd_birth: f64,

    /// σ_δ — sd of the death coefficient.
    #[arg(long = "sd", default_value_t = 0.0)]
    driver_sd_death: f64,

    /// σ_ρ — sd of the migration coefficient.
    #[arg(long = "sm", default_value_t = 0.0)]
    driver_sd_migra: f64,

    // ── Neutral mutations ─────────────────────────────────────────────────
    /// μ — neutral mutation rate per cell division.
    #[arg(short = 'u', long = "mutation", default_value_t = 0.0)]
    mutation_rate: f64,

    /// Guarantee at least one neutral mutation per division.
    #[arg(long = "ms1")]
    force_one_per_division: bool,

    // ── Run control ───────────────────────────────────────────────────────
    /// Stop when the population reaches this size.
    #[arg(long = "max", default_value_t = 16_384)]
    max_size: usize,

    /// Stop when simulated time exceeds this.
    #[arg(short = 'T', long = "max-time", default_value_t = f64::INFINITY)]
    max_time: f64,

    /// Snapshot interval in time units.
    #[arg(short = 'I', long = "interval", default_value_t = f64::INFINITY)]
    interval: f64,

    /// Snapshot every event while the population is below this size.
    #[arg(long = "early", default_value_t = 0)]
    record_early_growth: usize,

    /// Plant one forced driver when the population first exceeds this size.
    #[arg(long = "timing")]
    mutation_timing: Option<usize>,

    /// Plateau duration after growth (0 = skip).
    #[arg(long = "plateau", default_value_t = 0.0)]
    plateau: f64,

    /// Treatment death probability (0 = skip).
    #[arg(long = "treatment", default_value_t = 0.0)]
    treatment: f64,

    /// Cells exempted from treatment.
    #[arg(long = "resistant", default_value_t = 3)]
    resistant: usize,

    /// Pairs for the pairwise-distance table.
    #[arg(long = "npair", default_value_t = 0)]
    npair: usize,

    /// Sampling scheme: random, section, bulk, or medoid.
    /// Defaults to section in 3-D and random in 2-D.
    #[arg(long = "sample")]
    sample: Option<SamplingScheme>,
}

/// The resolved configuration, dumped to `config.json` so a run can be
/// reproduced from its output directory alone.
#[derive(Serialize)]
struct Config {
    cell: CellParams,
    driver: DriverParams,
    tissue: TissueParams,
    run: RunParams,
}

impl Cli {
    fn to_config(&self) -> Config {
        Config {
            cell: CellParams {
                birth_rate: self.beta0,
                death_rate: self.delta0,
                death_prob: self.alpha0,
                migra_rate: self.rho0,
                gamma_shape: self.shape,
                prob_symmetric: self.symmetric,
                max_prolif: self.prolif,
            },
            driver: DriverParams {
                rate_birth: self.driver_rate_birth,
                rate_death: self.driver_rate_death,
                rate_migra: self.driver_rate_migra,
                mean_birth: self.driver_mean_birth,
                mean_death: self.driver_mean_death,
                mean_migra: self.driver_mean_migra,
                sd_birth: self.driver_sd_birth,
                sd_death: self.driver_sd_death,
                sd_migra: self.driver_sd_migra,
            },
            tissue: TissueParams {
                initial_size: self.initial,
                dimensions: self.dimensions,
                coordinate: self.coord,
                local_density: self.local,
                displacement: self.path,
            },
            run: RunParams {
                max_size: self.max_size,
                max_time: self.max_time,
                snapshot_interval: self.interval,
                record_early_growth: self.record_early_growth,
                mutation_timing: self.mutation_timing.unwrap_or(usize::MAX),
                plateau_time: self.plateau,
                treatment_death_prob: self.treatment,
                treatment_resistant: self.resistant,
                mutation_rate: self.mutation_rate,
                force_one_per_division: self.force_one_per_division,
                nsam: self.nsam,
                howmany: self.howmany,
                npair: self.npair,
                sampling: self.sample,
                seed: self.seed,
            },
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(&cli)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config();
    config.cell.validate().context("invalid cell parameters")?;
    config.driver.validate().context("invalid driver parameters")?;
    config.tissue.validate().context("invalid tissue parameters")?;
    config.run.validate().context("invalid run parameters")?;

    // One RNG per run; restarts after extinction continue the same stream.
    let mut tissue = Tissue::new(
        &config.tissue,
        &config.cell,
        &config.driver,
        SimRng::new(config.run.seed),
    )?;
    loop {
        let survived = tissue.grow(
            config.run.max_size,
            config.run.max_time,
            config.run.snapshot_interval,
            config.run.record_early_growth,
            config.run.mutation_timing,
        );
        if survived {
            break;
        }
        warn!("population went extinct; restarting");
        let rng = tissue.into_rng();
        tissue = Tissue::new(&config.tissue, &config.cell, &config.driver, rng)?;
    }
    info!(size = tissue.size(), time = tissue.time(), "growth finished");

    if config.run.plateau_time > 0.0 {
        tissue.plateau(config.run.plateau_time);
    }
    if config.run.treatment_death_prob > 0.0 {
        tissue.treatment(
            config.run.treatment_death_prob,
            config.run.treatment_resistant,
        );
    }

    write_ms_replicates(&mut tissue, &config)?;
    if let Some(dir) = &cli.outdir {
        write_artifacts(&mut tissue, &config, dir)?;
    }
    Ok(())
}

/// Emit `howmany` ms blocks on stdout, preceded by the classic command-line
/// and seed preamble.
fn write_ms_replicates(tissue: &mut Tissue, config: &Config) -> Result<()> {
    let mutants = tissue.generate_neutral_mutations(
        config.run.mutation_rate,
        config.run.force_one_per_division,
    );
    let scheme = config.run.sampling.unwrap_or(if tissue.dimensions() == 3 {
        SamplingScheme::Section
    } else {
        SamplingScheme::Random
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let command: Vec<String> = std::env::args().collect();
    writeln!(out, "{}", command.join(" "))?;
    writeln!(out, "{}", config.run.seed)?;
    for _ in 0..config.run.howmany {
        let sample = match scheme {
            SamplingScheme::Random => tissue.sample_random(config.run.nsam),
            SamplingScheme::Section => tissue.sample_section(config.run.nsam),
            SamplingScheme::Bulk => tissue.sample_bulk(Coord::ORIGIN, config.run.nsam),
            SamplingScheme::Medoid => tissue.sample_medoids(config.run.nsam),
        };
        let matrix = tissue.segregating_sites(&sample, &mutants);
        write_ms(&mut out, &matrix)?;
    }
    Ok(())
}

/// Write `config.json` and the TSV artifact set into `dir`.
fn write_artifacts(tissue: &mut Tissue, config: &Config, dir: &std::path::Path) -> Result<()> {
    let writer = TsvWriter::new(dir).with_context(|| format!("cannot open {}", dir.display()))?;
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(dir.join("config.json"), json)?;

    writer.write_population(&population_rows(tissue))?;
    let snapshots = snapshot_rows(tissue);
    if !snapshots.is_empty() {
        writer.write_snapshots(&snapshots)?;
    }
    let drivers = driver_rows(tissue);
    if !drivers.is_empty() {
        writer.write_drivers(&drivers)?;
    }
    if config.run.npair > 0 {
        let pairs = tissue.pairwise_distance(config.run.npair);
        writer.write_distances(&distance_rows(&pairs))?;
    }
    info!(dir = %dir.display(), "artifacts written");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
