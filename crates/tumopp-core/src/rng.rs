//! The single per-run random source.
//!
//! # Determinism strategy
//!
//! One `SimRng` is created per run, seeded from configuration, and threaded
//! through every stochastic operation — event waiting times, displacement
//! choices, driver and neutral mutations, sampling.  Reproducibility depends
//! on the *order* of draws being fixed, so any whole-population sweep that
//! feeds this RNG must iterate in a deterministic order (ascending id, or
//! event-queue order).
//!
//! Bernoulli trials short-circuit at p ≤ 0 and p ≥ 1 without consuming
//! randomness, so switching a rate off does not shift the draw sequence of
//! everything downstream.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma, Normal, Poisson};

/// Deterministic run-level RNG wrapping a `SmallRng`.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Seed from the run configuration.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw in [0, 1).
    #[inline]
    pub fn canonical(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Uniform index in `[0, n)`.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    /// Uniform integer in `[lo, hi]` (inclusive).
    #[inline]
    pub fn uniform_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.gen_range(lo..=hi)
    }

    /// `true` with probability `p`.  Consumes no randomness when `p` is
    /// outside (0, 1).
    #[inline]
    pub fn bernoulli(&mut self, p: f64) -> bool {
        p >= 1.0 || (p > 0.0 && self.canonical() < p)
    }

    /// Gamma(shape, scale) waiting time.  A non-positive scale collapses the
    /// distribution to 0 (the event is overdue); shape is validated positive
    /// at configuration time.
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        if shape <= 0.0 || scale <= 0.0 {
            return 0.0;
        }
        Gamma::new(shape, scale)
            .map(|g| g.sample(&mut self.0))
            .unwrap_or(0.0)
    }

    /// Exponential(rate) waiting time.  Callers guard `rate > 0`.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        Exp::new(rate).map(|e| e.sample(&mut self.0)).unwrap_or(f64::INFINITY)
    }

    /// Gaussian selection coefficient.  `sd == 0` degenerates to `mean`.
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        if sd <= 0.0 {
            return mean;
        }
        Normal::new(mean, sd).map(|n| n.sample(&mut self.0)).unwrap_or(mean)
    }

    /// Poisson(lambda) count.  `lambda <= 0` yields 0.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        Poisson::new(lambda)
            .map(|p| p.sample(&mut self.0) as u64)
            .unwrap_or(0)
    }

    /// Shuffle a mutable slice in place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice; `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }

    /// Sample `n` distinct indices from `[0, len)` without replacement.
    ///
    /// `n` is clamped to `len`.  The returned order is the selection order,
    /// not sorted.
    pub fn sample_indices(&mut self, len: usize, n: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, n.min(len)).into_vec()
    }
}
