//! Confidence sources for the overall risk classification.
//!
//! The scorer reports a confidence level drawn from a band that depends on
//! the risk level. Drawing it goes through [`ConfidenceSource`] so callers
//! can pick seeded jitter, OS-seeded jitter, or a fixed midpoint.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::weights::ConfidenceBand;

/// Produces a confidence value inside a band.
pub trait ConfidenceSource: Send {
    /// Human-readable source name (e.g. "random").
    fn name(&self) -> &str;

    /// Sample a confidence in `[band.min, band.max)`, rounded to 2 decimals.
    fn sample(&mut self, band: ConfidenceBand) -> f64;
}

impl<C: ConfidenceSource + ?Sized> ConfidenceSource for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample(&mut self, band: ConfidenceBand) -> f64 {
        (**self).sample(band)
    }
}

/// Uniform jitter across the band.
#[derive(Debug, Clone)]
pub struct RandomConfidence<R = StdRng> {
    rng: R,
}

impl RandomConfidence<StdRng> {
    /// Jitter seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible jitter.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomConfidence<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> ConfidenceSource for RandomConfidence<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn sample(&mut self, band: ConfidenceBand) -> f64 {
        let draw = band.min + self.rng.gen::<f64>() * (band.max - band.min);
        keep_below_max(round_to_cents(draw), band)
    }
}

/// Always the band midpoint. Useful for deterministic output.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointConfidence;

impl ConfidenceSource for MidpointConfidence {
    fn name(&self) -> &str {
        "midpoint"
    }

    fn sample(&mut self, band: ConfidenceBand) -> f64 {
        keep_below_max(round_to_cents(band.midpoint()), band)
    }
}

/// Round half-up to two decimals.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

// Rounding can land exactly on the exclusive upper bound.
fn keep_below_max(value: f64, band: ConfidenceBand) -> f64 {
    if value >= band.max {
        round_to_cents(band.max - 0.01)
    } else {
        value
    }
}
