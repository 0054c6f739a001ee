//! Injectable randomness for `oneOf` selection and fake-data providers.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws owned by a builder.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Generator handed to fake-data closures.
    fn rng(&mut self) -> &mut dyn RngCore;
}

/// ChaCha8-backed source; the same seed always yields the same draws.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Always returns the same unit draw. Fake-data closures still receive a
/// working generator, seeded with zero.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    unit: f64,
    rng: ChaCha8Rng,
}

impl FixedRandom {
    /// `unit` is clamped into `[0, 1)`.
    pub fn new(unit: f64) -> Self {
        let unit = if unit.is_nan() {
            0.0
        } else {
            unit.clamp(0.0, 1.0 - f64::EPSILON)
        };
        Self {
            unit,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.unit
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Maps a unit draw onto an index in `0..len`. `len` must be non-zero.
pub fn pick_index(unit: f64, len: usize) -> usize {
    let index = (unit * len as f64).floor();
    if index.is_nan() || index < 0.0 {
        return 0;
    }
    (index as usize).min(len.saturating_sub(1))
}
