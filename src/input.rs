use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::BenchError;

pub const DEFAULT_MIN_VALUE: i64 = -25_000;
pub const DEFAULT_MAX_VALUE: i64 = 25_000;

/// Half-open range `[min, max)` that random input values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        }
    }
}

impl ValueRange {
    pub fn new(min: i64, max: i64) -> Result<Self, BenchError> {
        if min >= max {
            return Err(BenchError::InvalidConfig(format!(
                "value range [{min}, {max}) is empty"
            )));
        }

        // Sums of up to three values must fit in an i64.
        let widest = min.unsigned_abs().max(max.unsigned_abs());
        if widest > (i64::MAX as u64) / 3 {
            return Err(BenchError::InvalidConfig(format!(
                "value range [{min}, {max}) is too wide: summing values could overflow"
            )));
        }

        Ok(Self { min, max })
    }
}

/// Fill a fresh vector with `size` values drawn uniformly from `range`.
pub fn random_values<R: Rng + ?Sized>(size: usize, range: ValueRange, rng: &mut R) -> Vec<i64> {
    (0..size).map(|_| rng.gen_range(range.min..range.max)).collect()
}

/// Owns the RNG so every trial draws independent values.
pub struct InputGenerator {
    rng: ChaCha8Rng,
    range: ValueRange,
}

impl InputGenerator {
    /// Seeded generators repeat the same inputs run after run.
    pub fn new(range: ValueRange, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng, range }
    }

    pub fn generate(&mut self, size: usize) -> Vec<i64> {
        random_values(size, self.range, &mut self.rng)
    }
}
