//! Entropy-seeded adapter for the [`RandomSource`] port.

use std::sync::{Mutex, PoisonError};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::domain::ports::RandomSource;

// Only ever used when the OS entropy source is unavailable, and loudly.
const FALLBACK_SEED: u64 = 1;

/// Production randomness: a PRNG seeded from the operating-system entropy
/// source, so reviewer selection is unpredictable to anyone who can observe
/// the candidate pool.
///
/// If seeding from the OS fails, the source falls back to a fixed seed and
/// logs that selection is degraded — never silently.
pub struct EntropyRandomSource {
    rng: Mutex<StdRng>,
}

impl EntropyRandomSource {
    /// Seed a new source from the OS entropy source.
    pub fn new() -> Self {
        let rng = match StdRng::from_rng(OsRng) {
            Ok(rng) => rng,
            Err(error) => {
                warn!(
                    error = %error,
                    "OS entropy source unavailable, falling back to a fixed seed; \
                     reviewer selection is degraded and predictable"
                );
                StdRng::seed_from_u64(FALLBACK_SEED)
            }
        };

        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for EntropyRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandomSource {
    fn pick_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }
}
