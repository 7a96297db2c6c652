//! Deterministic, explicitly seeded RNG.
//!
//! The routing core itself is fully deterministic and never draws random
//! numbers.  Randomness is confined to setup-time data generation (obstacle
//! placement), which takes a `SimRng` built from `FleetConfig::seed` so that
//! every scenario is exactly reproducible.  There is no process-wide RNG.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for setup-time data (obstacle maps, scenario fuzzing).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
