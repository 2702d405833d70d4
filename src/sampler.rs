use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Key;

/// Uniform draws from an inclusive range, reproducible when seeded.
pub struct Sampler {
    rng: StdRng,
    range: RangeInclusive<Key>,
}

impl Sampler {
    pub fn new(range: RangeInclusive<Key>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, range }
    }
}

impl Iterator for Sampler {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        Some(self.rng.gen_range(self.range.clone()))
    }
}
