use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::channel::ReadingField;
use super::reading::SensorReading;

/// Bounded random walk over every sensor field.
/// Not a physical model; it only has to keep the dashboard moving.
pub struct ReadingGenerator {
    rng: StdRng,
}

impl ReadingGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_else(Self::new)
    }

    /// Produces the reading that follows `prev`. The caller stores it.
    pub fn advance(&mut self, prev: &SensorReading) -> SensorReading {
        let mut next = *prev;
        for field in ReadingField::ALL {
            // Uniform in [-step/2, step/2)
            let nudge = (self.rng.gen::<f64>() - 0.5) * field.step();
            field.set(&mut next, field.get(prev) + nudge);
        }
        next.clamped()
    }
}

impl Default for ReadingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
