use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pseudo-random source that the mock generator reseeds for every hour.
pub trait SeededRandom {
    fn from_seed(seed: u64) -> Self;

    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

pub struct StdRandom(StdRng);

impl SeededRandom for StdRandom {
    fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

#[cfg(test)]
pub use constant::ConstantRandom;
