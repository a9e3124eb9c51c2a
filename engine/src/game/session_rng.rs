use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws consumed by the game logic. Object safe so tests can pin
/// the sequence.
pub trait RngSource {
    /// A value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A value in `[0, upper)`. `upper` must be positive.
    fn next_index(&mut self, upper: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngSource for SessionRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}
