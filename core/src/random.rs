use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed bytes for the random opcode.
///
/// Seeded once when the interpreter is built, either from the OS or from a fixed seed.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    pub fn from_entropy() -> Self {
        RandomStream {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        RandomStream {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::from_entropy()
    }
}
