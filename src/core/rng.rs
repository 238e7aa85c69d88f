//! Deterministic random number generation with forking.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Create independent branches, e.g. one per episode
//!
//! The reducer itself is deterministic and never draws random numbers.
//! Randomness lives outside it, in environment opponents and sampling.
//!
//! ```
//! use turnflow::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for a new episode
//! let mut episode = rng.fork();
//!
//! // Forks are deterministic - same fork counter = same sequence
//! let mut rng2 = GameRng::new(42);
//! let mut episode2 = rng2.fork();
//! assert_eq!(episode.gen_range(0..100), episode2.gen_range(0..100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random integer in the given range.
    ///
    /// Returns `range.start` when the range is empty.
    pub fn gen_range(&mut self, range: std::ops::Range<i64>) -> i64 {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
