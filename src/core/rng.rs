//! Deterministic random number generation for watchdogs.
//!
//! The Ghost validator visits compartments in random order; its verdict must
//! not depend on that order, and tests verify exactly this by forcing many
//! traversal orders through seeds. Randomness is therefore injected rather
//! than taken ambiently.
//!
//! - **Deterministic**: same seed, identical sequence.
//! - **Forkable**: one watchdog can hand independent branches to helpers
//!   without sharing a sequence.
//!
//! ```
//! use panelwatch::core::WatchRng;
//!
//! let mut rng = WatchRng::new(42);
//! let mut branch = rng.fork();
//!
//! // A fork is an independent, reproducible sequence.
//! let a: Vec<usize> = (0..8).map(|_| rng.gen_range_usize(0..1000)).collect();
//! let b: Vec<usize> = (0..8).map(|_| branch.gen_range_usize(0..1000)).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG handed to validators that need a traversal order.
///
/// ChaCha8 keeps the sequence cheap while staying reproducible across
/// platforms.
#[derive(Clone, Debug)]
pub struct WatchRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl WatchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// Production watchdogs use this; tests pin seeds with [`WatchRng::new`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
