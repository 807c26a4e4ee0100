//! Injectable randomness for the weighted random pick.
//!
//! The engine never touches a global RNG; it asks a [`RandomSource`] for
//! one pool-selection probability and one index per pick. Production code
//! uses [`ThreadRandom`]; tests pin the outcome with [`FixedRandom`].

use rand::Rng;

/// Source of uniform random values.
pub trait RandomSource: Send + Sync {
    /// A uniform draw in `[0, 1)`.
    fn probability(&self) -> f64;

    /// A uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn index(&self, len: usize) -> usize;
}

/// [`RandomSource`] backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn probability(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic [`RandomSource`] returning the same draw every time.
///
/// `index` is clamped to the last position of the pool it is applied to.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub probability: f64,
    pub index: usize,
}

impl FixedRandom {
    pub fn new(probability: f64, index: usize) -> Self {
        Self { probability, index }
    }
}

impl RandomSource for FixedRandom {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}
