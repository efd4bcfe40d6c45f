//! Random seeding so bracket position says nothing about entry identity.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

/// Shuffles contest entries before a bracket is built
pub struct Seeder<R: Rng = ThreadRng> {
    /// Random number generator
    rng: R,
}

impl Seeder {
    /// Create a seeder backed by the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> Seeder<R> {
    /// Create a seeder over an explicit generator
    ///
    /// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for
    /// reproducible orderings.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Put entries in a uniformly random order
    ///
    /// # Arguments
    ///
    /// * `entries` - Entries to reorder in place; empty and single-element
    ///   slices are left untouched
    pub fn seed<T>(&mut self, entries: &mut [T]) {
        entries.shuffle(&mut self.rng);
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new()
    }
}
