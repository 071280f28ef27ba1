// src/session/select.rs
// =============================================================================
// Picks one repository out of a search result, uniformly at random.
//
// The random source is injected. Production code uses a generator seeded from
// the OS; tests (and `--seed`) use a seeded StdRng so the same seed always
// picks the same index.
// =============================================================================

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub struct RandomSelector {
    rng: Box<dyn RngCore + Send>,
}

impl RandomSelector {
    pub fn new(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Reproducible selector: the same seed yields the same sequence of picks
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Chooses an index in `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics when `len == 0`. Callers check for an empty result first.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "RandomSelector::pick_index called with an empty result");
        self.rng.gen_range(0..len)
    }

    /// Chooses one element of a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.pick_index(items.len());
        &items[index]
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for RandomSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSelector").finish_non_exhaustive()
    }
}
