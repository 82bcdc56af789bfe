//! Motivational quotes for the counter page.
//!
//! One quote is selected uniformly at random per render. The randomness
//! source is injectable so tests can pin the sequence: `new()` seeds from
//! OS entropy, `seeded()` from a fixed value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// The fixed quote set shown on the counter page.
pub const QUOTES: [&str; 3] = [
    "Containerize, commit, repeat.",
    "Build fast, ship faster.",
    "Small images, big impact.",
];

/// Uniform random selection over [`QUOTES`].
///
/// The mutex exists only to share the RNG between in-flight requests; it
/// carries no request-ordering semantics.
pub struct QuotePicker {
    rng: Mutex<StdRng>,
}

impl QuotePicker {
    /// Picker seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic picker for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Select one quote uniformly at random.
    pub fn pick(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        QUOTES[rng.gen_range(0..QUOTES.len())]
    }
}

impl Default for QuotePicker {
    fn default() -> Self {
        Self::new()
    }
}
