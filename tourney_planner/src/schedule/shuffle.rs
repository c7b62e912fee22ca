//! Randomness for generators that shuffle their pairing universe.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::models::Team;

/// An unordered pairing candidate
pub type Pairing = (Team, Team);

/// Source of pairing order for the partial round robin.
///
/// Generators never reach for a global RNG; they take one of these so
/// callers can pin the order.
pub trait ShuffleSource {
    /// Reorder `pairings` in place
    fn shuffle_pairings(&mut self, pairings: &mut [Pairing]);
}

/// Uniform random shuffler backed by [`StdRng`]
pub struct PairingShuffler {
    rng: StdRng,
}

impl PairingShuffler {
    /// Shuffler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible shuffler: equal seeds give equal orders
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for PairingShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShuffleSource for PairingShuffler {
    fn shuffle_pairings(&mut self, pairings: &mut [Pairing]) {
        pairings.shuffle(&mut self.rng);
    }
}

/// Leaves pairings in generation order
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepOrder;

impl ShuffleSource for KeepOrder {
    fn shuffle_pairings(&mut self, _pairings: &mut [Pairing]) {}
}
