// Test utilities shared by unit and integration tests.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::player::{Player, Rating};


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

pub fn seeded_rng(seed: u64) -> StdRng { StdRng::seed_from_u64(seed) }

// Players named "P1", "P2", ... with the given ratings.
pub fn sample_players(ratings: &[u8]) -> Vec<Player> {
    ratings
        .iter()
        .enumerate()
        .map(|(idx, &rating)| {
            let rating = Rating::try_from(rating).unwrap_or_default();
            Player::new(format!("P{}", idx + 1), rating)
        })
        .collect()
}
