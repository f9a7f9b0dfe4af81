//! Seeded randomness for scenario setup.

pub use rand_chacha::ChaCha8Rng as SeededRng;
use rand_seeder::Seeder;

/// The same seed always lays out the same world.
pub fn new_rng(seed: u32) -> SeededRng {
    Seeder::from(seed).make_rng()
}

/// Independent generator for one aspect of a scenario (e.g. "players",
/// "ball"), so adding bodies of one kind doesn't reshuffle the others.
pub fn stream_rng(seed: u32, stream: &str) -> SeededRng {
    Seeder::from((seed, stream)).make_rng()
}
