//! Deterministic random number generation.
//!
//! All randomness flows through [`GameRandom`], a seeded ChaCha8 stream.
//! Given the same seed and the same sequence of calls, every roll repeats,
//! which is what lets a day's shop stock be rebuilt identically.

use std::cell::RefCell;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A shared handle to a random stream.
///
/// Contexts hand this to resolvers; the engine only consumes the stream.
pub type RngHandle = Rc<RefCell<GameRandom>>;

/// Wraps a random stream in a shared handle.
#[must_use]
pub fn shared(rng: GameRandom) -> RngHandle {
    Rc::new(RefCell::new(rng))
}

/// A seeded, reproducible random stream.
#[derive(Clone, Debug)]
pub struct GameRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl GameRandom {
    /// Creates a stream from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a stream that is stable for one in-game day.
    ///
    /// The salt separates streams used for different purposes on the same
    /// day (one per shop, for example).
    #[must_use]
    pub fn day_seeded(world_seed: u64, days_played: u32, salt: &str) -> Self {
        // FNV-1a keeps the salt hash stable across platforms and builds.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in salt.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        let seed = world_seed
            .wrapping_mul(31)
            .wrapping_add(u64::from(days_played))
            .rotate_left(17)
            ^ hash;
        Self::seeded(seed)
    }

    /// Returns the seed this stream was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a uniform index in `0..len`, or 0 when `len` is 0.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Returns a uniform integer in `min..=max`.
    ///
    /// If `max < min`, returns `min`.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Returns a uniform float in `0.0..1.0`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Returns true with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Picks a uniformly random element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffles a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
