//! Injected randomness
//!
//! Nothing in the crate reaches for a global generator. Every stochastic
//! operation takes a `&mut dyn Dice`, so a seeded `GameRng` reproduces a
//! whole game and a `ScriptedDice` forces exact outcomes in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of random rolls
pub trait Dice {
    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn roll_range(&mut self, low: i32, high: i32) -> i32;

    /// Percentile roll in `1..=100`
    fn roll_percent(&mut self) -> u32 {
        self.roll_range(1, 100) as u32
    }

    /// Uniform index into a collection of `len` items (0 when `len` is 0)
    fn pick_index(&mut self, len: usize) -> usize {
        let high = len.saturating_sub(1).min(i32::MAX as usize) as i32;
        self.roll_range(0, high) as usize
    }

    /// True with probability `p` (resolution of 1/10000)
    fn chance(&mut self, p: f32) -> bool {
        let roll = self.roll_range(1, 10_000) as f32;
        roll <= p * 10_000.0
    }
}

/// Seedable game generator backed by ChaCha8
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh generator from a random seed; the seed is returned for replay
    pub fn from_random_seed() -> (Self, u64) {
        let seed: u64 = rand::random();
        (Self::seed_from_u64(seed), seed)
    }
}

impl Dice for GameRng {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}

/// Replays a fixed script of rolls
///
/// Each roll takes the next scripted value and clamps it into the requested
/// range, so `0` picks the first target, `1` is the best possible percentile
/// roll and `100` the worst. The script repeats once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: Vec<i32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of rolls consumed so far
    pub fn rolls_taken(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        if self.script.is_empty() || low >= high {
            self.cursor += 1;
            return low;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}
