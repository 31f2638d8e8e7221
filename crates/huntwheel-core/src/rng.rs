use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injectable randomness source for all draws in the core.
///
/// Production code goes through [`RandDraw`]; tests inject [`ScriptRng`]
/// to pin down exact draw sequences.
pub trait DrawRng {
    /// Uniform index into a collection of `len` elements. `len` must be > 0.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Bernoulli draw with probability `p` in `[0, 1]`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform value in `[0, 1)`, used for spin launch speed.
    fn fraction(&mut self) -> f64;
}

/// Adapter turning any [`rand::Rng`] into a [`DrawRng`].
#[derive(Debug)]
pub struct RandDraw<R: Rng>(R);

impl RandDraw<StdRng> {
    /// Draw source seeded from OS entropy. `Send`, safe to move into tasks.
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Deterministic draw source from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandDraw<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> DrawRng for RandDraw<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index from empty collection");
        self.0.random_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.0.random_bool(p)
    }

    fn fraction(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Scripted draw source replaying fixed sequences, for deterministic tests.
///
/// Each queue is consumed independently; an exhausted queue falls back to a
/// fixed value (index 0, chance false, fraction 0.5) so tests only script
/// the draws they care about.
#[derive(Debug, Default)]
pub struct ScriptRng {
    picks: VecDeque<usize>,
    chances: VecDeque<bool>,
    fractions: VecDeque<f64>,
}

impl ScriptRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push_pick(&mut self, index: usize) -> &mut Self {
        self.picks.push_back(index);
        self
    }

    pub fn push_chance(&mut self, outcome: bool) -> &mut Self {
        self.chances.push_back(outcome);
        self
    }

    pub fn push_fraction(&mut self, value: f64) -> &mut Self {
        self.fractions.push_back(value);
        self
    }
}

impl DrawRng for ScriptRng {
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index from empty collection");
        // Clamp so a scripted index can never escape the collection.
        self.picks.pop_front().unwrap_or(0).min(len - 1)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn fraction(&mut self) -> f64 {
        self.fractions.pop_front().unwrap_or(0.5)
    }
}
