//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through `SimRng` streams derived from the
//! single master seed of the run.
//!
//! Each stream is keyed by a stable slot and by the step number:
//!   - Adding a new slot never changes existing streams.
//!   - Every step draws from a fresh, reproducible stream.
//!
//! Transitions only ever see the `SimRandom` trait, so tests can replay
//! exact draws through `ScriptedRng`.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

use crate::types::Step;

/// The random context handed to every agent transition.
pub trait SimRandom {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll a u64 in [0, n). `n` must be positive.
    fn next_u64_below(&mut self, n: u64) -> u64;

    /// Bernoulli trial: true iff the next draw is strictly below `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index into a non-empty slice of length `len`.
    fn pick_index(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }

    /// Up to `amount` distinct indices in [0, len), uniformly without
    /// replacement. Returns `min(amount, len)` indices.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut pool: Vec<usize> = (0..len).collect();
        for i in 0..amount {
            let j = i + self.pick_index(len - i);
            pool.swap(i, j);
        }
        pool.truncate(amount);
        pool
    }
}

/// A named, deterministic RNG stream.
pub struct SimRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a stream from a derived seed. Prefer `RngBank::stream`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi).
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        self.inner.gen_range(lo..hi)
    }

    /// Standard normal sample (Box–Muller).
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Log-normal sample parameterized by the underlying normal's mean/sigma.
    pub fn log_normal(&mut self, mean: f64, sigma: f64) -> f64 {
        (mean + sigma * self.standard_normal()).exp()
    }

    /// Pick one of `items` with the given weights. Weights need not sum to 1.
    pub fn weighted_choice<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> &'a T {
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (item, weight) in items.iter().zip(weights) {
            cumulative += weight;
            if roll < cumulative {
                return item;
            }
        }
        &items[items.len() - 1]
    }

    /// Pick one of `items` uniformly.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.pick_index(items.len())]
    }
}

impl SimRandom for SimRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, len, amount.min(len)).into_vec()
    }
}

/// All RNG streams for a single run, keyed by stable slot and step.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// The stream for `slot` during `step`.
    pub fn stream(&self, slot: RngSlot, step: Step) -> SimRng {
        let slot_mix = (slot as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        let step_mix = step.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        SimRng::from_seed(self.master_seed ^ slot_mix ^ step_mix).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Scheduler = 0,
    Population = 1,
    Individual = 2,
    Firm = 3,
    Region = 4,
    Government = 5,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scheduler => "scheduler",
            Self::Population => "population",
            Self::Individual => "individual",
            Self::Firm => "firm",
            Self::Region => "region",
            Self::Government => "government",
        }
    }
}

/// Replays pre-recorded draws. For tests and tooling only.
///
/// Floats are served from one queue and integer draws from another.
/// An exhausted float queue yields 0.999_999 (no probability gate fires);
/// an exhausted integer queue yields 0. Integer draws are reduced mod `n`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    integers: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(floats: impl IntoIterator<Item = f64>) -> Self {
        Self {
            floats: floats.into_iter().collect(),
            integers: VecDeque::new(),
        }
    }

    pub fn with_integers(mut self, integers: impl IntoIterator<Item = u64>) -> Self {
        self.integers = integers.into_iter().collect();
        self
    }

    pub fn remaining_floats(&self) -> usize {
        self.floats.len()
    }
}

impl SimRandom for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.999_999)
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.integers.pop_front().unwrap_or(0) % n
    }
}
