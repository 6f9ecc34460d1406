//! Randomness capability shared by every stage of a run.
//!
//! Any [`rand::Rng`] is a [`RandomSource`] through the blanket impl below, so
//! callers pass `rand::rng()` for live runs and a seeded `StdRng` for
//! reproducible ones. Test doubles implement the three required methods and
//! may override [`RandomSource::basis`] to pin basis choices.

use crate::core::measurements::Basis;
use crate::core::utils;
use rand::Rng;

pub trait RandomSource {
    /// A fair coin.
    fn bit(&mut self) -> bool;

    /// Bernoulli trial succeeding with probability `p`.
    ///
    /// # Panics
    ///
    /// May panic if `p` is NaN or outside `[0, 1]`. [`crate::RunConfig::validate`]
    /// and the channel constructors reject such values before a run draws.
    fn chance(&mut self, p: f64) -> bool;

    /// `amount` distinct indices drawn uniformly from `[0, length)`, in draw order.
    fn choose_distinct(&mut self, length: usize, amount: usize) -> Vec<usize>;

    /// One of the two mutually unbiased bases, chosen uniformly.
    fn basis(&mut self) -> Basis {
        if self.bit() {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    fn bits(&mut self, n: usize) -> Vec<bool> {
        (0..n).map(|_| self.bit()).collect()
    }

    fn bases(&mut self, n: usize) -> Vec<Basis> {
        (0..n).map(|_| self.basis()).collect()
    }

    /// Samples `max(1, floor(n * fraction))` distinct indices below `n`
    /// without replacement, sorted ascending. Empty when `n == 0`.
    fn sample_indices(&mut self, n: usize, fraction: f64) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }

        let amount = utils::sample_size(n, fraction);
        let mut picked = self.choose_distinct(n, amount);
        picked.sort_unstable();
        picked
    }
}

impl<R: Rng> RandomSource for R {
    fn bit(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn chance(&mut self, p: f64) -> bool {
        debug_assert!(utils::is_probability(p), "probability out of range: {p}");
        self.random_bool(p)
    }

    fn choose_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(self, length, amount).into_vec()
    }
}
