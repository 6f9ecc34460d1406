//! QBER estimation on a revealed sample, and the accept/abort gate.

use crate::RandomSource;
use crate::protocols::qkd::sifting::SiftedKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error rate measured on the revealed part of the sifted key.
#[derive(Clone, Debug, PartialEq)]
pub struct QberEstimate {
    /// Local sifted positions disclosed for checking, ascending.
    pub revealed: Vec<usize>,
    /// Mismatches between Alice and Bob among the revealed positions.
    pub errors: usize,
    /// `errors / revealed.len()`, or `0.0` when nothing was revealed.
    pub qber: f64,
}

impl QberEstimate {
    /// Compares Alice's and Bob's bits at the given local positions.
    ///
    /// Positions outside the sifted key are ignored. An empty sample has a
    /// QBER of zero.
    pub fn from_revealed(sifted: &SiftedKey, mut revealed: Vec<usize>) -> Self {
        revealed.retain(|&i| i < sifted.len());
        revealed.sort_unstable();
        revealed.dedup();

        let errors = revealed
            .iter()
            .filter(|&&i| sifted.get(i).is_some_and(|b| b.is_error()))
            .count();

        let qber = if revealed.is_empty() {
            0.0
        } else {
            errors as f64 / revealed.len() as f64
        };

        Self {
            revealed,
            errors,
            qber,
        }
    }

    pub fn percent(&self) -> f64 {
        self.qber * 100.0
    }
}

/// Reveals `max(1, floor(len * reveal_fraction))` random sifted positions and
/// measures the error rate on them. An empty sifted key reveals nothing.
pub fn estimate_qber<R: RandomSource + ?Sized>(
    sifted: &SiftedKey,
    reveal_fraction: f64,
    rng: &mut R,
) -> QberEstimate {
    let revealed = rng.sample_indices(sifted.len(), reveal_fraction);
    QberEstimate::from_revealed(sifted, revealed)
}

/// Outcome of the QBER threshold check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Abort,
}

impl Decision {
    pub fn is_accept(self) -> bool {
        self == Decision::Accept
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept => f.write_str("ACCEPTED"),
            Decision::Abort => f.write_str("ABORTED"),
        }
    }
}

/// Accepts iff `qber_percent <= threshold_percent`.
pub fn decide(qber_percent: f64, threshold_percent: f64) -> Decision {
    if qber_percent <= threshold_percent {
        Decision::Accept
    } else {
        Decision::Abort
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::qkd::sifting::SiftedBit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sifted(alice: &[bool], bob: &[bool]) -> SiftedKey {
        alice
            .iter()
            .zip(bob)
            .enumerate()
            .map(|(index, (&alice, &bob))| SiftedBit { index, alice, bob })
            .collect()
    }

    #[test]
    fn half_of_revealed_positions_disagree() {
        let key = sifted(&[true, false, true, true], &[true, true, true, false]);
        let estimate = QberEstimate::from_revealed(&key, vec![3, 1]);
        assert_eq!(estimate.revealed, vec![1, 3]);
        assert_eq!(estimate.errors, 2);
        assert_eq!(estimate.qber, 1.0);

        let estimate = QberEstimate::from_revealed(&key, vec![1, 2]);
        assert_eq!(estimate.errors, 1);
        assert_eq!(estimate.qber, 0.5);
    }

    #[test]
    fn empty_sift_has_zero_qber() {
        let mut rng = StdRng::seed_from_u64(1);
        let estimate = estimate_qber(&SiftedKey::default(), 0.5, &mut rng);
        assert!(estimate.revealed.is_empty());
        assert_eq!(estimate.qber, 0.0);
        assert_eq!(decide(estimate.percent(), 0.0), Decision::Accept);
    }

    #[test]
    fn tiny_fraction_still_checks_one_bit() {
        let mut rng = StdRng::seed_from_u64(2);
        let key = sifted(&[true; 6], &[true; 6]);
        assert_eq!(estimate_qber(&key, 0.01, &mut rng).revealed.len(), 1);
    }

    #[test]
    fn decision_boundary_accepts_equality() {
        assert_eq!(decide(11.0, 11.0), Decision::Accept);
        assert_eq!(decide(11.0001, 11.0), Decision::Abort);
        assert_eq!(decide(0.0, 0.0), Decision::Accept);
        assert_eq!(decide(100.0, 99.9), Decision::Abort);
    }
}
