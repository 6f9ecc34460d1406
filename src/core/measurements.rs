use crate::core::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Preparation / measurement orientation of a photon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// The `+` basis (Z).
    Rectilinear,
    /// The `×` basis (X).
    Diagonal,
}

impl Basis {
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => '×',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Reads a photon carrying `bit`, prepared in `preparation`, using `measurement`.
///
/// Matching bases recover the bit exactly. Mismatched bases collapse the
/// photon to a uniformly random outcome. Both Eve and Bob measure through
/// this rule.
pub fn measure<R: RandomSource + ?Sized>(
    bit: bool,
    preparation: Basis,
    measurement: Basis,
    rng: &mut R,
) -> bool {
    if preparation == measurement {
        bit
    } else {
        rng.bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn matched_basis_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        for basis in [Basis::Rectilinear, Basis::Diagonal] {
            for bit in [false, true] {
                for _ in 0..50 {
                    assert_eq!(measure(bit, basis, basis, &mut rng), bit);
                }
            }
        }
    }

    #[test]
    fn mismatched_basis_is_roughly_fair() {
        let mut rng = StdRng::seed_from_u64(2);
        let ones = (0..4000)
            .filter(|_| measure(false, Basis::Rectilinear, Basis::Diagonal, &mut rng))
            .count();
        assert!((1700..2300).contains(&ones), "got {ones} ones out of 4000");
    }

    #[test]
    fn symbols() {
        assert_eq!(Basis::Rectilinear.to_string(), "+");
        assert_eq!(Basis::Diagonal.to_string(), "×");
    }
}
