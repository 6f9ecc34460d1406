//! Basis reconciliation.
//!
//! After transmission Alice and Bob publish their bases and keep only the
//! positions where they agree. No randomness is involved.

use crate::Basis;

/// One basis-matched position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiftedBit {
    /// Position in the original photon stream.
    pub index: usize,
    pub alice: bool,
    pub bob: bool,
}

impl SiftedBit {
    pub fn is_error(&self) -> bool {
        self.alice != self.bob
    }
}

/// The sifted subsequence, in original photon order.
///
/// Positions inside it ("local" indices) are what the reveal sample and key
/// derivation refer to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiftedKey {
    bits: Vec<SiftedBit>,
}

impl SiftedKey {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[SiftedBit] {
        &self.bits
    }

    pub fn get(&self, local: usize) -> Option<&SiftedBit> {
        self.bits.get(local)
    }

    pub fn alice_bits(&self) -> Vec<bool> {
        self.bits.iter().map(|b| b.alice).collect()
    }

    pub fn bob_bits(&self) -> Vec<bool> {
        self.bits.iter().map(|b| b.bob).collect()
    }
}

impl FromIterator<SiftedBit> for SiftedKey {
    fn from_iter<I: IntoIterator<Item = SiftedBit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Keeps the positions where `alice_bases[i] == bob_bases[i]`.
///
/// The four slices are positionally aligned photon sequences; the shortest
/// one bounds the result.
pub fn sift(
    alice_bases: &[Basis],
    bob_bases: &[Basis],
    alice_bits: &[bool],
    bob_results: &[bool],
) -> SiftedKey {
    debug_assert!(
        alice_bases.len() == bob_bases.len()
            && alice_bases.len() == alice_bits.len()
            && alice_bases.len() == bob_results.len(),
        "photon sequences must be aligned"
    );

    alice_bases
        .iter()
        .zip(bob_bases)
        .zip(alice_bits.iter().zip(bob_results))
        .enumerate()
        .filter(|(_, ((a_basis, b_basis), _))| a_basis == b_basis)
        .map(|(index, (_, (&alice, &bob)))| SiftedBit { index, alice, bob })
        .collect()
}
