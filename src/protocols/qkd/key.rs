use crate::protocols::qkd::sifting::SiftedKey;

/// Alice's sifted bits at every position not in `revealed`, in order.
///
/// Revealed bits were disclosed on the public channel and never enter the
/// secret key, whether or not they matched.
pub fn derive_key(sifted: &SiftedKey, revealed: &[usize]) -> Vec<bool> {
    let mut disclosed = vec![false; sifted.len()];
    for &i in revealed {
        if let Some(slot) = disclosed.get_mut(i) {
            *slot = true;
        }
    }

    sifted
        .bits()
        .iter()
        .zip(disclosed)
        .filter(|(_, disclosed)| !disclosed)
        .map(|(bit, _)| bit.alice)
        .collect()
}
