//! Small helpers shared by the protocol stages.

/// Size of a reveal sample over `n` sifted bits: `max(1, floor(n * fraction))`,
/// never more than `n`.
pub fn sample_size(n: usize, fraction: f64) -> usize {
    let k = (n as f64 * fraction).floor() as usize;
    k.max(1).min(n)
}

/// Validates a probability in `[0, 1]`. NaN is rejected.
pub fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Renders bits as a `0`/`1` string.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
