//! JSON export of a completed run.
//!
//! The document carries the config, the per-photon stream and the result.
//! [`from_json`] reproduces the exported run exactly and refuses records that
//! contradict themselves: the config, photon stream, sift, key and decision
//! must all agree.

use crate::{Bb84Run, decide, derive_key};
use crate::core::errors::ExportError;

pub fn to_json(run: &Bb84Run) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(run)?)
}

pub fn from_json(input: &str) -> Result<Bb84Run, ExportError> {
    let run: Bb84Run = serde_json::from_str(input)?;
    check_consistency(&run)?;
    Ok(run)
}

fn inconsistent(message: impl Into<String>) -> ExportError {
    ExportError::Inconsistent(message.into())
}

fn check_consistency(run: &Bb84Run) -> Result<(), ExportError> {
    run.config
        .validate()
        .map_err(|e| inconsistent(format!("invalid config: {e}")))?;

    let p = &run.photons;
    let n = p.len();
    if n != run.config.photons {
        return Err(inconsistent(format!(
            "config announces {} photons but the stream has {n}",
            run.config.photons
        )));
    }
    let aligned = [
        p.alice_bases.len(),
        p.transmitted_bits.len(),
        p.bob_bases.len(),
        p.bob_results.len(),
        p.intercepted.len(),
    ]
    .iter()
    .all(|&len| len == n);
    if !aligned {
        return Err(inconsistent("photon sequences differ in length"));
    }

    let r = &run.result;
    let sifted = p.sift();
    if r.sifted_count != sifted.len() {
        return Err(inconsistent(format!(
            "sifted count {} but {} bases match",
            r.sifted_count,
            sifted.len()
        )));
    }
    if !r.revealed_indices.windows(2).all(|w| w[0] < w[1]) {
        return Err(inconsistent("revealed indices not strictly ascending"));
    }
    if r.revealed_indices.iter().any(|&i| i >= r.sifted_count) {
        return Err(inconsistent("revealed index outside the sifted key"));
    }
    if r.final_key.len() + r.revealed_indices.len() != r.sifted_count {
        return Err(inconsistent(format!(
            "key length {} + revealed {} != sifted {}",
            r.final_key.len(),
            r.revealed_indices.len(),
            r.sifted_count
        )));
    }
    if r.final_key != derive_key(&sifted, &r.revealed_indices) {
        return Err(inconsistent(
            "final key differs from the non-revealed sifted bits",
        ));
    }
    if !(0.0..=1.0).contains(&r.qber) {
        return Err(inconsistent(format!("qber {} outside [0, 1]", r.qber)));
    }
    if r.decision != decide(r.qber_percent(), run.config.qber_threshold) {
        return Err(inconsistent(format!(
            "decision {} contradicts qber {}% against threshold {}%",
            r.decision,
            r.qber_percent(),
            run.config.qber_threshold
        )));
    }
    Ok(())
}
