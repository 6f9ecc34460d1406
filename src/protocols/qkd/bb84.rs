use crate::core::errors::RunError;
use crate::core::utils;
use crate::protocols::qkd::estimation::{Decision, QberEstimate, decide, estimate_qber};
use crate::protocols::qkd::key::derive_key;
use crate::protocols::qkd::sifting::{SiftedKey, sift};
use crate::{Basis, Eavesdropper, QuantumChannel, RandomSource, RunConfig, measure};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Per-photon record of a run. All sequences have length `N` and index `i`
/// refers to the same photon in each.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotonStream {
    pub alice_bits: Vec<bool>,
    pub alice_bases: Vec<Basis>,
    /// Bit on the wire when it reaches Bob, after interception and noise.
    pub transmitted_bits: Vec<bool>,
    pub bob_bases: Vec<Basis>,
    pub bob_results: Vec<bool>,
    /// Whether Eve intercepted photon `i`.
    pub intercepted: Vec<bool>,
}

impl PhotonStream {
    pub fn len(&self) -> usize {
        self.alice_bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice_bits.is_empty()
    }

    pub fn eve_intercept_count(&self) -> usize {
        self.intercepted.iter().filter(|&&i| i).count()
    }

    /// `true` at every index where Alice's and Bob's bases agree.
    pub fn basis_matches(&self) -> Vec<bool> {
        self.alice_bases
            .iter()
            .zip(&self.bob_bases)
            .map(|(a, b)| a == b)
            .collect()
    }

    pub fn sift(&self) -> SiftedKey {
        sift(
            &self.alice_bases,
            &self.bob_bases,
            &self.alice_bits,
            &self.bob_results,
        )
    }
}

/// Outcome of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub sifted_count: usize,
    /// Local sifted positions disclosed for error estimation, ascending.
    pub revealed_indices: Vec<usize>,
    /// Mismatches found among the revealed positions.
    pub errors: usize,
    /// Estimated error rate in `[0, 1]`.
    pub qber: f64,
    /// Alice's sifted bits at the non-revealed positions.
    pub final_key: Vec<bool>,
    pub decision: Decision,
}

impl RunResult {
    pub fn qber_percent(&self) -> f64 {
        self.qber * 100.0
    }

    /// Fraction of the sifted key surviving as secret key.
    pub fn key_yield(&self) -> f64 {
        if self.sifted_count == 0 {
            0.0
        } else {
            self.final_key.len() as f64 / self.sifted_count as f64
        }
    }

    /// No photon survived sifting, so there was nothing to check.
    pub fn is_degenerate(&self) -> bool {
        self.sifted_count == 0
    }

    pub fn key_string(&self) -> String {
        utils::bits_to_string(&self.final_key)
    }
}

/// Everything a single invocation produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bb84Run {
    pub config: RunConfig,
    pub photons: PhotonStream,
    pub result: RunResult,
}

impl Bb84Run {
    pub fn final_key(&self) -> &[bool] {
        &self.result.final_key
    }

    pub fn decision(&self) -> Decision {
        self.result.decision
    }
}

/// Builds the link described by `config`.
pub fn channel_for(config: &RunConfig) -> Result<QuantumChannel, RunError> {
    let channel = QuantumChannel::new(config.noise)?;
    if config.eve_enabled {
        Ok(channel.with_eavesdropper(Eavesdropper::new(config.eve_rate)?))
    } else {
        Ok(channel)
    }
}

/// Prepares, transmits and measures `photons` photons.
pub fn transmit<R: RandomSource + ?Sized>(
    photons: usize,
    channel: &QuantumChannel,
    rng: &mut R,
) -> PhotonStream {
    // Alice prepares
    let alice_bits = rng.bits(photons);
    let alice_bases = rng.bases(photons);

    // Photons cross the link
    let mut transmitted_bits = Vec::with_capacity(photons);
    let mut intercepted = Vec::with_capacity(photons);
    for (&bit, &basis) in alice_bits.iter().zip(&alice_bases) {
        let t = channel.transmit(bit, basis, rng);
        transmitted_bits.push(t.bit);
        intercepted.push(t.interception.is_some());
    }

    // Bob measures
    let bob_bases = rng.bases(photons);
    let bob_results = transmitted_bits
        .iter()
        .zip(alice_bases.iter().zip(&bob_bases))
        .map(|(&bit, (&prep, &meas))| measure(bit, prep, meas, rng))
        .collect();

    PhotonStream {
        alice_bits,
        alice_bases,
        transmitted_bits,
        bob_bases,
        bob_results,
        intercepted,
    }
}

/// Runs BB84 end to end: transmission, sifting, QBER estimation, the
/// threshold decision and key derivation.
///
/// The config is validated before any randomness is drawn. The key is
/// derived whatever the decision is; callers decide whether to use it.
pub fn run<R: RandomSource + ?Sized>(config: &RunConfig, rng: &mut R) -> Result<Bb84Run, RunError> {
    config.validate()?;
    let channel = channel_for(config)?;

    let photons = transmit(config.photons, &channel, rng);

    // Sifting stage
    let sifted = photons.sift();
    debug!(
        photons = photons.len(),
        sifted = sifted.len(),
        intercepted = photons.eve_intercept_count(),
        "sifting complete"
    );
    if sifted.is_empty() {
        warn!(photons = photons.len(), "no basis matches; QBER defaults to 0");
    }

    // Error estimation
    let QberEstimate {
        revealed,
        errors,
        qber,
    } = estimate_qber(&sifted, config.reveal_fraction, rng);
    debug!(revealed = revealed.len(), errors, qber, "QBER estimated");

    let decision = decide(qber * 100.0, config.qber_threshold);
    info!(
        qber_percent = qber * 100.0,
        threshold = config.qber_threshold,
        %decision,
        "link decision"
    );

    let final_key = derive_key(&sifted, &revealed);
    debug!(key_length = final_key.len(), "key derived");

    Ok(Bb84Run {
        config: config.clone(),
        photons,
        result: RunResult {
            sifted_count: sifted.len(),
            revealed_indices: revealed,
            errors,
            qber,
            final_key,
            decision,
        },
    })
}

/// [`run`] with the thread-local generator.
pub fn run_with_entropy(config: &RunConfig) -> Result<Bb84Run, RunError> {
    run(config, &mut rand::rng())
}
