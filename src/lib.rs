//! BB84 quantum key distribution, simulated end to end.
//!
//! A run prepares random photons, sends them through a channel with optional
//! intercept-resend eavesdropping and bit-flip noise, sifts on matching bases,
//! estimates the QBER on a revealed sample, gates the link on a threshold and
//! derives the remaining bits as a key for the toy one-time pad in
//! [`protocols::otp`].

pub mod config;
mod core;
pub mod export;
pub mod protocols;
mod sampler;

pub use crate::config::{RunConfig, Scenario};
pub use crate::core::{
    Basis, Eavesdropper, Interception, QuantumChannel, RandomSource, Transmission, errors,
    measure, utils,
};
pub use crate::protocols::bb84::{self, Bb84Run, PhotonStream, RunResult};
pub use crate::protocols::qkd::estimation::{Decision, QberEstimate, decide, estimate_qber};
pub use crate::protocols::qkd::key::derive_key;
pub use crate::protocols::qkd::sifting::{SiftedBit, SiftedKey, sift};
pub use crate::sampler::{SampleSummary, Sampler};
