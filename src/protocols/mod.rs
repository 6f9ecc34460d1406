//! Quantum cryptography protocols.
//!
//! `qkd` holds the BB84 key distribution pipeline; `otp` consumes the keys it
//! derives.

pub mod otp;
pub mod qkd;
pub use qkd::bb84;
