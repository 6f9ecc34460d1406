//! Quantum Key Distribution (QKD).
//!
//! BB84 split into its stages:
//! - **bb84**: transmission and the end-to-end run.
//! - **sifting**: basis reconciliation.
//! - **estimation**: QBER sampling and the accept/abort decision.
//! - **key**: final key extraction.

pub mod bb84;
pub mod estimation;
pub mod key;
pub mod sifting;
