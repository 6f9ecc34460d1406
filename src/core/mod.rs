mod channels;
pub mod errors;
mod measurements;
mod random;
pub mod utils;

pub use channels::{Eavesdropper, Interception, QuantumChannel, Transmission};
pub use measurements::{Basis, measure};
pub use random::RandomSource;
