use crate::core::errors::ChannelError;
use crate::core::measurements::{Basis, measure};
use crate::core::random::RandomSource;
use crate::core::utils;

/// Intercept-resend attacker sitting on the link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eavesdropper {
    rate: f64,
}

/// What Eve did to one photon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interception {
    /// Basis Eve measured in.
    pub basis: Basis,
    /// Bit Eve re-prepared and forwarded.
    pub resent_bit: bool,
}

impl Eavesdropper {
    /// Creates an attacker intercepting each photon with probability `rate`.
    pub fn new(rate: f64) -> Result<Self, ChannelError> {
        if !utils::is_probability(rate) {
            return Err(ChannelError::InvalidProbability(rate));
        }
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Measures the photon in a random basis and resends the outcome.
    ///
    /// The resent photon carries Eve's result, so a wrong basis guess
    /// corrupts the bit half of the time.
    pub fn measure_and_resend<R: RandomSource + ?Sized>(
        bit: bool,
        preparation: Basis,
        rng: &mut R,
    ) -> Interception {
        let basis = rng.basis();
        let resent_bit = measure(bit, preparation, basis, rng);
        Interception { basis, resent_bit }
    }

    /// Runs the Bernoulli(`rate`) trial and, on success, intercepts the photon.
    pub fn intercept<R: RandomSource + ?Sized>(
        &self,
        bit: bool,
        preparation: Basis,
        rng: &mut R,
    ) -> Option<Interception> {
        if rng.chance(self.rate) {
            Some(Self::measure_and_resend(bit, preparation, rng))
        } else {
            None
        }
    }
}

/// A photon as it leaves the channel, before Bob measures it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transmission {
    pub bit: bool,
    pub interception: Option<Interception>,
    pub flipped: bool,
}

/// The Alice → Bob link: optional interception followed by symmetric bit-flip noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantumChannel {
    eavesdropper: Option<Eavesdropper>,
    noise: f64,
}

impl QuantumChannel {
    /// Creates a channel flipping each photon's bit with probability `noise`.
    pub fn new(noise: f64) -> Result<Self, ChannelError> {
        if !utils::is_probability(noise) {
            return Err(ChannelError::InvalidProbability(noise));
        }
        Ok(Self {
            eavesdropper: None,
            noise,
        })
    }

    pub fn noiseless() -> Self {
        Self {
            eavesdropper: None,
            noise: 0.0,
        }
    }

    /// Puts an eavesdropper on the link.
    pub fn with_eavesdropper(mut self, eavesdropper: Eavesdropper) -> Self {
        self.eavesdropper = Some(eavesdropper);
        self
    }

    pub fn eavesdropper(&self) -> Option<&Eavesdropper> {
        self.eavesdropper.as_ref()
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Sends one photon through the link.
    ///
    /// Interception happens first; noise is then applied to whatever bit is
    /// on the wire, independently of whether Eve touched it.
    pub fn transmit<R: RandomSource + ?Sized>(
        &self,
        bit: bool,
        preparation: Basis,
        rng: &mut R,
    ) -> Transmission {
        let interception = self
            .eavesdropper
            .as_ref()
            .and_then(|eve| eve.intercept(bit, preparation, rng));

        let carried = interception.map_or(bit, |i| i.resent_bit);
        let flipped = rng.chance(self.noise);

        Transmission {
            bit: carried ^ flipped,
            interception,
            flipped,
        }
    }
}
