//! Run configuration.
//!
//! A [`RunConfig`] is built in code, loaded from TOML, or taken from one of
//! the [`Scenario`] presets. Every constructor path that reads external
//! input validates before returning.

use crate::core::errors::ConfigError;
use crate::core::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Parameters of one simulation run. Immutable once a run starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Number of photons Alice sends (`N`).
    pub photons: usize,
    /// Whether an intercept-resend attacker is on the link.
    pub eve_enabled: bool,
    /// Probability that Eve intercepts a given photon.
    pub eve_rate: f64,
    /// Probability that the channel flips a photon's bit.
    pub noise: f64,
    /// Fraction of the sifted key revealed for error estimation.
    pub reveal_fraction: f64,
    /// Maximum acceptable QBER, in percent.
    pub qber_threshold: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            photons: 64,
            eve_enabled: false,
            eve_rate: 0.0,
            noise: 0.02,
            reveal_fraction: 0.25,
            qber_threshold: 11.0,
        }
    }
}

impl RunConfig {
    pub fn new(photons: usize) -> Self {
        Self {
            photons,
            ..Self::default()
        }
    }

    /// Enables the eavesdropper with the given interception rate.
    pub fn with_eve(mut self, rate: f64) -> Self {
        self.eve_enabled = true;
        self.eve_rate = rate;
        self
    }

    pub fn without_eve(mut self) -> Self {
        self.eve_enabled = false;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_reveal_fraction(mut self, fraction: f64) -> Self {
        self.reveal_fraction = fraction;
        self
    }

    pub fn with_qber_threshold(mut self, percent: f64) -> Self {
        self.qber_threshold = percent;
        self
    }

    /// Checks every field. The rate is validated even while Eve is disabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photons == 0 {
            return Err(ConfigError::InvalidPhotonCount(self.photons));
        }
        if !utils::is_probability(self.eve_rate) {
            return Err(ConfigError::InvalidProbability {
                field: "eve_rate",
                value: self.eve_rate,
            });
        }
        if !utils::is_probability(self.noise) {
            return Err(ConfigError::InvalidProbability {
                field: "noise",
                value: self.noise,
            });
        }
        if !(self.reveal_fraction > 0.0 && self.reveal_fraction <= 1.0) {
            return Err(ConfigError::InvalidRevealFraction(self.reveal_fraction));
        }
        if !(0.0..=100.0).contains(&self.qber_threshold) {
            return Err(ConfigError::InvalidThreshold(self.qber_threshold));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&input)
    }
}

/// Link profiles with realistic noise and attack assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Bank,
    SmartGrid,
    Hospital,
    Satellite,
    Adversarial,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Bank,
        Scenario::SmartGrid,
        Scenario::Hospital,
        Scenario::Satellite,
        Scenario::Adversarial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Bank => "bank",
            Scenario::SmartGrid => "smartgrid",
            Scenario::Hospital => "hospital",
            Scenario::Satellite => "satellite",
            Scenario::Adversarial => "adversarial",
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            Scenario::Bank => "Metro fiber: low noise, no attacker expected.",
            Scenario::SmartGrid => "Access network: medium noise; small chance of interception.",
            Scenario::Hospital => "Privacy-sensitive link: low-medium noise; strict abort policy.",
            Scenario::Satellite => {
                "Free-space downlink: intermittent, higher noise; harvest during good windows."
            }
            Scenario::Adversarial => "Hostile environment: active attacker likely.",
        }
    }

    /// Applies the preset's link parameters to `base`, keeping its photon
    /// count and threshold.
    pub fn apply(self, base: RunConfig) -> RunConfig {
        let (eve, noise, reveal) = match self {
            Scenario::Bank => (None, 0.02, 0.25),
            Scenario::SmartGrid => (Some(0.10), 0.08, 0.25),
            Scenario::Hospital => (None, 0.04, 0.25),
            Scenario::Satellite => (None, 0.12, 0.30),
            Scenario::Adversarial => (Some(0.40), 0.03, 0.25),
        };

        let config = base.with_noise(noise).with_reveal_fraction(reveal);
        match eve {
            Some(rate) => config.with_eve(rate),
            None => RunConfig {
                eve_rate: 0.0,
                ..config.without_eve()
            },
        }
    }

    pub fn config(self) -> RunConfig {
        self.apply(RunConfig::default())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownScenario(s.to_string()))
    }
}
