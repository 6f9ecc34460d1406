use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Photon count must be at least 1, got {0}")]
    InvalidPhotonCount(usize),

    #[error("Invalid probability for `{field}`: {value}. Must be between 0.0 and 1.0")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("Invalid reveal fraction: {0}. Must be in (0.0, 1.0]")]
    InvalidRevealFraction(f64),

    #[error("Invalid QBER threshold: {0}%. Must be between 0 and 100")]
    InvalidThreshold(f64),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot read config {path}: {message}")]
    Io { path: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CipherError {
    #[error("Derived key is empty; run the simulation first")]
    EmptyKey,

    #[error("Invalid hex ciphertext: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent run record: {0}")]
    Inconsistent(String),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}
