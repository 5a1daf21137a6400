// Boundary-layer errors.
//
// Note generation itself never fails: unknown scales fall back to Major and
// an exhausted candidate search is resolved by the fallback tiers in
// generator.rs. These errors only come from parsing user input (instrument
// names, root keys) and loading configuration files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FretdrillError {
    #[error("unknown instrument '{0}' (expected 'guitar' or 'bass')")]
    UnknownInstrument(String),

    #[error("unknown root key '{0}' (expected a note name like 'C#' or a number 0-11)")]
    UnknownKey(String),

    #[error("root key {0} is out of range (expected 0-11)")]
    RootOutOfRange(u8),

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse generator config: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("failed to read generator config: {0}")]
    Io(#[from] std::io::Error),
}
