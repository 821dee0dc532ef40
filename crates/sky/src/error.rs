//! Errors raised at the configuration boundary.
//!
//! The simulation itself is total: unknown categories fall back, speeds clamp.
//! Only building a sky from outside input can fail.

/// Errors from parsing or validating sky setup.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    #[error("unknown {kind} category: {name:?}")]
    UnknownCategory { kind: &'static str, name: String },

    #[error("invalid viewport width: {0}px")]
    InvalidViewport(f64),

    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SkyError>;
