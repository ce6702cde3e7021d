//! Error types for listing input and proximity configuration.

use thiserror::Error;

/// A listing whose geotag cannot be turned into a point.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("listing has no geotag")]
    MissingGeotag,

    #[error("malformed geotag: {0}")]
    MalformedGeotag(String),

    #[error("geotag is not finite: ({latitude}, {longitude})")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
}

/// Configuration that fails validation at load time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid bounding box for region '{region}': {reason}")]
    InvalidBox { region: String, reason: String },

    #[error("region '{0}' is defined more than once")]
    DuplicateRegion(String),

    #[error("threshold '{field}' must be a non-negative number, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("non-finite coordinate in {context}")]
    NonFiniteCoordinate { context: String },
}
