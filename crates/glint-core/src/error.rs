//! Error types for Glint

use thiserror::Error;

/// The main error type for Glint operations
#[derive(Debug, Error)]
pub enum GlintError {
    #[error("Invalid surface dimensions: {width}x{height} @ {ratio}")]
    InvalidDimensions { width: f32, height: f32, ratio: f32 },

    #[error("Non-finite geometry: {0}")]
    NonFiniteGeometry(String),

    #[error("Unknown effect kind: {0}")]
    UnknownEffect(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Glint operations
pub type Result<T> = std::result::Result<T, GlintError>;

impl From<toml::de::Error> for GlintError {
    fn from(err: toml::de::Error) -> Self {
        GlintError::TomlParseError(err.to_string())
    }
}
