//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `terrain.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is present but empty.
    #[error("missing required field: {0}")]
    MissingField(String),
}
