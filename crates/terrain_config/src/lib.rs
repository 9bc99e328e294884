//! Parsing and validation of `terrain.toml` settings.
//!
//! The file is optional. When present it sets defaults for diagnostic
//! rendering (color, compact warnings) and the location of the local state
//! file; command-line flags always take precedence.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
