use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

/// Errors raised while resolving the client configuration.
///
/// Every variant is fatal for the current invocation: the dispatcher hands
/// it to the terminal error reporter unchanged.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("config file '{path}' not found")]
    FileNotFound {
        /// Path passed with `--config`
        path: PathBuf,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// An environment variable holds a value that cannot be coerced to the
    /// setting's type
    #[error("invalid value '{value}' for environment variable {var}: {reason}")]
    InvalidEnvVar {
        /// Variable name, including the application prefix
        var: String,
        /// Raw value found in the environment
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The merged layers do not describe a valid settings table
    #[error("configuration validation failed: {details}")]
    InvalidSettings {
        /// Deserialization error details
        details: String,
    },

    /// A single resolved setting violates a constraint
    #[error("invalid config field '{field}': {reason}")]
    InvalidField {
        /// The offending field
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// Lookup of a key that is not a known setting
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Settings were read before the initialization hook ran
    #[error("configuration has not been initialized")]
    NotInitialized,

    /// Settings could not be converted to or from TOML
    #[error("failed to serialize configuration: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = result::Result<T, ConfigError>;

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ConfigError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path that failed.
    pub fn io(error: &io::Error, path: &Path) -> Self {
        ConfigError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
