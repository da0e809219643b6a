//! Error types for clientsim-config
//!
//! Load failures come out of `ConfigLoader` construction and leave no
//! instance behind. Lookup failures come out of the read accessors after the
//! loader has logged them.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration file {} must contain a JSON object, found {found}", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Path field '{field}' must be a string, found {found}")]
    InvalidPathField { field: String, found: &'static str },

    #[error("Path field '{field}' resolves to {}, which is not valid UTF-8", .path.display())]
    NonUtf8Path { field: String, path: PathBuf },

    #[error("The item : {key} is not in the configuration file")]
    KeyNotFound { key: String },

    #[error("Item '{key}' has type {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ConfigError {
    /// Whether this error was raised while loading, as opposed to during lookup
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            ConfigError::Io { .. }
                | ConfigError::Parse { .. }
                | ConfigError::NotAnObject { .. }
                | ConfigError::InvalidPathField { .. }
                | ConfigError::NonUtf8Path { .. }
        )
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
