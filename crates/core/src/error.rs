//! Error types for ovrbuild
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for request parsing and configuration
#[derive(Error, Debug)]
pub enum OvrBuildError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid log level '{0}' (expected one of quiet, lifecycle, info, debug)")]
    InvalidLogLevel(String),

    #[error("Configuration error in {}: {}", .path.display(), .source)]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ovrbuild core operations
pub type Result<T> = std::result::Result<T, OvrBuildError>;

impl OvrBuildError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            OvrBuildError::Validation(msg) => format!("ERROR: {}", msg),
            OvrBuildError::Io(e) => format!("File operation failed: {}", e),
            _ => self.to_string(),
        }
    }
}
