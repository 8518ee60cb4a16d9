//! ovrbuild core - build request model and shared types
//!
//! This crate turns command-line intent into an immutable [`BuildRequest`]
//! and owns the user configuration file that supplies defaults for it.

pub mod config;
pub mod error;
pub mod request;

pub use config::{GradleDefaults, OvrBuildConfig};
pub use error::{OvrBuildError, Result};
pub use request::{BuildKind, BuildRequest, LogLevel, SigningCredentials};

/// ovrbuild version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ovrbuild";
