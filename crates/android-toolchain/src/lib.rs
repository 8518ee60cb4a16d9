//! Android Toolchain Checks
//!
//! Advisory preflight for command-line builds:
//! - Android NDK (environment variables or `ndk-build`)
//! - Android SDK (environment variables or `adb`)

pub mod detector;
pub mod env;

pub use detector::ToolchainDetector;
pub use env::{EnvironmentValidation, NDK_ENV_VARS, SDK_ENV_VARS};
