//! ovrbuild - Gradle build driver for Android VR projects
//!
//! Locates the Gradle root project and wrapper from wherever it is invoked,
//! builds the Gradle command line from command-line options and runs the
//! `clean`, `assembleDebug` or `assembleRelease` task.
//!
//! ## Architecture
//!
//! - `ovrbuild-core`: build request model, validation and configuration
//! - `ovrbuild-android-toolchain`: NDK/SDK preflight checks
//! - `ovrbuild-build-engine`: project discovery and Gradle execution

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;

// Re-export main components for library usage
pub use ovrbuild_android_toolchain as toolchain;
pub use ovrbuild_build_engine as build;
pub use ovrbuild_core as core;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` and defaults to `info`. Logs go to stderr so stdout
/// carries only the echoed Gradle command lines and Gradle's own output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
