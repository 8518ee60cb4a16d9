//! Gradle Build Engine
//!
//! Finds the Gradle project root and wrapper, assembles the Gradle command
//! line for a [`BuildRequest`](ovrbuild_core::BuildRequest) and runs it.

pub mod gradle_build;
pub mod locate;
pub mod runner;
pub mod sdk;
pub mod workdir;

#[cfg(all(test, unix))]
mod testutil;

pub use gradle_build::{
    classify_failure, gradle_flags, FailureKind, GradleInvocation, GradleRunner, TaskOutput,
};
pub use locate::{has_build_descriptor, locate_gradle_wrapper, locate_project_root};
pub use runner::BuildRunner;
pub use sdk::{find_sdk_root, SDK_PATH_ENV_VAR};
pub use workdir::WorkingDir;

use std::path::PathBuf;

/// Build errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Gradle wrapper not found from {}", .base.display())]
    WrapperNotFound { base: PathBuf },

    #[error("No settings.gradle found from {}", .base.display())]
    ProjectRootNotFound { base: PathBuf },

    #[error("Nothing to build in {}", .dir.display())]
    NoSource { dir: PathBuf },

    #[error("command ({command}) failed with returncode: {code}")]
    BuildFailed { command: String, code: i32 },

    #[error("Unable to find SDK root from {}", .start.display())]
    SdkRootNotFound { start: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// A missing task only means there was no source to build
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BuildError::NoSource { .. })
    }
}
