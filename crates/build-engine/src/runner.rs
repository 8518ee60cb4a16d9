//! Build Runner
//!
//! Builds a directory with the Gradle task its build kind selects.

use std::path::Path;

use ovrbuild_core::{BuildKind, BuildRequest};
use tracing::debug;

use crate::gradle_build::{GradleRunner, TaskOutput};
use crate::locate::has_build_descriptor;
use crate::workdir::WorkingDir;
use crate::BuildError;

/// Build runner for one request
pub struct BuildRunner {
    request: BuildRequest,
    gradle: GradleRunner,
}

impl BuildRunner {
    /// Create a new build runner
    pub fn new(request: BuildRequest) -> Self {
        Self {
            request,
            gradle: GradleRunner::new(),
        }
    }

    /// Use a configured Gradle runner
    pub fn with_gradle(mut self, gradle: GradleRunner) -> Self {
        self.gradle = gradle;
        self
    }

    pub fn request(&self) -> &BuildRequest {
        &self.request
    }

    /// Run `gradlew --version` with the request's flags
    pub async fn gradle_version(&self) -> Result<TaskOutput, BuildError> {
        self.gradle.run_task(&self.request, "--version", &[]).await
    }

    /// Build `dir` if it has a build descriptor.
    ///
    /// Returns `None` for directories with nothing to build. Clean runs
    /// ignore `extra_args`.
    pub async fn build_in_directory(
        &self,
        dir: &Path,
        extra_args: &[String],
    ) -> Result<Option<TaskOutput>, BuildError> {
        let _cwd = WorkingDir::enter(dir)?;
        println!("\n\nbuilding in {}", dir.display());

        let output = if has_build_descriptor(Path::new(".")) {
            let task = self.request.kind.task_name();
            let args: &[String] = match self.request.kind {
                BuildKind::Clean => &[],
                _ => extra_args,
            };
            Some(self.gradle.run_task(&self.request, task, args).await?)
        } else {
            debug!("No build descriptor in {}, skipping", dir.display());
            None
        };

        println!("\n\nfinished building in {}", dir.display());
        Ok(output)
    }
}
