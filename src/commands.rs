//! Build commands
//!
//! The top-level drivers behind the `ovrbuild` and `ovrbuild-sdklibs`
//! binaries.

use std::path::Path;

use ovrbuild_android_toolchain::{env::ndk_home_display, EnvironmentValidation, ToolchainDetector};
use ovrbuild_build_engine::{
    find_sdk_root, BuildError, BuildRunner, GradleRunner, TaskOutput, SDK_PATH_ENV_VAR,
};
use ovrbuild_core::{BuildRequest, OvrBuildConfig};
use tracing::{debug, info, warn};

/// Check for the NDK and SDK and warn about anything missing
pub async fn preflight() -> EnvironmentValidation {
    let validation = ToolchainDetector::preflight().await;
    validation.report();
    validation
}

fn gradle_runner(config: &OvrBuildConfig) -> GradleRunner {
    GradleRunner::new().with_root_project_name(config.gradle.root_project_name.clone())
}

/// Build the project in the current directory
pub struct BuildCommand {
    request: BuildRequest,
    config: OvrBuildConfig,
}

impl BuildCommand {
    /// Create the command for a validated request
    pub fn new(request: BuildRequest, config: OvrBuildConfig) -> Self {
        Self { request, config }
    }

    /// Print the Gradle version and NDK location, then build `.`
    pub async fn execute(&self) -> Result<Option<TaskOutput>, BuildError> {
        let runner =
            BuildRunner::new(self.request.clone()).with_gradle(gradle_runner(&self.config));

        runner.gradle_version().await?;
        println!("ANDROID_NDK_HOME: {}", ndk_home_display());

        let extra_args = self.request.extra_args();
        runner.build_in_directory(Path::new("."), &extra_args).await
    }
}

/// Build the SDK libraries from the SDK root
pub struct SdkLibsCommand {
    request: BuildRequest,
    config: OvrBuildConfig,
}

impl SdkLibsCommand {
    /// SDK libraries are never installed, skip the signature check and run
    /// without the Gradle daemon
    pub fn new(request: BuildRequest, config: OvrBuildConfig) -> Self {
        let request = BuildRequest {
            use_daemon: false,
            should_install: false,
            disable_sig_check: true,
            ..request
        };
        Self { request, config }
    }

    /// Request after the SDK-libs overrides
    pub fn request(&self) -> &BuildRequest {
        &self.request
    }

    /// Find the SDK root above the current directory and build it.
    ///
    /// A root project without the requested task is reported and treated
    /// as success.
    pub async fn execute(&self) -> Result<Option<TaskOutput>, BuildError> {
        let root = find_sdk_root(&std::env::current_dir()?)?;
        info!("{} = {}", SDK_PATH_ENV_VAR, root.display());

        let gradle = gradle_runner(&self.config)
            .with_env(SDK_PATH_ENV_VAR, root.to_string_lossy().into_owned());
        let runner = BuildRunner::new(self.request.clone()).with_gradle(gradle);

        match runner.build_in_directory(&root, &[]).await {
            Err(e) if e.is_recoverable() => {
                debug!("{}", e);
                warn!("No SDK libs to build in {}", root.display());
                Ok(None)
            }
            result => result,
        }
    }
}
