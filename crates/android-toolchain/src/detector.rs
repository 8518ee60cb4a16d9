//! Toolchain Detection
//!
//! Decides whether the Android NDK and SDK are usable, first from the
//! environment and then by running their command-line tools.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;
use which::which;

use crate::env::{any_var_set, process_var, EnvironmentValidation, NDK_ENV_VARS, SDK_ENV_VARS};

/// Toolchain detector
pub struct ToolchainDetector;

impl ToolchainDetector {
    /// Check NDK and SDK availability. Tools are only run when the
    /// environment variables are absent.
    pub async fn preflight() -> EnvironmentValidation {
        let ndk_available = any_var_set(NDK_ENV_VARS, process_var)
            || Self::probe("ndk-build", &["--version"]).await;
        let sdk_available = any_var_set(SDK_ENV_VARS, process_var)
            || Self::probe("adb", &["version"]).await;

        EnvironmentValidation {
            ndk_available,
            sdk_available,
        }
    }

    /// Run `tool args...` and report whether it exited successfully
    pub async fn probe(tool: &str, args: &[&str]) -> bool {
        let path = match which(tool) {
            Ok(path) => path,
            Err(_) => {
                debug!("{} is not on PATH", tool);
                return false;
            }
        };

        match Command::new(&path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                debug!("Failed to run {:?}: {}", path, e);
                false
            }
        }
    }
}
