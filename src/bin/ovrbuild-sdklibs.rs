//! ovrbuild-sdklibs - build the SDK libraries from the SDK root
//!
//! Accepts the same options as `ovrbuild`, but never installs, skips the
//! signature check and runs without the Gradle daemon.

use anyhow::Result;
use ovrbuild::cli::Cli;
use ovrbuild::commands::{self, SdkLibsCommand};
use ovrbuild_core::OvrBuildConfig;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    ovrbuild::init_logging();
    debug!("{} v{}", ovrbuild_core::APP_NAME, ovrbuild_core::VERSION);

    let cli = Cli::parse_normalized();
    let config = OvrBuildConfig::load().await?;
    let request = cli.request_or_exit(&config);

    commands::preflight().await;

    let command = SdkLibsCommand::new(request, config);
    debug!("{:?}", command.request());
    command.execute().await?;
    Ok(())
}
