//! ovrbuild - build the Gradle project in the current directory
//!
//! Parses the command line, runs the toolchain preflight and drives one
//! clean/debug/release build.

use anyhow::Result;
use ovrbuild::cli::Cli;
use ovrbuild::commands::{self, BuildCommand};
use ovrbuild_build_engine::BuildError;
use ovrbuild_core::OvrBuildConfig;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    ovrbuild::init_logging();
    debug!("{} v{}", ovrbuild_core::APP_NAME, ovrbuild_core::VERSION);

    let cli = Cli::parse_normalized();
    let config = OvrBuildConfig::load().await?;
    let request = cli.request_or_exit(&config);
    debug!("{:?}", request);

    commands::preflight().await;

    match BuildCommand::new(request, config).execute().await {
        Ok(_) => Ok(()),
        Err(e @ BuildError::BuildFailed { .. }) => {
            eprintln!("{}", e);
            std::process::exit(-1);
        }
        Err(e) => Err(e.into()),
    }
}
