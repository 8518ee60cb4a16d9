//! Command-line surface shared by `ovrbuild` and `ovrbuild-sdklibs`

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use ovrbuild_core::{
    BuildKind, BuildRequest, GradleDefaults, LogLevel, OvrBuildConfig, OvrBuildError,
    SigningCredentials,
};

/// Build a project and its dependencies
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ovrbuild", version)]
pub struct Cli {
    /// The type of build: clean, debug, retail or release
    #[arg(value_name = "TYPE", default_value = "release")]
    pub build_type: String,

    /// Don't install the built APK
    #[arg(short = 'n')]
    pub no_install: bool,

    /// Clear logcat before running the app
    #[arg(short = 'c')]
    pub clear_logcat: bool,

    /// Gradle log level [quiet, lifecycle, info, debug] (also `-log`)
    #[arg(long = "log", value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Run gradle with profiling enabled
    #[arg(short = 'p')]
    pub profile: bool,

    /// Don't use the gradle daemon when building
    #[arg(long = "no-daemon")]
    pub no_daemon: bool,

    /// Disable the check for the oculussig file
    #[arg(long = "disable-sig-check")]
    pub disable_sig_check: bool,

    /// The path to the keystore used for signing
    #[arg(long = "keystore_path", value_name = "PATH")]
    pub keystore_path: Option<PathBuf>,

    /// The password for the keystore
    #[arg(long = "keystore_pswd", value_name = "PW")]
    pub keystore_pswd: Option<String>,

    /// The private key used for signing
    #[arg(long = "keyalias", value_name = "ALIAS")]
    pub keyalias: Option<String>,

    /// The password for the private key
    #[arg(long = "keyalias_pswd", value_name = "PW")]
    pub keyalias_pswd: Option<String>,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse().map_err(|e: OvrBuildError| e.to_string())
}

/// Rewrite the single-dash `-log` flag to the `--log` form clap accepts
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if positional_only {
                return arg;
            }
            let replacement = match arg.to_str() {
                Some("--") => {
                    positional_only = true;
                    None
                }
                Some("-log") => Some(OsString::from("--log")),
                Some(s) if s.starts_with("-log=") => Some(OsString::from(format!("-{}", s))),
                _ => None,
            };
            replacement.unwrap_or(arg)
        })
        .collect()
}

impl Cli {
    /// Parse the process arguments, exiting on usage errors
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse an explicit argument list (first element is the program name)
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Build the request, filling unset options from the configuration file
    pub fn to_request(&self, defaults: &GradleDefaults) -> ovrbuild_core::Result<BuildRequest> {
        BuildRequest {
            kind: BuildKind::from_arg(&self.build_type),
            should_install: !self.no_install,
            clear_logcat: self.clear_logcat,
            log_level: self.log_level.unwrap_or(defaults.log_level),
            profile: self.profile || defaults.profile,
            use_daemon: !self.no_daemon && defaults.daemon,
            disable_sig_check: self.disable_sig_check,
            signing: SigningCredentials {
                keystore_path: self.keystore_path.clone(),
                keystore_password: self.keystore_pswd.clone(),
                key_alias: self.keyalias.clone(),
                key_alias_password: self.keyalias_pswd.clone(),
            },
        }
        .validate()
    }

    /// Turn the request into a [`BuildRequest`] or exit with status 1.
    ///
    /// On validation failure the message goes to stderr followed by the
    /// full help text.
    pub fn request_or_exit(&self, config: &OvrBuildConfig) -> BuildRequest {
        match self.to_request(&config.gradle) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("{}", e.user_message());
                let _ = Self::command().print_help();
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["ovrbuild"];
        argv.extend_from_slice(args);
        Cli::try_parse_normalized(argv).unwrap()
    }

    fn request(args: &[&str]) -> ovrbuild_core::Result<BuildRequest> {
        parse(args).to_request(&GradleDefaults::default())
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let request = request(&[]).unwrap();
        assert_eq!(request.kind, BuildKind::Release);
        assert!(request.should_install);
        assert!(request.use_daemon);
        assert_eq!(request.log_level, LogLevel::Quiet);
        assert!(!request.profile);
        assert!(!request.clear_logcat);
        assert!(!request.disable_sig_check);
    }

    #[test]
    fn test_all_flags() {
        let request = request(&[
            "debug",
            "-n",
            "-c",
            "-log",
            "info",
            "-p",
            "--no-daemon",
            "--disable-sig-check",
        ])
        .unwrap();
        assert_eq!(request.kind, BuildKind::Debug);
        assert!(!request.should_install);
        assert!(request.clear_logcat);
        assert_eq!(request.log_level, LogLevel::Info);
        assert!(request.profile);
        assert!(!request.use_daemon);
        assert!(request.disable_sig_check);
    }

    #[test]
    fn test_log_flag_spellings() {
        assert_eq!(parse(&["-log=debug"]).log_level, Some(LogLevel::Debug));
        assert_eq!(parse(&["--log", "lifecycle"]).log_level, Some(LogLevel::Lifecycle));
        assert!(Cli::try_parse_normalized(["ovrbuild", "-log", "loud"]).is_err());
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        let args = normalize_args(["ovrbuild", "-log", "info", "--", "-log"]);
        assert_eq!(args, vec!["ovrbuild", "--log", "info", "--", "-log"]);
    }

    #[test]
    fn test_retail_requires_credentials() {
        let err = request(&["retail", "--keystore_path", "k.jks"]).unwrap_err();
        assert!(matches!(err, OvrBuildError::Validation(_)));

        assert!(request(&["release"]).is_ok());
        assert!(request(&["debug", "--keyalias", "vr"]).is_ok());
    }

    #[test]
    fn test_retail_signing_properties_verbatim() {
        let request = request(&[
            "retail",
            "--keystore_path",
            "/keys/app.jks",
            "--keystore_pswd",
            "s3cret pass",
            "--keyalias",
            "vrapp",
            "--keyalias_pswd",
            "k3y",
        ])
        .unwrap();
        assert_eq!(
            request.extra_args(),
            vec![
                "-Pshould_install",
                "-Pkey.store=/keys/app.jks",
                "-Pkey.store.password=s3cret pass",
                "-Pkey.alias=vrapp",
                "-Pkey.alias.password=k3y",
            ]
        );
    }

    #[test]
    fn test_config_defaults_apply_when_flags_absent() {
        let defaults = GradleDefaults {
            daemon: false,
            log_level: LogLevel::Lifecycle,
            profile: true,
            ..GradleDefaults::default()
        };
        let request = parse(&["debug"]).to_request(&defaults).unwrap();
        assert!(!request.use_daemon);
        assert_eq!(request.log_level, LogLevel::Lifecycle);
        assert!(request.profile);

        let request = parse(&["debug", "-log", "quiet"]).to_request(&defaults).unwrap();
        assert_eq!(request.log_level, LogLevel::Quiet);
    }
}
