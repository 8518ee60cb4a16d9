//! Build Request
//!
//! The immutable description of one build attempt, derived from the
//! command line and threaded through every build step.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OvrBuildError, Result};

/// Which Gradle task family a build runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    Clean,
    Debug,
    Retail,
    #[default]
    Release,
}

impl BuildKind {
    /// Parse a build type argument. Unknown strings build release.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "clean" => BuildKind::Clean,
            "debug" => BuildKind::Debug,
            "retail" => BuildKind::Retail,
            _ => BuildKind::Release,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildKind::Clean => "clean",
            BuildKind::Debug => "debug",
            BuildKind::Retail => "retail",
            BuildKind::Release => "release",
        }
    }

    /// Gradle task that performs this kind of build
    pub fn task_name(&self) -> &'static str {
        match self {
            BuildKind::Clean => "clean",
            BuildKind::Debug => "assembleDebug",
            BuildKind::Retail | BuildKind::Release => "assembleRelease",
        }
    }

    /// Retail builds are signed with caller-provided credentials
    pub fn requires_signing(&self) -> bool {
        matches!(self, BuildKind::Retail)
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw build type argument to its Gradle task name.
pub fn task_name_for(build_type: &str) -> &'static str {
    BuildKind::from_arg(build_type).task_name()
}

/// Gradle console log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Quiet,
    Lifecycle,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Lifecycle => "lifecycle",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Command-line flag selecting this level. Lifecycle is Gradle's
    /// default and has no flag.
    pub fn gradle_flag(&self) -> Option<String> {
        match self {
            LogLevel::Lifecycle => None,
            level => Some(format!("-{}", level.as_str())),
        }
    }
}

impl FromStr for LogLevel {
    type Err = OvrBuildError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "lifecycle" => Ok(LogLevel::Lifecycle),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(OvrBuildError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keystore credentials forwarded to Gradle as `-Pkey.*` properties
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningCredentials {
    pub keystore_path: Option<PathBuf>,
    pub keystore_password: Option<String>,
    pub key_alias: Option<String>,
    pub key_alias_password: Option<String>,
}

impl SigningCredentials {
    /// Command-line names of the fields that are not set
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.keystore_path.is_none() {
            missing.push("--keystore_path");
        }
        if self.keystore_password.is_none() {
            missing.push("--keystore_pswd");
        }
        if self.key_alias.is_none() {
            missing.push("--keyalias");
        }
        if self.key_alias_password.is_none() {
            missing.push("--keyalias_pswd");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Gradle properties for every credential with a non-empty value
    pub fn gradle_properties(&self) -> Vec<String> {
        fn given(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }
        let mut props = Vec::new();
        if let Some(path) = self.keystore_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            props.push(format!("-Pkey.store={}", path.display()));
        }
        if let Some(pswd) = given(&self.keystore_password) {
            props.push(format!("-Pkey.store.password={}", pswd));
        }
        if let Some(alias) = given(&self.key_alias) {
            props.push(format!("-Pkey.alias={}", alias));
        }
        if let Some(pswd) = given(&self.key_alias_password) {
            props.push(format!("-Pkey.alias.password={}", pswd));
        }
        props
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "****");
        f.debug_struct("SigningCredentials")
            .field("keystore_path", &self.keystore_path)
            .field("keystore_password", &mask(&self.keystore_password))
            .field("key_alias", &self.key_alias)
            .field("key_alias_password", &mask(&self.key_alias_password))
            .finish()
    }
}

/// One build attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub kind: BuildKind,
    /// Install the APK after building (`-n` turns this off)
    pub should_install: bool,
    pub clear_logcat: bool,
    pub log_level: LogLevel,
    pub profile: bool,
    pub use_daemon: bool,
    pub disable_sig_check: bool,
    pub signing: SigningCredentials,
}

impl Default for BuildRequest {
    fn default() -> Self {
        Self {
            kind: BuildKind::Release,
            should_install: true,
            clear_logcat: false,
            log_level: LogLevel::Quiet,
            profile: false,
            use_daemon: true,
            disable_sig_check: false,
            signing: SigningCredentials::default(),
        }
    }
}

impl BuildRequest {
    /// Create a request with default options
    pub fn new(kind: BuildKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Check cross-field requirements. Retail builds need every signing field.
    pub fn validate(self) -> Result<Self> {
        if self.kind.requires_signing() && !self.signing.is_complete() {
            return Err(OvrBuildError::Validation(
                "When building \"retail\", --keystore_path, --keystore_pswd, --keyalias, \
                 --keyalias_pswd are required."
                    .to_string(),
            ));
        }
        Ok(self)
    }

    /// Clean builds never install
    pub fn install_after_build(&self) -> bool {
        self.should_install && self.kind != BuildKind::Clean
    }

    /// Properties passed to assemble tasks: install request, then signing
    pub fn extra_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.install_after_build() {
            args.push("-Pshould_install".to_string());
        }
        args.extend(self.signing.gradle_properties());
        args
    }
}
