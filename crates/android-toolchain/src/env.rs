//! Environment Checks
//!
//! Reads the Android environment variables a command-line build relies on.

use tracing::{debug, warn};

/// Any of these marks the NDK as installed
pub const NDK_ENV_VARS: &[&str] = &["ANDROID_NDK", "NDKROOT", "ANDROID_NDK_HOME"];

/// Any of these marks the SDK as installed
pub const SDK_ENV_VARS: &[&str] = &["ANDROID_HOME"];

/// True when at least one of `names` resolves to a non-empty value
pub fn any_var_set<F>(names: &[&str], lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .any(|name| lookup(name).map(|v| !v.is_empty()).unwrap_or(false))
}

/// Lookup against the process environment
pub fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// `ANDROID_NDK_HOME` as printed before a build
pub fn ndk_home_display() -> String {
    process_var("ANDROID_NDK_HOME").unwrap_or_else(|| "None".to_string())
}

/// Preflight result
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentValidation {
    pub ndk_available: bool,
    pub sdk_available: bool,
}

impl EnvironmentValidation {
    /// Check if both the NDK and SDK were found
    pub fn is_ready(&self) -> bool {
        self.ndk_available && self.sdk_available
    }

    /// Get list of missing components
    pub fn missing_components(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if !self.ndk_available {
            missing.push("Android NDK");
        }
        if !self.sdk_available {
            missing.push("Android SDK");
        }

        missing
    }

    /// Advice for each missing component
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.ndk_available {
            warnings.push("ndk-build not found! Make sure ANDROID_NDK_HOME is set for command line builds");
        }
        if !self.sdk_available {
            warnings.push("adb not found! Make sure ANDROID_HOME is set for command line builds");
        }

        warnings
    }

    /// Log the warnings. Never fatal.
    pub fn report(&self) {
        if self.is_ready() {
            debug!("Android NDK and SDK found");
            return;
        }
        debug!("Missing: {}", self.missing_components().join(", "));
        for warning in self.warnings() {
            warn!("{}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_any_ndk_var_satisfies() {
        for name in NDK_ENV_VARS {
            let vars = HashMap::from([(*name, "/opt/ndk")]);
            assert!(any_var_set(NDK_ENV_VARS, lookup_in(&vars)), "{} should count", name);
        }
    }

    #[test]
    fn test_empty_value_does_not_count() {
        let vars = HashMap::from([("ANDROID_HOME", "")]);
        assert!(!any_var_set(SDK_ENV_VARS, lookup_in(&vars)));
        assert!(!any_var_set(SDK_ENV_VARS, lookup_in(&HashMap::new())));
    }

    #[test]
    fn test_validation() {
        let validation = EnvironmentValidation {
            ndk_available: true,
            sdk_available: true,
        };
        assert!(validation.is_ready());
        assert!(validation.missing_components().is_empty());
        assert!(validation.warnings().is_empty());

        let validation = EnvironmentValidation {
            ndk_available: false,
            sdk_available: true,
        };
        assert!(!validation.is_ready());
        assert_eq!(validation.missing_components(), vec!["Android NDK"]);
        assert!(validation.warnings()[0].starts_with("ndk-build not found!"));
    }
}
