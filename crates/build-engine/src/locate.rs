//! Project discovery
//!
//! A `settings.gradle` marks the root project, a `build.gradle` marks a
//! buildable directory and `gradlew` is the wrapper that launches Gradle.
//! Both searches walk a fixed list of ancestors so the tool works from an
//! app project as well as from inside a library project.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::BuildError;

/// Ancestors searched for the Gradle wrapper, nearest first
pub const WRAPPER_CANDIDATES: &[&str] = &[".", "../..", "../../..", "../../../..", "../../../../.."];

/// Ancestors searched for the settings descriptor, nearest first
pub const PROJECT_ROOT_CANDIDATES: &[&str] = &[".", "../..", "../../.."];

pub const SETTINGS_DESCRIPTORS: &[&str] = &["settings.gradle", "settings.gradle.kts"];

pub const BUILD_DESCRIPTORS: &[&str] = &["build.gradle", "build.gradle.kts"];

/// Platform name of the wrapper script
pub fn wrapper_name() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "gradlew"
    }
}

/// Whether `dir` itself can be built
pub fn has_build_descriptor(dir: &Path) -> bool {
    BUILD_DESCRIPTORS.iter().any(|name| dir.join(name).is_file())
}

/// Whether `dir` is a Gradle root project
pub fn has_settings_descriptor(dir: &Path) -> bool {
    SETTINGS_DESCRIPTORS.iter().any(|name| dir.join(name).is_file())
}

/// Find the wrapper script, searching upward from `base`
pub fn locate_gradle_wrapper(base: &Path) -> Result<PathBuf, BuildError> {
    let name = wrapper_name();
    first_candidate(base, WRAPPER_CANDIDATES, |dir| dir.join(name).is_file())
        .map(|dir| dir.join(name))
        .ok_or_else(|| BuildError::WrapperNotFound {
            base: base.to_path_buf(),
        })
}

/// Find the root project directory, searching upward from `base`
pub fn locate_project_root(base: &Path) -> Result<PathBuf, BuildError> {
    first_candidate(base, PROJECT_ROOT_CANDIDATES, has_settings_descriptor).ok_or_else(|| {
        BuildError::ProjectRootNotFound {
            base: base.to_path_buf(),
        }
    })
}

fn first_candidate<F>(base: &Path, candidates: &[&str], matches: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    candidates.iter().find_map(|relative| {
        let dir = base.join(relative);
        debug!("Checking {:?}", dir);
        if matches(&dir) {
            Some(dunce::canonicalize(&dir).unwrap_or(dir))
        } else {
            None
        }
    })
}
