//! SDK root discovery for the SDK-libs build
//!
//! The SDK root is the nearest ancestor holding the build scripts
//! directory. Its path is handed to Gradle as `OCULUS_SDK_PATH`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::BuildError;

/// Directory, relative to the SDK root, that identifies it
pub const SDK_SCRIPTS_DIR: &str = "bin/scripts/build";

/// Environment variable carrying the SDK root to Gradle
pub const SDK_PATH_ENV_VAR: &str = "OCULUS_SDK_PATH";

/// Paths this short are filesystem roots (`/`, `C:\`) or direct children of one
const MIN_ROOT_LEN: usize = 5;

/// Walk upward from `start` until a directory containing the build scripts
/// is found
pub fn find_sdk_root(start: &Path) -> Result<PathBuf, BuildError> {
    let not_found = || BuildError::SdkRootNotFound {
        start: start.to_path_buf(),
    };

    let mut root = dunce::canonicalize(start)?;
    while !root.join(SDK_SCRIPTS_DIR).is_dir() {
        root = root.parent().ok_or_else(not_found)?.to_path_buf();
        if root.as_os_str().len() <= MIN_ROOT_LEN {
            return Err(not_found());
        }
    }

    debug!("SDK root is {:?}", root);
    Ok(root)
}
