//! Scoped working directory
//!
//! Gradle is launched from the project root. The process working directory
//! is switched for the duration of a guard and restored when it drops,
//! including on early error returns.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Restores the previous working directory on drop
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    /// Change into `dir`, remembering the current directory
    pub fn enter(dir: impl AsRef<Path>) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir.as_ref())?;
        debug!("Entered {:?} (from {:?})", dir.as_ref(), previous);
        Ok(Self { previous })
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!("Failed to restore working directory {:?}: {}", self.previous, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_restores_on_drop() {
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        {
            let _guard = WorkingDir::enter(dir.path()).unwrap();
            assert_eq!(
                dunce::canonicalize(env::current_dir().unwrap()).unwrap(),
                dunce::canonicalize(dir.path()).unwrap()
            );
        }
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_restores_on_early_return() {
        fn fails_inside(dir: &Path) -> io::Result<()> {
            let _guard = WorkingDir::enter(dir)?;
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }

        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(fails_inside(dir.path()).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_missing_directory_leaves_cwd_alone() {
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(WorkingDir::enter(dir.path().join("nope")).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
