//! Scratch Gradle projects driven by a shell-script `gradlew`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temp dir holding `settings.gradle`, `build.gradle` and a fake wrapper
pub struct GradleProject {
    dir: TempDir,
}

impl GradleProject {
    pub fn new(wrapper_script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.gradle"), "rootProject.name = 'OculusRoot'\n").unwrap();
        fs::write(dir.path().join("build.gradle"), "").unwrap();
        write_script(&dir.path().join("gradlew"), wrapper_script);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).unwrap()
    }
}

pub fn write_script(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
