//! Shared testing harness for `rulecraft` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create test home");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub(crate) fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Directory holding the installation ledger.
    pub(crate) fn state_dir(&self) -> PathBuf {
        self.root.path().join("state")
    }

    /// Path to the project directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Scratch directory outside the project.
    pub(crate) fn scratch(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join(name);
        fs::create_dir_all(&dir).expect("Failed to create scratch directory");
        dir
    }

    /// Build a command for invoking the compiled `rulecraft` binary.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("rulecraft").expect("Failed to locate rulecraft binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.home())
            .env("RULECRAFT_HOME", self.state_dir())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run `rulecraft init` and assert success.
    pub(crate) fn init_project(&self) {
        self.cli().arg("init").assert().success();
    }

    pub(crate) fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        fs::create_dir_all(path.parent().expect("path has parent")).expect("create parent");
        fs::write(&path, content).expect("write file");
        path
    }

    pub(crate) fn read(&self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let path = if path.is_absolute() { path.to_path_buf() } else { self.work_dir.join(path) };
        fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("Failed to read {}: {}", path.display(), err))
    }

    pub(crate) fn ledger(&self) -> String {
        fs::read_to_string(self.state_dir().join("installations.yaml")).unwrap_or_default()
    }
}
