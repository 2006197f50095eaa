use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{FakeSourceControl, ScriptedSelector};
use crate::app::AppContext;

/// Temporary project, home and state directories wired into an `AppContext`.
pub struct TestProject {
    _root: TempDir,
    pub project: PathBuf,
    pub home: PathBuf,
    pub ctx: AppContext<FakeSourceControl, ScriptedSelector>,
}

impl TestProject {
    pub fn new() -> Self {
        Self::with(FakeSourceControl::new(), ScriptedSelector::cancelling())
    }

    pub fn with(git: FakeSourceControl, selector: ScriptedSelector) -> Self {
        let root = TempDir::new().unwrap();
        let project = root.path().join("project");
        let home = root.path().join("home");
        let state = root.path().join("state");
        fs::create_dir_all(project.join("templates")).unwrap();
        fs::create_dir_all(&home).unwrap();

        let ctx = AppContext::new(&project, &home, &state, git, selector);
        Self { _root: root, project, home, ctx }
    }

    /// Write `content` at `relative` below the project root.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }
}
