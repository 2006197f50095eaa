use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::SourceControl;

/// In-memory stand-in for git.
///
/// Cloning materializes `files` below the destination; every update moves
/// to the next commit in `updates`, staying put once the list is exhausted.
#[derive(Default)]
pub struct FakeSourceControl {
    pub files: Vec<(String, String)>,
    pub clones: Mutex<Vec<(String, PathBuf, Option<String>)>>,
    pub updates: Mutex<Vec<String>>,
    /// Checkout directory names whose update fails.
    pub broken: Vec<String>,
    head: Mutex<String>,
}

impl FakeSourceControl {
    pub fn new() -> Self {
        Self { head: Mutex::new("c0ffee0".to_string()), ..Self::default() }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    pub fn with_broken_checkout(mut self, dir_name: &str) -> Self {
        self.broken.push(dir_name.to_string());
        self
    }

    /// Queue the commit returned by the next update.
    pub fn push_update(&self, commit: &str) {
        self.updates.lock().unwrap().push(commit.to_string());
    }

    pub fn clone_count(&self) -> usize {
        self.clones.lock().unwrap().len()
    }
}

impl SourceControl for FakeSourceControl {
    fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
        git_ref: Option<&str>,
    ) -> Result<String, AppError> {
        if url.contains("unreachable") {
            return Err(AppError::GitError {
                operation: "clone".into(),
                details: format!("could not reach {url}"),
            });
        }
        for (relative, content) in &self.files {
            let path = dest.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        fs::create_dir_all(dest)?;
        self.clones.lock().unwrap().push((
            url.to_string(),
            dest.to_path_buf(),
            git_ref.map(str::to_string),
        ));
        Ok(self.head.lock().unwrap().clone())
    }

    fn update_repository(&self, dest: &Path, _git_ref: Option<&str>) -> Result<String, AppError> {
        if dest.file_name().is_some_and(|name| self.broken.iter().any(|broken| name == broken.as_str())) {
            return Err(AppError::GitError {
                operation: "fetch".into(),
                details: format!("cannot update {}", dest.display()),
            });
        }
        let mut updates = self.updates.lock().unwrap();
        if !updates.is_empty() {
            *self.head.lock().unwrap() = updates.remove(0);
        }
        Ok(self.head.lock().unwrap().clone())
    }

    fn head_commit(&self, _dest: &Path) -> Result<String, AppError> {
        Ok(self.head.lock().unwrap().clone())
    }
}
