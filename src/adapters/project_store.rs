//! Filesystem access for a rulecraft project directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::paths::{self, TEMPLATE_EXTENSION};
use crate::domain::{AppError, CompiledRule, LockFile, ProjectConfig, Target, VendorName};

/// A template source file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Logical name: relative path without extension, `/`-separated,
    /// prefixed with the vendor name for vendor templates.
    pub name: String,
    pub path: PathBuf,
    pub vendor: Option<VendorName>,
}

/// A file previously written below `compiled/<target>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFile {
    pub filename: String,
    pub content: String,
}

/// Filesystem-based project store.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A project is any directory with a `templates/` folder.
    pub fn exists(&self) -> bool {
        paths::templates_dir(&self.root).is_dir()
    }

    pub fn ensure_exists(&self) -> Result<(), AppError> {
        if self.exists() {
            Ok(())
        } else {
            Err(AppError::ProjectNotFound(self.root.display().to_string()))
        }
    }

    /// Load `rulecraft.yaml`; a missing file yields the defaults.
    pub fn load_config(&self) -> Result<ProjectConfig, AppError> {
        match read_optional(&paths::config_file(&self.root))? {
            Some(content) => ProjectConfig::parse(&content),
            None => Ok(ProjectConfig::default()),
        }
    }

    pub fn load_lock(&self) -> Result<LockFile, AppError> {
        match read_optional(&paths::lock_file(&self.root))? {
            Some(content) => LockFile::parse(&content),
            None => Ok(LockFile::default()),
        }
    }

    pub fn save_lock(&self, lock: &LockFile) -> Result<(), AppError> {
        fs::write(paths::lock_file(&self.root), lock.to_yaml()?)?;
        Ok(())
    }

    /// Local templates followed by the templates of each given vendor.
    pub fn discover_templates(&self, vendors: &[VendorName]) -> Result<Vec<TemplateFile>, AppError> {
        let mut files = discover_in(&paths::templates_dir(&self.root), None)?;
        for vendor in vendors {
            let dir = paths::vendor_templates_dir(&self.root, vendor.as_str());
            files.extend(discover_in(&dir, Some(vendor))?);
        }
        Ok(files)
    }

    pub fn vendor_dir(&self, vendor: &VendorName) -> PathBuf {
        paths::vendor_dir(&self.root, vendor.as_str())
    }

    /// Remove everything previously compiled for `target`.
    pub fn clear_compiled(&self, target: &Target) -> Result<(), AppError> {
        let dir = paths::compiled_target_dir(&self.root, target.as_str());
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }

    /// Write a compiled rule below the project root, returning its path.
    pub fn write_compiled(&self, rule: &CompiledRule) -> Result<PathBuf, AppError> {
        let path = self.root.join(rule.output_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &rule.content)?;
        Ok(path)
    }

    /// Compiled files for `target`, sorted by file name.
    pub fn read_compiled(&self, target: &Target) -> Result<Vec<CompiledFile>, AppError> {
        let dir = paths::compiled_target_dir(&self.root, target.as_str());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let filename = relative_name(&dir, entry.path());
            let content = fs::read_to_string(entry.path())?;
            files.push(CompiledFile { filename, content });
        }
        Ok(files)
    }
}

fn discover_in(dir: &Path, vendor: Option<&VendorName>) -> Result<Vec<TemplateFile>, AppError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_EXTENSION)
        {
            continue;
        }

        let relative = relative_name(dir, &path.with_extension(""));
        let name = match vendor {
            Some(vendor) => format!("{}/{}", vendor, relative),
            None => relative,
        };
        files.push(TemplateFile { name, path: path.to_path_buf(), vendor: vendor.cloned() });
    }
    Ok(files)
}

/// `/`-joined path of `path` relative to `base`.
fn relative_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TemplateData, TemplateEngine, Compiler};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn discovers_local_and_vendor_templates_with_logical_names() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "templates/style.tmpl", "a");
        write(dir.path(), "templates/partials/header.tmpl", "b");
        write(dir.path(), "templates/notes.txt", "ignored");
        write(dir.path(), "vendors/acme/templates/lang/rust.tmpl", "c");

        let store = ProjectStore::new(dir.path());
        let acme = VendorName::new("acme").unwrap();
        let names: Vec<String> = store
            .discover_templates(std::slice::from_ref(&acme))
            .unwrap()
            .into_iter()
            .map(|file| file.name)
            .collect();

        assert_eq!(names, vec!["partials/header", "style", "acme/lang/rust"]);
    }

    #[test]
    fn missing_config_and_lock_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());

        assert_eq!(store.load_config().unwrap(), ProjectConfig::default());
        assert_eq!(store.load_lock().unwrap(), LockFile::default());
    }

    #[test]
    fn ensure_exists_requires_templates_directory() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        assert!(matches!(store.ensure_exists(), Err(AppError::ProjectNotFound(_))));

        fs::create_dir_all(dir.path().join("templates")).unwrap();
        assert!(store.ensure_exists().is_ok());
    }

    #[test]
    fn compiled_rules_are_written_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path());
        let mut engine = TemplateEngine::new();
        engine.load_template("style", "Body").unwrap();
        let rule = Compiler::new(engine)
            .compile_template("style", &Target::Roo, &TemplateData::new("style"))
            .unwrap();

        let path = store.write_compiled(&rule).unwrap();

        assert_eq!(path, dir.path().join("compiled/roo/style.md"));
        let files = store.read_compiled(&Target::Roo).unwrap();
        assert_eq!(files, vec![CompiledFile { filename: "style.md".into(), content: "Body".into() }]);

        store.clear_compiled(&Target::Roo).unwrap();
        assert!(store.read_compiled(&Target::Roo).unwrap().is_empty());
    }
}
