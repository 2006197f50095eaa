//! Embedded scaffold written by `rulecraft init`.

use include_dir::{Dir, DirEntry, include_dir};

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

/// A file embedded in the scaffold bundle.
#[derive(Debug, Clone)]
pub struct ScaffoldFile {
    /// Path relative to the project root.
    pub path: String,
    /// File content as UTF-8 text.
    pub content: &'static str,
}

/// Returns all scaffold files sorted by path.
pub fn scaffold_files() -> Vec<ScaffoldFile> {
    let mut files = Vec::new();
    collect_files(&SCAFFOLD_DIR, &mut files);

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

fn collect_files(dir: &'static Dir, files: &mut Vec<ScaffoldFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    files.push(ScaffoldFile {
                        path: file.path().to_string_lossy().replace('\\', "/"),
                        content,
                    });
                }
            }
            DirEntry::Dir(subdir) => collect_files(subdir, files),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectConfig, split_front_matter};

    #[test]
    fn scaffold_includes_config_and_templates() {
        let files = scaffold_files();
        assert!(files.iter().any(|f| f.path == "rulecraft.yaml"));
        assert!(files.iter().any(|f| f.path == "templates/partials/project-context.tmpl"));
        assert!(files.iter().any(|f| f.path.starts_with("templates/") && !f.path.contains("partials")));
    }

    #[test]
    fn scaffold_config_parses() {
        let config = scaffold_files().into_iter().find(|f| f.path == "rulecraft.yaml").unwrap();
        assert!(ProjectConfig::parse(config.content).is_ok());
    }

    #[test]
    fn scaffold_templates_have_valid_front_matter() {
        for file in scaffold_files().iter().filter(|f| f.path.ends_with(".tmpl")) {
            assert!(split_front_matter(file.content).is_ok(), "{} front matter", file.path);
        }
    }
}
