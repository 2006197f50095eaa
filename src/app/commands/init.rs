//! Init command implementation.

use std::fs;
use std::path::PathBuf;

use crate::adapters::scaffold_assets::scaffold_files;
use crate::app::AppContext;
use crate::domain::{AppError, paths};
use crate::ports::{Selector, SourceControl};

/// Files and directories created by `init`.
#[derive(Debug, Clone, Default)]
pub struct InitOutcome {
    pub created: Vec<PathBuf>,
}

/// Execute the init command.
///
/// Writes the embedded scaffold and creates the `vendors/` and `compiled/`
/// directories. Existing template files are left untouched.
pub fn execute<G, S>(ctx: &AppContext<G, S>) -> Result<InitOutcome, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let root = ctx.project().root();
    if paths::config_file(root).exists() {
        return Err(AppError::ProjectExists(root.display().to_string()));
    }

    let mut outcome = InitOutcome::default();
    for file in scaffold_files() {
        let path = root.join(&file.path);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.content)?;
        outcome.created.push(path);
    }

    for dir in [paths::vendors_dir(root), root.join(paths::COMPILED_DIR)] {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            outcome.created.push(dir);
        }
    }
    Ok(outcome)
}
