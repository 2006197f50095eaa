//! Destination paths for installed rules per target and scope.

use std::path::{Path, PathBuf};

use super::AppError;
use super::installation::InstallScope;
use super::mode::InstallMode;
use super::post_process::{CLAUDE_MEMORY_FILE, COPILOT_SUFFIX};
use super::target::Target;

/// Copilot reads every project rule from this single file.
pub const COPILOT_INSTRUCTIONS_FILE: &str = ".github/copilot-instructions.md";

/// Resolve where a compiled file named `filename` is installed.
///
/// `home` is the user's home directory, used for global installs.
pub fn destination(
    target: &Target,
    mode: Option<InstallMode>,
    scope: &InstallScope,
    home: &Path,
    filename: &str,
) -> Result<PathBuf, AppError> {
    let path = match (target, scope) {
        (Target::Cursor, InstallScope::Global) => home.join(".cursor/rules").join(filename),
        (Target::Cursor, InstallScope::Project(root)) => root.join(".cursor/rules").join(filename),
        (Target::Claude, scope) if mode == Some(InstallMode::Memory) => match scope {
            InstallScope::Global => home.join(".claude").join(CLAUDE_MEMORY_FILE),
            InstallScope::Project(root) => root.join(CLAUDE_MEMORY_FILE),
        },
        (Target::Claude, InstallScope::Global) => home.join(".claude/commands").join(filename),
        (Target::Claude, InstallScope::Project(root)) => {
            root.join(".claude/commands").join(filename)
        }
        (Target::Cline, InstallScope::Global) => home.join("Documents/Cline/Rules").join(filename),
        (Target::Cline, InstallScope::Project(root)) => root.join(".clinerules").join(filename),
        (Target::Copilot, InstallScope::Project(root)) => root.join(COPILOT_INSTRUCTIONS_FILE),
        (Target::Roo, InstallScope::Global) => home.join(".roo/rules").join(filename),
        (Target::Roo, InstallScope::Project(root)) => root.join(".roo/rules").join(filename),
        (Target::Copilot, InstallScope::Global) | (Target::Other(_), _) => {
            return Err(AppError::UnsupportedInstall {
                target: target.to_string(),
                scope: scope_label(scope).to_string(),
            });
        }
    };
    Ok(path)
}

/// Recover the rule name and install mode from a compiled file name.
///
/// Claude memory output is always named `CLAUDE.md` and maps to rule `CLAUDE`.
pub fn rule_from_filename(target: &Target, filename: &str) -> (String, Option<InstallMode>) {
    let strip = |suffix: &str| filename.strip_suffix(suffix).unwrap_or(filename).to_string();
    match target {
        Target::Cursor => (strip(".mdc"), None),
        Target::Claude if filename == CLAUDE_MEMORY_FILE => {
            (strip(".md"), Some(InstallMode::Memory))
        }
        Target::Claude => (strip(".md"), Some(InstallMode::Command)),
        Target::Copilot => (strip(&format!(".{COPILOT_SUFFIX}.md")), None),
        Target::Cline | Target::Roo => (strip(".md"), None),
        Target::Other(_) => (strip(".txt"), None),
    }
}

fn scope_label(scope: &InstallScope) -> &'static str {
    match scope {
        InstallScope::Global => "global",
        InstallScope::Project(_) => "project",
    }
}
