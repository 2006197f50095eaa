//! Install, uninstall and installed commands.

use std::path::PathBuf;

use super::parse_target;
use crate::app::api::{self, InstallFilter, InstallOptions, InstallScope, UninstallOptions};
use crate::domain::AppError;

pub fn run_install(
    target: Option<String>,
    rule: Option<String>,
    project: Option<PathBuf>,
) -> Result<(), AppError> {
    let scope = match project {
        Some(path) => InstallScope::Project(std::path::absolute(path)?),
        None => InstallScope::Global,
    };
    let options = InstallOptions { target: parse_target(target)?, rule, scope };
    let report = api::install(options)?;

    for installed in &report.installed {
        println!(
            "✅ Installed {} rule '{}' to {}",
            installed.target,
            installed.rule,
            installed.path.display()
        );
    }
    for backup in &report.backups {
        println!("  Backed up previous file to {}", backup.display());
    }
    for (target, reason) in &report.skipped {
        println!("⚠️  Skipped {}: {}", target, reason);
    }
    Ok(())
}

/// Returns exit code 1 when modified files were left in place.
pub fn run_uninstall(
    target: Option<String>,
    rule: Option<String>,
    scope: Option<InstallScope>,
    force: bool,
    all: bool,
) -> Result<i32, AppError> {
    let filter = InstallFilter { target: parse_target(target)?, rule, scope };
    let report = api::uninstall(UninstallOptions { filter, force, all })?;

    if report.cancelled {
        println!("Cancelled");
        return Ok(0);
    }
    if report.is_empty() {
        println!("No matching installations");
        return Ok(0);
    }

    for path in &report.removed {
        println!("✅ Removed {}", path.display());
    }
    for record in &report.detached {
        println!(
            "✅ Detached {} rule '{}' ({} is still used by other rules)",
            record.target,
            record.rule,
            record.file_path.display()
        );
    }
    for path in &report.missing {
        println!("  Forgot {} (already deleted)", path.display());
    }
    for path in &report.modified {
        println!("⚠️  Kept {} (modified since install; use --force to remove)", path.display());
    }
    Ok(if report.modified.is_empty() { 0 } else { 1 })
}

pub fn run_installed(target: Option<String>, scope: Option<InstallScope>) -> Result<(), AppError> {
    let filter = InstallFilter { target: parse_target(target)?, rule: None, scope };
    let records = api::installed(&filter)?;

    if records.is_empty() {
        println!("No rules installed");
        return Ok(());
    }
    for record in records {
        let mode = record.mode.map(|mode| format!(" [{}]", mode)).unwrap_or_default();
        println!(
            "{:<8} {}{} {} {} ({})",
            record.target.as_str(),
            record.rule,
            mode,
            record.scope(),
            record.file_path.display(),
            record.installed_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
