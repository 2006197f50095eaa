//! Remove installed rules recorded in the installation ledger.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::domain::{AppError, InstallFilter, InstallationRecord};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub filter: InstallFilter,
    /// Remove files even when they changed after install.
    pub force: bool,
    /// Select every record instead of prompting when no filter is given.
    pub all: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UninstallReport {
    pub removed: Vec<PathBuf>,
    /// Records dropped whose file is kept because other rules still use it.
    pub detached: Vec<InstallationRecord>,
    /// Files left in place because they were edited after install.
    pub modified: Vec<PathBuf>,
    /// Records dropped whose file was already gone.
    pub missing: Vec<PathBuf>,
    pub cancelled: bool,
}

impl UninstallReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.detached.is_empty()
            && self.modified.is_empty()
            && self.missing.is_empty()
    }
}

/// Execute the uninstall command.
///
/// Without a filter (and without `all`) the user picks records through the
/// context's selector.
pub fn execute<G, S>(
    ctx: &AppContext<G, S>,
    options: UninstallOptions,
) -> Result<UninstallReport, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let mut ledger = ctx.ledger().load()?;
    let mut report = UninstallReport::default();

    let selected: Vec<InstallationRecord> = if options.filter.is_empty() && !options.all {
        let candidates = ledger.installations.clone();
        let items: Vec<String> = candidates.iter().map(describe).collect();
        match ctx.selector().select_many("Select rules to uninstall", &items)? {
            Some(indices) => {
                indices.into_iter().filter_map(|index| candidates.get(index).cloned()).collect()
            }
            None => {
                report.cancelled = true;
                return Ok(report);
            }
        }
    } else {
        ledger.select(&options.filter).into_iter().cloned().collect()
    };

    let mut by_path: BTreeMap<PathBuf, Vec<InstallationRecord>> = BTreeMap::new();
    for record in selected {
        by_path.entry(record.file_path.clone()).or_default().push(record);
    }

    let mut dropped = Vec::new();
    for (path, records) in by_path {
        let still_used = ledger
            .installations
            .iter()
            .any(|other| other.file_path == path && !records.contains(other));
        if still_used {
            report.detached.extend(records.iter().cloned());
            dropped.extend(records);
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => Some(String::new()),
            Err(err) => return Err(err.into()),
        };

        match content {
            None => {
                report.missing.push(path);
                dropped.extend(records);
            }
            Some(content)
                if !options.force && !records.iter().any(|r| r.matches_content(&content)) =>
            {
                tracing::debug!(path = %path.display(), "file modified since install");
                report.modified.push(path);
            }
            Some(_) => {
                fs::remove_file(&path)?;
                report.removed.push(path);
                dropped.extend(records);
            }
        }
    }

    ledger.remove(&dropped);
    ctx.ledger().save(&ledger)?;
    Ok(report)
}

fn describe(record: &InstallationRecord) -> String {
    format!("{} {} ({}) {}", record.target, record.rule, record.scope(), record.file_path.display())
}
