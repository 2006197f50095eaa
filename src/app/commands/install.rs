//! Install compiled rules into the locations each assistant reads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::app::AppContext;
use crate::domain::install_location::{destination, rule_from_filename};
use crate::domain::{
    AppError, InstallFilter, InstallMode, InstallScope, InstallationLedger, InstallationRecord,
    Target,
};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Install only this target; all compiled targets otherwise.
    pub target: Option<Target>,
    /// Install only the rule with this name.
    pub rule: Option<String>,
    pub scope: InstallScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledRule {
    pub target: Target,
    pub rule: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub installed: Vec<InstalledRule>,
    /// Copies of files that were overwritten.
    pub backups: Vec<PathBuf>,
    /// Targets left out because they cannot be installed in this scope.
    pub skipped: Vec<(Target, String)>,
}

/// A compiled file read back from `compiled/<target>/`.
struct PendingRule {
    rule: String,
    mode: Option<InstallMode>,
    filename: String,
    content: String,
}

/// Execute the install command.
pub fn execute<G, S>(ctx: &AppContext<G, S>, options: InstallOptions) -> Result<InstallReport, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let targets = match &options.target {
        Some(target) => vec![target.clone()],
        None => Target::ALL.to_vec(),
    };

    let mut ledger = ctx.ledger().load()?;
    let mut report = InstallReport::default();
    let mut found_compiled = false;

    for target in &targets {
        let compiled: Vec<PendingRule> = project
            .read_compiled(target)?
            .into_iter()
            .map(|file| {
                let (rule, mode) = rule_from_filename(target, &file.filename);
                PendingRule { rule, mode, filename: file.filename, content: file.content }
            })
            .collect();
        found_compiled |= !compiled.is_empty();

        let selected: Vec<&PendingRule> = compiled
            .iter()
            .filter(|pending| options.rule.as_ref().is_none_or(|rule| &pending.rule == rule))
            .collect();
        if selected.is_empty() {
            continue;
        }

        let result = if target.is_combined() {
            install_combined(ctx, target, &compiled, &selected, &options.scope, &mut ledger, &mut report)
        } else {
            selected.iter().try_for_each(|pending| {
                install_one(ctx, target, pending, &options.scope, &mut ledger, &mut report)
            })
        };

        match result {
            Ok(()) => {}
            Err(err @ AppError::UnsupportedInstall { .. }) if options.target.is_none() => {
                tracing::debug!(%target, "skipping target: {err}");
                report.skipped.push((target.clone(), err.to_string()));
            }
            Err(err) => {
                // Files written before the failure stay on disk and must stay uninstallable.
                ctx.ledger().save(&ledger)?;
                return Err(err);
            }
        }
        ctx.ledger().save(&ledger)?;
    }

    if report.installed.is_empty() && report.skipped.is_empty() {
        if !found_compiled {
            let what = match &options.target {
                Some(target) => format!("target '{target}'"),
                None => "any target".to_string(),
            };
            return Err(AppError::NothingCompiled(what));
        }
        if let Some(rule) = options.rule {
            return Err(AppError::RuleNotFound(rule));
        }
    }

    Ok(report)
}

/// Records matching `filter`, most recent install last.
pub fn installed<G, S>(
    ctx: &AppContext<G, S>,
    filter: &InstallFilter,
) -> Result<Vec<InstallationRecord>, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let ledger = ctx.ledger().load()?;
    let mut records: Vec<InstallationRecord> = ledger.select(filter).into_iter().cloned().collect();
    records.sort_by_key(|record| record.installed_at);
    Ok(records)
}

fn install_one<G, S>(
    ctx: &AppContext<G, S>,
    target: &Target,
    pending: &PendingRule,
    scope: &InstallScope,
    ledger: &mut InstallationLedger,
    report: &mut InstallReport,
) -> Result<(), AppError>
where
    G: SourceControl,
    S: Selector,
{
    let path = destination(target, pending.mode, scope, ctx.home(), &pending.filename)?;
    report.backups.extend(write_with_backup(&path, &pending.content, Utc::now())?);
    ledger.record(InstallationRecord::new(
        target.clone(),
        &pending.rule,
        scope,
        pending.mode,
        &path,
        &pending.content,
    ));
    report.installed.push(InstalledRule { target: target.clone(), rule: pending.rule.clone(), path });
    Ok(())
}

/// Rewrite a target's single shared file.
///
/// Rules already installed into that file stay in it as long as they are
/// still compiled.
fn install_combined<G, S>(
    ctx: &AppContext<G, S>,
    target: &Target,
    compiled: &[PendingRule],
    selected: &[&PendingRule],
    scope: &InstallScope,
    ledger: &mut InstallationLedger,
    report: &mut InstallReport,
) -> Result<(), AppError>
where
    G: SourceControl,
    S: Selector,
{
    let path = destination(target, None, scope, ctx.home(), "")?;

    let previously: Vec<String> = ledger
        .installations
        .iter()
        .filter(|record| &record.target == target && record.file_path == path)
        .map(|record| record.rule.clone())
        .collect();
    let included: Vec<&PendingRule> = compiled
        .iter()
        .filter(|pending| {
            selected.iter().any(|chosen| chosen.rule == pending.rule)
                || previously.contains(&pending.rule)
        })
        .collect();

    let content = combine(&included);
    report.backups.extend(write_with_backup(&path, &content, Utc::now())?);

    for pending in &included {
        ledger.record(InstallationRecord::new(
            target.clone(),
            &pending.rule,
            scope,
            None,
            &path,
            &content,
        ));
    }
    for pending in selected {
        report.installed.push(InstalledRule {
            target: target.clone(),
            rule: pending.rule.clone(),
            path: path.clone(),
        });
    }
    Ok(())
}

/// Join rules sorted by name, separated by a blank line.
fn combine(rules: &[&PendingRule]) -> String {
    let mut sorted = rules.to_vec();
    sorted.sort_by(|a, b| a.rule.cmp(&b.rule));
    let mut content =
        sorted.iter().map(|pending| pending.content.trim()).collect::<Vec<_>>().join("\n\n");
    content.push('\n');
    content
}

/// Write `content` to `path`, first copying a differing existing file aside.
///
/// Returns the backup path when one was made.
fn write_with_backup(
    path: &Path,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Option<PathBuf>, AppError> {
    let backup = match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => return Ok(None),
        Ok(_) => {
            let backup = backup_path(path, now);
            fs::copy(path, &backup)?;
            Some(backup)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(backup)
}

/// `<file>.backup-<YYYYmmdd-HHMMSS>` next to `path`.
fn backup_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!("{name}.backup-{}", now.format("%Y%m%d-%H%M%S")))
}
