//! Vendor commands: shared template repositories checked out below
//! `vendors/<name>/` and pinned in `rulecraft.lock`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::{AppError, VendorLock, VendorName, paths};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub url: String,
    /// Vendor name; derived from the URL when unset.
    pub name: Option<String>,
    /// Branch, tag or commit to check out.
    pub git_ref: Option<String>,
    /// Replace an existing vendor of the same name.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedVendor {
    pub name: VendorName,
    pub lock: VendorLock,
}

/// Commit movement of one vendor during `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorUpdate {
    pub name: VendorName,
    pub previous: String,
    pub current: String,
}

impl VendorUpdate {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Clone a vendor repository and record it in the lock file.
pub fn fetch<G, S>(ctx: &AppContext<G, S>, options: FetchOptions) -> Result<FetchedVendor, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let name = match options.name.as_deref() {
        Some(name) => VendorName::new(name)?,
        None => VendorName::from_url(&options.url)?,
    };

    let mut lock = project.load_lock()?;
    let dir = project.vendor_dir(&name);
    let replacing = dir.exists();
    if (lock.get(&name).is_some() || replacing) && !options.force {
        return Err(AppError::VendorExists(name.to_string()));
    }
    fs::create_dir_all(paths::vendors_dir(project.root()))?;

    // A forced fetch clones beside the old checkout and swaps only on success.
    let clone_dir = if replacing { staging_dir(&dir) } else { dir.clone() };
    if clone_dir.exists() {
        fs::remove_dir_all(&clone_dir)?;
    }

    tracing::info!(vendor = %name, url = %options.url, "fetching vendor");
    let commit =
        match ctx.git().clone_repository(&options.url, &clone_dir, options.git_ref.as_deref()) {
            Ok(commit) => commit,
            Err(err) => {
                // Leave no half-written checkout behind.
                if clone_dir.exists() {
                    fs::remove_dir_all(&clone_dir)?;
                }
                return Err(err);
            }
        };
    if replacing {
        fs::remove_dir_all(&dir)?;
        fs::rename(&clone_dir, &dir)?;
    }

    let entry = VendorLock {
        url: options.url,
        git_ref: options.git_ref,
        commit,
        fetched_at: Utc::now(),
    };
    lock.upsert(name.clone(), entry.clone());
    project.save_lock(&lock)?;

    Ok(FetchedVendor { name, lock: entry })
}

/// Fetch the named vendors (all when `names` is empty) and move them to the
/// newest commit of their branch or pinned ref.
pub fn update<G, S>(ctx: &AppContext<G, S>, names: &[VendorName]) -> Result<Vec<VendorUpdate>, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let mut lock = project.load_lock()?;
    let selected: Vec<VendorName> =
        if names.is_empty() { lock.names().cloned().collect() } else { names.to_vec() };

    if let Some(unknown) = selected.iter().find(|name| lock.get(name).is_none()) {
        return Err(AppError::VendorNotFound(unknown.to_string()));
    }

    let mut updates = Vec::new();
    for name in selected {
        let Some(entry) = lock.get(&name).cloned() else {
            continue;
        };

        let dir = project.vendor_dir(&name);
        let current = if dir.exists() {
            ctx.git().update_repository(&dir, entry.git_ref.as_deref())?
        } else {
            tracing::warn!(vendor = %name, "vendor checkout missing; cloning again");
            ctx.git().clone_repository(&entry.url, &dir, entry.git_ref.as_deref())?
        };

        let update = VendorUpdate { name: name.clone(), previous: entry.commit.clone(), current };
        lock.upsert(
            name,
            VendorLock { commit: update.current.clone(), fetched_at: Utc::now(), ..entry },
        );
        // Lock follows each checkout as soon as it moves.
        project.save_lock(&lock)?;
        updates.push(update);
    }

    Ok(updates)
}

/// Sibling of `dir` that receives a replacement checkout.
fn staging_dir(dir: &Path) -> PathBuf {
    let name = dir.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    dir.with_file_name(format!(".{name}.incoming"))
}

/// Locked vendors sorted by name.
pub fn list<G, S>(ctx: &AppContext<G, S>) -> Result<Vec<(VendorName, VendorLock)>, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;
    let lock = project.load_lock()?;
    Ok(lock.vendors.into_iter().collect())
}

/// Delete a vendor checkout and its lock entry.
pub fn remove<G, S>(ctx: &AppContext<G, S>, name: &VendorName) -> Result<VendorLock, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let mut lock = project.load_lock()?;
    let entry = lock.remove(name).ok_or_else(|| AppError::VendorNotFound(name.to_string()))?;

    let dir = project.vendor_dir(name);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    project.save_lock(&lock)?;
    Ok(entry)
}
