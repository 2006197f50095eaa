//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution. Every command has a variant operating on the current
//! directory and an `_at` variant taking the project root explicitly.

use std::env;
use std::path::{Path, PathBuf};

use crate::adapters::{GitRepositoryAdapter, TerminalSelector};
use crate::app::{
    AppContext,
    commands::{compile, init, install, list, sync, uninstall, vendor},
};
use crate::domain::paths::{STATE_DIR_ENV, STATE_DIR_NAME};

pub use crate::app::commands::compile::{CompileFailure, CompileOptions, CompileReport};
pub use crate::app::commands::init::InitOutcome;
pub use crate::app::commands::install::{InstallOptions, InstallReport, InstalledRule};
pub use crate::app::commands::list::TemplateEntry;
pub use crate::app::commands::sync::SyncReport;
pub use crate::app::commands::uninstall::{UninstallOptions, UninstallReport};
pub use crate::app::commands::vendor::{FetchOptions, FetchedVendor, VendorUpdate};
pub use crate::domain::{
    AppError, InstallFilter, InstallMode, InstallScope, InstallationRecord, Target, VendorLock,
    VendorName,
};

type DefaultContext = AppContext<GitRepositoryAdapter, TerminalSelector>;

/// Create an `AppContext` for a project root.
fn create_context(root: PathBuf) -> Result<DefaultContext, AppError> {
    let home = home_dir()?;
    let state_dir = state_dir(&home);
    Ok(AppContext::new(root, &home, &state_dir, GitRepositoryAdapter::new(), TerminalSelector::new()))
}

fn home_dir() -> Result<PathBuf, AppError> {
    dirs::home_dir().ok_or(AppError::HomeNotFound)
}

/// `$RULECRAFT_HOME` when set, `~/.rulecraft` otherwise.
pub fn state_dir(home: &Path) -> PathBuf {
    match env::var_os(STATE_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home.join(STATE_DIR_NAME),
    }
}

// =============================================================================
// Project API
// =============================================================================

/// Scaffold a new project in the current directory.
pub fn init() -> Result<InitOutcome, AppError> {
    init_at(env::current_dir()?)
}

/// Scaffold a new project at the specified path.
pub fn init_at(path: impl Into<PathBuf>) -> Result<InitOutcome, AppError> {
    let ctx = create_context(path.into())?;
    init::execute(&ctx)
}

/// Compile the project in the current directory.
pub fn compile(options: CompileOptions) -> Result<CompileReport, AppError> {
    compile_at(env::current_dir()?, options)
}

pub fn compile_at(
    root: impl Into<PathBuf>,
    options: CompileOptions,
) -> Result<CompileReport, AppError> {
    let ctx = create_context(root.into())?;
    compile::execute(&ctx, options)
}

/// List templates of the project in the current directory.
pub fn list() -> Result<Vec<TemplateEntry>, AppError> {
    list_at(env::current_dir()?)
}

pub fn list_at(root: impl Into<PathBuf>) -> Result<Vec<TemplateEntry>, AppError> {
    let ctx = create_context(root.into())?;
    list::execute(&ctx)
}

// =============================================================================
// Installation API
// =============================================================================

/// Install compiled rules from the project in the current directory.
pub fn install(options: InstallOptions) -> Result<InstallReport, AppError> {
    install_at(env::current_dir()?, options)
}

pub fn install_at(
    root: impl Into<PathBuf>,
    options: InstallOptions,
) -> Result<InstallReport, AppError> {
    let ctx = create_context(root.into())?;
    install::execute(&ctx, options)
}

/// Remove installed rules; prompts on the terminal when no filter is given.
pub fn uninstall(options: UninstallOptions) -> Result<UninstallReport, AppError> {
    let ctx = create_context(env::current_dir()?)?;
    uninstall::execute(&ctx, options)
}

/// Installation records matching `filter`.
pub fn installed(filter: &InstallFilter) -> Result<Vec<InstallationRecord>, AppError> {
    let ctx = create_context(env::current_dir()?)?;
    install::installed(&ctx, filter)
}

// =============================================================================
// Vendor API
// =============================================================================

/// Fetch a vendor into the project in the current directory.
pub fn fetch(options: FetchOptions) -> Result<FetchedVendor, AppError> {
    fetch_at(env::current_dir()?, options)
}

pub fn fetch_at(root: impl Into<PathBuf>, options: FetchOptions) -> Result<FetchedVendor, AppError> {
    let ctx = create_context(root.into())?;
    vendor::fetch(&ctx, options)
}

/// Update vendors; all of them when `names` is empty.
pub fn update(names: &[VendorName]) -> Result<Vec<VendorUpdate>, AppError> {
    update_at(env::current_dir()?, names)
}

pub fn update_at(
    root: impl Into<PathBuf>,
    names: &[VendorName],
) -> Result<Vec<VendorUpdate>, AppError> {
    let ctx = create_context(root.into())?;
    vendor::update(&ctx, names)
}

pub fn vendors() -> Result<Vec<(VendorName, VendorLock)>, AppError> {
    let ctx = create_context(env::current_dir()?)?;
    vendor::list(&ctx)
}

pub fn remove_vendor(name: &VendorName) -> Result<VendorLock, AppError> {
    let ctx = create_context(env::current_dir()?)?;
    vendor::remove(&ctx, name)
}

/// Update all vendors, then compile.
pub fn sync(target: Option<Target>) -> Result<SyncReport, AppError> {
    sync_at(env::current_dir()?, target)
}

pub fn sync_at(root: impl Into<PathBuf>, target: Option<Target>) -> Result<SyncReport, AppError> {
    let ctx = create_context(root.into())?;
    sync::execute(&ctx, target)
}
