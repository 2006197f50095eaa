//! Vendor commands.

use clap::Subcommand;

use super::project::print_compile_report;
use super::{parse_target, short_commit};
use crate::app::api::{self, FetchOptions, VendorUpdate};
use crate::domain::{AppError, VendorName};

#[derive(Subcommand)]
pub enum VendorCommands {
    /// List fetched vendors
    #[clap(visible_alias = "ls")]
    List,
    /// Remove a fetched vendor
    #[clap(visible_alias = "rm")]
    Remove {
        /// Vendor name
        name: String,
    },
}

pub fn run_fetch(
    url: String,
    name: Option<String>,
    git_ref: Option<String>,
    force: bool,
) -> Result<(), AppError> {
    let fetched = api::fetch(FetchOptions { url, name, git_ref, force })?;
    println!(
        "✅ Fetched vendor '{}' at {}",
        fetched.name,
        short_commit(&fetched.lock.commit)
    );
    Ok(())
}

pub fn run_update(names: Vec<String>) -> Result<(), AppError> {
    let names = names.iter().map(|name| VendorName::new(name)).collect::<Result<Vec<_>, _>>()?;
    let updates = api::update(&names)?;
    print_updates(&updates);
    Ok(())
}

fn print_updates(updates: &[VendorUpdate]) {
    if updates.is_empty() {
        println!("No vendors to update");
    }
    for update in updates {
        if update.changed() {
            println!(
                "✅ Updated '{}' {} -> {}",
                update.name,
                short_commit(&update.previous),
                short_commit(&update.current)
            );
        } else {
            println!("  '{}' already up to date ({})", update.name, short_commit(&update.current));
        }
    }
}

pub fn run_vendors(command: VendorCommands) -> Result<(), AppError> {
    match command {
        VendorCommands::List => {
            let vendors = api::vendors()?;
            if vendors.is_empty() {
                println!("No vendors fetched");
            }
            for (name, lock) in vendors {
                let git_ref = lock.git_ref.map(|r| format!(" @{}", r)).unwrap_or_default();
                println!("{} {}{} ({})", name, lock.url, git_ref, short_commit(&lock.commit));
            }
        }
        VendorCommands::Remove { name } => {
            let name = VendorName::new(&name)?;
            api::remove_vendor(&name)?;
            println!("✅ Removed vendor '{}'", name);
        }
    }
    Ok(())
}

/// Returns the compile exit code.
pub fn run_sync(target: Option<String>) -> Result<i32, AppError> {
    let report = api::sync(parse_target(target)?)?;
    print_updates(&report.updates);
    Ok(print_compile_report(&report.compile))
}
