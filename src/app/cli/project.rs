//! Init, compile and list commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::parse_target;
use crate::app::api::{self, CompileOptions, CompileReport};
use crate::domain::{AppError, VendorName};

pub fn run_init(path: Option<PathBuf>) -> Result<(), AppError> {
    let root = match path {
        Some(path) => {
            fs::create_dir_all(&path)?;
            std::path::absolute(path)?
        }
        None => std::env::current_dir()?,
    };
    let outcome = api::init_at(&root)?;

    println!("✅ Initialized rulecraft project in {}", root.display());
    for created in &outcome.created {
        let relative = created.strip_prefix(&root).unwrap_or(created);
        println!("  + {}", relative.display());
    }
    Ok(())
}

/// Returns exit code 1 when any template failed.
pub fn run_compile(target: Option<String>, vendor: Option<String>) -> Result<i32, AppError> {
    let options = CompileOptions {
        target: parse_target(target)?,
        vendor: vendor.as_deref().map(VendorName::new).transpose()?,
    };
    let report = api::compile(options)?;
    Ok(print_compile_report(&report))
}

pub(super) fn print_compile_report(report: &CompileReport) -> i32 {
    let targets: Vec<&str> = report.targets.iter().map(|target| target.as_str()).collect();
    println!("✅ Compiled {} file(s) for {}", report.written.len(), targets.join(", "));
    for path in &report.overwritten {
        eprintln!("⚠️  {} was written by more than one rule; the last one wins", path.display());
    }

    if report.is_success() {
        return 0;
    }
    eprintln!("⚠️  {} template(s) failed:", report.failures.len());
    for failure in &report.failures {
        match &failure.target {
            Some(target) => eprintln!("  • {} [{}]: {}", failure.template, target, failure.reason),
            None => eprintln!("  • {}: {}", failure.template, failure.reason),
        }
    }
    1
}

pub fn run_list() -> Result<(), AppError> {
    let entries = api::list()?;
    if entries.is_empty() {
        println!("No templates found");
        return Ok(());
    }

    let mut groups: BTreeMap<Option<String>, Vec<_>> = BTreeMap::new();
    for entry in &entries {
        groups.entry(entry.vendor.as_ref().map(|v| v.to_string())).or_default().push(entry);
    }

    for (vendor, entries) in groups {
        match vendor {
            Some(vendor) => println!("Vendor '{}':", vendor),
            None => println!("Local templates:"),
        }
        for entry in entries {
            let suffix = match (&entry.description, entry.partial) {
                (_, true) => " (partial)".to_string(),
                (Some(description), false) => format!(" - {}", description),
                (None, false) => String::new(),
            };
            println!("  {}{}", entry.name, suffix);
        }
    }
    Ok(())
}
