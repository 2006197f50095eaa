//! CLI Adapter.

mod install;
mod project;
mod vendor;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, InstallScope, Target};

#[derive(Parser)]
#[command(name = "rulecraft")]
#[command(version)]
#[command(
    about = "Compile AI coding-assistant rules from shared templates",
    long_about = None
)]
struct Cli {
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create rulecraft.yaml and example templates
    #[clap(visible_alias = "i")]
    Init {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Compile templates into compiled/<target>/
    #[clap(visible_alias = "c")]
    Compile {
        /// Target: cursor, claude, cline, copilot, or roo
        target: Option<String>,
        /// Compile only this vendor's templates
        #[arg(long)]
        vendor: Option<String>,
    },
    /// List available templates
    #[clap(visible_alias = "ls")]
    List,
    /// Install compiled rules for the assistants
    Install {
        /// Install only this target
        #[arg(short, long)]
        target: Option<String>,
        /// Install only this rule
        #[arg(short, long)]
        rule: Option<String>,
        /// Install into this project instead of the home directory
        #[arg(short, long)]
        project: Option<PathBuf>,
    },
    /// Remove installed rules
    #[clap(visible_alias = "rm")]
    Uninstall {
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long)]
        rule: Option<String>,
        /// Only installations in this project
        #[arg(short, long, conflicts_with = "global")]
        project: Option<PathBuf>,
        /// Only installations in the home directory
        #[arg(short, long)]
        global: bool,
        /// Remove files even if they were edited after install
        #[arg(short, long)]
        force: bool,
        /// Remove every installation without prompting
        #[arg(short, long)]
        all: bool,
    },
    /// Show installed rules
    Installed {
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long, conflicts_with = "global")]
        project: Option<PathBuf>,
        #[arg(short, long)]
        global: bool,
    },
    /// Fetch a vendor template repository
    #[clap(visible_alias = "f")]
    Fetch {
        /// Git URL or local path of the repository
        url: String,
        /// Vendor name (defaults to the repository name)
        #[arg(short, long)]
        name: Option<String>,
        /// Branch, tag, or commit to check out
        #[arg(long = "ref")]
        git_ref: Option<String>,
        /// Replace an existing vendor of the same name
        #[arg(short, long)]
        force: bool,
    },
    /// Update fetched vendors to their latest commit
    #[clap(visible_alias = "up")]
    Update {
        /// Vendors to update (defaults to all)
        names: Vec<String>,
    },
    /// Inspect or remove fetched vendors
    Vendors {
        #[command(subcommand)]
        command: vendor::VendorCommands,
    },
    /// Update all vendors, then compile
    Sync {
        /// Compile only this target
        target: Option<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Init { path } => project::run_init(path).map(|_| 0),
        Commands::Compile { target, vendor } => project::run_compile(target, vendor),
        Commands::List => project::run_list().map(|_| 0),
        Commands::Install { target, rule, project } => {
            install::run_install(target, rule, project).map(|_| 0)
        }
        Commands::Uninstall { target, rule, project, global, force, all } => {
            scope_filter(project, global)
                .and_then(|scope| install::run_uninstall(target, rule, scope, force, all))
        }
        Commands::Installed { target, project, global } => scope_filter(project, global)
            .and_then(|scope| install::run_installed(target, scope))
            .map(|_| 0),
        Commands::Fetch { url, name, git_ref, force } => {
            vendor::run_fetch(url, name, git_ref, force).map(|_| 0)
        }
        Commands::Update { names } => vendor::run_update(names).map(|_| 0),
        Commands::Vendors { command } => vendor::run_vendors(command).map(|_| 0),
        Commands::Sync { target } => vendor::run_sync(target),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_target(name: Option<String>) -> Result<Option<Target>, AppError> {
    name.map(|name| Target::from_name(&name)).transpose()
}

/// Scope selected by `--project`/`--global`; `None` when neither is given.
fn scope_filter(project: Option<PathBuf>, global: bool) -> Result<Option<InstallScope>, AppError> {
    match project {
        Some(path) => Ok(Some(InstallScope::Project(std::path::absolute(path)?))),
        None if global => Ok(Some(InstallScope::Global)),
        None => Ok(None),
    }
}

/// First seven characters of a commit id.
fn short_commit(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scope_filter_prefers_project() {
        assert_eq!(scope_filter(None, true).unwrap(), Some(InstallScope::Global));
        assert_eq!(scope_filter(None, false).unwrap(), None);
        let scope = scope_filter(Some(PathBuf::from("/work/app")), false).unwrap();
        assert_eq!(scope, Some(InstallScope::Project(PathBuf::from("/work/app"))));
    }

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }

    #[test]
    fn parses_uninstall_flags() {
        let cli = Cli::try_parse_from(["rulecraft", "rm", "-t", "roo", "-g", "--force"]).unwrap();
        match cli.command {
            Commands::Uninstall { target, global, force, all, .. } => {
                assert_eq!(target.as_deref(), Some("roo"));
                assert!(global && force && !all);
            }
            _ => panic!("expected uninstall"),
        }
    }
}
