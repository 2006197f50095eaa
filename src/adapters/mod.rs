pub mod git_repository;
pub mod ledger_store;
pub mod project_store;
pub mod scaffold_assets;
pub mod terminal_selector;

pub use git_repository::GitRepositoryAdapter;
pub use ledger_store::LedgerStore;
pub use project_store::{CompiledFile, ProjectStore, TemplateFile};
pub use terminal_selector::TerminalSelector;
