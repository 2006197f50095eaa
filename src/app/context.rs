use std::path::{Path, PathBuf};

use crate::adapters::{LedgerStore, ProjectStore};
use crate::domain::paths;
use crate::ports::{Selector, SourceControl};

/// Application context holding dependencies for command execution.
pub struct AppContext<G: SourceControl, S: Selector> {
    project: ProjectStore,
    ledger: LedgerStore,
    home: PathBuf,
    git: G,
    selector: S,
}

impl<G: SourceControl, S: Selector> AppContext<G, S> {
    /// Create a new application context.
    ///
    /// `home` anchors global installs; the installation ledger lives in
    /// `state_dir`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        home: impl Into<PathBuf>,
        state_dir: &Path,
        git: G,
        selector: S,
    ) -> Self {
        Self {
            project: ProjectStore::new(project_root),
            ledger: LedgerStore::new(paths::ledger_file(state_dir)),
            home: home.into(),
            git,
            selector,
        }
    }

    /// Get a reference to the project store.
    pub fn project(&self) -> &ProjectStore {
        &self.project
    }

    /// Get a reference to the installation ledger store.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }
}
