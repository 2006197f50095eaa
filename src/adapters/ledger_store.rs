use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, InstallationLedger};

/// Installation ledger persisted as YAML in the state directory.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger; a missing file is an empty ledger.
    pub fn load(&self) -> Result<InstallationLedger, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => InstallationLedger::parse(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(InstallationLedger::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, ledger: &InstallationLedger) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, ledger.to_yaml()?)?;
        Ok(())
    }
}
