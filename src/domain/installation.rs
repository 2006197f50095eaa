//! Ledger of files written by `install`, consumed by `uninstall`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::AppError;
use super::mode::InstallMode;
use super::target::Target;

/// Where a rule is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallScope {
    /// The user's home directory.
    Global,
    /// A specific project directory.
    Project(PathBuf),
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallScope::Global => f.write_str("global"),
            InstallScope::Project(path) => write!(f, "project ({})", path.display()),
        }
    }
}

/// One file written for one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationRecord {
    pub target: Target,
    pub rule: String,
    pub global: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<InstallMode>,
    pub installed_at: DateTime<Utc>,
    pub file_path: PathBuf,
    /// SHA-256 of the file content as written.
    pub content_sha256: String,
}

impl InstallationRecord {
    /// Record `content` written to `file_path` just now.
    pub fn new(
        target: Target,
        rule: impl Into<String>,
        scope: &InstallScope,
        mode: Option<InstallMode>,
        file_path: impl Into<PathBuf>,
        content: &str,
    ) -> Self {
        let (global, project_path) = match scope {
            InstallScope::Global => (true, None),
            InstallScope::Project(path) => (false, Some(path.clone())),
        };
        Self {
            target,
            rule: rule.into(),
            global,
            project_path,
            mode,
            installed_at: Utc::now(),
            file_path: file_path.into(),
            content_sha256: content_digest(content),
        }
    }

    /// Whether the file at `file_path` still holds what was written.
    pub fn matches_content(&self, content: &str) -> bool {
        self.content_sha256 == content_digest(content)
    }

    pub fn scope(&self) -> InstallScope {
        match (&self.project_path, self.global) {
            (Some(path), false) => InstallScope::Project(path.clone()),
            _ => InstallScope::Global,
        }
    }

    /// Records referring to the same install slot replace each other.
    fn same_slot(&self, other: &InstallationRecord) -> bool {
        self.target == other.target
            && self.rule == other.rule
            && self.global == other.global
            && self.project_path == other.project_path
            && self.mode == other.mode
            && self.file_path == other.file_path
    }
}

/// Selection criteria for ledger records; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallFilter {
    pub target: Option<Target>,
    pub rule: Option<String>,
    pub scope: Option<InstallScope>,
}

impl InstallFilter {
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.rule.is_none() && self.scope.is_none()
    }

    pub fn matches(&self, record: &InstallationRecord) -> bool {
        self.target.as_ref().is_none_or(|target| &record.target == target)
            && self.rule.as_ref().is_none_or(|rule| &record.rule == rule)
            && self.scope.as_ref().is_none_or(|scope| &record.scope() == scope)
    }
}

/// Contents of the installation ledger file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationLedger {
    #[serde(default)]
    pub installations: Vec<InstallationRecord>,
}

impl InstallationLedger {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AppError::ParseError {
            what: "installation ledger".into(),
            details: e.to_string(),
        })
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        serde_yaml::to_string(self).map_err(|e| AppError::ParseError {
            what: "installation ledger".into(),
            details: e.to_string(),
        })
    }

    /// Add `record`, replacing any record for the same slot.
    pub fn record(&mut self, record: InstallationRecord) {
        self.installations.retain(|existing| !existing.same_slot(&record));
        self.installations.push(record);
    }

    pub fn select(&self, filter: &InstallFilter) -> Vec<&InstallationRecord> {
        self.installations.iter().filter(|record| filter.matches(record)).collect()
    }

    /// Remove exactly the given records.
    pub fn remove(&mut self, records: &[InstallationRecord]) {
        self.installations.retain(|existing| !records.iter().any(|r| r.same_slot(existing)));
    }

    /// Whether any record still points at `path`.
    pub fn references(&self, path: &Path) -> bool {
        self.installations.iter().any(|record| record.file_path == path)
    }
}

/// Hex SHA-256 digest of file content.
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}
