//! Vendor identities and the `rulecraft.lock` model.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::AppError;

/// A validated vendor directory name.
///
/// Guarantees:
/// - Non-empty
/// - Contains only alphanumeric characters, `-`, `_`, or `.`
/// - Not `.` or `..`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct VendorName(String);

impl VendorName {
    pub fn new(name: &str) -> Result<Self, AppError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && name.chars().all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid { Ok(Self(name.to_string())) } else { Err(AppError::InvalidVendorName(name.to_string())) }
    }

    /// Derive a vendor name from a repository URL or local path.
    ///
    /// Uses the last path segment with any `.git` suffix removed; handles
    /// `https://`, `ssh://`, scp-style `git@host:org/repo.git`, and paths.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let trimmed = url.trim().trim_end_matches('/');
        let path = match Url::parse(trimmed) {
            Ok(parsed) => parsed.path().trim_end_matches('/').to_string(),
            _ => trimmed.rsplit_once(':').map(|(_, path)| path).unwrap_or(trimmed).to_string(),
        };
        let segment = path.rsplit(['/', '\\']).next().unwrap_or_default();
        Self::new(segment.strip_suffix(".git").unwrap_or(segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<VendorName> for String {
    fn from(val: VendorName) -> Self {
        val.0
    }
}

impl<'de> Deserialize<'de> for VendorName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VendorName::new(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for VendorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pinned state of one fetched vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorLock {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    pub commit: String,
    pub fetched_at: DateTime<Utc>,
}

/// Contents of `rulecraft.lock`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockFile {
    #[serde(default)]
    pub vendors: BTreeMap<VendorName, VendorLock>,
}

impl LockFile {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| AppError::ParseError { what: "rulecraft.lock".into(), details: e.to_string() })
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::ParseError { what: "rulecraft.lock".into(), details: e.to_string() })
    }

    pub fn get(&self, name: &VendorName) -> Option<&VendorLock> {
        self.vendors.get(name)
    }

    pub fn upsert(&mut self, name: VendorName, lock: VendorLock) {
        self.vendors.insert(name, lock);
    }

    pub fn remove(&mut self, name: &VendorName) -> Option<VendorLock> {
        self.vendors.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &VendorName> {
        self.vendors.keys()
    }
}
