use std::fmt;

use serde::{Deserialize, Serialize};

use super::AppError;

/// A downstream AI coding assistant that compiled rules are written for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    /// Cursor: `.mdc` rule files with their own front matter.
    Cursor,
    /// Claude Code: slash commands or `CLAUDE.md` memory.
    Claude,
    /// Cline: plain Markdown rules.
    Cline,
    /// GitHub Copilot: one combined instructions file.
    Copilot,
    /// Roo Code: plain Markdown rules.
    Roo,
    /// Any other identifier; compiled as plain text.
    Other(String),
}

impl Target {
    /// All supported targets in order.
    pub const ALL: [Target; 5] =
        [Target::Cursor, Target::Claude, Target::Cline, Target::Copilot, Target::Roo];

    /// Identifier used in templates, directory names, and the CLI.
    pub fn as_str(&self) -> &str {
        match self {
            Target::Cursor => "cursor",
            Target::Claude => "claude",
            Target::Cline => "cline",
            Target::Copilot => "copilot",
            Target::Roo => "roo",
            Target::Other(name) => name,
        }
    }

    /// Parse a supported target, rejecting unknown identifiers.
    pub fn from_name(name: &str) -> Result<Target, AppError> {
        match Target::from(name.to_lowercase()) {
            Target::Other(_) => Err(AppError::InvalidTarget { name: name.to_string() }),
            target => Ok(target),
        }
    }

    /// Whether the target renders distinct memory and command outputs.
    pub fn supports_modes(&self) -> bool {
        matches!(self, Target::Claude)
    }

    /// Whether every rule for this target lands in one shared file.
    pub fn is_combined(&self) -> bool {
        matches!(self, Target::Copilot)
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cursor" => Target::Cursor,
            "claude" => Target::Claude,
            "cline" => Target::Cline,
            "copilot" => Target::Copilot,
            "roo" => Target::Roo,
            _ => Target::Other(value),
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Target::from(value.to_string())
    }
}

impl From<Target> for String {
    fn from(value: Target) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
