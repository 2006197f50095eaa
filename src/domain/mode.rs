use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AppError;

/// Installation style for targets that distinguish memory from commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Persistent project or user memory (`CLAUDE.md`).
    Memory,
    /// Invocable slash command.
    Command,
    /// Produce both outputs from one template.
    Both,
}

impl InstallMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::Memory => "memory",
            InstallMode::Command => "command",
            InstallMode::Both => "both",
        }
    }

    /// Parse an optional mode value; blank means "use the target default".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<InstallMode>, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl FromStr for InstallMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(InstallMode::Memory),
            "command" => Ok(InstallMode::Command),
            "both" => Ok(InstallMode::Both),
            _ => Err(AppError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_mode_means_default() {
        assert_eq!(InstallMode::parse_optional(None).unwrap(), None);
        assert_eq!(InstallMode::parse_optional(Some("  ")).unwrap(), None);
    }

    #[test]
    fn parses_known_modes() {
        assert_eq!(InstallMode::parse_optional(Some("Both")).unwrap(), Some(InstallMode::Both));
        assert_eq!("memory".parse::<InstallMode>().unwrap(), InstallMode::Memory);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(matches!("agent".parse::<InstallMode>(), Err(AppError::InvalidMode(_))));
    }
}
