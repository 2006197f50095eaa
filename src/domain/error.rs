use std::io;

use thiserror::Error;

use super::front_matter::FrontMatterError;
use super::template::TemplateError;

/// Library-wide error type for rulecraft operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Project already initialized at the target location.
    #[error("rulecraft.yaml already exists in {0}")]
    ProjectExists(String),

    /// No rulecraft project found at the working location.
    #[error("No rulecraft project found in {0} (missing templates/ directory)")]
    ProjectNotFound(String),

    /// Target name is not one of the supported assistants.
    #[error("Invalid target '{name}': must be one of cursor, claude, cline, copilot, roo")]
    InvalidTarget { name: String },

    /// Installation mode is not one of memory, command, both.
    #[error("Invalid mode '{0}': must be one of memory, command, both")]
    InvalidMode(String),

    /// Vendor name is invalid.
    #[error("Invalid vendor name '{0}': must be alphanumeric with hyphens, underscores, or periods")]
    InvalidVendorName(String),

    /// Vendor is not present in the lock file.
    #[error("Vendor '{0}' not found")]
    VendorNotFound(String),

    /// Vendor already fetched into the project.
    #[error("Vendor '{0}' already exists. Use --force to fetch it again.")]
    VendorExists(String),

    /// Target has no install location for the requested scope.
    #[error("Target '{target}' does not support {scope} installation")]
    UnsupportedInstall { target: String, scope: String },

    /// Nothing compiled yet for the requested targets.
    #[error("No compiled output for {0}. Run 'rulecraft compile' first.")]
    NothingCompiled(String),

    /// No compiled rule carries the requested name.
    #[error("No compiled rule named '{0}'")]
    RuleNotFound(String),

    /// Home directory could not be determined.
    #[error("Could not determine home directory")]
    HomeNotFound,

    /// Template front matter could not be parsed.
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: String,
        #[source]
        source: FrontMatterError,
    },

    /// Template loading or rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Git execution failed.
    #[error("Git error during {operation}: {details}")]
    GitError { operation: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Interactive selection failed.
    #[error("Selection failed: {0}")]
    Selection(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidTarget { .. }
            | AppError::InvalidMode(_)
            | AppError::InvalidVendorName(_)
            | AppError::UnsupportedInstall { .. }
            | AppError::FrontMatter { .. }
            | AppError::Template(_)
            | AppError::ParseError { .. }
            | AppError::Selection(_) => io::ErrorKind::InvalidInput,
            AppError::ProjectNotFound(_)
            | AppError::VendorNotFound(_)
            | AppError::NothingCompiled(_)
            | AppError::RuleNotFound(_)
            | AppError::HomeNotFound => io::ErrorKind::NotFound,
            AppError::ProjectExists(_) | AppError::VendorExists(_) => io::ErrorKind::AlreadyExists,
            AppError::GitError { .. } => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_map_to_not_found_kind() {
        assert_eq!(AppError::VendorNotFound("acme".into()).kind(), io::ErrorKind::NotFound);
        assert_eq!(AppError::ProjectNotFound(".".into()).kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn template_errors_surface_template_name() {
        let err = AppError::from(TemplateError::NotFound { name: "missing".into() });
        assert!(err.to_string().contains("missing"));
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
