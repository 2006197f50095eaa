use thiserror::Error;

/// Failure while loading or rendering a named template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template body is not valid template syntax.
    #[error("Failed to parse template '{name}': {reason}")]
    Parse { name: String, reason: String },

    /// No template with this name was loaded.
    #[error("Template '{name}' not found")]
    NotFound { name: String },

    /// Rendering failed: undefined field, failing function, or unknown partial.
    #[error("Failed to render template '{name}': {reason}")]
    Execution { name: String, reason: String },
}

impl TemplateError {
    /// Logical name of the template the error belongs to.
    pub fn template_name(&self) -> &str {
        match self {
            TemplateError::Parse { name, .. }
            | TemplateError::NotFound { name }
            | TemplateError::Execution { name, .. } => name,
        }
    }
}
