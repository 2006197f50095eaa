use std::collections::{BTreeMap, BTreeSet};
use std::error::Error as _;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use super::error::TemplateError;
use super::functions;
use crate::domain::template_data::TemplateData;

/// Owns every loaded template and renders them against [`TemplateData`].
///
/// Loads take `&mut self` and renders take `&self`; callers sharing an
/// engine across threads must serialize loads themselves.
pub struct TemplateEngine {
    env: Environment<'static>,
    sources: BTreeMap<String, String>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        functions::register(&mut env);

        Self { env, sources: BTreeMap::new() }
    }

    /// Parse `content` and register it under `name`, replacing any previous
    /// template of that name.
    ///
    /// On a syntax error nothing is registered and earlier templates stay
    /// untouched.
    pub fn load_template(&mut self, name: &str, content: &str) -> Result<(), TemplateError> {
        self.env.add_template_owned(name.to_string(), content.to_string()).map_err(|err| {
            TemplateError::Parse { name: name.to_string(), reason: describe(&err) }
        })?;
        self.sources.insert(name.to_string(), content.to_string());
        Ok(())
    }

    /// Render `name` with `data`, resolving includes transitively.
    pub fn render(&self, name: &str, data: &TemplateData) -> Result<String, TemplateError> {
        if !self.has_template(name) {
            return Err(TemplateError::NotFound { name: name.to_string() });
        }

        let template = self.env.get_template(name).map_err(|err| TemplateError::Execution {
            name: name.to_string(),
            reason: describe(&err),
        })?;
        template
            .render(data)
            .map_err(|err| TemplateError::Execution { name: name.to_string(), reason: describe(&err) })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn list_templates(&self) -> BTreeSet<String> {
        self.sources.keys().cloned().collect()
    }

    /// Raw source text of a loaded template.
    pub fn source(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a minijinja error and its causes into one line.
fn describe(err: &minijinja::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
