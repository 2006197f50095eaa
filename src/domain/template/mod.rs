//! Named template registry rendered with minijinja.
//!
//! Templates share one namespace: `{% include "name" %}` is resolved by name
//! when a template is rendered, so partials may be loaded before or after the
//! templates that reference them.

mod engine;
mod error;
mod functions;

pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use functions::title_case;
