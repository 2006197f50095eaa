//! Template compilation: render, then finish per target.

use std::path::PathBuf;

use super::mode::InstallMode;
use super::paths::COMPILED_DIR;
use super::post_process::post_process;
use super::target::Target;
use super::template::{TemplateEngine, TemplateError};
use super::template_data::TemplateData;

/// One compiled template for one target and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub target: Target,
    pub template_name: String,
    pub filename: String,
    pub content: String,
    /// Effective mode; only set for targets that support modes.
    pub mode: Option<InstallMode>,
}

impl CompiledRule {
    /// Path of this rule below the project root.
    pub fn output_path(&self) -> PathBuf {
        output_path(&self.target, &self.filename)
    }
}

/// Compiles loaded templates for targets.
pub struct Compiler {
    engine: TemplateEngine,
}

impl Compiler {
    pub fn new(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TemplateEngine {
        &mut self.engine
    }

    /// Compile `template_name` once for `target`.
    ///
    /// The `target` field of `data` is replaced with `target`; the caller's
    /// value is never observed by the template.
    pub fn compile_template(
        &self,
        template_name: &str,
        target: &Target,
        data: &TemplateData,
    ) -> Result<CompiledRule, TemplateError> {
        let mut data = data.clone();
        data.target = target.as_str().to_string();

        let rendered = self.engine.render(template_name, &data)?;
        let output = post_process(&rendered, template_name, target, &data);

        Ok(CompiledRule {
            target: target.clone(),
            template_name: template_name.to_string(),
            filename: output.filename,
            content: output.content,
            mode: effective_mode(target, data.mode),
        })
    }

    /// Compile `template_name`, expanding `mode: both` into a memory rule
    /// followed by a command rule on targets that support modes.
    pub fn compile_template_with_modes(
        &self,
        template_name: &str,
        target: &Target,
        data: &TemplateData,
    ) -> Result<Vec<CompiledRule>, TemplateError> {
        if !(target.supports_modes() && data.mode == Some(InstallMode::Both)) {
            return Ok(vec![self.compile_template(template_name, target, data)?]);
        }

        [InstallMode::Memory, InstallMode::Command]
            .into_iter()
            .map(|mode| self.compile_template(template_name, target, &data.clone().with_mode(mode)))
            .collect()
    }
}

/// `compiled/<target>/<filename>`.
pub fn output_path(target: &Target, filename: &str) -> PathBuf {
    PathBuf::from(COMPILED_DIR).join(target.as_str()).join(filename)
}

fn effective_mode(target: &Target, requested: Option<InstallMode>) -> Option<InstallMode> {
    if !target.supports_modes() {
        return None;
    }
    match requested {
        Some(InstallMode::Memory) => Some(InstallMode::Memory),
        _ => Some(InstallMode::Command),
    }
}
