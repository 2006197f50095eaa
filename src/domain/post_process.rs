//! Per-target finishing of rendered templates.

use super::mode::InstallMode;
use super::target::Target;
use super::template_data::TemplateData;

/// Fixed file name for Claude memory output.
pub const CLAUDE_MEMORY_FILE: &str = "CLAUDE.md";

/// Suffix for rules concatenated into the Copilot instructions file.
pub const COPILOT_SUFFIX: &str = "instructions";

const FRONT_MATTER_MARKER: &str = "---";
const DEFAULT_GLOBS: &str = "**/*";

/// Final file name and content for one rendered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOutput {
    pub filename: String,
    pub content: String,
}

/// Apply the naming and formatting conventions of `target`.
pub fn post_process(
    rendered: &str,
    template_name: &str,
    target: &Target,
    data: &TemplateData,
) -> ProcessedOutput {
    let base = base_name(template_name);

    match target {
        Target::Cursor => ProcessedOutput {
            filename: format!("{base}.mdc"),
            content: ensure_cursor_front_matter(rendered, template_name, data),
        },
        Target::Claude => {
            let filename = match data.mode {
                Some(InstallMode::Memory) => CLAUDE_MEMORY_FILE.to_string(),
                _ => format!("{base}.md"),
            };
            ProcessedOutput { filename, content: rendered.to_string() }
        }
        Target::Cline | Target::Roo => {
            ProcessedOutput { filename: format!("{base}.md"), content: rendered.to_string() }
        }
        Target::Copilot => ProcessedOutput {
            filename: format!("{base}.{COPILOT_SUFFIX}.md"),
            content: strip_front_matter(rendered),
        },
        Target::Other(_) => ProcessedOutput {
            filename: format!("{template_name}.txt"),
            content: rendered.to_string(),
        },
    }
}

/// Last `/`-separated segment of a template name.
pub fn base_name(template_name: &str) -> &str {
    template_name.rsplit('/').next().unwrap_or(template_name)
}

/// Whether `content` opens with a front-matter marker.
pub fn has_front_matter(content: &str) -> bool {
    content.starts_with(FRONT_MATTER_MARKER)
}

/// Remove a leading `---` block, returning the trimmed remainder.
///
/// Content without a leading marker, or whose block is never closed, is
/// returned unchanged.
pub fn strip_front_matter(content: &str) -> String {
    if !has_front_matter(content) {
        return content.to_string();
    }
    let parts: Vec<&str> = content.splitn(3, FRONT_MATTER_MARKER).collect();
    match parts.as_slice() {
        [_, _, body] => body.trim().to_string(),
        _ => content.to_string(),
    }
}

fn ensure_cursor_front_matter(rendered: &str, template_name: &str, data: &TemplateData) -> String {
    if has_front_matter(rendered) {
        return rendered.to_string();
    }

    let description = data
        .description()
        .map(str::to_string)
        .unwrap_or_else(|| format!("AI coding rules for {template_name}"));
    let globs = data.globs().unwrap_or(DEFAULT_GLOBS);
    let always_apply = data.globs().is_none();

    format!(
        "---\ndescription: {description}\nglobs: {globs}\nalwaysApply: {always_apply}\n---\n\n{rendered}"
    )
}
