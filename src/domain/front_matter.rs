//! YAML front matter at the head of template files.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use super::template_data::CustomValue;

const DELIMITER: &str = "---";

/// Error while separating or parsing a front-matter block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter block is missing its closing '---'")]
    Unterminated,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Metadata declared in a template's front matter.
///
/// Also used for `template_defaults` in `rulecraft.yaml`, which share the
/// same shape and are layered underneath.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub description: Option<String>,
    pub globs: Option<String>,
    pub mode: Option<String>,
    pub project_type: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub tags: Vec<String>,
    pub custom: BTreeMap<String, CustomValue>,
}

impl FrontMatter {
    /// Layer `self` over `base`; fields set in `self` win.
    pub fn merged_over(&self, base: &FrontMatter) -> FrontMatter {
        let mut custom = base.custom.clone();
        custom.extend(self.custom.iter().map(|(k, v)| (k.clone(), v.clone())));

        FrontMatter {
            description: self.description.clone().or_else(|| base.description.clone()),
            globs: self.globs.clone().or_else(|| base.globs.clone()),
            mode: self.mode.clone().or_else(|| base.mode.clone()),
            project_type: self.project_type.clone().or_else(|| base.project_type.clone()),
            language: self.language.clone().or_else(|| base.language.clone()),
            framework: self.framework.clone().or_else(|| base.framework.clone()),
            tags: if self.tags.is_empty() { base.tags.clone() } else { self.tags.clone() },
            custom,
        }
    }
}

/// Split raw template text into its front matter and body.
///
/// Text that does not open with a `---` line has no front matter. The blank
/// line conventionally following the closing delimiter is dropped.
pub fn split_front_matter(raw: &str) -> Result<(FrontMatter, String), FrontMatterError> {
    let Some(rest) = strip_delimiter_line(raw) else {
        return Ok((FrontMatter::default(), raw.to_string()));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let body = body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')).unwrap_or(body);

            let front_matter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((front_matter, body.to_string()));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

fn strip_delimiter_line(raw: &str) -> Option<&str> {
    raw.strip_prefix("---\n").or_else(|| raw.strip_prefix("---\r\n"))
}
