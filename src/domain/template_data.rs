//! Rendering context handed to templates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use super::AppError;
use super::front_matter::FrontMatter;
use super::mode::InstallMode;

/// A value in the free-form `custom` map.
///
/// Limited to kinds every target can render predictably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
}

impl From<&str> for CustomValue {
    fn from(value: &str) -> Self {
        CustomValue::String(value.to_string())
    }
}

impl From<bool> for CustomValue {
    fn from(value: bool) -> Self {
        CustomValue::Bool(value)
    }
}

impl From<i64> for CustomValue {
    fn from(value: i64) -> Self {
        CustomValue::Integer(value)
    }
}

impl From<Vec<String>> for CustomValue {
    fn from(value: Vec<String>) -> Self {
        CustomValue::List(value)
    }
}

/// Fields visible to a template during rendering.
///
/// Every field is serialized even when empty, so templates can test
/// `{% if description %}` while a misspelled name stays an error. Unset
/// optional fields render as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateData {
    /// Target identifier; always overwritten by the compiler.
    pub target: String,
    pub name: String,
    #[serde(serialize_with = "empty_when_unset")]
    pub description: Option<String>,
    #[serde(serialize_with = "empty_when_unset")]
    pub globs: Option<String>,
    #[serde(serialize_with = "empty_when_unset")]
    pub project_type: Option<String>,
    #[serde(serialize_with = "empty_when_unset")]
    pub language: Option<String>,
    #[serde(serialize_with = "empty_when_unset")]
    pub framework: Option<String>,
    pub tags: Vec<String>,
    pub custom: BTreeMap<String, CustomValue>,
    #[serde(serialize_with = "empty_when_unset")]
    pub mode: Option<InstallMode>,
}

fn empty_when_unset<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

impl TemplateData {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Build a context from merged front matter for the template `name`.
    pub fn from_front_matter(name: &str, front_matter: &FrontMatter) -> Result<Self, AppError> {
        Ok(Self {
            target: String::new(),
            name: name.to_string(),
            description: front_matter.description.clone(),
            globs: front_matter.globs.clone(),
            project_type: front_matter.project_type.clone(),
            language: front_matter.language.clone(),
            framework: front_matter.framework.clone(),
            tags: front_matter.tags.clone(),
            custom: front_matter.custom.clone(),
            mode: InstallMode::parse_optional(front_matter.mode.as_deref())?,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_globs(mut self, globs: impl Into<String>) -> Self {
        self.globs = Some(globs.into());
        self
    }

    pub fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Non-empty description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|value| !value.trim().is_empty())
    }

    /// Non-empty glob pattern, if any.
    pub fn globs(&self) -> Option<&str> {
        self.globs.as_deref().filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_front_matter_copies_fields_and_parses_mode() {
        let front_matter = FrontMatter {
            description: Some("Rust style".into()),
            language: Some("rust".into()),
            tags: vec!["style".into()],
            mode: Some("both".into()),
            ..FrontMatter::default()
        };

        let data = TemplateData::from_front_matter("style", &front_matter).unwrap();

        assert_eq!(data.name, "style");
        assert_eq!(data.description(), Some("Rust style"));
        assert_eq!(data.language.as_deref(), Some("rust"));
        assert_eq!(data.tags, vec!["style".to_string()]);
        assert_eq!(data.mode, Some(InstallMode::Both));
        assert!(data.target.is_empty());
    }

    #[test]
    fn from_front_matter_rejects_unknown_mode() {
        let front_matter = FrontMatter { mode: Some("agent".into()), ..FrontMatter::default() };
        assert!(TemplateData::from_front_matter("x", &front_matter).is_err());
    }

    #[test]
    fn blank_description_is_treated_as_missing() {
        let data = TemplateData::new("x").with_description("   ");
        assert_eq!(data.description(), None);
    }

    #[test]
    fn custom_values_deserialize_into_closed_kinds() {
        let yaml = "flag: true\ncount: 3\nratio: 0.5\nlabel: api\nitems: [a, b]\n";
        let custom: BTreeMap<String, CustomValue> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(custom["flag"], CustomValue::Bool(true));
        assert_eq!(custom["count"], CustomValue::Integer(3));
        assert_eq!(custom["ratio"], CustomValue::Float(0.5));
        assert_eq!(custom["label"], CustomValue::String("api".into()));
        assert_eq!(custom["items"], CustomValue::List(vec!["a".into(), "b".into()]));
    }
}
