//! `rulecraft.yaml` project configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::AppError;
use super::front_matter::FrontMatter;
use super::target::Target;

/// Wildcard entry in `include_vendors` selecting every fetched vendor.
pub const ALL_VENDORS: &str = "*";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub defaults: ConfigDefaults,
    /// Front-matter defaults applied to every template.
    pub template_defaults: FrontMatter,
    /// Per-vendor defaults layered over `template_defaults`.
    pub vendor_overrides: BTreeMap<String, VendorOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDefaults {
    /// Targets compiled when none is given; empty means all.
    pub targets: Vec<String>,
    /// Vendors whose templates are compiled alongside local ones.
    pub include_vendors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorOverride {
    pub template_defaults: FrontMatter,
}

impl ProjectConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| AppError::ParseError { what: "rulecraft.yaml".into(), details: e.to_string() })
    }

    /// Targets to compile when the caller names none.
    pub fn default_targets(&self) -> Result<Vec<Target>, AppError> {
        if self.defaults.targets.is_empty() {
            return Ok(Target::ALL.to_vec());
        }
        self.defaults.targets.iter().map(|name| Target::from_name(name)).collect()
    }

    pub fn includes_vendor(&self, vendor: &str) -> bool {
        self.defaults.include_vendors.iter().any(|entry| entry == ALL_VENDORS || entry == vendor)
    }

    /// Defaults underlying the front matter of a template from `vendor`
    /// (`None` for local templates).
    pub fn defaults_for(&self, vendor: Option<&str>) -> FrontMatter {
        match vendor.and_then(|name| self.vendor_overrides.get(name)) {
            Some(over) => over.template_defaults.merged_over(&self.template_defaults),
            None => self.template_defaults.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
defaults:
  targets: [cursor, claude]
  include_vendors: [acme]
template_defaults:
  language: rust
  tags: [team]
vendor_overrides:
  acme:
    template_defaults:
      framework: axum
"#;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ProjectConfig::parse("").unwrap();
        assert_eq!(config.default_targets().unwrap(), Target::ALL.to_vec());
        assert!(!config.includes_vendor("acme"));
    }

    #[test]
    fn parses_sample_config() {
        let config = ProjectConfig::parse(SAMPLE).unwrap();

        assert_eq!(config.default_targets().unwrap(), vec![Target::Cursor, Target::Claude]);
        assert!(config.includes_vendor("acme"));
        assert!(!config.includes_vendor("other"));
    }

    #[test]
    fn vendor_defaults_layer_over_project_defaults() {
        let config = ProjectConfig::parse(SAMPLE).unwrap();

        let vendor = config.defaults_for(Some("acme"));
        assert_eq!(vendor.language.as_deref(), Some("rust"));
        assert_eq!(vendor.framework.as_deref(), Some("axum"));

        let local = config.defaults_for(None);
        assert_eq!(local.framework, None);
        assert_eq!(local.tags, vec!["team".to_string()]);
    }

    #[test]
    fn wildcard_includes_every_vendor() {
        let config = ProjectConfig::parse("defaults:\n  include_vendors: [\"*\"]\n").unwrap();
        assert!(config.includes_vendor("anything"));
    }

    #[test]
    fn unknown_target_in_defaults_is_rejected() {
        let config = ProjectConfig::parse("defaults:\n  targets: [vim]\n").unwrap();
        assert!(matches!(config.default_targets(), Err(AppError::InvalidTarget { .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ProjectConfig::parse("defautls: {}\n"),
            Err(AppError::ParseError { .. })
        ));
    }
}
