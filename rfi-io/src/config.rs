//! TOML configuration
//!
//! ```toml
//! path = "src/data/personalities.ts"
//! anchor = "achievements"
//! strip = ["legacyAuthor"]
//! strict = false
//!
//! [[field]]
//! name = "authorName"
//! value = "Inspire India"
//!
//! [[field]]
//! name = "rating"
//! value = "5"
//! raw = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rfi_format::constants::{DEFAULT_ANCHOR, DEFAULT_SOURCE_PATH};
use rfi_format::{default_author_fields, InjectedField, Limits, Result, RfiError};
use rfi_transform::TransformPlan;
use serde::Deserialize;

/// One `[[field]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Field name
    pub name: String,
    /// String value, or literal source text when `raw` is set
    pub value: String,
    /// Insert `value` verbatim instead of as a string literal
    #[serde(default)]
    pub raw: bool,
}

impl FieldConfig {
    /// Build the injected field
    pub fn to_field(&self) -> Result<InjectedField> {
        if self.raw {
            InjectedField::raw(&self.name, &self.value)
        } else {
            InjectedField::string(&self.name, &self.value)
        }
    }
}

/// Contents of a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InjectConfig {
    /// Source file to rewrite
    pub path: Option<PathBuf>,
    /// Anchor field name
    pub anchor: Option<String>,
    /// Extra field names to strip
    #[serde(default)]
    pub strip: Vec<String>,
    /// Fields to inject
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldConfig>,
    /// Fail when some records lack the anchor
    pub strict: Option<bool>,
    /// Override for the input size limit
    pub max_input_bytes: Option<usize>,
}

impl InjectConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| RfiError::io(path, err))?;
        Self::from_toml(&text).map_err(|err| match err {
            RfiError::Config(message) => {
                RfiError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| RfiError::Config(err.to_string()))
    }

    /// Source path, falling back to the default data file
    pub fn source_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH))
    }

    /// Configured fields, or the author defaults when none are listed
    pub fn injected_fields(&self) -> Result<Vec<InjectedField>> {
        if self.fields.is_empty() {
            return Ok(default_author_fields());
        }
        self.fields.iter().map(FieldConfig::to_field).collect()
    }

    /// Transform plan described by this configuration
    pub fn plan(&self) -> Result<TransformPlan> {
        self.plan_with_fields(self.injected_fields()?)
    }

    /// Transform plan with `fields` in place of the configured ones
    pub fn plan_with_fields(&self, fields: Vec<InjectedField>) -> Result<TransformPlan> {
        let mut limits = Limits::default();
        if let Some(max_input_bytes) = self.max_input_bytes {
            limits.max_input_bytes = max_input_bytes;
        }

        let plan = self
            .strip
            .iter()
            .fold(
                TransformPlan::new(self.anchor.as_deref().unwrap_or(DEFAULT_ANCHOR)),
                |plan, name| plan.with_strip(name.clone()),
            )
            .with_fields(fields)
            .with_strict(self.strict.unwrap_or(false))
            .with_limits(limits);
        plan.validate()?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = InjectConfig::from_toml("").unwrap();
        assert_eq!(config.source_path(), PathBuf::from(DEFAULT_SOURCE_PATH));
        let plan = config.plan().unwrap();
        assert_eq!(plan.anchor(), DEFAULT_ANCHOR);
        assert_eq!(plan.fields(), default_author_fields().as_slice());
        assert!(!plan.strict());
    }

    #[test]
    fn full_config_builds_plan() {
        let config = InjectConfig::from_toml(
            r#"
path = "data/people.ts"
anchor = "awards"
strip = ["legacyAuthor"]
strict = true
max_input_bytes = 1024

[[field]]
name = "authorName"
value = "Team"

[[field]]
name = "rating"
value = "5"
raw = true
"#,
        )
        .unwrap();

        let plan = config.plan().unwrap();
        assert_eq!(config.source_path(), PathBuf::from("data/people.ts"));
        assert_eq!(plan.anchor(), "awards");
        assert!(plan.strict());
        assert_eq!(plan.limits().max_input_bytes, 1024);
        assert_eq!(
            plan.strip_names(),
            vec!["legacyAuthor", "authorName", "rating"]
        );
        let rendered: Vec<String> = plan.fields().iter().map(InjectedField::render).collect();
        assert_eq!(rendered, vec!["authorName: \"Team\"", "rating: 5"]);
    }

    #[test]
    fn explicit_fields_replace_configured_ones() {
        let config = InjectConfig::from_toml("[[field]]\nname = \"a\"\nvalue = \"x\"\n").unwrap();
        let plan = config
            .plan_with_fields(vec![InjectedField::raw("b", "true").unwrap()])
            .unwrap();
        assert_eq!(plan.strip_names(), vec!["b"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = InjectConfig::from_toml("anchr = \"x\"").unwrap_err();
        assert!(matches!(err, RfiError::Config(_)));
    }

    #[test]
    fn invalid_field_names_surface() {
        let config = InjectConfig::from_toml("[[field]]\nname = \"bad-name\"\nvalue = \"x\"\n")
            .unwrap();
        assert!(matches!(
            config.plan(),
            Err(RfiError::InvalidFieldName(_))
        ));
    }
}
