//! Transform plan: what to strip, where to anchor, what to inject

use std::collections::HashSet;

use rfi_format::constants::DEFAULT_ANCHOR;
use rfi_format::{default_author_fields, InjectedField, Limits, Result, RfiError};

/// Everything a transform needs besides the source text
#[derive(Debug, Clone)]
pub struct TransformPlan {
    anchor: String,
    strip: Vec<String>,
    fields: Vec<InjectedField>,
    strict: bool,
    limits: Limits,
}

impl TransformPlan {
    /// Plan anchored on `anchor` with nothing to inject yet
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            strip: Vec::new(),
            fields: Vec::new(),
            strict: false,
            limits: Limits::default(),
        }
    }

    /// Add a field to inject
    pub fn with_field(mut self, field: InjectedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Add several fields to inject
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = InjectedField>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Strip `name` in addition to the injected field names
    pub fn with_strip(mut self, name: impl Into<String>) -> Self {
        self.strip.push(name.into());
        self
    }

    /// Treat records without the anchor as a failure
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use custom limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Anchor field name
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Fields to inject, in order
    pub fn fields(&self) -> &[InjectedField] {
        &self.fields
    }

    /// Whether partial matches fail the transform
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Limits in effect
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Names removed before injection: extra strip names, then injected names
    pub fn strip_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.strip
            .iter()
            .map(String::as_str)
            .chain(self.fields.iter().map(InjectedField::name))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Check the plan is coherent
    pub fn validate(&self) -> Result<()> {
        if self.anchor.trim().is_empty() {
            return Err(RfiError::InvalidFieldSpec("anchor name is empty".into()));
        }
        if self.fields.is_empty() {
            return Err(RfiError::InvalidFieldSpec("no fields to inject".into()));
        }
        self.limits.check_field_count(self.fields.len())?;

        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name()) {
                return Err(RfiError::InvalidFieldSpec(format!(
                    "field '{}' is injected more than once",
                    field.name()
                )));
            }
        }
        if self.strip_names().contains(&self.anchor.as_str()) {
            return Err(RfiError::InvalidFieldSpec(format!(
                "anchor '{}' cannot be stripped or injected",
                self.anchor
            )));
        }
        Ok(())
    }
}

impl Default for TransformPlan {
    /// Author attribution after `achievements`
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR).with_fields(default_author_fields())
    }
}
