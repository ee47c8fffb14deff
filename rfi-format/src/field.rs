//! Injected field definitions

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    AUTHOR_LINKEDIN_FIELD, AUTHOR_NAME_FIELD, DEFAULT_AUTHOR_LINKEDIN, DEFAULT_AUTHOR_NAME,
};
use crate::error::{Result, RfiError};
use crate::lexer::scan_value;

/// Value of an injected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text, rendered as a double-quoted string literal
    Str(String),
    /// Literal source text inserted verbatim (numbers, booleans, arrays)
    Raw(String),
}

/// A field added to every record that carries the anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedField {
    name: String,
    value: FieldValue,
}

impl InjectedField {
    /// Field whose value is rendered as a string literal
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            value: FieldValue::Str(value.into()),
        })
    }

    /// Field whose value is inserted verbatim
    ///
    /// The literal must be a single balanced value with no top-level comma.
    pub fn raw(name: impl Into<String>, literal: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let literal = literal.into().trim().to_string();
        validate_literal(&name, &literal)?;
        Ok(Self {
            name,
            value: FieldValue::Raw(literal),
        })
    }

    /// Parse a `NAME=LITERAL` spec into a raw field
    pub fn parse_raw(spec: &str) -> Result<Self> {
        let (name, literal) = split_spec(spec)?;
        Self::raw(name, literal)
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field value
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Source text of the value
    pub fn literal(&self) -> String {
        match &self.value {
            // JSON string escaping is valid JavaScript/TypeScript string syntax
            FieldValue::Str(text) => {
                serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
            }
            FieldValue::Raw(literal) => literal.clone(),
        }
    }

    /// Entry text without separator, e.g. `authorName: "Inspire India"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.name, self.literal())
    }
}

impl fmt::Display for InjectedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for InjectedField {
    type Err = RfiError;

    /// Parse a `NAME=VALUE` spec into a string field
    fn from_str(spec: &str) -> Result<Self> {
        let (name, value) = split_spec(spec)?;
        Self::string(name, value)
    }
}

/// Author attribution fields applied when nothing else is configured
pub fn default_author_fields() -> Vec<InjectedField> {
    vec![
        InjectedField {
            name: AUTHOR_NAME_FIELD.to_string(),
            value: FieldValue::Str(DEFAULT_AUTHOR_NAME.to_string()),
        },
        InjectedField {
            name: AUTHOR_LINKEDIN_FIELD.to_string(),
            value: FieldValue::Str(DEFAULT_AUTHOR_LINKEDIN.to_string()),
        },
    ]
}

/// Whether `name` is a plain identifier usable as an unquoted key
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn validate_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(RfiError::InvalidFieldName(name.to_string()))
    }
}

fn validate_literal(name: &str, literal: &str) -> Result<()> {
    let invalid = |reason: &str| RfiError::InvalidLiteral {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if literal.is_empty() {
        return Err(invalid("literal is empty"));
    }
    let scan = scan_value(literal, 0).map_err(|err| invalid(&err.to_string()))?;
    if scan.terminator != literal.len() {
        return Err(invalid(&format!(
            "unexpected '{}' outside brackets",
            literal.as_bytes()[scan.terminator] as char
        )));
    }
    // A trailing comment would swallow whatever follows an inline insertion
    if scan.end != literal.len() {
        return Err(invalid("comment after value"));
    }
    Ok(())
}

fn split_spec(spec: &str) -> Result<(&str, &str)> {
    spec.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .ok_or_else(|| RfiError::InvalidFieldSpec(format!("expected NAME=VALUE, got '{}'", spec)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_fields_render_escaped() {
        let field = InjectedField::string("authorName", "Say \"hi\"").unwrap();
        assert_eq!(field.render(), r#"authorName: "Say \"hi\"""#);
    }

    #[test]
    fn spec_parsing_splits_on_first_equals() {
        let field: InjectedField = "authorLinkedin=https://x.test/?a=b".parse().unwrap();
        assert_eq!(field.name(), "authorLinkedin");
        assert_eq!(
            field.value(),
            &FieldValue::Str("https://x.test/?a=b".to_string())
        );
    }

    #[test]
    fn spec_without_equals_is_rejected() {
        let err = "authorName".parse::<InjectedField>().unwrap_err();
        assert!(matches!(err, RfiError::InvalidFieldSpec(_)));
    }

    #[test]
    fn names_must_be_identifiers() {
        assert!(InjectedField::string("author-name", "x").is_err());
        assert!(InjectedField::string("1st", "x").is_err());
        assert!(InjectedField::string("", "x").is_err());
        assert!(InjectedField::string("_rank$", "x").is_ok());
    }

    #[test]
    fn raw_literals_must_be_single_values() {
        let field = InjectedField::parse_raw("tags= [\"a\", [\"b\"]] ").unwrap();
        assert_eq!(field.render(), r#"tags: ["a", ["b"]]"#);
        assert!(InjectedField::raw("rating", "5").is_ok());
        assert!(InjectedField::raw("rating", "1, 2").is_err());
        assert!(InjectedField::raw("rating", "[1, 2").is_err());
        assert!(InjectedField::raw("rating", "  ").is_err());
    }

    #[test]
    fn raw_literals_reject_trailing_comments() {
        for literal in ["5 // five", "5 /* five */", "[1] // tail"] {
            let err = InjectedField::raw("rating", literal).unwrap_err();
            assert!(
                matches!(err, RfiError::InvalidLiteral { .. }),
                "{literal} accepted"
            );
        }
        let field = InjectedField::raw("tags", "[1, /* two */ 2]").unwrap();
        assert_eq!(field.render(), "tags: [1, /* two */ 2]");
    }

    #[test]
    fn defaults_match_author_attribution() {
        let fields = default_author_fields();
        let rendered: Vec<String> = fields.iter().map(InjectedField::render).collect();
        assert_eq!(
            rendered,
            vec![
                r#"authorName: "Inspire India""#.to_string(),
                r#"authorLinkedin: "https://www.linkedin.com/company/inspire-india""#
                    .to_string(),
            ]
        );
    }
}
