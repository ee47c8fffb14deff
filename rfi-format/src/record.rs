//! Record and field structure
//!
//! A record is an outermost object literal whose body parses as a
//! comma-separated list of entries. Brace blocks that fail to parse as object
//! literals (interface bodies, function bodies) are looked through so that
//! records nested inside them are still found.

use std::ops::Range;

use crate::error::{Result, RfiError};
use crate::lexer::{
    at_comment, is_ident_byte, line_col, scan_value, skip_comment, skip_string, skip_trivia,
};

/// One `key: value` entry inside a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Unquoted key name; `None` for spread and computed entries
    pub key: Option<String>,
    /// Byte range from the start of the key to the end of the value
    pub span: Range<usize>,
    /// Byte range of the value alone
    pub value: Range<usize>,
    /// Offset of the trailing comma, if the entry has one
    pub separator: Option<usize>,
}

impl Field {
    /// Offset one past the entry including its trailing comma
    pub fn end(&self) -> usize {
        self.separator.map_or(self.value.end, |sep| sep + 1)
    }

    /// Whether the key equals `name` exactly
    pub fn is_named(&self, name: &str) -> bool {
        self.key.as_deref() == Some(name)
    }
}

/// One object literal and its direct fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Byte range from `{` through `}`
    pub span: Range<usize>,
    /// Direct entries in source order
    pub fields: Vec<Field>,
}

impl Record {
    /// First field named `name`
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_named(name))
    }

    /// Whether any direct field is named `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// 1-based line on which the record opens
    pub fn line(&self, src: &str) -> usize {
        line_col(src, self.span.start).0
    }
}

/// Find every record in `src`, in source order
pub fn parse_records(src: &str) -> Result<Vec<Record>> {
    scan_records(src, 0..src.len())
}

/// Find the records that hold `anchor`, in source order
///
/// An outermost record without the anchor is replaced by the records nested
/// in its field values when any of them holds the anchor, so wrapper objects
/// such as `export default { people: [...] }` are seen through. Otherwise the
/// outer record is kept and reported as lacking the anchor.
pub fn parse_anchored_records(src: &str, anchor: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for record in parse_records(src)? {
        expand_record(src, record, anchor, &mut records)?;
    }
    Ok(records)
}

fn expand_record(src: &str, record: Record, anchor: &str, out: &mut Vec<Record>) -> Result<()> {
    if record.has_field(anchor) {
        out.push(record);
        return Ok(());
    }

    let mut nested = Vec::new();
    for field in &record.fields {
        for inner in scan_records(src, field.value.clone())? {
            expand_record(src, inner, anchor, &mut nested)?;
        }
    }
    if nested.iter().any(|inner| inner.has_field(anchor)) {
        out.extend(nested);
    } else {
        out.push(record);
    }
    Ok(())
}

/// Find the outermost records inside `range`
fn scan_records(src: &str, range: Range<usize>) -> Result<Vec<Record>> {
    let bytes = src.as_bytes();
    let mut records = Vec::new();
    let mut pos = range.start;

    while pos < range.end {
        match bytes[pos] {
            b'"' | b'\'' | b'`' => pos = skip_string(src, pos)?,
            b'/' if at_comment(src, pos) => pos = skip_comment(src, pos)?,
            b'{' => match parse_object(src, pos)? {
                Some(record) => {
                    pos = record.span.end;
                    records.push(record);
                }
                None => pos += 1,
            },
            _ => pos += 1,
        }
    }

    Ok(records)
}

/// Try to parse an object literal whose `{` sits at `open`
///
/// Returns `Ok(None)` when the block is not an object literal.
pub fn parse_object(src: &str, open: usize) -> Result<Option<Record>> {
    let bytes = src.as_bytes();
    let mut fields = Vec::new();
    let mut pos = open + 1;

    loop {
        pos = skip_trivia(src, pos)?;
        if pos >= bytes.len() {
            let (line, column) = line_col(src, open);
            return Err(RfiError::Unterminated {
                construct: "object literal",
                line,
                column,
            });
        }
        if bytes[pos] == b'}' {
            return Ok(Some(Record {
                span: open..pos + 1,
                fields,
            }));
        }

        let entry_start = pos;
        let EntryHead {
            key,
            value_start,
            method,
        } = match parse_key(src, pos)? {
            Some(head) => head,
            None => return Ok(None),
        };

        let value_start = skip_trivia(src, value_start)?;
        let scan = scan_value(src, value_start)?;
        if scan.end == value_start {
            return Ok(None);
        }
        // A call statement such as `{ load(x) }` has no method body
        if method && bytes[scan.end - 1] != b'}' {
            return Ok(None);
        }

        let separator = match bytes.get(scan.terminator) {
            Some(b',') => Some(scan.terminator),
            Some(b'}') => None,
            Some(_) => return Ok(None),
            None => {
                let (line, column) = line_col(src, open);
                return Err(RfiError::Unterminated {
                    construct: "object literal",
                    line,
                    column,
                });
            }
        };

        fields.push(Field {
            key,
            span: entry_start..scan.end,
            value: value_start..scan.end,
            separator,
        });

        pos = match separator {
            Some(sep) => sep + 1,
            None => scan.terminator,
        };
    }
}

/// Key of an entry and where its value starts
struct EntryHead {
    key: Option<String>,
    /// For methods and accessors the value starts at the parameter list
    value_start: usize,
    method: bool,
}

/// Parse the key part of an entry
///
/// Handles `key: value`, quoted and computed keys, spreads, shorthand
/// properties, and method entries (`label() {}`, `get x() {}`, `*gen() {}`,
/// `async run() {}`).
fn parse_key(src: &str, start: usize) -> Result<Option<EntryHead>> {
    let bytes = src.as_bytes();

    if src[start..].starts_with("...") {
        return Ok(Some(EntryHead {
            key: None,
            value_start: start + 3,
            method: false,
        }));
    }
    if bytes[start] == b'*' {
        let name_start = skip_trivia(src, start + 1)?;
        return parse_method_key(src, name_start);
    }

    let (key, key_end) = match bytes[start] {
        b'"' | b'\'' => {
            let end = skip_string(src, start)?;
            (Some(src[start + 1..end - 1].to_string()), end)
        }
        b'[' => {
            // Computed key: `[expr]: value`
            let scan = scan_value(src, start + 1)?;
            if bytes.get(scan.terminator) != Some(&b']') {
                return Ok(None);
            }
            (None, scan.terminator + 1)
        }
        b if is_ident_byte(b) => {
            let mut end = start;
            while end < bytes.len() && is_ident_byte(bytes[end]) {
                end += 1;
            }
            (Some(src[start..end].to_string()), end)
        }
        _ => return Ok(None),
    };

    let quoted = matches!(bytes[start], b'"' | b'\'');
    let after = skip_trivia(src, key_end)?;
    match bytes.get(after) {
        Some(b':') => Ok(Some(EntryHead {
            key,
            value_start: after + 1,
            method: false,
        })),
        Some(b'(') => Ok(Some(EntryHead {
            key,
            value_start: after,
            method: true,
        })),
        // Shorthand property: the key doubles as the value
        Some(b',') | Some(b'}') if key.is_some() && !quoted => Ok(Some(EntryHead {
            key,
            value_start: start,
            method: false,
        })),
        Some(_) if !quoted && is_method_modifier(key.as_deref()) => parse_method_key(src, after),
        _ => Ok(None),
    }
}

/// Parse the name of a method whose modifiers have been consumed
fn parse_method_key(src: &str, start: usize) -> Result<Option<EntryHead>> {
    if start >= src.len() {
        return Ok(None);
    }
    Ok(parse_key(src, start)?.filter(|head| head.method))
}

fn is_method_modifier(key: Option<&str>) -> bool {
    matches!(key, Some("get" | "set" | "async" | "static"))
}
