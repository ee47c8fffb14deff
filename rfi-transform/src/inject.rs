//! Field insertion after the anchor

use rfi_format::{parse_anchored_records, Field, InjectedField, Result};
use tracing::debug;

use crate::edit::{apply_edits, Edit};
use crate::layout::{blank_rest_of_line, line_ending, line_start, starts_line};

/// What happened to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Fields were inserted after the anchor
    Injected,
    /// The record has no anchor field and was left unchanged
    MissingAnchor,
}

/// Per-record result, in source order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordReport {
    /// Position of the record among all records
    pub index: usize,
    /// 1-based line where the record opens
    pub line: usize,
    /// What happened to the record
    pub outcome: RecordOutcome,
}

/// Text after injection and the per-record outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    /// Transformed text
    pub text: String,
    /// One report per record found
    pub records: Vec<RecordReport>,
}

impl Injected {
    /// Number of records that received the fields
    pub fn injected_count(&self) -> usize {
        self.records
            .iter()
            .filter(|report| report.outcome == RecordOutcome::Injected)
            .count()
    }
}

/// Insert `fields` after the complete value of `anchor` in every record
///
/// If the anchor starts its own line, each field goes on a new line with the
/// anchor's indentation. Otherwise the fields are placed inline. A missing
/// comma after the anchor is added.
pub fn inject_after_anchor(src: &str, anchor: &str, fields: &[InjectedField]) -> Result<Injected> {
    let records = parse_anchored_records(src, anchor)?;
    let newline = line_ending(src);
    let mut edits = Vec::new();
    let mut reports = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let line = record.line(src);
        let outcome = match record.field(anchor) {
            Some(field) => {
                edits.extend(insertion_edits(src, field, fields, newline));
                RecordOutcome::Injected
            }
            None => RecordOutcome::MissingAnchor,
        };
        debug!(index, line, ?outcome, "record scanned");
        reports.push(RecordReport {
            index,
            line,
            outcome,
        });
    }

    Ok(Injected {
        text: apply_edits(src, edits),
        records: reports,
    })
}

fn insertion_edits(
    src: &str,
    anchor: &Field,
    fields: &[InjectedField],
    newline: &str,
) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(2);
    if anchor.separator.is_none() {
        edits.push(Edit::insert(anchor.value.end, ","));
    }

    let after = anchor.end();
    let own_line = starts_line(src, anchor.span.start)
        .then(|| blank_rest_of_line(src, after))
        .flatten();

    match own_line {
        Some(eol) => {
            let indent = &src[line_start(src, anchor.span.start)..anchor.span.start];
            let text: String = fields
                .iter()
                .map(|field| format!("{}{}{},", newline, indent, field.render()))
                .collect();
            edits.push(Edit::insert(eol, text));
        }
        None => {
            let text: String = fields
                .iter()
                .map(|field| format!(" {},", field.render()))
                .collect();
            edits.push(Edit::insert(after, text));
        }
    }
    edits
}
