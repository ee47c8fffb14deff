//! Field removal

use std::ops::Range;

use rfi_format::lexer::is_hspace;
use rfi_format::{parse_records, Record, Result};
use tracing::debug;

use crate::edit::{apply_edits, merge_ranges, Edit};
use crate::layout::{
    at_line_end, blank_rest_of_line, line_break_len, line_start, skip_hspace, starts_line,
};

/// Text after stripping and the number of fields removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Transformed text
    pub text: String,
    /// Number of field entries removed
    pub removed: usize,
}

/// Remove every field named in `names` from every record in `src`
///
/// Keys match exactly. Names that never occur are ignored.
pub fn strip_fields(src: &str, names: &[&str]) -> Result<Stripped> {
    let records = parse_records(src)?;
    Ok(strip_records(src, &records, names, |_| true))
}

/// Remove fields named in `names` from the records accepted by `select`
///
/// `records` must come from parsing `src`.
pub fn strip_records<F>(src: &str, records: &[Record], names: &[&str], select: F) -> Stripped
where
    F: Fn(&Record) -> bool,
{
    let mut ranges = Vec::new();
    let mut removed = 0;

    for record in records.iter().filter(|record| select(record)) {
        let doomed: Vec<bool> = record
            .fields
            .iter()
            .map(|field| field.key.as_deref().is_some_and(|key| names.contains(&key)))
            .collect();

        for idx in (0..doomed.len()).filter(|&idx| doomed[idx]) {
            debug!(
                field = record.fields[idx].key.as_deref().unwrap_or_default(),
                line = record.line(src),
                "stripping field"
            );
            ranges.push(removal_range(src, record, idx, &doomed));
            removed += 1;
        }
    }

    if ranges.is_empty() {
        return Stripped {
            text: src.to_string(),
            removed,
        };
    }

    let edits = merge_ranges(ranges).into_iter().map(Edit::delete).collect();
    Stripped {
        text: apply_edits(src, edits),
        removed,
    }
}

/// Byte range to delete for `record.fields[idx]`
///
/// A field on its own line(s) takes the whole lines with it. An inline field
/// takes its comma and the spaces after it. A trailing field without a comma
/// takes the comma of the nearest surviving field before it.
fn removal_range(src: &str, record: &Record, idx: usize, doomed: &[bool]) -> Range<usize> {
    let bytes = src.as_bytes();
    let field = &record.fields[idx];
    let start = field.span.start;
    let end = field.end();

    if starts_line(src, start) {
        if let Some(eol) = blank_rest_of_line(src, end) {
            return line_start(src, start)..eol + line_break_len(src, eol);
        }
    }

    if field.separator.is_some() {
        let after = skip_hspace(src, end);
        if !at_line_end(src, after) {
            return start..after;
        }
        // Nothing follows on this line: eat the spaces before the field instead
        let floor = line_start(src, start);
        let mut from = start;
        while from > floor && is_hspace(bytes[from - 1]) {
            from -= 1;
        }
        return from..end;
    }

    let surviving_separator = record.fields[..idx]
        .iter()
        .zip(&doomed[..idx])
        .rev()
        .find(|(_, gone)| !**gone)
        .and_then(|(field, _)| field.separator);
    match surviving_separator {
        Some(sep) => sep..field.value.end,
        None => start..skip_hspace(src, field.value.end),
    }
}
