//! Byte-span edits applied in a single pass

use std::ops::Range;

/// Replacement of a byte range; an empty range is a pure insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range being replaced
    pub range: Range<usize>,
    /// Replacement text
    pub replacement: String,
}

impl Edit {
    /// Remove `range`
    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            replacement: String::new(),
        }
    }

    /// Insert `text` at `at`
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            replacement: text.into(),
        }
    }
}

/// Apply non-overlapping edits to `src`
///
/// Edits starting at the same offset are applied in the order given.
pub fn apply_edits(src: &str, mut edits: Vec<Edit>) -> String {
    if edits.is_empty() {
        return src.to_string();
    }
    edits.sort_by_key(|edit| edit.range.start);

    let added: usize = edits.iter().map(|edit| edit.replacement.len()).sum();
    let mut out = String::with_capacity(src.len() + added);
    let mut cursor = 0;
    for edit in edits {
        let start = edit.range.start.max(cursor);
        out.push_str(&src[cursor..start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end.max(start);
    }
    out.push_str(&src[cursor..]);
    out
}

/// Merge overlapping or touching ranges
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|range| range.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertions_at_same_offset_keep_order() {
        let out = apply_edits(
            "ab",
            vec![Edit::insert(1, ","), Edit::insert(1, " x,"), Edit::delete(0..1)],
        );
        assert_eq!(out, ", x,b");
    }

    #[test]
    fn overlapping_ranges_merge() {
        assert_eq!(merge_ranges(vec![5..9, 0..2, 1..3, 9..10]), vec![0..3, 5..10]);
    }
}
