//! RFI Transform - Field stripping and anchor injection
//!
//! This crate provides the transform engine:
//!
//! - [`strip_fields`]: remove named fields from every record
//! - [`inject_after_anchor`]: insert fields after the anchor's complete value
//! - [`transform`]: strip then inject, with shape checks and a report
//!
//! All operations work on the whole source text in memory and return new
//! text; nothing here touches the filesystem.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod edit;
pub mod inject;
pub mod layout;
pub mod plan;
pub mod strip;

// Re-export commonly used types
pub use inject::{inject_after_anchor, Injected, RecordOutcome, RecordReport};
pub use plan::TransformPlan;
pub use rfi_format::{FieldValue, InjectedField, Limits, Result, RfiError};
pub use strip::{strip_fields, Stripped};

use rfi_format::parse_anchored_records;
use tracing::{debug, warn};

/// Summary of one transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    /// Records found in the source
    pub records: usize,
    /// Records that received the injected fields
    pub injected: usize,
    /// Records left unchanged because they lack the anchor
    pub skipped: Vec<RecordReport>,
    /// Field entries removed before injection
    pub stripped: usize,
    /// Whether the output differs from the input
    pub changed: bool,
}

/// Transformed text together with its report
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Transformed text
    pub text: String,
    /// What the transform did
    pub report: TransformReport,
}

/// Strip, then inject, according to `plan`
///
/// Only records that carry the anchor are modified; every other record is
/// left byte-identical. Running the transform on its own output yields the
/// same text.
///
/// Fails with [`RfiError::NoRecords`] when the source holds no record
/// literals and with [`RfiError::AnchorNotFound`] when no record carries the
/// anchor. Records without the anchor are logged as warnings, or fail the
/// transform with [`RfiError::PartialMatch`] when the plan is strict.
pub fn transform(src: &str, plan: &TransformPlan) -> Result<TransformOutput> {
    plan.validate()?;
    plan.limits().check_input_len(src.len())?;
    let anchor = plan.anchor();

    let records = parse_anchored_records(src, anchor)?;
    if records.is_empty() {
        return Err(RfiError::NoRecords);
    }

    let skipped: Vec<RecordReport> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.has_field(anchor))
        .map(|(index, record)| RecordReport {
            index,
            line: record.line(src),
            outcome: RecordOutcome::MissingAnchor,
        })
        .collect();

    if skipped.len() == records.len() {
        return Err(RfiError::AnchorNotFound {
            anchor: anchor.to_string(),
            records: records.len(),
        });
    }
    for report in &skipped {
        warn!(
            line = report.line,
            anchor, "record has no anchor field; left unchanged"
        );
    }
    if plan.strict() && !skipped.is_empty() {
        return Err(RfiError::PartialMatch {
            anchor: anchor.to_string(),
            skipped: skipped.len(),
        });
    }

    let strip_names = plan.strip_names();
    let stripped = strip::strip_records(src, &records, &strip_names, |record| {
        record.has_field(anchor)
    });
    let injected = inject_after_anchor(&stripped.text, anchor, plan.fields())?;
    debug_assert_eq!(injected.injected_count(), records.len() - skipped.len());

    let report = TransformReport {
        records: records.len(),
        injected: injected.injected_count(),
        skipped,
        stripped: stripped.removed,
        changed: injected.text != src,
    };
    debug!(
        records = report.records,
        injected = report.injected,
        stripped = report.stripped,
        changed = report.changed,
        "transform complete"
    );

    Ok(TransformOutput {
        text: injected.text,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_records() {
        let err = transform("export const xs = [];\n", &TransformPlan::default()).unwrap_err();
        assert!(matches!(err, RfiError::NoRecords));
    }

    #[test]
    fn records_without_any_anchor_fail() {
        let err = transform("[{ id: 1 }, { id: 2 }]", &TransformPlan::default()).unwrap_err();
        assert!(matches!(
            err,
            RfiError::AnchorNotFound { records: 2, .. }
        ));
    }

    #[test]
    fn strict_plans_reject_partial_matches() {
        let plan = TransformPlan::default().with_strict(true);
        let err = transform("[{ id: 1 }, { achievements: [] }]", &plan).unwrap_err();
        assert!(matches!(err, RfiError::PartialMatch { skipped: 1, .. }));
    }

    #[test]
    fn report_counts_records() {
        let src = "[\n  { id: 1, authorName: \"x\" },\n  { achievements: [], authorName: \"y\" },\n]";
        let output = transform(src, &TransformPlan::default()).unwrap();
        assert_eq!(output.report.records, 2);
        assert_eq!(output.report.injected, 1);
        assert_eq!(output.report.skipped.len(), 1);
        assert_eq!(output.report.skipped[0].line, 2);
        assert_eq!(output.report.stripped, 1);
        assert!(output.report.changed);
        assert!(output.text.contains("{ id: 1, authorName: \"x\" }"));
    }
}
