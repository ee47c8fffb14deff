//! RFI I/O - File-level execution of the Record Field Injector
//!
//! This crate provides the filesystem layer:
//!
//! - Scoped exclusive locking of the source path
//! - Single read, in-memory transform, single atomic write
//! - TOML configuration loading

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod lock;
pub mod writer;

// Re-export commonly used types
pub use config::{FieldConfig, InjectConfig};
pub use lock::FileLock;
pub use rfi_format::{InjectedField, Limits, Result, RfiError};
pub use rfi_transform::{RecordReport, TransformPlan, TransformReport};
pub use writer::write_atomic;

use std::fs;
use std::path::PathBuf;

use rfi_transform::transform;
use tracing::{debug, info};

/// High-level execution options
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// Compute the result without writing the file
    pub dry_run: bool,
    /// Hold an exclusive lock on the path for the whole run
    pub lock: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            lock: true,
        }
    }
}

/// One read-transform-write run
#[derive(Debug, Clone)]
pub struct InjectRequest {
    /// File to rewrite in place
    pub path: PathBuf,
    /// What to strip and inject
    pub plan: TransformPlan,
    /// Execution options
    pub options: InjectOptions,
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct InjectSummary {
    /// File that was processed
    pub path: PathBuf,
    /// Transform report
    pub report: TransformReport,
    /// Size of the source text
    pub bytes_read: usize,
    /// Size of the text written, zero when nothing was written
    pub bytes_written: usize,
    /// Whether the file was rewritten
    pub wrote: bool,
    /// Transformed text, kept only for dry runs
    pub output: Option<String>,
}

/// Lock, read, transform, and write back `request.path`
///
/// The lock is released on every exit path. The file is left untouched when
/// the transform fails, when the output equals the input, or on a dry run.
pub fn execute_inject(request: InjectRequest) -> Result<InjectSummary> {
    let InjectRequest {
        path,
        plan,
        options,
    } = request;
    plan.validate()?;

    let metadata = fs::metadata(&path).map_err(|err| RfiError::io(&path, err))?;
    plan.limits()
        .check_input_len(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;

    let _lock = if options.lock {
        Some(FileLock::acquire(&path)?)
    } else {
        None
    };

    let source = fs::read_to_string(&path).map_err(|err| RfiError::io(&path, err))?;
    debug!(path = %path.display(), bytes = source.len(), "source loaded");

    let output = transform(&source, &plan)?;

    let wrote = !options.dry_run && output.report.changed;
    if wrote {
        write_atomic(&path, &output.text)?;
        info!(
            path = %path.display(),
            injected = output.report.injected,
            stripped = output.report.stripped,
            "file updated"
        );
    } else {
        debug!(path = %path.display(), dry_run = options.dry_run, "file left unchanged");
    }

    Ok(InjectSummary {
        path,
        bytes_read: source.len(),
        bytes_written: if wrote { output.text.len() } else { 0 },
        wrote,
        output: options.dry_run.then_some(output.text),
        report: output.report,
    })
}
