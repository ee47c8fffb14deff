//! RFI CLI - Record Field Injector
//!
//! Rewrites a data file so that every record carrying the anchor field holds
//! exactly one copy of each injected field, placed right after the anchor.

use clap::{ArgAction, Parser, ValueEnum};
use rfi_format::InjectedField;
use rfi_io::{execute_inject, InjectConfig, InjectOptions, InjectRequest, InjectSummary};
use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rfi")]
#[command(about = "Strip and re-inject fields after an anchor in object-literal records")]
#[command(version)]
struct Cli {
    /// Data file to rewrite in place [default: src/data/personalities.ts]
    path: Option<PathBuf>,
    /// Field whose value the injected fields follow [default: achievements]
    #[arg(long)]
    anchor: Option<String>,
    /// Field to inject with a string value (NAME=VALUE, repeatable)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    fields: Vec<InjectedField>,
    /// Field to inject with a literal value (NAME=LITERAL, repeatable)
    #[arg(long = "raw-field", value_name = "NAME=LITERAL", value_parser = InjectedField::parse_raw)]
    raw_fields: Vec<InjectedField>,
    /// Extra field to remove from anchored records (repeatable)
    #[arg(long = "strip", value_name = "NAME")]
    strip: Vec<String>,
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Fail when any record lacks the anchor
    #[arg(long)]
    strict: bool,
    /// Print the transformed text instead of writing the file
    #[arg(long)]
    dry_run: bool,
    /// Do not take the exclusive lock on the data file
    #[arg(long)]
    no_lock: bool,
    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,
    /// Raise the log level (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

#[derive(Debug, serde::Serialize)]
struct RunSummary {
    path: PathBuf,
    records: usize,
    injected: usize,
    skipped: Vec<SkippedRecord>,
    stripped: usize,
    changed: bool,
    wrote: bool,
    dry_run: bool,
    bytes_read: usize,
    bytes_written: usize,
    elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct SkippedRecord {
    index: usize,
    line: usize,
}

impl RunSummary {
    fn new(summary: InjectSummary, dry_run: bool, elapsed: Duration) -> Self {
        let report = summary.report;
        Self {
            path: summary.path,
            records: report.records,
            injected: report.injected,
            skipped: report
                .skipped
                .iter()
                .map(|record| SkippedRecord {
                    index: record.index,
                    line: record.line,
                })
                .collect(),
            stripped: report.stripped,
            changed: report.changed,
            wrote: summary.wrote,
            dry_run,
            bytes_read: summary.bytes_read,
            bytes_written: summary.bytes_written,
            elapsed_ms: elapsed.as_millis(),
            output: summary.output,
        }
    }

    fn counts(&self) -> String {
        format!(
            "records: {}, injected: {}, skipped: {}, stripped: {}",
            self.records,
            self.injected,
            self.skipped.len(),
            self.stripped
        )
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let format = cli.format;
    let dry_run = cli.dry_run;
    let request = build_request(cli)?;
    debug!(path = %request.path.display(), anchor = request.plan.anchor(), "starting run");

    let summary = execute_inject(request)?;
    let summary = RunSummary::new(summary, dry_run, start.elapsed());
    report_summary(summary, format)
}

/// Merge the optional config file with command-line flags
///
/// Flags win over config values. Strip names accumulate. Fields given on the
/// command line replace the configured set instead of extending it.
fn build_request(cli: Cli) -> Result<InjectRequest, Box<dyn Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(path) = cli.path {
        config.path = Some(path);
    }
    if let Some(anchor) = cli.anchor {
        config.anchor = Some(anchor);
    }
    config.strip.extend(cli.strip);
    if cli.strict {
        config.strict = Some(true);
    }

    let fields: Vec<InjectedField> = cli.fields.into_iter().chain(cli.raw_fields).collect();
    let plan = if fields.is_empty() {
        config.plan()?
    } else {
        config.plan_with_fields(fields)?
    };

    Ok(InjectRequest {
        path: config.source_path(),
        plan,
        options: InjectOptions {
            dry_run: cli.dry_run,
            lock: !cli.no_lock,
        },
    })
}

fn load_config(path: Option<&Path>) -> Result<InjectConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(InjectConfig::load(path)?),
        None => Ok(InjectConfig::default()),
    }
}

fn report_summary(summary: RunSummary, format: SummaryFormat) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        SummaryFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &summary)?;
            writeln!(out)?;
        }
        SummaryFormat::Text => {
            if let Some(text) = &summary.output {
                out.write_all(text.as_bytes())?;
            }
            let path = summary.path.display();
            let counts = summary.counts();
            if summary.dry_run {
                eprintln!("Dry run for {path}, file not written ({counts})");
            } else if summary.wrote {
                eprintln!("Successfully updated {path} ({counts})");
            } else {
                eprintln!("{path} already up to date ({counts})");
            }
        }
    }
    out.flush()?;
    Ok(())
}
