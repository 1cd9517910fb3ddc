//! Command-line interface for correspond.
//!
//! Runs correspondence checks over JSON arrays. Available commands:
//!
//! - **exact**: Check that two arrays correspond one-to-one, optionally in order
//! - **contains**: Check that an array holds an element corresponding to a value
//! - **compare**: Check a single pair of values
//!
//! ## Usage
//!
//! ```text
//! # Unordered one-to-one check
//! correspond exact actual.json expected.json --relation starts-with
//!
//! # Require the same order as well
//! correspond exact actual.json expected.json --relation length --in-order
//!
//! # Pipe the actual array from another tool
//! produce-values | correspond contains - 3.0 --relation tolerance:0.05
//!
//! # JSON output for scripting
//! correspond compare 2.04 2 --relation tolerance:0.05 --format json
//! ```
//!
//! Exit status is 0 when the check passes, 1 when it fails and 2 on invalid
//! input or configuration.

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::matching::diagnosis::Failure;
use crate::parsing::json::{parse_sequence_file, Element};

pub mod compare;
pub mod contains;
pub mod exact;
pub mod relation;

pub use relation::RelationSpec;

#[derive(Parser)]
#[command(name = "correspond")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Check that sequences of values correspond under a named relation")]
#[command(
    long_about = "correspond checks JSON arrays against each other using a relation such as \
    'starts-with' or 'tolerance:0.05'.\n\nIt finds a one-to-one pairing when one exists and otherwise reports:\n\
    - Elements of the actual array with no partner\n\
    - Expected elements with no partner\n\
    - The first error raised while comparing elements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that two arrays correspond one-to-one
    Exact(exact::ExactArgs),

    /// Check that an array contains an element corresponding to a value
    Contains(contains::ContainsArgs),

    /// Check that a single pair of values corresponds
    Compare(compare::CompareArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Result of one command, as written in `--format json`
#[derive(Debug, Serialize)]
struct Report<'a> {
    command: &'a str,
    relation: RelationSpec,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<&'a Failure>,
}

/// Print the outcome of a check and return whether it passed.
pub(crate) fn report(
    command: &str,
    relation: RelationSpec,
    outcome: &Result<(), Failure>,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let passed = outcome.is_ok();
    match format {
        OutputFormat::Text => match outcome {
            Ok(()) => println!("OK: {command} ({relation})"),
            Err(failure) => println!("{failure}"),
        },
        OutputFormat::Json => {
            let output = Report {
                command,
                relation,
                passed,
                failure: outcome.as_ref().err(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(passed)
}

/// Read a sequence argument, printing its size in verbose mode.
pub(crate) fn read_sequence(
    label: &str,
    path: &Path,
    verbose: bool,
) -> anyhow::Result<Vec<Option<Element>>> {
    let elements = parse_sequence_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {label} '{}': {e}", path.display()))?;
    if verbose {
        eprintln!(
            "{label}: {} elements ({} absent)",
            elements.len(),
            elements.iter().filter(|e| e.is_none()).count()
        );
    }
    Ok(elements)
}
