use std::path::PathBuf;

use clap::Args;

use crate::cli::{read_sequence, report, OutputFormat, RelationSpec};
use crate::matching::diagnosis::{check_exactly, check_exactly_in_order};

#[derive(Args)]
pub struct ExactArgs {
    /// JSON array of actual elements ('-' for stdin)
    #[arg(required = true)]
    pub actual: PathBuf,

    /// JSON array of expected elements ('-' for stdin)
    #[arg(required = true)]
    pub expected: PathBuf,

    /// Relation between actual and expected elements (equals, starts-with,
    /// ends-with, contains-text, length, ignoring-case, tolerance:<T>)
    #[arg(short, long, default_value = "equals")]
    pub relation: RelationSpec,

    /// Also require the elements to correspond position by position
    #[arg(long)]
    pub in_order: bool,
}

pub fn run(args: ExactArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    if args.actual.as_os_str() == "-" && args.expected.as_os_str() == "-" {
        anyhow::bail!("Only one of ACTUAL and EXPECTED can be read from stdin");
    }

    let relation = args.relation.build()?;
    let actual = read_sequence("Actual", &args.actual, verbose)?;
    let expected = read_sequence("Expected", &args.expected, verbose)?;

    let outcome = if args.in_order {
        check_exactly_in_order(&actual, &expected, &relation)
    } else {
        check_exactly(&actual, &expected, &relation)
    };

    let command = if args.in_order { "exact --in-order" } else { "exact" };
    report(command, args.relation, &outcome, format)
}
