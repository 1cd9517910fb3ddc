use std::path::PathBuf;

use clap::Args;

use crate::cli::{read_sequence, report, OutputFormat, RelationSpec};
use crate::matching::diagnosis::check_contains;
use crate::parsing::json::parse_element_text;

#[derive(Args)]
pub struct ContainsArgs {
    /// JSON array of actual elements ('-' for stdin)
    #[arg(required = true)]
    pub actual: PathBuf,

    /// Expected element as inline JSON; plain text is taken as a string
    #[arg(required = true)]
    pub element: String,

    /// Relation between actual elements and the expected element
    #[arg(short, long, default_value = "equals")]
    pub relation: RelationSpec,
}

pub fn run(args: ContainsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    let relation = args.relation.build()?;
    let actual = read_sequence("Actual", &args.actual, verbose)?;
    let expected = parse_element_text(&args.element);

    let outcome = check_contains(&actual, &expected, &relation);
    report("contains", args.relation, &outcome, format)
}
