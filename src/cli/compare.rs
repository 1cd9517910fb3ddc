use clap::Args;

use crate::cli::{report, OutputFormat, RelationSpec};
use crate::matching::diagnosis::check_pair;
use crate::parsing::json::parse_element_text;

#[derive(Args)]
pub struct CompareArgs {
    /// Actual element as inline JSON; plain text is taken as a string
    #[arg(required = true)]
    pub actual: String,

    /// Expected element as inline JSON; plain text is taken as a string
    #[arg(required = true)]
    pub expected: String,

    /// Relation between the two elements
    #[arg(short, long, default_value = "equals")]
    pub relation: RelationSpec,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    let relation = args.relation.build()?;
    let actual = parse_element_text(&args.actual);
    let expected = parse_element_text(&args.expected);

    if verbose {
        eprintln!("Relation: {}", args.relation);
    }

    let outcome = check_pair(&actual, &expected, &relation);
    report("compare", args.relation, &outcome, format)
}
