use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use correspond::cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("correspond=debug,info")
    } else {
        EnvFilter::new("correspond=warn")
    };

    // Keep stdout free for reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        cli::Commands::Exact(args) => cli::exact::run(args, cli.format, cli.verbose),
        cli::Commands::Contains(args) => cli::contains::run(args, cli.format, cli.verbose),
        cli::Commands::Compare(args) => cli::compare::run(args, cli.format, cli.verbose),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
