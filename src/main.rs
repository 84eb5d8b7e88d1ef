//! dslint CLI entry point.

use clap::Parser;
use dslint::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let outcome = match &cli.command {
        Commands::Check(args) => cli::run_check(args),
        Commands::Issues => cli::run_issues(),
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
