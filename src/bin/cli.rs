//! contract-drift CLI - check a client tree against its reference service.

use clap::Parser;
use contract_drift::cli::{init_tracing, run, Cli, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}
