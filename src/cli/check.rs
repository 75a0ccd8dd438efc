//! Check command: scan both trees and print the drift report.

use anyhow::{Context, Result};

use super::{CheckArgs, OutputFormat, EXIT_CLEAN, EXIT_DRIFT};
use crate::config::DriftConfig;
use crate::report::DriftReport;
use crate::scan::scan;

/// Run a scan with command-line overrides applied on top of `config`.
pub fn run(mut config: DriftConfig, args: &CheckArgs) -> Result<i32> {
    apply_overrides(&mut config, args);

    let report = scan(&config).context("drift scan failed")?;
    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.is_clean() { EXIT_CLEAN } else { EXIT_DRIFT })
}

fn apply_overrides(config: &mut DriftConfig, args: &CheckArgs) {
    if let Some(reference) = &args.reference {
        config.paths.reference_root = reference.clone();
    }
    if let Some(client) = &args.client {
        config.paths.client_root = client.clone();
    }
    config.ignore_files.extend(args.ignore.iter().cloned());
    if args.report_parse_errors {
        config.report_parse_errors = true;
    }
}

fn print_text(report: &DriftReport) {
    println!("Checking drift...");
    println!("REF:    {}", report.reference_root.display());
    println!("CLIENT: {}", report.client_root.display());
    println!();
    println!("{report}");
}
