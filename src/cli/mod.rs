//! CLI module for contract-drift.
//!
//! Commands:
//! - check: compare the client tree against the reference tree (default)
//! - symbols: dump what the extractor sees in one file

pub mod check;
pub mod symbols;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::DriftConfig;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "drift.toml";

/// No drift found.
pub const EXIT_CLEAN: i32 = 0;
/// At least one issue found.
pub const EXIT_DRIFT: i32 = 1;
/// The scan itself failed (bad config, unreadable input).
pub const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "contract-drift")]
#[command(about = "contract-drift - Static API-contract drift detection", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ./drift.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log extraction and matching details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the client tree against the reference tree
    Check(CheckArgs),

    /// Print the symbols extracted from one file as JSON
    Symbols {
        /// Python source file
        file: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct CheckArgs {
    /// Reference tree root (overrides the config)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Client tree root (overrides the config)
    #[arg(long)]
    pub client: Option<PathBuf>,

    /// File name to skip in both trees (repeatable)
    #[arg(short, long)]
    pub ignore: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Report unparseable files as ERROR issues
    #[arg(long)]
    pub report_parse_errors: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run the parsed command line and return the process exit status.
pub fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        None => check::run(config, &CheckArgs::default()),
        Some(Commands::Check(args)) => check::run(config, &args),
        Some(Commands::Symbols { file }) => {
            symbols::run(&config, &file)?;
            Ok(EXIT_CLEAN)
        }
    }
}

/// Explicit config paths must load; the implicit default is optional.
pub fn load_config(path: Option<&Path>) -> Result<DriftConfig> {
    match path {
        Some(path) => DriftConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.is_file() {
                DriftConfig::load(default)
                    .with_context(|| format!("loading config {}", default.display()))
            } else {
                Ok(DriftConfig::default())
            }
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "contract_drift=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
