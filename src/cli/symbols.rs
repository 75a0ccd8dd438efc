//! Symbols command: show what the extractor sees in a single file.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::DriftConfig;
use crate::model::FileStatus;
use crate::parser::extract_file;

pub fn run(config: &DriftConfig, file: &Path) -> Result<()> {
    let model = extract_file(file, &config.names)?;
    match &model.status {
        FileStatus::Missing => bail!("File not found: {}", file.display()),
        FileStatus::Unparseable(reason) => bail!("Failed to parse {}: {}", file.display(), reason),
        FileStatus::Parsed => {}
    }

    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
