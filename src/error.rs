//
//  error.rs
//  Drift
//
//  Created by hak (tharun)
//

use std::path::PathBuf;

use crate::report::DriftReport;

/// Errors that stop a drift scan or its setup.
///
/// Drift findings are not errors; they are collected as issues. The only
/// exception is [`DriftError::Drift`], produced on request by
/// [`DriftReport::into_result`] for callers that want a failing `Result`.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config {0}: {1}")]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Invalid config {0}: {1}")]
    ConfigParse(PathBuf, toml::de::Error),

    #[error("Failed to initialize Python parser: {0}")]
    ParserInit(String),

    #[error("{0}")]
    Drift(DriftReport),
}

pub type Result<T> = std::result::Result<T, DriftError>;
