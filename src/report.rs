//! Drift issues and the report that collects them.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::{DriftError, Result};
use crate::model::EndpointSymbol;

/// File attribution for issues not tied to one file.
pub const GENERAL_FILE: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    MissingFields,
    MissingBase,
    MissingEndpoint,
    Error,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingFields => "MISSING_FIELDS",
            IssueKind::MissingBase => "MISSING_BASE",
            IssueKind::MissingEndpoint => "MISSING_ENDPOINT",
            IssueKind::Error => "ERROR",
        }
    }

    pub fn is_drift(&self) -> bool {
        !matches!(self, IssueKind::Error)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding, attributed to a client file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub file: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: file.into(),
        }
    }

    pub fn missing_fields(class_name: &str, fields: &[String], file: &str) -> Self {
        Self::new(
            IssueKind::MissingFields,
            format!("Model {class_name} missing fields: {}", fields.join(", ")),
            file,
        )
    }

    pub fn missing_bases(class_name: &str, bases: &[String], file: &str) -> Self {
        Self::new(
            IssueKind::MissingBase,
            format!("Model {class_name} missing base classes: {}", bases.join(", ")),
            file,
        )
    }

    pub fn missing_endpoint(endpoint: &EndpointSymbol, file: &str) -> Self {
        Self::new(
            IssueKind::MissingEndpoint,
            format!(
                "Endpoint {} {} not called in client",
                endpoint.method, endpoint.path_template
            ),
            file,
        )
    }

    pub fn error(message: impl Into<String>, file: impl Into<String>) -> Self {
        Self::new(IssueKind::Error, message, file)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.file, self.message)
    }
}

/// Result of one scan: the roots compared and every issue found, in order.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub reference_root: PathBuf,
    pub client_root: PathBuf,
    pub issues: Vec<Issue>,
}

impl DriftReport {
    pub fn new(reference_root: PathBuf, client_root: PathBuf, issues: Vec<Issue>) -> Self {
        Self {
            reference_root,
            client_root,
            issues,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    pub fn issues_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |i| i.file == file)
    }

    /// `Ok(self)` when clean, otherwise [`DriftError::Drift`] carrying the report.
    pub fn into_result(self) -> Result<Self> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(DriftError::Drift(self))
        }
    }

    /// Panic with the formatted report if any issue was found.
    pub fn assert_clean(&self) {
        if !self.is_clean() {
            panic!("{self}");
        }
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("No drift detected in implemented files.");
        }
        write!(f, "Found {} drift issues:", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}
