//! Symbolic facts extracted from one source file.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Label used for routes registered through a catch-all registrar.
pub const CATCH_ALL_LABEL: &str = "API_ROUTE";

/// A class definition: declared annotated fields and base names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSymbol {
    pub name: String,
    pub fields: BTreeSet<String>,
    pub bases: BTreeSet<String>,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeSet::new(),
            bases: BTreeSet::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases.extend(bases.into_iter().map(Into::into));
        self
    }
}

/// Classes of a file keyed by name.
pub type ClassMap = BTreeMap<String, ClassSymbol>;

/// HTTP verb of a declared route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum RouteMethod {
    /// Upper-cased registrar attribute (`GET`, `POST`, ...).
    Verb(String),
    /// Route accepting any verb.
    CatchAll,
}

impl RouteMethod {
    pub fn as_str(&self) -> &str {
        match self {
            RouteMethod::Verb(verb) => verb,
            RouteMethod::CatchAll => CATCH_ALL_LABEL,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RouteMethod> for String {
    fn from(method: RouteMethod) -> Self {
        method.as_str().to_string()
    }
}

/// A route declared on the reference side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSymbol {
    pub method: RouteMethod,
    /// Path as written in source, placeholders kept.
    pub path_template: String,
}

impl EndpointSymbol {
    pub fn new(method: RouteMethod, path_template: impl Into<String>) -> Self {
        Self {
            method,
            path_template: path_template.into(),
        }
    }
}

/// An outgoing request issued by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestCallSymbol {
    /// Upper-cased verb; empty when the method is computed at runtime.
    pub method: String,
    /// URL with every interpolated part rendered as `{}`.
    pub url_template: String,
}

impl RequestCallSymbol {
    pub fn new(method: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url_template: url_template.into(),
        }
    }

    pub fn has_dynamic_method(&self) -> bool {
        self.method.is_empty()
    }
}

/// How a file fared when loaded for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum FileStatus {
    Missing,
    Parsed,
    Unparseable(String),
}

/// Everything extracted from one file.
///
/// Missing and unparseable files produce an empty model, so callers can
/// treat every file uniformly.
#[derive(Debug, Clone, Serialize)]
pub struct FileModel {
    pub path: PathBuf,
    pub status: FileStatus,
    pub classes: ClassMap,
    pub endpoints: Vec<EndpointSymbol>,
    pub requests: Vec<RequestCallSymbol>,
    /// Raw text, kept for the substring fallback of endpoint matching.
    #[serde(skip)]
    pub source: String,
}

impl FileModel {
    pub fn empty(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            classes: ClassMap::new(),
            endpoints: Vec::new(),
            requests: Vec::new(),
            source: String::new(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.status == FileStatus::Parsed
    }

    pub fn parse_failure(&self) -> Option<&str> {
        match &self.status {
            FileStatus::Unparseable(reason) => Some(reason),
            _ => None,
        }
    }
}
