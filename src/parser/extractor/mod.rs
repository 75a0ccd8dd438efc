//
//  mod.rs
//  Drift
//
//  Created by hak (tharun)
//

pub(crate) mod helpers;
mod python;

use std::collections::VecDeque;
use std::path::Path;

use tracing::{debug, warn};

use super::source::{load_source, SourceFile, SourceLoad};
use crate::config::NamingConfig;
use crate::error::Result;
use crate::model::{ClassMap, EndpointSymbol, FileModel, FileStatus, RequestCallSymbol};

pub use helpers::CallShape;

/// Symbols collected while walking one tree.
#[derive(Debug, Default)]
pub struct FileSymbols {
    pub classes: ClassMap,
    pub endpoints: Vec<EndpointSymbol>,
    pub requests: Vec<RequestCallSymbol>,
}

/// Walk every node of a parsed file and collect its symbols.
///
/// Nodes are visited breadth-first, so nested classes and functions come
/// after every top-level one. When two classes share a name, the one
/// visited later wins: a nested class replaces a top-level class, and
/// among classes at the same depth the last in source order is kept.
pub fn extract_symbols(file: &SourceFile, names: &NamingConfig) -> FileSymbols {
    let mut symbols = FileSymbols::default();
    let source = file.bytes();

    let mut queue = VecDeque::from([file.root()]);
    while let Some(node) = queue.pop_front() {
        python::extract_python_node(&node, source, names, &mut symbols);

        let mut cursor = node.walk();
        queue.extend(node.children(&mut cursor));
    }
    symbols
}

/// Load, parse, and extract one file.
///
/// Missing and unparseable files yield an empty model; only parser
/// initialization failures are errors.
pub fn extract_file(path: &Path, names: &NamingConfig) -> Result<FileModel> {
    match load_source(path)? {
        SourceLoad::Missing => Ok(FileModel::empty(path, FileStatus::Missing)),
        SourceLoad::Unparseable { reason } => {
            warn!(file = %path.display(), %reason, "failed to parse file, treating it as empty");
            Ok(FileModel::empty(path, FileStatus::Unparseable(reason)))
        }
        SourceLoad::Parsed(file) => {
            let symbols = extract_symbols(&file, names);
            debug!(
                file = %path.display(),
                classes = symbols.classes.len(),
                endpoints = symbols.endpoints.len(),
                requests = symbols.requests.len(),
                "extracted symbols"
            );
            Ok(FileModel {
                path: path.to_path_buf(),
                status: FileStatus::Parsed,
                classes: symbols.classes,
                endpoints: symbols.endpoints,
                requests: symbols.requests,
                source: file.into_text(),
            })
        }
    }
}

/// Classes defined anywhere in `path`.
pub fn extract_classes(path: &Path, names: &NamingConfig) -> Result<ClassMap> {
    Ok(extract_file(path, names)?.classes)
}

/// Routes declared through the router receiver in `path`.
pub fn extract_endpoints(path: &Path, names: &NamingConfig) -> Result<Vec<EndpointSymbol>> {
    Ok(extract_file(path, names)?.endpoints)
}

/// Outgoing request calls in `path`.
pub fn extract_request_calls(
    path: &Path,
    names: &NamingConfig,
) -> Result<Vec<RequestCallSymbol>> {
    Ok(extract_file(path, names)?.requests)
}
