//
//  source.rs
//  Drift
//
//  Created by hak (tharun)
//

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::error::{DriftError, Result};

/// A Python file parsed without syntax errors.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
}

/// Result of loading one file from disk.
pub enum SourceLoad {
    /// No file at the path.
    Missing,
    Parsed(SourceFile),
    /// Unreadable, not UTF-8, or syntactically invalid.
    Unparseable { reason: String },
}

impl SourceFile {
    /// Parse `text` as Python. Syntax errors yield [`SourceLoad::Unparseable`].
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<SourceLoad> {
        let mut parser = python_parser()?;
        let Some(tree) = parser.parse(&text, None) else {
            return Ok(SourceLoad::Unparseable {
                reason: "parser produced no tree".to_string(),
            });
        };

        if let Some(line) = first_error_line(tree.root_node()) {
            return Ok(SourceLoad::Unparseable {
                reason: format!("syntax error near line {line}"),
            });
        }

        Ok(SourceLoad::Parsed(Self {
            path: path.into(),
            text,
            tree,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Read and parse a file.
///
/// Only parser initialization failures are errors; everything about the
/// file itself is folded into [`SourceLoad`].
pub fn load_source(path: &Path) -> Result<SourceLoad> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SourceLoad::Missing),
        Err(e) => {
            return Ok(SourceLoad::Unparseable {
                reason: e.to_string(),
            })
        }
    };

    SourceFile::parse(path, text)
}

fn python_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| DriftError::ParserInit(e.to_string()))?;
    Ok(parser)
}

/// 1-based line of the first ERROR or MISSING node, if any.
fn first_error_line(root: Node) -> Option<usize> {
    if !root.has_error() {
        return None;
    }
    if root.is_error() || root.is_missing() {
        return Some(root.start_position().row + 1);
    }

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    Some(root.start_position().row + 1)
}
