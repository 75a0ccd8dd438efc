//
//  files.rs
//  Drift
//
//  Created by hak (tharun)
//

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Package markers that never hold schemas or routes.
const PACKAGE_INIT_STEM: &str = "__init__";

/// Source files directly inside `dir`, sorted by name.
///
/// Package markers and dotfiles are skipped. Ignore files are not
/// consulted: reference trees are often vendored into gitignored directories.
pub fn list_source_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .filter(|path| !is_skipped(path))
        .collect();
    files.sort();
    files
}

fn is_skipped(path: &Path) -> bool {
    path.file_stem().is_some_and(|stem| stem == PACKAGE_INIT_STEM)
        || file_name(path).starts_with('.')
}

/// Final path component as text.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// File name without extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default()
}
