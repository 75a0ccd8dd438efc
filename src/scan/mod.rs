//
//  mod.rs
//  Drift
//
//  Created by hak (tharun)
//

//! Tree-level driver: pairs reference and client files, extracts both
//! sides, and collects issues in a deterministic order.

pub mod files;

use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::DriftConfig;
use crate::error::Result;
use crate::matching::{diff_classes, merge_class_maps, missing_endpoints, EndpointMatcher};
use crate::model::FileModel;
use crate::parser::extract_file;
use crate::report::{DriftReport, Issue, GENERAL_FILE};

pub use files::{file_name, file_stem, list_source_files};

/// Compare the client tree against the reference tree.
///
/// Model files are checked first, then router files; each phase runs in
/// file-name order. A missing reference models directory yields a single
/// `ERROR` issue and nothing else.
pub fn scan(config: &DriftConfig) -> Result<DriftReport> {
    let ref_models_dir = config.reference_models_dir();
    let report = |issues: Vec<Issue>| {
        DriftReport::new(
            config.paths.reference_root.clone(),
            config.paths.client_root.clone(),
            issues,
        )
    };

    if !ref_models_dir.is_dir() {
        let message = format!(
            "Reference models directory not found at {}",
            ref_models_dir.display()
        );
        return Ok(report(vec![Issue::error(message, GENERAL_FILE)]));
    }

    let mut issues = scan_models(config)?;
    issues.extend(scan_routers(config)?);

    info!(issues = issues.len(), "drift scan finished");
    Ok(report(issues))
}

/// Class diffs for every client models file.
pub fn scan_models(config: &DriftConfig) -> Result<Vec<Issue>> {
    let client_files = source_files(config, &config.client_models_dir());
    let ignored_bases = config.matching.ignored_base_set();

    let per_file: Vec<Vec<Issue>> = client_files
        .par_iter()
        .map(|client_file| check_model_file(config, client_file, &ignored_bases))
        .collect::<Result<_>>()?;

    Ok(per_file.into_iter().flatten().collect())
}

fn check_model_file(
    config: &DriftConfig,
    client_file: &Path,
    ignored_bases: &BTreeSet<String>,
) -> Result<Vec<Issue>> {
    let name = file_name(client_file);
    let client = extract_file(client_file, &config.names)?;
    let ref_models = extract_file(&config.reference_models_dir().join(&name), &config.names)?;
    let ref_routers = extract_file(&config.reference_routers_dir().join(&name), &config.names)?;

    let mut issues = Vec::new();
    // Reference routers parse failures are reported by the router phase.
    if config.report_parse_errors {
        for model in [&client, &ref_models] {
            issues.extend(parse_error_issue(model, &name));
        }
    }

    // Router-local classes override same-named model classes.
    let reference = merge_class_maps(ref_models.classes, ref_routers.classes);
    for diff in diff_classes(&reference, &client.classes, ignored_bases) {
        issues.extend(diff.into_issues(&name));
    }

    debug!(file = %name, issues = issues.len(), "checked models");
    Ok(issues)
}

/// Endpoint presence for every reference routers file with a client counterpart.
pub fn scan_routers(config: &DriftConfig) -> Result<Vec<Issue>> {
    let ref_files = source_files(config, &config.reference_routers_dir());

    let per_file: Vec<Vec<Issue>> = ref_files
        .par_iter()
        .map(|ref_file| check_router_file(config, ref_file))
        .collect::<Result<_>>()?;

    Ok(per_file.into_iter().flatten().collect())
}

fn check_router_file(config: &DriftConfig, ref_file: &Path) -> Result<Vec<Issue>> {
    let name = file_name(ref_file);
    let mut issues = Vec::new();

    let reference = extract_file(ref_file, &config.names)?;
    if config.report_parse_errors {
        issues.extend(parse_error_issue(&reference, &name));
    }
    if reference.endpoints.is_empty() {
        return Ok(issues);
    }

    let client_file = config.client_routers_dir().join(&name);
    if !client_file.is_file() {
        debug!(file = %name, "no client routers file, skipping");
        return Ok(issues);
    }

    let client = extract_file(&client_file, &config.names)?;
    if !client.is_parsed() {
        if config.report_parse_errors {
            issues.extend(parse_error_issue(&client, &name));
        }
        return Ok(issues);
    }

    let stem = file_stem(ref_file);
    let matcher = EndpointMatcher::new(
        &client.requests,
        &client.source,
        &stem,
        config.matching.min_heuristic_len,
    );
    issues.extend(missing_endpoints(&reference.endpoints, &matcher, &name));

    debug!(
        file = %name,
        endpoints = reference.endpoints.len(),
        requests = client.requests.len(),
        issues = issues.len(),
        "checked routers"
    );
    Ok(issues)
}

/// Listed source files in `dir`, minus the configured ignore list.
fn source_files(config: &DriftConfig, dir: &Path) -> Vec<PathBuf> {
    list_source_files(dir, &config.layout.extension)
        .into_iter()
        .filter(|path| !config.is_ignored(&file_name(path)))
        .collect()
}

fn parse_error_issue(model: &FileModel, file: &str) -> Option<Issue> {
    let reason = model.parse_failure()?;
    Some(Issue::error(
        format!("Failed to parse {}: {reason}", model.path.display()),
        file,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::IssueKind;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Trees {
        _dir: TempDir,
        config: DriftConfig,
    }

    impl Trees {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let mut config = DriftConfig::default();
            config.paths.reference_root = dir.path().join("ref");
            config.paths.client_root = dir.path().join("client");
            for sub in [
                config.reference_models_dir(),
                config.reference_routers_dir(),
                config.client_models_dir(),
                config.client_routers_dir(),
            ] {
                fs::create_dir_all(sub).unwrap();
            }
            Self { _dir: dir, config }
        }

        fn write(&self, dir: std::path::PathBuf, name: &str, text: &str) {
            fs::write(dir.join(name), text).unwrap();
        }
    }

    #[test]
    fn test_missing_reference_root_is_single_error() {
        let dir = tempdir().unwrap();
        let mut config = DriftConfig::default();
        config.paths.reference_root = dir.path().join("absent");
        config.paths.client_root = dir.path().join("client");

        let report = scan(&config).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Error);
        assert_eq!(report.issues[0].file, GENERAL_FILE);
        assert!(report.issues[0].message.contains("Reference models directory not found"));
    }

    #[test]
    fn test_router_classes_override_model_classes() {
        let trees = Trees::new();
        let config = &trees.config;
        trees.write(
            config.reference_models_dir(),
            "notes.py",
            "class NoteForm(BaseModel):\n    title: str\n    stale: str\n",
        );
        trees.write(
            config.reference_routers_dir(),
            "notes.py",
            "class NoteForm(BaseModel):\n    title: str\n    body: str\n",
        );
        trees.write(
            config.client_models_dir(),
            "notes.py",
            "class NoteForm(BaseModel):\n    title: str\n",
        );

        let issues = scan_models(config).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Model NoteForm missing fields: body");
    }

    #[test]
    fn test_unmatched_files_are_skipped() {
        let trees = Trees::new();
        let config = &trees.config;
        trees.write(config.client_models_dir(), "extra.py", "class Only:\n    a: int\n");
        trees.write(
            config.reference_routers_dir(),
            "unimplemented.py",
            "@router.get('/x')\nasync def x():\n    ...\n",
        );

        let report = scan(config).unwrap();
        assert!(report.is_clean(), "{report}");
    }

    #[test]
    fn test_ignored_files_are_skipped() {
        let mut trees = Trees::new();
        trees.config.ignore_files = vec!["openai.py".to_string()];
        let config = &trees.config;
        trees.write(config.reference_models_dir(), "openai.py", "class A:\n    x: int\n");
        trees.write(config.client_models_dir(), "openai.py", "class A:\n    y: int\n");
        trees.write(
            config.reference_routers_dir(),
            "openai.py",
            "@router.get('/models')\nasync def m():\n    ...\n",
        );
        trees.write(config.client_routers_dir(), "openai.py", "");

        assert!(scan(config).unwrap().is_clean());
    }

    #[test]
    fn test_parse_errors_reported_when_enabled() {
        let mut trees = Trees::new();
        let config = &trees.config;
        trees.write(config.reference_models_dir(), "chats.py", "class Chat:\n    id: str\n");
        trees.write(config.client_models_dir(), "chats.py", "class Chat(:\n");

        assert!(scan(&trees.config).unwrap().is_clean());

        trees.config.report_parse_errors = true;
        let report = scan(&trees.config).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Error);
        assert_eq!(report.issues[0].file, "chats.py");
    }

    #[test]
    fn test_broken_reference_router_reported_once() {
        let mut trees = Trees::new();
        trees.config.report_parse_errors = true;
        let config = &trees.config;
        trees.write(config.reference_models_dir(), "files.py", "class File:\n    id: str\n");
        trees.write(config.reference_routers_dir(), "files.py", "@router.get('/x'\ndef (:\n");
        trees.write(config.client_models_dir(), "files.py", "class File:\n    id: str\n");

        let report = scan(config).unwrap();
        assert_eq!(report.len(), 1, "{report}");
        assert_eq!(report.issues[0].kind, IssueKind::Error);
        assert!(report.issues[0].message.contains("routers"));
    }
}
