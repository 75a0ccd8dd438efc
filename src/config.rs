//
//  config.rs
//  Drift
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{DriftError, Result};

/// Top-level drift checker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub names: NamingConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    /// File names skipped in both trees (e.g. "openai.py").
    #[serde(default)]
    pub ignore_files: Vec<String>,
    /// Emit an ERROR issue for files that fail to parse instead of only logging.
    #[serde(default)]
    pub report_parse_errors: bool,
}

/// Roots of the two trees being compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Authoritative source tree (the service).
    #[serde(default = "default_reference_root")]
    pub reference_root: PathBuf,
    /// Tree checked for drift (the client).
    #[serde(default = "default_client_root")]
    pub client_root: PathBuf,
}

/// Subdirectory and file naming shared by both trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Schema definitions.
    #[serde(default = "default_models_dir")]
    pub models_dir: String,
    /// Route declarations (reference) and resource clients (client).
    #[serde(default = "default_routers_dir")]
    pub routers_dir: String,
    /// Source file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Well-known names the extractor keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Receiver of route decorators: `@router.get(...)`.
    #[serde(default = "default_router_receiver")]
    pub router_receiver: String,
    /// Low-level request primitive on the client: `self._request(...)`.
    #[serde(default = "default_request_method")]
    pub request_method: String,
    /// Per-resource URL helper: `self._get_url(...)`.
    #[serde(default = "default_url_helper")]
    pub url_helper: String,
    /// Registrar attributes that accept any verb.
    #[serde(default = "default_catch_all_registrars")]
    pub catch_all_registrars: Vec<String>,
}

/// Matching policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Bases every schema class derives from; never reported as missing.
    #[serde(default = "default_ignored_bases")]
    pub ignored_bases: Vec<String>,
    /// Shortest literal fragment the substring fallback will search for.
    #[serde(default = "default_min_heuristic_len")]
    pub min_heuristic_len: usize,
}

fn default_reference_root() -> PathBuf {
    PathBuf::from("reference")
}

fn default_client_root() -> PathBuf {
    PathBuf::from("client")
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_routers_dir() -> String {
    "routers".to_string()
}

fn default_extension() -> String {
    "py".to_string()
}

fn default_router_receiver() -> String {
    "router".to_string()
}

fn default_request_method() -> String {
    "_request".to_string()
}

fn default_url_helper() -> String {
    "_get_url".to_string()
}

fn default_catch_all_registrars() -> Vec<String> {
    vec!["api_route".to_string()]
}

fn default_ignored_bases() -> Vec<String> {
    vec!["BaseModel".to_string(), "object".to_string()]
}

fn default_min_heuristic_len() -> usize {
    3
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reference_root: default_reference_root(),
            client_root: default_client_root(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            routers_dir: default_routers_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            router_receiver: default_router_receiver(),
            request_method: default_request_method(),
            url_helper: default_url_helper(),
            catch_all_registrars: default_catch_all_registrars(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            ignored_bases: default_ignored_bases(),
            min_heuristic_len: default_min_heuristic_len(),
        }
    }
}

impl NamingConfig {
    pub fn is_catch_all(&self, registrar_attr: &str) -> bool {
        self.catch_all_registrars.iter().any(|r| r == registrar_attr)
    }
}

impl MatchingConfig {
    pub fn ignored_base_set(&self) -> BTreeSet<String> {
        self.ignored_bases.iter().cloned().collect()
    }
}

impl DriftConfig {
    /// Load config from a TOML file. Missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DriftError::ConfigRead(path.to_path_buf(), e))?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| DriftError::ConfigParse(path.to_path_buf(), e))?;
        config.resolve_roots(path);
        Ok(config)
    }

    /// Make relative roots relative to the config file's parent directory.
    fn resolve_roots(&mut self, config_path: &Path) {
        let parent = config_path.parent().unwrap_or(Path::new(""));
        self.paths.reference_root = resolve_root(parent, &self.paths.reference_root);
        self.paths.client_root = resolve_root(parent, &self.paths.client_root);
    }

    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore_files.iter().any(|f| f == file_name)
    }

    pub fn reference_models_dir(&self) -> PathBuf {
        self.paths.reference_root.join(&self.layout.models_dir)
    }

    pub fn reference_routers_dir(&self) -> PathBuf {
        self.paths.reference_root.join(&self.layout.routers_dir)
    }

    pub fn client_models_dir(&self) -> PathBuf {
        self.paths.client_root.join(&self.layout.models_dir)
    }

    pub fn client_routers_dir(&self) -> PathBuf {
        self.paths.client_root.join(&self.layout.routers_dir)
    }
}

fn resolve_root(parent: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        parent.join(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_fastapi_client_conventions() {
        let config = DriftConfig::default();
        assert_eq!(config.names.router_receiver, "router");
        assert_eq!(config.names.request_method, "_request");
        assert_eq!(config.names.url_helper, "_get_url");
        assert!(config.names.is_catch_all("api_route"));
        assert!(!config.names.is_catch_all("get"));
        assert_eq!(config.matching.min_heuristic_len, 3);
        assert!(config.matching.ignored_base_set().contains("BaseModel"));
        assert!(!config.report_parse_errors);
    }

    #[test]
    fn test_load_partial_file_resolves_roots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drift.toml");
        std::fs::write(
            &path,
            r#"
ignore_files = ["openai.py"]

[paths]
reference_root = "refs/backend"

[names]
request_method = "send"
"#,
        )
        .unwrap();

        let config = DriftConfig::load(&path).unwrap();
        assert_eq!(config.paths.reference_root, dir.path().join("refs/backend"));
        assert_eq!(config.paths.client_root, dir.path().join("client"));
        assert_eq!(config.names.request_method, "send");
        assert_eq!(config.names.url_helper, "_get_url");
        assert!(config.is_ignored("openai.py"));
        assert_eq!(
            config.reference_models_dir(),
            dir.path().join("refs/backend").join("models")
        );
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("drift.toml");
        std::fs::write(&path, "ignore_files = [").unwrap();

        assert!(matches!(
            DriftConfig::load(&path),
            Err(DriftError::ConfigParse(_, _))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            DriftConfig::load(&path),
            Err(DriftError::ConfigRead(_, _))
        ));
    }
}
