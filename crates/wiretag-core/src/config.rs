//! Configuration file loading for wiretag.
//!
//! Reads `.wiretag/wiretag.json` and provides typed access to all settings.
//! Falls back to defaults when the config file is missing or incomplete.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::naming::NamingRules;
use crate::registry::Registry;

/// Directory holding the config and the registry, relative to the root.
pub const WIRETAG_DIR: &str = ".wiretag";
pub const CONFIG_FILE: &str = "wiretag.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} already exists")]
    AlreadyInitialized(PathBuf),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the coverage scanner finds struct declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// `type X struct` line matching.
    #[default]
    Heuristic,
    /// Syntax-tree walk; also finds structs in grouped `type ( ... )` blocks.
    Syntax,
}

/// Top-level wiretag configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiretagConfig {
    pub version: String,
    /// Struct tag keys every exported field must declare.
    #[serde(default = "default_tag_keys")]
    pub tag_keys: Vec<String>,
    /// Extra acronyms on top of the built-in table.
    #[serde(default)]
    pub acronyms: Vec<String>,
    /// Extra post-join rewrites, e.g. `"web_authn": "webauthn"`.
    #[serde(default)]
    pub rewrites: BTreeMap<String, String>,
    #[serde(default)]
    pub scan_mode: ScanMode,
    /// Path substrings excluded from scanning (the audit machinery itself).
    #[serde(default)]
    pub exclude_paths: Vec<String>,
    /// File names or path suffixes excluded from scanning.
    #[serde(default)]
    pub exclude_files: Vec<String>,
    /// Glob patterns excluded from scanning.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Registry file, relative to `.wiretag/`.
    #[serde(default = "default_registry")]
    pub registry: String,
}

fn default_tag_keys() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_registry() -> String {
    "registry.json".to_string()
}

impl Default for WiretagConfig {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            tag_keys: default_tag_keys(),
            acronyms: vec![],
            rewrites: BTreeMap::new(),
            scan_mode: ScanMode::default(),
            exclude_paths: vec![],
            exclude_files: vec![],
            ignore_patterns: vec![],
            registry: default_registry(),
        }
    }
}

impl WiretagConfig {
    /// Load configuration from `wiretag.json` inside the given wiretag directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(wiretag_dir: &Path) -> Self {
        let config_path = wiretag_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(mut cfg) => {
                if cfg.tag_keys.is_empty() {
                    tracing::warn!(
                        "{}: tag_keys is empty, falling back to [\"json\"]",
                        config_path.display()
                    );
                    cfg.tag_keys = default_tag_keys();
                }
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn naming_rules(&self) -> NamingRules {
        NamingRules::with_extensions(&self.acronyms, &self.rewrites)
    }

    pub fn registry_path(&self, wiretag_dir: &Path) -> PathBuf {
        wiretag_dir.join(&self.registry)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Create `.wiretag/` under `root` with this config and an empty
    /// registry. Refuses to touch an existing directory.
    pub fn init(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let dir = root.join(WIRETAG_DIR);
        if dir.exists() {
            return Err(ConfigError::AlreadyInitialized(dir));
        }
        std::fs::create_dir_all(&dir).map_err(io(&dir))?;

        let config_path = dir.join(CONFIG_FILE);
        std::fs::write(&config_path, self.to_json()).map_err(io(&config_path))?;

        let registry_path = self.registry_path(&dir);
        std::fs::write(&registry_path, Registry::default().to_json()).map_err(io(&registry_path))?;
        Ok(dir)
    }
}

fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError {
    let path = path.to_path_buf();
    move |source| ConfigError::Io { path, source }
}
