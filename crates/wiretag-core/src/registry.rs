//! The audit registry: which types are checked, and under which policy.
//!
//! Stored as `.wiretag/registry.json`:
//!
//! ```json
//! { "entries": [ { "type": "ldap.UserGroup", "policy": { "allow_field_mismatch": true, "allowed_fields": ["dn"] } } ] }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::policy::ExceptionPolicy;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse registry {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate registry entry for {0}")]
    DuplicateEntry(String),
    #[error("registry entry {0:?} is not a qualified `package.Type` name")]
    InvalidName(String),
}

/// One registry entry as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "ExceptionPolicy::is_strict")]
    pub policy: ExceptionPolicy,
}

impl RegistryEntry {
    pub fn new(type_name: impl Into<String>, policy: ExceptionPolicy) -> Self {
        Self {
            type_name: type_name.into(),
            policy,
        }
    }

    pub fn strict(type_name: impl Into<String>) -> Self {
        Self::new(type_name, ExceptionPolicy::strict())
    }

    /// Ready-to-paste JSON for a new strict entry.
    pub fn skeleton(type_name: &str) -> String {
        format!("{{ \"type\": \"{type_name}\", \"policy\": {{}} }}")
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    entries: Vec<RegistryEntry>,
}

/// Qualified type name -> policy. Built once, read-only during an audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, ExceptionPolicy>,
}

impl Registry {
    /// Build a registry, rejecting duplicate and unqualified names.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let valid = entry
                .type_name
                .split_once('.')
                .is_some_and(|(pkg, name)| !pkg.is_empty() && !name.is_empty());
            if !valid {
                return Err(RegistryError::InvalidName(entry.type_name));
            }
            if map.contains_key(&entry.type_name) {
                return Err(RegistryError::DuplicateEntry(entry.type_name));
            }
            map.insert(entry.type_name, entry.policy);
        }
        Ok(Self { entries: map })
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(text).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_entries(file.entries)
    }

    /// Load a registry file, returning the registry and the raw text
    /// (the coverage cross-check needs the latter).
    pub fn load(path: &Path) -> Result<(Self, String), RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&text, path)?;
        Ok((registry, text))
    }

    pub fn policy(&self, type_name: &str) -> Option<&ExceptionPolicy> {
        self.entries.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExceptionPolicy)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> String {
        let file = RegistryFile {
            entries: self
                .iter()
                .map(|(name, policy)| RegistryEntry::new(name, policy.clone()))
                .collect(),
        };
        serde_json::to_string_pretty(&file).unwrap_or_else(|_| "{ \"entries\": [] }".to_string())
    }
}
