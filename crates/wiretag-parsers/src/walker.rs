use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use wiretag_core::config::WiretagConfig;

use crate::error::ScanError;

/// Directories never holding audited production types.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// Which files under the root are eligible for auditing.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Path substrings, matched against `/`-prefixed root-relative paths.
    pub exclude_paths: Vec<String>,
    /// Exact file names or root-relative path suffixes.
    pub exclude_files: Vec<String>,
    ignore: Option<GlobSet>,
}

impl WalkOptions {
    pub fn new(exclude_paths: Vec<String>, exclude_files: Vec<String>) -> Self {
        Self {
            exclude_paths,
            exclude_files,
            ignore: None,
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self, ScanError> {
        if patterns.is_empty() {
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| ScanError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| ScanError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;
        self.ignore = Some(set);
        Ok(self)
    }

    pub fn from_config(config: &WiretagConfig) -> Result<Self, ScanError> {
        Self::new(config.exclude_paths.clone(), config.exclude_files.clone())
            .with_ignore_patterns(&config.ignore_patterns)
    }

    /// Whether a root-relative file path is excluded.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        let rooted = format!("/{}", rel_path.trim_start_matches('/'));
        if self.exclude_paths.iter().any(|p| rooted.contains(p.as_str())) {
            return true;
        }
        let file_name = rooted.rsplit('/').next().unwrap_or_default();
        if self
            .exclude_files
            .iter()
            .any(|f| f == file_name || rooted.ends_with(&format!("/{}", f.trim_start_matches('/'))))
        {
            return true;
        }
        self.ignore
            .as_ref()
            .is_some_and(|set| set.is_match(rel_path))
    }
}

/// Go source files eligible for auditing, in sorted order.
pub struct SourceWalker {
    root: PathBuf,
    options: WalkOptions,
}

impl SourceWalker {
    pub fn new(root: &Path, options: WalkOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>, ScanError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e));

        for result in walker {
            let entry = result.map_err(|source| ScanError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            if !is_go_source(&path) {
                continue;
            }
            let rel = relative_path(&self.root, &path);
            if self.options.is_excluded(&rel) {
                tracing::debug!("skipping excluded file {}", rel);
                continue;
            }
            files.push(path);
        }

        Ok(files)
    }
}

/// `.go` files that are not `_test.go` files.
pub fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Root-relative path with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
