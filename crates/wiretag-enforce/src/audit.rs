//! Whole-tree audit: check every registry entry against the parsed sources,
//! then run coverage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use wiretag_core::config::WiretagConfig;
use wiretag_core::registry::Registry;
use wiretag_core::types::TypeDescriptor;
use wiretag_parsers::{GoStructParser, ScanError, SourceWalker, WalkOptions};

use crate::compliance::ComplianceChecker;
use crate::coverage::{self, CoverageScanner};
use crate::error::EnforceError;
use crate::types::{AuditResult, CheckResult, ComplianceReport, CoverageResult};

/// Qualified type name -> descriptor, for every top-level type in the
/// scanned sources.
#[derive(Debug, Default)]
pub struct SourceIndex {
    types: HashMap<String, TypeDescriptor>,
    files: usize,
}

impl SourceIndex {
    /// Parse `files` in parallel, one parser per worker. On a name clash the
    /// file that sorts first wins.
    pub fn build(root: &Path, files: &[PathBuf]) -> Result<Self, EnforceError> {
        let parsed: Vec<_> = files
            .par_iter()
            .map_init(GoStructParser::new, |parser, path| match parser {
                Ok(parser) => parser.parse_file(path),
                Err(e) => Err(ScanError::Parse(e.clone())),
            })
            .collect();

        let mut types = HashMap::new();
        for file in parsed {
            let file = file?;
            for mut ty in file.types {
                if let Some(loc) = ty.location.as_mut() {
                    loc.file = wiretag_parsers::walker::relative_path(root, &loc.file).into();
                }
                if types.contains_key(&ty.name) {
                    tracing::warn!(
                        "{} declared in more than one package directory, checking the first",
                        ty.name
                    );
                    continue;
                }
                types.insert(ty.name.clone(), ty);
            }
        }

        Ok(Self {
            types,
            files: files.len(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn files(&self) -> usize {
        self.files
    }
}

/// The audit runner. Holds the loaded configuration and registry; never
/// writes to the audited tree.
pub struct Auditor {
    root: PathBuf,
    config: WiretagConfig,
    registry: Registry,
    registry_text: String,
    checker: ComplianceChecker,
}

impl Auditor {
    pub fn new(root: &Path, config: WiretagConfig, registry: Registry, registry_text: String) -> Self {
        let checker = ComplianceChecker::from_config(&config);
        Self {
            root: root.to_path_buf(),
            config,
            registry,
            registry_text,
            checker,
        }
    }

    /// Load `.wiretag/` under `root`: config (lenient) and registry (strict).
    pub fn load(root: &Path, wiretag_dir: &Path) -> Result<Self, EnforceError> {
        let config = WiretagConfig::load(wiretag_dir);
        let (registry, text) = Registry::load(&config.registry_path(wiretag_dir))?;
        Ok(Self::new(root, config, registry, text))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &WiretagConfig {
        &self.config
    }

    fn source_files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let options = WalkOptions::from_config(&self.config)?;
        SourceWalker::new(&self.root, options).walk()
    }

    /// Check registry entries, or only the named ones when `only` is not
    /// empty. Reports come back sorted by type name.
    pub fn check(&self, only: &[String]) -> Result<CheckResult, EnforceError> {
        let files = self.source_files()?;
        let index = SourceIndex::build(&self.root, &files)?;
        tracing::debug!("indexed {} type(s) from {} file(s)", index.len(), index.files());

        let unknown: Vec<String> = only
            .iter()
            .filter(|name| !self.registry.contains(name))
            .cloned()
            .collect();
        let entries: Vec<_> = self
            .registry
            .iter()
            .filter(|(name, _)| only.is_empty() || only.iter().any(|o| o.as_str() == *name))
            .collect();

        let checked: Vec<Result<Option<ComplianceReport>, EnforceError>> = entries
            .par_iter()
            .map(|(name, policy)| match index.get(name) {
                Some(ty) => self.checker.check(ty, Some(*policy)).map(Some),
                // Disabled entries pass without a declaration to check.
                None if policy.disabled => Ok(Some(ComplianceReport::disabled(*name, None))),
                None => Ok(None),
            })
            .collect();

        let mut reports = Vec::new();
        let mut unresolved = Vec::new();
        for ((name, _), result) in entries.iter().zip(checked) {
            match result? {
                Some(report) => reports.push(report),
                None => {
                    tracing::debug!("{name}: not found in sources");
                    unresolved.push(name.to_string());
                }
            }
        }
        reports.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        unresolved.sort();

        Ok(CheckResult::new(reports, unresolved, unknown))
    }

    pub fn coverage(&self) -> Result<CoverageResult, EnforceError> {
        let scanner = CoverageScanner::from_config(&self.config)?;
        Ok(coverage::coverage(
            &scanner,
            &self.root,
            &self.registry,
            &self.registry_text,
        )?)
    }

    pub fn audit(&self) -> Result<AuditResult, EnforceError> {
        let check = self.check(&[])?;
        let coverage = self.coverage()?;
        Ok(AuditResult::new(check, coverage))
    }
}
