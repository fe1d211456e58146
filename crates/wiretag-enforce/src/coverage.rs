//! Coverage: every exported struct in source needs a registry entry.

use std::collections::HashSet;
use std::path::Path;

use wiretag_core::config::{ScanMode, WiretagConfig};
use wiretag_core::registry::{Registry, RegistryEntry};
use wiretag_core::types::DiscoveredType;
use wiretag_parsers::walker::relative_path;
use wiretag_parsers::{heuristic, GoStructParser, ScanError, SourceWalker, WalkOptions};

use crate::types::{CoverageResult, Gap};

/// Files visited and the exported structs found in them.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub discovered: Vec<DiscoveredType>,
}

#[derive(Debug, Clone, Default)]
pub struct CoverageScanner {
    options: WalkOptions,
    mode: ScanMode,
}

impl CoverageScanner {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            options,
            mode: ScanMode::Heuristic,
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn from_config(config: &WiretagConfig) -> Result<Self, ScanError> {
        Ok(Self::new(WalkOptions::from_config(config)?).with_mode(config.scan_mode))
    }

    /// Exported structs under `root`, in discovery order, duplicates collapsed
    /// by qualified name (first discovery wins).
    pub fn scan(&self, root: &Path) -> Result<Vec<DiscoveredType>, ScanError> {
        Ok(self.scan_tree(root)?.discovered)
    }

    pub fn scan_tree(&self, root: &Path) -> Result<ScanSummary, ScanError> {
        let files = SourceWalker::new(root, self.options.clone()).walk()?;
        let mut parser = match self.mode {
            ScanMode::Syntax => Some(GoStructParser::new()?),
            ScanMode::Heuristic => None,
        };

        let mut seen = HashSet::new();
        let mut discovered = Vec::new();
        for path in &files {
            let found = match parser.as_mut() {
                Some(parser) => parser.parse_file(path)?.discovered(),
                None => heuristic::scan_file(path)?,
            };
            for mut ty in found {
                if !seen.insert(ty.qualified_name.clone()) {
                    tracing::debug!(
                        "{} declared again in {}, keeping first",
                        ty.qualified_name,
                        path.display()
                    );
                    continue;
                }
                ty.file = relative_path(root, &ty.file).into();
                discovered.push(ty);
            }
        }

        tracing::debug!(
            "scanned {} file(s), {} exported struct(s)",
            files.len(),
            discovered.len()
        );
        Ok(ScanSummary {
            files_scanned: files.len(),
            discovered,
        })
    }
}

/// Discovered types with no registry entry, in discovery order.
pub fn gaps(discovered: &[DiscoveredType], registry: &Registry) -> Vec<String> {
    discovered
        .iter()
        .filter(|d| !registry.contains(&d.qualified_name))
        .map(|d| d.qualified_name.clone())
        .collect()
}

/// Discovered types whose quoted qualified name never appears in the
/// registry file text.
///
/// A textual match: an entry naming the wrong type still satisfies it.
/// After gaps are filtered out every remaining type has a parsed entry, so
/// its quoted name is in the text unless the file spells it with `\u`
/// escapes; that is the only case this catches.
pub fn unconstructed(discovered: &[DiscoveredType], registry_text: &str) -> Vec<String> {
    discovered
        .iter()
        .filter(|d| !registry_text.contains(&format!("\"{}\"", d.qualified_name)))
        .map(|d| d.qualified_name.clone())
        .collect()
}

/// Scan, diff against the registry, and cross-check the registry text.
/// A type reported as a gap is not reported again as unconstructed.
pub fn coverage(
    scanner: &CoverageScanner,
    root: &Path,
    registry: &Registry,
    registry_text: &str,
) -> Result<CoverageResult, ScanError> {
    let summary = scanner.scan_tree(root)?;
    let missing: HashSet<String> = gaps(&summary.discovered, registry).into_iter().collect();

    let gap_list = summary
        .discovered
        .iter()
        .filter(|d| missing.contains(&d.qualified_name))
        .map(|d| Gap {
            type_name: d.qualified_name.clone(),
            file: d.file.to_string_lossy().into_owned(),
            line: d.line,
            skeleton: RegistryEntry::skeleton(&d.qualified_name),
        })
        .collect();

    let unconstructed = unconstructed(&summary.discovered, registry_text)
        .into_iter()
        .filter(|name| !missing.contains(name))
        .collect();

    Ok(CoverageResult::new(
        summary.files_scanned,
        summary.discovered,
        gap_list,
        unconstructed,
    ))
}
