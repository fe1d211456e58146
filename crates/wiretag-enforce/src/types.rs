use serde::{Deserialize, Serialize};

use wiretag_core::types::{DiscoveredType, SourceLocation};

pub const RESULT_VERSION: &str = "0.1.0";

pub const CODE_MISSING: &str = "T001";
pub const CODE_MISMATCH: &str = "T002";
pub const CODE_GAP: &str = "T003";
pub const CODE_UNCONSTRUCTED: &str = "T004";
pub const CODE_UNRESOLVED: &str = "T005";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationClass {
    Missing,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub class: ViolationClass,
    pub type_name: String,
    pub field: String,
    pub tag_key: String,
    pub declared: Option<String>,
    pub expected: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
}

/// Result of checking one structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub type_name: String,
    pub location: Option<SourceLocation>,
    /// Checking was switched off by policy.
    pub disabled: bool,
    pub violations: Vec<Violation>,
    /// Field declarations carrying every missing tag, ready to paste.
    pub suggestions: Vec<String>,
}

impl ComplianceReport {
    pub fn empty(type_name: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            type_name: type_name.into(),
            location,
            disabled: false,
            violations: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Passing report for a type whose checking is switched off.
    pub fn disabled(type_name: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            disabled: true,
            ..Self::empty(type_name, location)
        }
    }

    pub fn is_pass(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_pass() {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub reports: Vec<ComplianceReport>,
    /// Registered types not declared anywhere in the scanned sources.
    pub unresolved: Vec<String>,
    /// Requested types with no registry entry.
    pub unknown: Vec<String>,
}

impl CheckResult {
    pub fn new(reports: Vec<ComplianceReport>, unresolved: Vec<String>, unknown: Vec<String>) -> Self {
        let clean = reports.iter().all(ComplianceReport::is_pass) && unresolved.is_empty() && unknown.is_empty();
        Self {
            version: RESULT_VERSION.to_string(),
            command: "check".to_string(),
            status: status(clean),
            reports,
            unresolved,
            unknown,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == "ok"
    }

    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(|r| r.violations.len()).sum()
    }
}

/// A discovered type with no registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub type_name: String,
    pub file: String,
    pub line: u32,
    /// Registry entry to paste into `registry.json`.
    pub skeleton: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResult {
    pub version: String,
    pub command: String,
    pub status: String,
    pub files_scanned: usize,
    pub discovered: Vec<DiscoveredType>,
    pub gaps: Vec<Gap>,
    /// Registered types whose quoted name is absent from the registry text.
    pub unconstructed: Vec<String>,
}

impl CoverageResult {
    pub fn new(
        files_scanned: usize,
        discovered: Vec<DiscoveredType>,
        gaps: Vec<Gap>,
        unconstructed: Vec<String>,
    ) -> Self {
        let clean = gaps.is_empty() && unconstructed.is_empty();
        Self {
            version: RESULT_VERSION.to_string(),
            command: "coverage".to_string(),
            status: status(clean),
            files_scanned,
            discovered,
            gaps,
            unconstructed,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub version: String,
    pub command: String,
    pub status: String,
    pub check: CheckResult,
    pub coverage: CoverageResult,
}

impl AuditResult {
    pub fn new(check: CheckResult, coverage: CoverageResult) -> Self {
        Self {
            version: RESULT_VERSION.to_string(),
            command: "audit".to_string(),
            status: status(check.is_clean() && coverage.is_clean()),
            check,
            coverage,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMapping {
    pub identifier: String,
    pub expected: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResult {
    pub version: String,
    pub command: String,
    pub tags: Vec<TagMapping>,
}

impl TagResult {
    pub fn new(tags: Vec<TagMapping>) -> Self {
        Self {
            version: RESULT_VERSION.to_string(),
            command: "tag".to_string(),
            tags,
        }
    }
}

fn status(clean: bool) -> String {
    let status = if clean { "ok" } else { "error" };
    status.to_string()
}
