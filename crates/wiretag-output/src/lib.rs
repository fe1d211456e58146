//! Output formatters for wiretag command results.
//!
//! - **Human** (default): compiler-style diagnostics on stdout
//! - **JSON** (`--json`): the result structs, pretty-printed

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use wiretag_enforce::types::{AuditResult, CheckResult, CoverageResult, TagResult};

pub trait OutputFormatter {
    fn format_tag(&self, result: &TagResult) -> String;
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_coverage(&self, result: &CoverageResult) -> String;
    fn format_audit(&self, result: &AuditResult) -> String;
}
