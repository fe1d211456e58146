use crate::OutputFormatter;
use wiretag_enforce::types::{AuditResult, CheckResult, CoverageResult, TagResult};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_tag(&self, result: &TagResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_coverage(&self, result: &CoverageResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_audit(&self, result: &AuditResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
