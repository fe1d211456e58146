use crate::human_helpers::{
    format_gap_human, format_suggestions_human, format_unconstructed_human, format_unknown_human,
    format_unresolved_human, format_violation_human,
};
use crate::OutputFormatter;
use wiretag_enforce::types::{AuditResult, CheckResult, CoverageResult, TagResult};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_tag(&self, result: &TagResult) -> String {
        let width = result
            .tags
            .iter()
            .map(|t| t.identifier.len())
            .max()
            .unwrap_or(0);
        result
            .tags
            .iter()
            .map(|t| format!("{:<width$}  {}\n", t.identifier, t.expected, width = width))
            .collect()
    }

    fn format_check(&self, result: &CheckResult) -> String {
        if result.is_clean() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for report in &result.reports {
            for v in &report.violations {
                out.push_str(&format_violation_human(v, report));
            }
            out.push_str(&format_suggestions_human(report));
        }
        for name in &result.unresolved {
            out.push_str(&format_unresolved_human(name));
        }
        for name in &result.unknown {
            out.push_str(&format_unknown_human(name));
        }

        let failing = result.reports.iter().filter(|r| !r.is_pass()).count();
        out.push_str(&format!(
            "\n{} violation(s) in {} of {} type(s), {} unresolved\n",
            result.violation_count(),
            failing,
            result.reports.len(),
            result.unresolved.len() + result.unknown.len(),
        ));
        out
    }

    fn format_coverage(&self, result: &CoverageResult) -> String {
        if result.is_clean() {
            return String::new();
        }

        let mut out = String::new();
        for g in &result.gaps {
            out.push_str(&format_gap_human(g));
        }
        for name in &result.unconstructed {
            out.push_str(&format_unconstructed_human(name));
        }
        out.push_str(&format!(
            "\n{} unregistered type(s) of {} discovered in {} file(s)\n",
            result.gaps.len() + result.unconstructed.len(),
            result.discovered.len(),
            result.files_scanned,
        ));
        out
    }

    fn format_audit(&self, result: &AuditResult) -> String {
        let mut out = self.format_check(&result.check);
        out.push_str(&self.format_coverage(&result.coverage));
        out
    }
}
