use wiretag_core::types::SourceLocation;
use wiretag_enforce::types::{ComplianceReport, Gap, Violation, CODE_GAP, CODE_UNCONSTRUCTED, CODE_UNRESOLVED};

pub(crate) fn format_violation_human(v: &Violation, report: &ComplianceReport) -> String {
    let mut out = format!("error[{}]: {}: {}\n", v.code, v.type_name, v.message);
    let file = v
        .file
        .clone()
        .or_else(|| report.location.as_ref().map(location_file));
    match (file, v.line.or(report.location.as_ref().map(|l| l.line))) {
        (Some(file), Some(line)) => out.push_str(&format!("  --> {}:{}\n", file, line)),
        (Some(file), None) => out.push_str(&format!("  --> {}\n", file)),
        _ => {}
    }
    out
}

pub(crate) fn format_suggestions_human(report: &ComplianceReport) -> String {
    if report.suggestions.is_empty() {
        return String::new();
    }
    let mut out = format!("   = suggested struct changes for {}:\n", report.type_name);
    for s in &report.suggestions {
        out.push_str(&format!("       {}\n", s));
    }
    out
}

pub(crate) fn format_unresolved_human(name: &str) -> String {
    format!(
        "error[{}]: registry entry {} does not match any struct in the scanned sources\n   = fix: remove the entry, or check exclude_paths / exclude_files\n",
        CODE_UNRESOLVED, name,
    )
}

pub(crate) fn format_unknown_human(name: &str) -> String {
    format!(
        "error[{}]: {} has no registry entry\n   = fix: add {{ \"type\": \"{}\" }} to the registry\n",
        CODE_UNRESOLVED, name, name,
    )
}

pub(crate) fn format_gap_human(g: &Gap) -> String {
    format!(
        "error[{}]: exported struct {} has no registry entry\n  --> {}:{}\n   = fix: add {}\n",
        CODE_GAP, g.type_name, g.file, g.line, g.skeleton,
    )
}

pub(crate) fn format_unconstructed_human(name: &str) -> String {
    format!(
        "error[{}]: \"{}\" does not appear in the registry file\n   = fix: name the type literally as \"type\": \"{}\"\n",
        CODE_UNCONSTRUCTED, name, name,
    )
}

fn location_file(l: &SourceLocation) -> String {
    l.file.to_string_lossy().into_owned()
}
