use std::path::Path;

use wiretag_output::OutputFormatter;

use super::{emit, load_auditor};

/// Run `wiretag audit`: the CI entry point.
pub fn run(formatter: &dyn OutputFormatter, root: &Path) -> i32 {
    let auditor = match load_auditor(root, "audit") {
        Ok(a) => a,
        Err(code) => return code,
    };
    match auditor.audit() {
        Ok(result) => {
            emit(&formatter.format_audit(&result));
            tracing::debug!(
                "audit: {} type(s) checked, {} discovered, status {}",
                result.check.reports.len(),
                result.coverage.discovered.len(),
                result.status
            );
            if result.is_clean() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            tracing::error!("wiretag audit: {}", e);
            2
        }
    }
}
